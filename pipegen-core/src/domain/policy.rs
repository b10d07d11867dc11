// pipegen-core/src/domain/policy.rs
//
// Deployment policy: which (env, org) combinations an artifact may be
// deployed to, and the wildcard exclusion rules that veto them.
// Everything lives in explicit value objects injected into the expander,
// so a deployment can swap the tables without recompiling.

use crate::domain::error::DomainError;
use std::collections::HashMap;

/// Org membership used when a sink declares no `deployOrg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgDefault {
    Fixed(Vec<String>),
    /// Every org of the definition file's global list.
    AllGlobal,
}

/// The fixed env/org matrix of one deployment.
#[derive(Debug, Clone)]
pub struct DeploymentPolicy {
    /// Envs accepted under the whitelist, with the orgs each one admits.
    allowed: HashMap<String, Vec<String>>,
    /// Per-env org membership used to default empty `deployOrg` lists.
    defaults: HashMap<String, OrgDefault>,
    production_env: String,
    /// Orgs denied in production (everything else is accepted there).
    production_denied: Vec<String>,
    pre_production_env: String,
    pre_production_orgs: Vec<String>,
}

impl Default for DeploymentPolicy {
    fn default() -> Self {
        let owned = |orgs: &[&str]| orgs.iter().map(|o| o.to_string()).collect::<Vec<_>>();
        Self {
            allowed: HashMap::from([
                ("local".to_string(), owned(&["manabie", "e2e"])),
                ("stag".to_string(), owned(&["manabie", "jprep"])),
                ("uat".to_string(), owned(&["manabie", "jprep"])),
            ]),
            defaults: HashMap::from([
                ("local".to_string(), OrgDefault::Fixed(owned(&["manabie"]))),
                (
                    "stag".to_string(),
                    OrgDefault::Fixed(owned(&["manabie", "jprep"])),
                ),
                ("prod".to_string(), OrgDefault::AllGlobal),
            ]),
            production_env: "prod".to_string(),
            production_denied: owned(&["e2e"]),
            pre_production_env: "dorp".to_string(),
            pre_production_orgs: owned(&["tokyo"]),
        }
    }
}

impl DeploymentPolicy {
    /// Whitelist check. Only consulted when no pinned (env, org) pairs are
    /// declared for the sink/source.
    pub fn accept(&self, env: &str, org: &str) -> bool {
        if env == self.production_env {
            return !self.production_denied.iter().any(|o| o == org);
        }
        if env == self.pre_production_env {
            return self.pre_production_orgs.iter().any(|o| o == org);
        }
        self.allowed
            .get(env)
            .is_some_and(|orgs| orgs.iter().any(|o| o == org))
    }

    /// Orgs a defaulted sink/source deploys to in `env`. Unknown envs
    /// contribute nothing.
    pub fn default_orgs(&self, env: &str, global_orgs: &[String]) -> Vec<String> {
        match self.defaults.get(env) {
            Some(OrgDefault::Fixed(orgs)) => orgs.clone(),
            Some(OrgDefault::AllGlobal) => global_orgs.to_vec(),
            None => Vec::new(),
        }
    }

    /// The synthetic pre-production environment ("dorp"), appended to
    /// defaulted env lists when the definition opts in.
    pub fn pre_production_env(&self) -> &str {
        &self.pre_production_env
    }
}

/// One wildcard exclusion rule. An empty field matches any value in that
/// position (it never means "match the empty string").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeRule {
    pub env: String,
    pub org: String,
    pub sink_database: String,
    pub source_database: String,
}

impl ExcludeRule {
    /// Parse the CLI form `env:org:sinkDatabase:sourceDatabase`.
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = spec.split(':').collect();
        if segments.len() != 4 {
            return Err(DomainError::InvalidRuleSpec(spec.to_string()));
        }
        Ok(Self {
            env: segments[0].to_string(),
            org: segments[1].to_string(),
            sink_database: segments[2].to_string(),
            source_database: segments[3].to_string(),
        })
    }

    /// Conjunctive match across the four fields.
    pub fn matches(&self, env: &str, org: &str, sink_db: &str, source_db: &str) -> bool {
        field_matches(&self.env, env)
            && field_matches(&self.org, org)
            && field_matches(&self.sink_database, sink_db)
            && field_matches(&self.source_database, source_db)
    }

    /// Path form used by the reconciler's ignore predicate: every non-empty
    /// field must appear as a substring of the path.
    pub fn matches_path(&self, path: &str) -> bool {
        [
            &self.env,
            &self.org,
            &self.sink_database,
            &self.source_database,
        ]
        .into_iter()
        .filter(|field| !field.is_empty())
        .all(|field| path.contains(field.as_str()))
    }
}

fn field_matches(rule_field: &str, value: &str) -> bool {
    rule_field.is_empty() || rule_field == value
}

/// Disjunctive match across rules.
pub fn is_excluded(
    rules: &[ExcludeRule],
    env: &str,
    org: &str,
    sink_db: &str,
    source_db: &str,
) -> bool {
    rules
        .iter()
        .any(|rule| rule.matches(env, org, sink_db, source_db))
}

/// True when any rule protects `path` from reconciliation.
pub fn is_protected(rules: &[ExcludeRule], path: &str) -> bool {
    rules.iter().any(|rule| rule.matches_path(path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_whitelist_boundaries() {
        let policy = DeploymentPolicy::default();

        assert!(!policy.accept("prod", "e2e"));
        assert!(policy.accept("prod", "anything-else"));
        assert!(policy.accept("dorp", "tokyo"));
        assert!(!policy.accept("dorp", "manabie"));
        assert!(policy.accept("local", "manabie"));
        assert!(!policy.accept("local", "jprep"));
        assert!(policy.accept("uat", "jprep"));
        // Unlisted envs accept nothing under the whitelist branch.
        assert!(!policy.accept("preprod", "manabie"));
    }

    #[test]
    fn test_default_orgs_membership() {
        let policy = DeploymentPolicy::default();
        let global = vec!["manabie".to_string(), "jprep".to_string(), "aic".to_string()];

        assert_eq!(policy.default_orgs("local", &global), vec!["manabie"]);
        assert_eq!(
            policy.default_orgs("stag", &global),
            vec!["manabie", "jprep"]
        );
        assert_eq!(policy.default_orgs("prod", &global), global);
        assert!(policy.default_orgs("uat", &global).is_empty());
    }

    #[test]
    fn test_exclude_rule_wildcards() {
        let rule = ExcludeRule {
            env: String::new(),
            org: "manabie".to_string(),
            sink_database: String::new(),
            source_database: String::new(),
        };

        assert!(rule.matches("stag", "manabie", "eureka", "bob"));
        assert!(rule.matches("prod", "manabie", "fatima", "bob"));
        assert!(!rule.matches("stag", "jprep", "eureka", "bob"));
    }

    #[test]
    fn test_exclusion_is_disjunctive_across_rules() -> Result<()> {
        let rules = vec![ExcludeRule::parse(":e2e::")?, ExcludeRule::parse("uat:::")?];
        assert!(is_excluded(&rules, "prod", "e2e", "eureka", "bob"));
        assert!(is_excluded(&rules, "uat", "manabie", "eureka", "bob"));
        assert!(!is_excluded(&rules, "stag", "manabie", "eureka", "bob"));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(ExcludeRule::parse("a:b:c").is_err());
        assert!(ExcludeRule::parse("a:b:c:d:e").is_err());

        let rule = ExcludeRule::parse(":manabie::").unwrap();
        assert_eq!(rule.org, "manabie");
        assert!(rule.env.is_empty());
    }

    #[test]
    fn test_path_protection_matches_substrings() -> Result<()> {
        let rules = vec![ExcludeRule::parse("local:::")?];

        assert!(is_protected(
            &rules,
            "manabie/local/bob_to_eureka_table1.json"
        ));
        assert!(!is_protected(&rules, "manabie/uat/bob_to_eureka_table1.json"));
        Ok(())
    }
}
