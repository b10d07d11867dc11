// pipegen-core/src/domain/expand.rs
//
// Combination expander: turns one sink/source declaration into the concrete
// (env, org, schema) triples it must materialize. Iteration follows the
// declared list order (envs x orgs x schemas), so identical input always
// yields identical output order.

use crate::domain::model::{PipelineConfig, Sink, Source};
use crate::domain::policy::{DeploymentPolicy, ExcludeRule, is_excluded};

/// One accepted deployment of a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub env: String,
    pub org: String,
    pub schema: String,
    pub capture_delete_enabled: bool,
}

/// Expand a sink into its accepted deployments.
///
/// Pinned pairs bypass the whitelist entirely; the exclusion rules always
/// apply. `source_db` is only used for exclusion matching.
pub fn expand_sink(
    sink: &Sink,
    source_db: &str,
    pinned: &[PipelineConfig],
    policy: &DeploymentPolicy,
    excluded: &[ExcludeRule],
) -> Vec<Deployment> {
    let mut accepted = Vec::new();

    let mut push = |env: &str, org: &str| {
        if is_excluded(excluded, env, org, &sink.database, source_db) {
            tracing::debug!(env, org, sink = %sink.database, "combination excluded by rule");
            return;
        }
        for schema in &sink.deploy_schema {
            accepted.push(Deployment {
                env: env.to_string(),
                org: org.to_string(),
                schema: schema.clone(),
                capture_delete_enabled: capture_delete_enabled(sink, env),
            });
        }
    };

    if pinned.is_empty() {
        for env in &sink.deploy_env {
            for org in &sink.deploy_org {
                if policy.accept(env, org) {
                    push(env, org);
                }
            }
        }
    } else {
        for pair in pinned {
            push(&pair.env, &pair.org);
        }
    }

    accepted
}

/// Expand a source into its accepted (env, org) pairs. Sources have no
/// schema axis; aggregation by (database, env, org) happens in the compiler.
/// Only wildcard-sink rules can exclude a source.
pub fn expand_source(
    source: &Source,
    pinned: &[PipelineConfig],
    policy: &DeploymentPolicy,
    excluded: &[ExcludeRule],
) -> Vec<(String, String)> {
    let mut accepted = Vec::new();

    let mut push = |env: &str, org: &str| {
        if is_excluded(excluded, env, org, "", &source.database) {
            return;
        }
        accepted.push((env.to_string(), org.to_string()));
    };

    if pinned.is_empty() {
        for env in &source.deploy_env {
            for org in &source.deploy_org {
                if policy.accept(env, org) {
                    push(env, org);
                }
            }
        }
    } else {
        for pair in pinned {
            push(&pair.env, &pair.org);
        }
    }

    accepted
}

fn capture_delete_enabled(sink: &Sink, env: &str) -> bool {
    sink.capture_delete_all || sink.capture_delete_envs.iter().any(|e| e == env)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sink() -> Sink {
        Sink {
            database: "eureka".into(),
            deploy_env: vec!["local".into(), "prod".into()],
            deploy_org: vec!["manabie".into(), "jprep".into(), "e2e".into()],
            deploy_schema: vec!["public".into()],
            ..Sink::default()
        }
    }

    #[test]
    fn test_whitelist_expansion_order_is_declared_order() {
        let deployments = expand_sink(&sink(), "bob", &[], &DeploymentPolicy::default(), &[]);

        let pairs: Vec<(&str, &str)> = deployments
            .iter()
            .map(|d| (d.env.as_str(), d.org.as_str()))
            .collect();
        // local admits manabie and e2e; prod admits everything but e2e.
        assert_eq!(
            pairs,
            vec![
                ("local", "manabie"),
                ("local", "e2e"),
                ("prod", "manabie"),
                ("prod", "jprep"),
            ]
        );
    }

    #[test]
    fn test_pinned_pairs_bypass_whitelist() {
        let pinned = vec![PipelineConfig {
            env: "prod".into(),
            org: "jprep".into(),
        }];
        let mut sink = sink();
        // (prod, jprep) would fail accept() if jprep were denied; make the
        // point with a pair the whitelist would never generate.
        sink.deploy_env = vec!["local".into()];
        sink.deploy_org = vec!["jprep".into()];

        let deployments = expand_sink(&sink, "bob", &pinned, &DeploymentPolicy::default(), &[]);

        assert_eq!(deployments.len(), 1);
        assert_eq!(deployments[0].env, "prod");
        assert_eq!(deployments[0].org, "jprep");
    }

    #[test]
    fn test_exclusion_still_applies_to_pinned_pairs() {
        let pinned = vec![PipelineConfig {
            env: "prod".into(),
            org: "jprep".into(),
        }];
        let rules = vec![ExcludeRule::parse(":jprep::").unwrap()];

        let deployments = expand_sink(&sink(), "bob", &pinned, &DeploymentPolicy::default(), &rules);
        assert!(deployments.is_empty());
    }

    #[test]
    fn test_capture_delete_flag_per_env() {
        let mut sink = sink();
        sink.capture_delete_envs = vec!["prod".into()];

        let deployments = expand_sink(&sink, "bob", &[], &DeploymentPolicy::default(), &[]);
        for d in &deployments {
            assert_eq!(d.capture_delete_enabled, d.env == "prod");
        }

        sink.capture_delete_all = true;
        let deployments = expand_sink(&sink, "bob", &[], &DeploymentPolicy::default(), &[]);
        assert!(deployments.iter().all(|d| d.capture_delete_enabled));
    }

    #[test]
    fn test_schema_axis_multiplies_deployments() {
        let mut sink = sink();
        sink.deploy_env = vec!["local".into()];
        sink.deploy_org = vec!["manabie".into()];
        sink.deploy_schema = vec!["public".into(), "inventory".into()];

        let deployments = expand_sink(&sink, "bob", &[], &DeploymentPolicy::default(), &[]);
        let schemas: Vec<&str> = deployments.iter().map(|d| d.schema.as_str()).collect();
        assert_eq!(schemas, vec!["public", "inventory"]);
    }

    #[test]
    fn test_source_expansion_ignores_sink_specific_rules() {
        let source = Source {
            deploy_env: vec!["local".into()],
            deploy_org: vec!["manabie".into()],
            database: "bob".into(),
            ..Source::default()
        };
        // A rule scoped to one sink database must not kill the shared source.
        let sink_scoped = vec![ExcludeRule::parse("::eureka:").unwrap()];
        let pairs = expand_source(&source, &[], &DeploymentPolicy::default(), &sink_scoped);
        assert_eq!(pairs, vec![("local".to_string(), "manabie".to_string())]);

        // A wildcard-sink rule does.
        let wildcard = vec![ExcludeRule::parse("local:::").unwrap()];
        let pairs = expand_source(&source, &[], &DeploymentPolicy::default(), &wildcard);
        assert!(pairs.is_empty());
    }
}
