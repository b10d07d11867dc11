// pipegen-core/src/domain/model.rs
//
// In-memory representation of one YAML pipeline definition file.
// Deserialized once, resolved once (application::resolve), then read-only
// for the rest of the run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root object of a definition file: one source database, its global
/// deployment matrix, and the ordered list of pipelines to capture.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineSet {
    pub database: String,

    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default)]
    pub envs: Vec<String>,

    #[serde(default)]
    pub orgs: Vec<String>,

    #[serde(rename = "defaultHeartBeatQuery", default)]
    pub default_heartbeat_query: String,

    #[serde(rename = "customHeartbeatQuery", default)]
    pub custom_heartbeat_query: String,

    /// Databases flagged here use `customHeartbeatQuery` instead of the default.
    #[serde(rename = "dbUseCustomHeartBeat", default)]
    pub db_use_custom_heartbeat: Vec<String>,

    /// Adds the synthetic pre-production environment to every defaulted env list.
    #[serde(rename = "preProductionEnabled", default)]
    pub pre_production_enabled: bool,

    /// Pinned (env, org) pairs inherited by every pipeline of the file.
    #[serde(rename = "pipelineConfigs", default)]
    pub pipeline_configs: Vec<PipelineConfig>,

    #[serde(default)]
    pub datapipelines: Vec<Pipeline>,
}

/// An explicit (env, org) pair that bypasses the whitelist-based expansion.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub env: String,
    pub org: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Pipeline {
    pub name: String,
    pub table: String,

    #[serde(default)]
    pub source: Source,

    #[serde(default)]
    pub sinks: Vec<Sink>,

    /// Overrides the whitelist expansion for every sink of this pipeline.
    #[serde(rename = "pipelineConfigs", default)]
    pub pipeline_configs: Vec<PipelineConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Source {
    #[serde(rename = "deployEnv", default)]
    pub deploy_env: Vec<String>,

    #[serde(rename = "deployOrg", default)]
    pub deploy_org: Vec<String>,

    // --- Resolved fields (application::resolve) ---
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub file_name: String,
    #[serde(skip)]
    pub database: String,
    #[serde(skip)]
    pub table: String,
    #[serde(skip)]
    pub schema: String,
    #[serde(skip)]
    pub heartbeat_query: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Sink {
    pub database: String,

    #[serde(default)]
    pub name: String,

    /// Propagate source deletions to the sink in every environment.
    #[serde(rename = "captureDeleteAll", default)]
    pub capture_delete_all: bool,

    /// Environments where deletions propagate even when `captureDeleteAll` is off.
    #[serde(rename = "captureDeleteEnvs", default)]
    pub capture_delete_envs: Vec<String>,

    #[serde(rename = "excludeColumns", default)]
    pub exclude_columns: Vec<String>,

    #[serde(rename = "deployEnv", default)]
    pub deploy_env: Vec<String>,

    #[serde(rename = "deployOrg", default)]
    pub deploy_org: Vec<String>,

    #[serde(rename = "deploySchema", default)]
    pub deploy_schema: Vec<String>,

    /// Tenant-scoping filter emitted verbatim into the rendered artifact.
    #[serde(rename = "filterResourcePath", default)]
    pub filter_resource_path: String,

    #[serde(rename = "pipelineConfigs", default)]
    pub pipeline_configs: Vec<PipelineConfig>,

    // --- Resolved fields (application::resolve) ---
    /// `name` with its connector suffix stripped, plus `.json`. Still carries
    /// the SCHEMA placeholder until render time.
    #[serde(skip)]
    pub file_name: String,

    /// Introspected column sets, keyed by schema.
    #[serde(skip)]
    pub resolved: BTreeMap<String, TableColumns>,
}

/// Columns of one `(table, schema)` pair as reported by the schema oracle,
/// post-exclusion, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    pub columns: Vec<String>,
    pub primary_keys: Vec<String>,
}

pub fn default_schema() -> String {
    "public".to_string()
}

/// Placeholder substituted into names/file names/tables at render time.
pub const SCHEMA_PLACEHOLDER: &str = "SCHEMA";

/// Substitute the SCHEMA placeholder for a concrete schema name.
///
/// The default schema "public" is special-cased to preserve legacy naming:
/// both `SCHEMA.` and `SCHEMA` are stripped entirely. Any other schema is
/// substituted literally, keeping the dot.
pub fn substitute_schema(value: &str, schema: &str) -> String {
    if schema == default_schema() {
        value
            .replace(&format!("{SCHEMA_PLACEHOLDER}."), "")
            .replace(SCHEMA_PLACEHOLDER, "")
    } else {
        value.replace(SCHEMA_PLACEHOLDER, schema)
    }
}

/// File name derived from a connector name: the `_sink_connector` /
/// `_connector` suffix is stripped and `.json` appended.
pub fn file_name_for(name: &str) -> String {
    let base = name
        .strip_suffix("_sink_connector")
        .or_else(|| name.strip_suffix("_connector"))
        .unwrap_or(name);
    format!("{base}.json")
}

impl PipelineSet {
    /// Heartbeat query for one database: the custom override when flagged,
    /// the definition-wide default otherwise.
    pub fn heartbeat_query_for(&self, database: &str) -> &str {
        if self.db_use_custom_heartbeat.iter().any(|db| db == database) {
            &self.custom_heartbeat_query
        } else {
            &self.default_heartbeat_query
        }
    }
}

impl Pipeline {
    /// Pinned pairs for one sink: the sink's own list wins, then the
    /// pipeline's, then the file-wide list. Empty means "use the whitelist".
    pub fn pinned_pairs<'a>(&'a self, sink: &'a Sink, set: &'a PipelineSet) -> &'a [PipelineConfig] {
        if !sink.pipeline_configs.is_empty() {
            &sink.pipeline_configs
        } else if !self.pipeline_configs.is_empty() {
            &self.pipeline_configs
        } else {
            &set.pipeline_configs
        }
    }

    /// Pinned pairs for the pipeline's source (sources have no own list).
    pub fn source_pinned_pairs<'a>(&'a self, set: &'a PipelineSet) -> &'a [PipelineConfig] {
        if !self.pipeline_configs.is_empty() {
            &self.pipeline_configs
        } else {
            &set.pipeline_configs
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_parse_full_pipeline_set() -> Result<()> {
        let yaml = r#"
database: bob
schema: public
envs: [local, stag, prod]
orgs: [manabie, jprep]
defaultHeartBeatQuery: "SELECT 1"
customHeartbeatQuery: "SELECT pg_sleep(0)"
dbUseCustomHeartBeat: [bob]
preProductionEnabled: true
datapipelines:
  - name: locations
    table: locations
    source:
      deployEnv: [local]
    sinks:
      - database: entryexitmgmt
        captureDeleteAll: false
        captureDeleteEnvs: [prod]
        excludeColumns: [updated_at]
        deploySchema: [public]
        filterResourcePath: resource_path
        pipelineConfigs:
          - env: prod
            org: jprep
"#;
        let set: PipelineSet = serde_yaml::from_str(yaml)?;
        assert_eq!(set.database, "bob");
        assert!(set.pre_production_enabled);
        assert_eq!(set.heartbeat_query_for("bob"), "SELECT pg_sleep(0)");
        assert_eq!(set.heartbeat_query_for("eureka"), "SELECT 1");

        let pipeline = &set.datapipelines[0];
        assert_eq!(pipeline.table, "locations");
        assert_eq!(pipeline.source.deploy_env, vec!["local"]);

        let sink = &pipeline.sinks[0];
        assert_eq!(sink.database, "entryexitmgmt");
        assert_eq!(sink.capture_delete_envs, vec!["prod"]);
        assert_eq!(
            sink.pipeline_configs,
            vec![PipelineConfig {
                env: "prod".into(),
                org: "jprep".into()
            }]
        );
        Ok(())
    }

    #[test]
    fn test_schema_substitution_public_is_stripped() {
        assert_eq!(
            substitute_schema("X_SCHEMA.Y_sink_connector", "public"),
            "X_Y_sink_connector"
        );
        assert_eq!(substitute_schema("SCHEMA.locations", "public"), "locations");
    }

    #[test]
    fn test_schema_substitution_other_is_literal() {
        assert_eq!(
            substitute_schema("X_SCHEMA.Y_sink_connector", "inventory"),
            "X_inventory.Y_sink_connector"
        );
        assert_eq!(
            substitute_schema("SCHEMA.locations", "inventory"),
            "inventory.locations"
        );
    }

    #[test]
    fn test_file_name_strips_connector_suffixes() {
        assert_eq!(
            file_name_for("bob_to_eureka_SCHEMA.locations_sink_connector"),
            "bob_to_eureka_SCHEMA.locations.json"
        );
        assert_eq!(file_name_for("bob_source_connector"), "bob_source.json");
        assert_eq!(file_name_for("plain_name"), "plain_name.json");
    }

    #[test]
    fn test_pinned_pair_precedence() {
        let pair = |env: &str, org: &str| PipelineConfig {
            env: env.into(),
            org: org.into(),
        };
        let mut set = PipelineSet {
            database: "bob".into(),
            schema: default_schema(),
            envs: vec![],
            orgs: vec![],
            default_heartbeat_query: String::new(),
            custom_heartbeat_query: String::new(),
            db_use_custom_heartbeat: vec![],
            pre_production_enabled: false,
            pipeline_configs: vec![pair("uat", "manabie")],
            datapipelines: vec![],
        };
        let mut pipeline = Pipeline {
            name: "p".into(),
            table: "t".into(),
            source: Source::default(),
            sinks: vec![],
            pipeline_configs: vec![],
        };
        let mut sink = Sink::default();

        // File-wide list applies when nothing closer is declared.
        assert_eq!(pipeline.pinned_pairs(&sink, &set), &[pair("uat", "manabie")]);

        pipeline.pipeline_configs = vec![pair("stag", "jprep")];
        assert_eq!(pipeline.pinned_pairs(&sink, &set), &[pair("stag", "jprep")]);
        assert_eq!(pipeline.source_pinned_pairs(&set), &[pair("stag", "jprep")]);

        sink.pipeline_configs = vec![pair("prod", "tokyo")];
        assert_eq!(pipeline.pinned_pairs(&sink, &set), &[pair("prod", "tokyo")]);

        set.pipeline_configs.clear();
        pipeline.pipeline_configs.clear();
        assert!(pipeline.source_pinned_pairs(&set).is_empty());
    }
}
