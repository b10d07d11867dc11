// pipegen-core/src/application/resolve.rs
//
// Default resolver: fills every computed field of a freshly parsed
// PipelineSet. Runs exactly once per definition file; afterwards the model
// is read-only for expansion and rendering.

use crate::domain::error::DomainError;
use crate::domain::model::{PipelineSet, TableColumns, default_schema, file_name_for};
use crate::domain::policy::DeploymentPolicy;
use crate::domain::ports::SchemaOracle;
use crate::error::PipegenError;
use tracing::debug;

/// Populate names, file names, env/org/schema lists and (when an oracle is
/// supplied) the introspected column sets of every pipeline in `set`.
pub fn resolve_defaults(
    set: &mut PipelineSet,
    policy: &DeploymentPolicy,
    oracle: Option<&dyn SchemaOracle>,
) -> Result<(), PipegenError> {
    let database = set.database.clone();
    let file_schema = set.schema.clone();
    let global_orgs = set.orgs.clone();
    let heartbeat = set.heartbeat_query_for(&database).to_string();

    let mut default_envs = set.envs.clone();
    if set.pre_production_enabled {
        default_envs.push(policy.pre_production_env().to_string());
    }

    for pipeline in &mut set.datapipelines {
        let table = pipeline.table.clone();

        // --- Source ---
        let source = &mut pipeline.source;
        source.database = database.clone();
        source.table = table.clone();
        source.schema = file_schema.clone();
        source.name = format!("{database}_source");
        source.file_name = file_name_for(&source.name);
        source.heartbeat_query = heartbeat.clone();
        if source.deploy_env.is_empty() {
            source.deploy_env = default_envs.clone();
        }
        if source.deploy_org.is_empty() {
            source.deploy_org = global_orgs.clone();
        }

        // --- Sinks ---
        for sink in &mut pipeline.sinks {
            if sink.name.is_empty() {
                sink.name = format!(
                    "{database}_to_{}_SCHEMA.{table}_sink_connector",
                    sink.database
                );
            }
            sink.file_name = file_name_for(&sink.name);

            if sink.deploy_env.is_empty() {
                sink.deploy_env = default_envs.clone();
            }
            if sink.deploy_org.is_empty() {
                for env in &sink.deploy_env {
                    for org in policy.default_orgs(env, &global_orgs) {
                        if !sink.deploy_org.contains(&org) {
                            sink.deploy_org.push(org);
                        }
                    }
                }
            }
            if sink.deploy_schema.is_empty() {
                sink.deploy_schema = vec![default_schema()];
            }

            let Some(oracle) = oracle else { continue };
            for schema in &sink.deploy_schema {
                let table_schema = oracle.load_table_schema(&database, &table, schema)?;
                let primary_keys = table_schema.primary_keys();
                let mut columns: Vec<String> = table_schema
                    .column_names()
                    .into_iter()
                    .filter(|c| !sink.exclude_columns.contains(c))
                    .collect();
                columns.sort();

                if columns.is_empty() {
                    return Err(DomainError::EmptyColumnSet {
                        sink: sink.name.clone(),
                        table: table.clone(),
                        schema: schema.clone(),
                    }
                    .into());
                }

                debug!(
                    sink = %sink.name,
                    schema,
                    columns = columns.len(),
                    primary_keys = primary_keys.len(),
                    "Resolved table schema"
                );
                sink.resolved.insert(
                    schema.clone(),
                    TableColumns {
                        columns,
                        primary_keys,
                    },
                );
            }
        }
    }

    Ok(())
}
