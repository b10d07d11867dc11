// pipegen-core/src/application/compile.rs
//
// Sink and source compilers: expansion of each declaration into its accepted
// deployments, render-context assembly, template rendering, and artifact
// collection. One sink artifact per (sink, env, org, schema); one source
// artifact per (database, env, org), aggregating every table routed there.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::application::ports::TemplateEngine;
use crate::application::resolve::resolve_defaults;
use crate::domain::artifact::{Artifact, ArtifactStore};
use crate::domain::expand::{expand_sink, expand_source};
use crate::domain::model::{Pipeline, PipelineSet, Sink, TableColumns, substitute_schema};
use crate::domain::policy::{DeploymentPolicy, ExcludeRule};
use crate::domain::ports::SchemaOracle;
use crate::error::PipegenError;
use crate::infrastructure::config::load_pipeline_set;

/// Every table-capture source artifact also signals through this table.
const SIGNAL_TABLE: &str = "public.dbz_signals";

/// Explicit compiler configuration. All fields are plain data so a caller
/// can build one without any hidden ordering between the options.
pub struct CompilerOptions {
    pub sink_template: String,
    pub source_template: String,
    pub policy: DeploymentPolicy,
    pub excluded: Vec<ExcludeRule>,
}

pub struct Compiler<'a> {
    options: CompilerOptions,
    engine: &'a dyn TemplateEngine,
    oracle: Option<&'a dyn SchemaOracle>,
}

impl<'a> Compiler<'a> {
    pub fn new(
        options: CompilerOptions,
        engine: &'a dyn TemplateEngine,
        oracle: Option<&'a dyn SchemaOracle>,
    ) -> Self {
        Self {
            options,
            engine,
            oracle,
        }
    }

    /// Compile one definition file: parse, resolve defaults, render every
    /// sink and source artifact. Any error aborts the whole file.
    pub fn compile_file(&self, path: &Path) -> Result<ArtifactStore, PipegenError> {
        let mut set = load_pipeline_set(path).map_err(PipegenError::Infrastructure)?;
        self.compile_set(&mut set)
    }

    /// Compile an in-memory definition (resolution included).
    pub fn compile_set(&self, set: &mut PipelineSet) -> Result<ArtifactStore, PipegenError> {
        resolve_defaults(set, &self.options.policy, self.oracle)?;

        let mut store = ArtifactStore::default();
        self.compile_sinks(set, &mut store)?;
        self.compile_sources(set, &mut store)?;
        debug!(artifacts = store.len(), database = %set.database, "Definition compiled");
        Ok(store)
    }

    // --- SINKS ---

    fn compile_sinks(
        &self,
        set: &PipelineSet,
        store: &mut ArtifactStore,
    ) -> Result<(), PipegenError> {
        for pipeline in &set.datapipelines {
            for sink in &pipeline.sinks {
                let pinned = pipeline.pinned_pairs(sink, set);
                let deployments = expand_sink(
                    sink,
                    &set.database,
                    pinned,
                    &self.options.policy,
                    &self.options.excluded,
                );

                for deployment in deployments {
                    let name = substitute_schema(&sink.name, &deployment.schema);
                    let file_name = substitute_schema(&sink.file_name, &deployment.schema);
                    let table = substitute_schema(
                        &format!("SCHEMA.{}", pipeline.table),
                        &deployment.schema,
                    );
                    let empty = TableColumns::default();
                    let resolved = sink.resolved.get(&deployment.schema).unwrap_or(&empty);

                    let context = sink_context(
                        set, pipeline, sink, &deployment.env, &deployment.org,
                        &deployment.schema, &name, &table, resolved,
                        deployment.capture_delete_enabled,
                    );
                    let body = self.engine.render(&self.options.sink_template, &context)?;

                    store.insert(Artifact {
                        file_name,
                        output_path: format!("{}/{}", deployment.org, deployment.env),
                        body,
                    })?;
                }
            }
        }
        Ok(())
    }

    // --- SOURCES ---

    fn compile_sources(
        &self,
        set: &PipelineSet,
        store: &mut ArtifactStore,
    ) -> Result<(), PipegenError> {
        // (env, org) -> captured tables. The database axis of the key is
        // fixed per definition file.
        let mut groups: BTreeMap<(String, String), SourceGroup> = BTreeMap::new();

        for pipeline in &set.datapipelines {
            let source = &pipeline.source;
            let pinned = pipeline.source_pinned_pairs(set);
            for (env, org) in expand_source(
                source,
                pinned,
                &self.options.policy,
                &self.options.excluded,
            ) {
                let group = groups.entry((env, org)).or_insert_with(|| SourceGroup {
                    name: source.name.clone(),
                    file_name: source.file_name.clone(),
                    heartbeat_query: source.heartbeat_query.clone(),
                    tables: std::collections::BTreeSet::new(),
                });
                group
                    .tables
                    .insert(format!("{}.{}", source.schema, source.table));
            }
        }

        for ((env, org), mut group) in groups {
            group.tables.insert(SIGNAL_TABLE.to_string());
            let tables: Vec<&String> = group.tables.iter().collect();

            let context = json!({
                "env": env,
                "org": org,
                "name": group.name,
                "database": set.database,
                "tables": tables,
                "heartbeat_query": group.heartbeat_query,
            });
            let body = self
                .engine
                .render(&self.options.source_template, &context)?;

            store.insert(Artifact {
                file_name: group.file_name,
                output_path: format!("{org}/{env}"),
                body,
            })?;
        }
        Ok(())
    }
}

struct SourceGroup {
    name: String,
    file_name: String,
    heartbeat_query: String,
    tables: std::collections::BTreeSet<String>,
}

#[allow(clippy::too_many_arguments)]
fn sink_context(
    set: &PipelineSet,
    pipeline: &Pipeline,
    sink: &Sink,
    env: &str,
    org: &str,
    schema: &str,
    name: &str,
    table: &str,
    resolved: &TableColumns,
    capture_delete_enabled: bool,
) -> serde_json::Value {
    json!({
        "env": env,
        "org": org,
        "schema": schema,
        "pipeline": pipeline.name,
        "name": name,
        "database": sink.database,
        "source_database": set.database,
        "table": table,
        "columns": resolved.columns,
        "primary_keys": resolved.primary_keys,
        "capture_delete_enabled": capture_delete_enabled,
        "filter_resource_path": sink.filter_resource_path,
    })
}
