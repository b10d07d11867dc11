// pipegen/src/commands/check.rs
//
// USE CASE: Dry-run the compiler: parse, resolve and expand every
// definition, render nothing to disk.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use pipegen_core::application::{Compiler, CompilerOptions};
use pipegen_core::domain::error::DomainError;
use pipegen_core::domain::policy::DeploymentPolicy;
use pipegen_core::domain::ports::SchemaOracle;
use pipegen_core::infrastructure::config::find_definition_files;
use pipegen_core::infrastructure::schema::FileSchemaOracle;
use pipegen_core::infrastructure::template::ConnectorRenderer;

pub struct CheckArgs {
    pub definition: PathBuf,
    pub sink_template: PathBuf,
    pub source_template: PathBuf,
    pub schema_dir: Option<PathBuf>,
    pub exclude: Vec<String>,
}

pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let sink_template = fs::read_to_string(&args.sink_template)
        .with_context(|| format!("Failed to read sink template {:?}", args.sink_template))?;
    let source_template = fs::read_to_string(&args.source_template)
        .with_context(|| format!("Failed to read source template {:?}", args.source_template))?;
    let excluded = super::parse_rules(&args.exclude)?;

    let engine = ConnectorRenderer::new()?;
    let oracle = args.schema_dir.as_ref().map(FileSchemaOracle::new);
    let compiler = Compiler::new(
        CompilerOptions {
            sink_template,
            source_template,
            policy: DeploymentPolicy::default(),
            excluded,
        },
        &engine,
        oracle.as_ref().map(|o| o as &dyn SchemaOracle),
    );

    println!("🔍 Checking '{}'...", args.definition.display());
    let mut total = 0;
    // Same cross-file collision accounting as the real run.
    let mut generated = std::collections::HashSet::new();
    let files = find_definition_files(&args.definition)?;
    for file in &files {
        let store = compiler.compile_file(file)?;
        for (relative, _) in store.iter() {
            if !generated.insert(relative.clone()) {
                return Err(DomainError::ArtifactCollision {
                    path: relative.clone(),
                }
                .into());
            }
        }
        println!("   📄 {}: {} artifact(s)", file.display(), store.len());
        total += store.len();
    }

    println!(
        "\n✨ {} artifact(s) across {} definition file(s); nothing written",
        total,
        files.len()
    );
    Ok(())
}
