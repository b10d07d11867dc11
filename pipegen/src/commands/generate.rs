// pipegen/src/commands/generate.rs
//
// USE CASE: Compile the definition tree and write connector artifacts.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use pipegen_core::application::{Compiler, CompilerOptions, compile_tree, reconcile_root};
use pipegen_core::domain::policy::DeploymentPolicy;
use pipegen_core::domain::ports::SchemaOracle;
use pipegen_core::infrastructure::fs::LocalOutputStore;
use pipegen_core::infrastructure::schema::FileSchemaOracle;
use pipegen_core::infrastructure::template::ConnectorRenderer;

pub struct GenerateArgs {
    pub definition: PathBuf,
    pub sink_template: PathBuf,
    pub source_template: PathBuf,
    pub schema_dir: Option<PathBuf>,
    pub output: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub protect: Vec<String>,
    pub reconcile: bool,
}

pub fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading templates...");
    let sink_template = fs::read_to_string(&args.sink_template)
        .with_context(|| format!("Failed to read sink template {:?}", args.sink_template))?;
    let source_template = fs::read_to_string(&args.source_template)
        .with_context(|| format!("Failed to read source template {:?}", args.source_template))?;

    let excluded = super::parse_rules(&args.exclude)?;
    let protected = super::parse_rules(&args.protect)?;

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

    println!("📦 Compiling '{}'...", args.definition.display());
    let outcome = compile_tree(&compiler, &args.definition, &args.output)?;
    println!(
        "   {} artifact(s) from {} definition file(s), mirrored to {} output root(s)",
        outcome.artifacts,
        outcome.files_compiled,
        args.output.len()
    );

    if args.reconcile {
        for root in &args.output {
            let report = reconcile_root(&LocalOutputStore, root, &outcome.generated, &protected)?;
            println!(
                "   🗑️  {}: {} stale artifact(s) removed, {} kept",
                root.display(),
                report.deleted.len(),
                report.kept
            );
        }
    }

    println!("\n✨ SUCCESS! Finished in {:.2?}", start.elapsed());
    Ok(())
}
