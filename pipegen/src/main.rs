// pipegen/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::check::CheckArgs;
use commands::generate::GenerateArgs;

fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug pipegen generate ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        // --- USE CASE: GENERATE ARTIFACTS ---
        Commands::Generate {
            definition,
            sink_template,
            source_template,
            schema_dir,
            output,
            exclude,
            protect,
            reconcile,
        } => commands::generate::execute(GenerateArgs {
            definition,
            sink_template,
            source_template,
            schema_dir,
            output,
            exclude,
            protect,
            reconcile,
        }),

        // --- USE CASE: DRY-RUN CHECK ---
        Commands::Check {
            definition,
            sink_template,
            source_template,
            schema_dir,
            exclude,
        } => commands::check::execute(CheckArgs {
            definition,
            sink_template,
            source_template,
            schema_dir,
            exclude,
        }),
    };

    if let Err(e) = result {
        eprintln!("\n💥 CRITICAL ERROR: {e:#}");
        // Exit with error code for CI/CD
        std::process::exit(1);
    }
}
