// pipegen/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipegen")]
#[command(about = "The Declarative CDC Pipeline to Connector Compiler", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Compiles pipeline definitions into connector artifacts
    Generate {
        /// Pipeline definition file or directory
        #[arg(long, default_value = ".")]
        definition: PathBuf,

        /// Sink connector template
        #[arg(long)]
        sink_template: PathBuf,

        /// Source connector template
        #[arg(long)]
        source_template: PathBuf,

        /// Schema dump directory (enables column/primary-key resolution)
        #[arg(long)]
        schema_dir: Option<PathBuf>,

        /// Output root; repeat for mirrored primary/secondary trees
        #[arg(long = "output", required = true)]
        output: Vec<PathBuf>,

        /// Exclusion spec 'env:org:sinkDatabase:sourceDatabase' (empty segment = wildcard)
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Protect matching paths from reconciliation (same spec syntax)
        #[arg(long = "protect")]
        protect: Vec<String>,

        /// Delete stale artifacts after the whole tree has been compiled
        #[arg(long, default_value = "false")]
        reconcile: bool,
    },

    /// 🔍 Parses, resolves and expands definitions without writing anything
    Check {
        /// Pipeline definition file or directory
        #[arg(long, default_value = ".")]
        definition: PathBuf,

        /// Sink connector template
        #[arg(long)]
        sink_template: PathBuf,

        /// Source connector template
        #[arg(long)]
        source_template: PathBuf,

        /// Schema dump directory (enables column/primary-key resolution)
        #[arg(long)]
        schema_dir: Option<PathBuf>,

        /// Exclusion spec 'env:org:sinkDatabase:sourceDatabase'
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_generate_defaults() -> Result<()> {
        let args = Cli::parse_from([
            "pipegen",
            "generate",
            "--sink-template",
            "sink.json",
            "--source-template",
            "source.json",
            "--output",
            "out",
        ]);
        match args.command {
            Commands::Generate {
                definition,
                output,
                reconcile,
                exclude,
                schema_dir,
                ..
            } => {
                assert_eq!(definition.to_string_lossy(), ".");
                assert_eq!(output.len(), 1);
                assert!(!reconcile);
                assert!(exclude.is_empty());
                assert_eq!(schema_dir, None);
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_repeatable_flags() -> Result<()> {
        let args = Cli::parse_from([
            "pipegen",
            "generate",
            "--sink-template",
            "sink.json",
            "--source-template",
            "source.json",
            "--output",
            "primary",
            "--output",
            "secondary",
            "--exclude",
            ":e2e::",
            "--exclude",
            "uat:::",
            "--protect",
            "local:::",
            "--reconcile",
        ]);
        match args.command {
            Commands::Generate {
                output,
                exclude,
                protect,
                reconcile,
                ..
            } => {
                assert_eq!(output.len(), 2);
                assert_eq!(exclude, vec![":e2e::", "uat:::"]);
                assert_eq!(protect, vec!["local:::"]);
                assert!(reconcile);
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_requires_output() {
        let result = Cli::try_parse_from([
            "pipegen",
            "generate",
            "--sink-template",
            "sink.json",
            "--source-template",
            "source.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_check() -> Result<()> {
        let args = Cli::parse_from([
            "pipegen",
            "check",
            "--definition",
            "definitions",
            "--sink-template",
            "sink.json",
            "--source-template",
            "source.json",
            "--schema-dir",
            "schemas",
        ]);
        match args.command {
            Commands::Check {
                definition,
                schema_dir,
                ..
            } => {
                assert_eq!(definition.to_string_lossy(), "definitions");
                assert_eq!(schema_dir.unwrap().to_string_lossy(), "schemas");
                Ok(())
            }
            _ => bail!("Expected Check command"),
        }
    }
}
