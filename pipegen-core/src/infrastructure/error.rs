// pipegen-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(pipegen::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- DEFINITION FILES / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(pipegen::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml(#[from] serde_yaml::Error),

    #[error("Pipeline definition not found at '{0}'")]
    #[diagnostic(code(pipegen::infra::definition_missing))]
    DefinitionNotFound(String),

    // --- SCHEMA DUMPS / JSON ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(pipegen::infra::json),
        help("Check the schema dump file: it must carry 'columns' and 'constraints' arrays.")
    )]
    Json(#[from] serde_json::Error),

    #[error("No schema dump for table '{schema}.{table}' of database '{database}' (looked at {path:?})")]
    #[diagnostic(
        code(pipegen::infra::schema_missing),
        help("Regenerate the schema directory or fix the table/schema name in the definition.")
    )]
    SchemaNotFound {
        database: String,
        table: String,
        schema: String,
        path: PathBuf,
    },

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(pipegen::infra::template),
        help("Check the template syntax ([[ ... ]] variables, [% ... %] blocks).")
    )]
    Template(#[from] minijinja::Error),
}
