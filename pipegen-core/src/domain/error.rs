// pipegen-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Sink '{sink}' has no columns left for '{schema}.{table}' after exclusion")]
    #[diagnostic(
        code(pipegen::domain::empty_columns),
        help("Check 'excludeColumns': it removed every column of the source table.")
    )]
    EmptyColumnSet {
        sink: String,
        table: String,
        schema: String,
    },

    #[error("Artifact collision: '{path}' is produced by more than one declaration")]
    #[diagnostic(
        code(pipegen::domain::artifact_collision),
        help("Two sinks (or two definition files) resolved to the same fileName and output path. Rename one of them.")
    )]
    ArtifactCollision { path: String },

    #[error("Invalid rule spec '{0}': expected 'env:org:sinkDatabase:sourceDatabase'")]
    #[diagnostic(
        code(pipegen::domain::rule_spec),
        help("Empty segments are wildcards, e.g. ':manabie::' matches every env/sink/source for org 'manabie'.")
    )]
    InvalidRuleSpec(String),

    #[error("Schema lookup failed: {0}")]
    #[diagnostic(code(pipegen::domain::schema))]
    SchemaError(String),
}
