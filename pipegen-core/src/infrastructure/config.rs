// pipegen-core/src/infrastructure/config.rs
//
// Loading of pipeline definition files (YAML) and discovery of the
// definition tree.

use crate::domain::model::PipelineSet;
use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use walkdir::WalkDir;

/// Parse one definition file into its in-memory model.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_pipeline_set<P: AsRef<Path>>(path: P) -> Result<PipelineSet, InfrastructureError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let set: PipelineSet = serde_yaml::from_str(&content)?;
    info!(
        database = %set.database,
        pipelines = set.datapipelines.len(),
        "Definition loaded"
    );
    Ok(set)
}

/// All YAML definition files under `path`, sorted by file name so that a
/// whole-tree run is deterministic. A single-file path is returned as-is.
pub fn find_definition_files(path: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::DefinitionNotFound(
            path.display().to_string(),
        ));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path).follow_links(true).sort_by_file_name();
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let entry_path = entry.path();
        if entry_path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
        {
            files.push(entry_path.to_path_buf());
        }
    }
    Ok(files)
}
