// pipegen-core/src/infrastructure/fs.rs

use crate::application::ports::OutputStore;
use crate::error::PipegenError;
use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Write one artifact body atomically: stage it in a temp file next to the
/// target, then rename over it. A connector config on disk is therefore
/// always either the previous run's version or this run's, never a torn
/// write a CDC runtime could pick up halfway.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // The temp file must live in the target directory: rename is only
    // atomic within one filesystem.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Local-disk implementation of the reconciler's filesystem capability.
pub struct LocalOutputStore;

impl OutputStore for LocalOutputStore {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, PipegenError> {
        if !root.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
        for entry in walker.into_iter() {
            let entry = entry.map_err(|e| {
                PipegenError::Infrastructure(InfrastructureError::Io(std::io::Error::other(e)))
            })?;
            if entry.file_type().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(files)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PipegenError> {
        std::fs::remove_file(path)
            .map_err(|e| PipegenError::Infrastructure(InfrastructureError::Io(e)))
    }
}
