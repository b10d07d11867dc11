// src/application/ports/store.rs
//
// Filesystem capability consumed by the reconciler: list what exists under
// an output root, remove what should not.

use crate::error::PipegenError;
use std::path::{Path, PathBuf};

pub trait OutputStore: Send + Sync {
    /// Every regular file under `root`, recursively, in a stable order.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, PipegenError>;

    fn remove_file(&self, path: &Path) -> Result<(), PipegenError>;
}
