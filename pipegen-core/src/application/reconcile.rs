// pipegen-core/src/application/reconcile.rs
//
// Directory reconciler: after the whole definition tree has been compiled,
// delete every file under an output root that this run did not generate.
// Pure decision logic over the OutputStore port; runs once per root.

use crate::application::ports::OutputStore;
use crate::domain::policy::{ExcludeRule, is_protected};
use crate::error::PipegenError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub deleted: Vec<PathBuf>,
    pub kept: usize,
}

/// Remove stale artifacts under `root`. `generated` holds the relative
/// paths (`org/env/fileName`) produced by this run; `protected` rules match
/// path substrings and shield hand-maintained files.
pub fn reconcile_root(
    store: &dyn OutputStore,
    root: &Path,
    generated: &HashSet<String>,
    protected: &[ExcludeRule],
) -> Result<ReconcileReport, PipegenError> {
    let mut report = ReconcileReport::default();

    for file in store.list_files(root)? {
        let relative = file
            .strip_prefix(root)
            .unwrap_or(&file)
            .to_string_lossy()
            .to_string();

        if generated.contains(&relative) || is_protected(protected, &relative) {
            report.kept += 1;
            continue;
        }

        info!(path = %relative, "Removing stale artifact");
        store.remove_file(&file)?;
        report.deleted.push(file);
    }

    Ok(report)
}
