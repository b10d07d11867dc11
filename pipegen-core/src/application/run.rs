// pipegen-core/src/application/run.rs
//
// Whole-tree orchestration: walk the definition tree, compile every file,
// write each artifact to every output root, and hand the accumulated
// generated-path set to the reconciler. Generation and reconciliation are
// two separate phases; nothing is deleted here.

use crate::application::compile::Compiler;
use crate::domain::error::DomainError;
use crate::error::PipegenError;
use crate::infrastructure::config::find_definition_files;
use crate::infrastructure::fs::atomic_write;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default)]
pub struct CompileOutcome {
    pub files_compiled: usize,
    pub artifacts: usize,
    /// Relative paths (`org/env/fileName`) of everything this run produced.
    pub generated: HashSet<String>,
}

/// Compile every definition file under `definition` (a file or a directory)
/// and write the artifacts to each output root. An empty root list turns
/// this into a dry run.
pub fn compile_tree(
    compiler: &Compiler,
    definition: &Path,
    output_roots: &[PathBuf],
) -> Result<CompileOutcome, PipegenError> {
    let files = find_definition_files(definition).map_err(PipegenError::Infrastructure)?;
    let mut outcome = CompileOutcome::default();

    for file in files {
        info!(file = %file.display(), "Compiling definition");
        let store = compiler.compile_file(&file)?;

        for (relative, artifact) in store.iter() {
            // Cross-file collisions are configuration errors too.
            if !outcome.generated.insert(relative.clone()) {
                return Err(DomainError::ArtifactCollision {
                    path: relative.clone(),
                }
                .into());
            }
            for root in output_roots {
                let target = root.join(relative);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                atomic_write(&target, &artifact.body).map_err(PipegenError::Infrastructure)?;
            }
        }

        outcome.files_compiled += 1;
        outcome.artifacts += store.len();
    }

    Ok(outcome)
}
