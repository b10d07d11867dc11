// pipegen-core/src/domain/artifact.rs
//
// The unit of output: one rendered connector config, keyed by its relative
// path under an output root. The store is ordered (BTreeMap over the
// canonical path) so writes and reconciliation decisions are deterministic.

use crate::domain::error::DomainError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    /// `org/env` directory under the output root.
    pub output_path: String,
    pub body: String,
}

impl Artifact {
    /// Canonical relative path: `org/env/fileName`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.output_path, self.file_name)
    }
}

/// Ordered artifact association. Inserting two artifacts with the same
/// relative path is a hard configuration error, not a silent overwrite.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    entries: BTreeMap<String, Artifact>,
}

impl ArtifactStore {
    pub fn insert(&mut self, artifact: Artifact) -> Result<(), DomainError> {
        let path = artifact.relative_path();
        if self.entries.contains_key(&path) {
            return Err(DomainError::ArtifactCollision { path });
        }
        self.entries.insert(path, artifact);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Artifact)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
