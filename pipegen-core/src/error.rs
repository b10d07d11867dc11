// pipegen-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipegenError {
    // --- ERREURS DU DOMAINE (Policy, Expansion, Collisions) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Templating) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for PipegenError {
    fn from(err: std::io::Error) -> Self {
        PipegenError::Infrastructure(InfrastructureError::Io(err))
    }
}
