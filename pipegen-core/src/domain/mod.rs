pub mod artifact;
pub mod error;
pub mod expand;
pub mod model;
pub mod policy;
pub mod ports;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
