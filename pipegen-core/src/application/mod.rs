// pipegen-core/src/application/mod.rs

pub mod compile;
pub mod ports;
pub mod reconcile;
pub mod resolve;
pub mod run;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use pipegen_core::application::{Compiler, compile_tree, reconcile_root};`
// sans avoir à connaître la structure interne des fichiers.

pub use compile::{Compiler, CompilerOptions};
pub use reconcile::{ReconcileReport, reconcile_root};
pub use resolve::resolve_defaults;
pub use run::{CompileOutcome, compile_tree};
