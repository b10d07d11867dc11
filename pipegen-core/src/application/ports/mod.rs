// src/application/ports/mod.rs

pub mod renderer;
pub mod store;

pub use renderer::TemplateEngine;
pub use store::OutputStore;
