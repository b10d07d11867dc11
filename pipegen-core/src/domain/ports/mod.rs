// src/domain/ports/mod.rs

pub mod schema;

pub use schema::{Column, Constraint, SchemaOracle, TableSchema};
