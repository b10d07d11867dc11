// src/domain/ports/schema.rs
//
// Read-only oracle resolving (database, table, schema) to the table's
// columns and constraints. Backed by schema dump files in production,
// by an in-memory map in tests.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

pub const PRIMARY_KEY: &str = "PRIMARY KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TableSchema {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Column {
    #[serde(rename = "columnName")]
    pub column_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Constraint {
    #[serde(rename = "columnName")]
    pub column_name: String,
    #[serde(rename = "constraintType")]
    pub constraint_type: String,
}

impl TableSchema {
    /// Column names of every PRIMARY KEY constraint, in declaration order.
    pub fn primary_keys(&self) -> Vec<String> {
        self.constraints
            .iter()
            .filter(|c| c.constraint_type == PRIMARY_KEY)
            .map(|c| c.column_name.clone())
            .collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column_name.clone()).collect()
    }
}

pub trait SchemaOracle: Send + Sync {
    fn load_table_schema(
        &self,
        database: &str,
        table: &str,
        schema: &str,
    ) -> Result<TableSchema, DomainError>;
}
