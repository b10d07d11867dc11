// pipegen-core/src/infrastructure/schema.rs
//
// File-backed schema oracle. Schema dumps live at
// {root}/{database}/{schema}/{table}.json and carry the column and
// constraint lists of one table.

use crate::domain::error::DomainError;
use crate::domain::ports::{SchemaOracle, TableSchema};
use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileSchemaOracle {
    root: PathBuf,
}

impl FileSchemaOracle {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn load(
        &self,
        database: &str,
        table: &str,
        schema: &str,
    ) -> Result<TableSchema, InfrastructureError> {
        let path = self
            .root
            .join(database)
            .join(schema)
            .join(format!("{table}.json"));

        if !path.exists() {
            return Err(InfrastructureError::SchemaNotFound {
                database: database.to_string(),
                table: table.to_string(),
                schema: schema.to_string(),
                path,
            });
        }

        debug!(path = %path.display(), "Loading table schema");
        let content = fs::read_to_string(&path)?;
        let table_schema: TableSchema = serde_json::from_str(&content)?;
        Ok(table_schema)
    }
}

impl SchemaOracle for FileSchemaOracle {
    fn load_table_schema(
        &self,
        database: &str,
        table: &str,
        schema: &str,
    ) -> Result<TableSchema, DomainError> {
        self.load(database, table, schema)
            .map_err(|e| DomainError::SchemaError(e.to_string()))
    }
}
