//! Migration script model

use crate::TableSchema;
use crate::request::{MIGRATION_NAME_MESSAGE, is_valid_migration_name};
use schemagen_core::{EngineError, EngineResult, Validatable};
use serde::{Deserialize, Serialize};

/// A named, ordered set of tables ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationScript {
    /// Class name of the generated migration
    pub name: String,

    /// Tables in creation order
    pub tables: Vec<TableSchema>,

    /// Storage options appended to every `createTable`, e.g. `ENGINE=InnoDB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_options: Option<String>,
}

impl MigrationScript {
    /// Create an empty script
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            table_options: None,
        }
    }

    pub fn with_table(mut self, table: TableSchema) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_tables(mut self, tables: impl IntoIterator<Item = TableSchema>) -> Self {
        self.tables.extend(tables);
        self
    }

    /// Set the caller-supplied table options; blank options are dropped
    pub fn with_table_options(mut self, options: impl Into<String>) -> Self {
        let options = options.into();
        self.table_options = (!options.trim().is_empty()).then_some(options);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total foreign keys across all tables
    pub fn foreign_key_count(&self) -> usize {
        self.tables.iter().map(|t| t.foreign_keys.len()).sum()
    }

    /// Tables in drop order (reverse creation order)
    pub fn tables_for_drop(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter().rev()
    }
}

impl Validatable for MigrationScript {
    fn validate(&self) -> EngineResult<()> {
        if !is_valid_migration_name(&self.name) {
            return Err(EngineError::field_validation("migration_name", MIGRATION_NAME_MESSAGE));
        }
        self.tables.iter().try_for_each(TableSchema::validate)
    }
}
