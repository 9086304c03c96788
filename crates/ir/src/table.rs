//! Table schema
//!
//! A `TableSchema` is everything the migration synthesizer needs to recreate
//! one table: columns in declaration order, secondary indexes in catalog
//! order, foreign keys in DDL order, the table comment and the (alias-
//! rewritten) DDL dump used by the raw script style.

use crate::{Column, ForeignKey, Index};
use schemagen_core::{EngineError, EngineResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Extracted definition of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Storage name in the catalog
    pub name: String,

    /// Name used inside the generated script
    pub aliased_name: String,

    /// Columns in declaration order
    pub columns: Vec<Column>,

    /// Secondary indexes in catalog first-appearance order
    #[serde(default)]
    pub indexes: Vec<Index>,

    /// Foreign keys in DDL declaration order
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// Table-level comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// `CREATE TABLE` dump
    #[serde(default)]
    pub raw_ddl: String,
}

impl TableSchema {
    /// Create an empty table whose script name is its storage name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            aliased_name: name.clone(),
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            comment: None,
            raw_ddl: String::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_alias(mut self, aliased_name: impl Into<String>) -> Self {
        self.aliased_name = aliased_name.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_raw_ddl(mut self, raw_ddl: impl Into<String>) -> Self {
        self.raw_ddl = raw_ddl.into();
        self
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get an index by name
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Get a foreign key by constraint name
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }

    pub fn has_indexes(&self) -> bool {
        !self.indexes.is_empty()
    }

    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    /// Whether the table has a non-empty comment
    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Foreign keys in the order they are added back: reverse declaration
    /// order, matching the order the dialect reproduces them in its dump.
    pub fn foreign_keys_for_render(&self) -> impl Iterator<Item = &ForeignKey> {
        self.foreign_keys.iter().rev()
    }
}

impl Validatable for TableSchema {
    fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("Table name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            column.validate_in(&self.name)?;
            if !seen.insert(column.name.as_str()) {
                return Err(EngineError::column_validation(
                    &self.name,
                    &column.name,
                    "duplicate column name",
                ));
            }
        }

        let mut seen = HashSet::new();
        for index in &self.indexes {
            if Index::is_primary(&index.name) {
                return Err(EngineError::validation(format!(
                    "Table '{}' models its primary key as an index",
                    self.name
                )));
            }
            if !seen.insert(index.name.as_str()) {
                return Err(EngineError::validation(format!(
                    "Table '{}' has duplicate index '{}'",
                    self.name, index.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemagen_core::NativeType;

    fn orders() -> TableSchema {
        TableSchema::new("orders")
            .with_column(Column::new("id", NativeType::Integer, "int(11)").auto_increment())
            .with_column(Column::new("user_id", NativeType::Integer, "int(11)"))
            .with_foreign_key(ForeignKey::new("fk_a", "user_id", "users", "id"))
            .with_foreign_key(ForeignKey::new("fk_b", "shop_id", "shops", "id"))
    }

    #[test]
    fn test_lookups() {
        let table = orders();
        assert!(table.column("user_id").is_some());
        assert!(table.column("missing").is_none());
        assert_eq!(table.foreign_key("fk_b").map(|fk| fk.column.as_str()), Some("shop_id"));
        assert_eq!(table.aliased_name, "orders");
    }

    #[test]
    fn test_foreign_keys_render_in_reverse() {
        let table = orders();
        let names: Vec<_> = table.foreign_keys_for_render().map(|fk| fk.name.as_str()).collect();
        assert_eq!(names, vec!["fk_b", "fk_a"]);
    }

    #[test]
    fn test_validate_duplicate_column() {
        let table = orders().with_column(Column::new("id", NativeType::Integer, "int"));
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column name"));
    }

    #[test]
    fn test_validate_duplicate_index() {
        let table = orders()
            .with_index(Index::new("idx_user", false))
            .with_index(Index::new("idx_user", true));
        assert!(!table.is_valid());
    }

    #[test]
    fn test_validate_rejects_primary_index() {
        let table = orders().with_index(Index::new("PRIMARY", true));
        assert!(!table.is_valid());
    }

    #[test]
    fn test_valid_table() {
        assert!(orders().is_valid());
    }

    #[test]
    fn test_has_comment() {
        assert!(!orders().has_comment());
        assert!(!orders().with_comment("").has_comment());
        assert!(orders().with_comment("Customer orders").has_comment());
    }
}
