//! Connection collaborator
//!
//! The extractor never talks to a driver directly. It reads catalog rows and
//! DDL dumps through [`SchemaConnection`], and resolves connection ids through
//! [`ConnectionProvider`]. Both are read-only.

use schemagen_core::{EngineError, EngineResult, NativeType, TypeCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Catalog rows
// ============================================================================

/// One column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,

    #[serde(default)]
    pub native_type: NativeType,

    /// Raw dialect type, e.g. `varchar(255)`
    pub db_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    #[serde(default)]
    pub is_primary_key: bool,

    #[serde(default)]
    pub is_auto_increment: bool,

    #[serde(default = "default_allow_null")]
    pub allow_null: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

fn default_allow_null() -> bool {
    true
}

/// Column catalog for one table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
}

/// One row of `SHOW INDEX FROM <table>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    #[serde(alias = "Key_name")]
    pub key_name: String,

    #[serde(alias = "Column_name")]
    pub column_name: String,

    /// 1-based position of the column within the index
    #[serde(alias = "Seq_in_index")]
    pub seq_in_index: u32,

    #[serde(alias = "Non_unique")]
    pub non_unique: bool,
}

impl IndexRow {
    pub fn new(
        key_name: impl Into<String>,
        column_name: impl Into<String>,
        seq_in_index: u32,
        non_unique: bool,
    ) -> Self {
        Self {
            key_name: key_name.into(),
            column_name: column_name.into(),
            seq_in_index,
            non_unique,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Read-only access to one database's catalog
pub trait SchemaConnection {
    /// Configured table name prefix (possibly empty)
    fn table_prefix(&self) -> &str;

    /// Every table name, in catalog order
    fn table_names(&self) -> EngineResult<Vec<String>>;

    /// Column metadata, or `None` when the table does not exist
    fn table_metadata(&self, name: &str) -> EngineResult<Option<TableMetadata>>;

    /// Raw index rows for an existing table
    fn index_rows(&self, name: &str) -> EngineResult<Vec<IndexRow>>;

    /// Dialect-native `CREATE TABLE` dump for an existing table
    fn create_table_sql(&self, name: &str) -> EngineResult<String>;

    /// The dialect's type catalog
    fn type_catalog(&self) -> &dyn TypeCatalog;
}

/// Resolves connection ids
pub trait ConnectionProvider {
    /// Get the connection registered under `id`
    fn connection(&self, id: &str) -> EngineResult<&dyn SchemaConnection>;
}

// ============================================================================
// ConnectionRegistry
// ============================================================================

/// In-memory map of connection ids to connections
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: BTreeMap<String, Box<dyn SchemaConnection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection, replacing any previous one with the same id
    pub fn register(&mut self, id: impl Into<String>, connection: impl SchemaConnection + 'static) {
        self.connections.insert(id.into(), Box::new(connection));
    }

    pub fn with_connection(
        mut self,
        id: impl Into<String>,
        connection: impl SchemaConnection + 'static,
    ) -> Self {
        self.register(id, connection);
        self
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl ConnectionProvider for ConnectionRegistry {
    fn connection(&self, id: &str) -> EngineResult<&dyn SchemaConnection> {
        self.connections
            .get(id)
            .map(|c| c.as_ref())
            .ok_or_else(|| EngineError::ConnectionNotFound(id.to_string()))
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("ids", &self.connections.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_core::EmptyTypeCatalog;

    struct Empty;

    impl SchemaConnection for Empty {
        fn table_prefix(&self) -> &str {
            ""
        }
        fn table_names(&self) -> EngineResult<Vec<String>> {
            Ok(vec![])
        }
        fn table_metadata(&self, _name: &str) -> EngineResult<Option<TableMetadata>> {
            Ok(None)
        }
        fn index_rows(&self, _name: &str) -> EngineResult<Vec<IndexRow>> {
            Ok(vec![])
        }
        fn create_table_sql(&self, name: &str) -> EngineResult<String> {
            Err(EngineError::catalog(name, "no such table"))
        }
        fn type_catalog(&self) -> &dyn TypeCatalog {
            &EmptyTypeCatalog
        }
    }

    #[test]
    fn test_registry_resolves_registered_ids() {
        let registry = ConnectionRegistry::new()
            .with_connection("db", Empty)
            .with_connection("archive", Empty);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["archive", "db"]);
        assert!(registry.connection("db").is_ok());
    }

    #[test]
    fn test_registry_unknown_id() {
        let registry = ConnectionRegistry::new();
        let err = registry.connection("db").err().unwrap();
        assert!(err.is_connection());
        assert_eq!(err.to_string(), "Connection not found: db");
    }

    #[test]
    fn test_index_row_accepts_catalog_column_names() {
        let row: IndexRow = serde_json::from_str(
            r#"{"Key_name":"idx_email","Column_name":"email","Seq_in_index":1,"Non_unique":false}"#,
        )
        .unwrap();
        assert_eq!(row, IndexRow::new("idx_email", "email", 1, false));
    }

    #[test]
    fn test_column_metadata_defaults() {
        let column: ColumnMetadata =
            serde_json::from_str(r#"{"name":"title","db_type":"varchar(64)"}"#).unwrap();
        assert!(column.allow_null);
        assert!(!column.is_primary_key);
        assert_eq!(column.native_type, NativeType::String);
    }
}
