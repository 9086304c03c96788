//! Catalog snapshots
//!
//! A [`CatalogSnapshot`] is a JSON capture of what a MySQL connection would
//! report: the table prefix, and per table its column catalog, `SHOW INDEX`
//! rows and `SHOW CREATE TABLE` dump. [`SnapshotConnection`] serves it through
//! the [`SchemaConnection`] trait.

use crate::connection::{ColumnMetadata, IndexRow, SchemaConnection, TableMetadata};
use crate::type_catalog::MySqlTypeCatalog;
use schemagen_core::{EngineError, EngineResult, TypeCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTable {
    pub name: String,

    pub columns: Vec<ColumnMetadata>,

    #[serde(default)]
    pub indexes: Vec<IndexRow>,

    /// `SHOW CREATE TABLE` output
    #[serde(default)]
    pub create_sql: String,
}

/// Serialized catalog of one connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub prefix: String,

    /// Tables in catalog order
    #[serde(default)]
    pub tables: Vec<SnapshotTable>,
}

impl CatalogSnapshot {
    pub fn table(&self, name: &str) -> Option<&SnapshotTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Connection backed by a catalog snapshot
#[derive(Debug, Clone)]
pub struct SnapshotConnection {
    id: String,
    snapshot: CatalogSnapshot,
    type_catalog: MySqlTypeCatalog,
}

impl SnapshotConnection {
    pub fn new(id: impl Into<String>, snapshot: CatalogSnapshot) -> Self {
        Self {
            id: id.into(),
            snapshot,
            type_catalog: MySqlTypeCatalog,
        }
    }

    /// Parse a snapshot from JSON
    pub fn from_json(id: impl Into<String>, json: &str) -> EngineResult<Self> {
        let id = id.into();
        let snapshot = serde_json::from_str(json)
            .map_err(|e| EngineError::unavailable(&id, format!("invalid snapshot: {e}")))?;
        Ok(Self::new(id, snapshot))
    }

    /// Load a snapshot file; an unreadable or invalid file makes the
    /// connection unavailable
    pub fn from_file(id: impl Into<String>, path: impl AsRef<Path>) -> EngineResult<Self> {
        let id = id.into();
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::unavailable(&id, format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json(id, &json)
    }

    /// Override the snapshot's table prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.snapshot.prefix = prefix.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    fn existing(&self, name: &str) -> EngineResult<&SnapshotTable> {
        self.snapshot
            .table(name)
            .ok_or_else(|| EngineError::catalog(name, "table does not exist"))
    }
}

impl SchemaConnection for SnapshotConnection {
    fn table_prefix(&self) -> &str {
        &self.snapshot.prefix
    }

    fn table_names(&self) -> EngineResult<Vec<String>> {
        Ok(self.snapshot.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn table_metadata(&self, name: &str) -> EngineResult<Option<TableMetadata>> {
        Ok(self.snapshot.table(name).map(|t| TableMetadata {
            name: t.name.clone(),
            columns: t.columns.clone(),
        }))
    }

    fn index_rows(&self, name: &str) -> EngineResult<Vec<IndexRow>> {
        Ok(self.existing(name)?.indexes.clone())
    }

    fn create_table_sql(&self, name: &str) -> EngineResult<String> {
        Ok(self.existing(name)?.create_sql.clone())
    }

    fn type_catalog(&self) -> &dyn TypeCatalog {
        &self.type_catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "prefix": "app_",
        "tables": [
            {
                "name": "app_users",
                "columns": [
                    {"name": "id", "native_type": "integer", "db_type": "int(11)", "size": 11,
                     "is_primary_key": true, "is_auto_increment": true, "allow_null": false}
                ],
                "indexes": [
                    {"Key_name": "PRIMARY", "Column_name": "id", "Seq_in_index": 1, "Non_unique": false}
                ],
                "create_sql": "CREATE TABLE `app_users` (\n  `id` int(11) NOT NULL AUTO_INCREMENT\n)"
            },
            {"name": "app_log", "columns": []}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let conn = SnapshotConnection::from_json("db", SNAPSHOT).unwrap();
        assert_eq!(conn.id(), "db");
        assert_eq!(conn.table_prefix(), "app_");
        assert_eq!(conn.table_names().unwrap(), vec!["app_users", "app_log"]);

        let metadata = conn.table_metadata("app_users").unwrap().unwrap();
        assert_eq!(metadata.columns.len(), 1);
        assert!(metadata.columns[0].is_auto_increment);
        assert_eq!(conn.index_rows("app_users").unwrap().len(), 1);
        assert!(conn.create_table_sql("app_users").unwrap().starts_with("CREATE TABLE"));
    }

    #[test]
    fn test_missing_table() {
        let conn = SnapshotConnection::from_json("db", SNAPSHOT).unwrap();
        assert!(conn.table_metadata("nope").unwrap().is_none());
        assert!(conn.create_table_sql("nope").unwrap_err().is_connection());
    }

    #[test]
    fn test_prefix_override() {
        let conn = SnapshotConnection::from_json("db", SNAPSHOT)
            .unwrap()
            .with_prefix("");
        assert_eq!(conn.table_prefix(), "");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let conn = SnapshotConnection::from_file("db", file.path()).unwrap();
        assert_eq!(conn.snapshot().tables.len(), 2);
    }

    #[test]
    fn test_unreadable_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotConnection::from_file("db", dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_connection());
        assert!(err.to_string().starts_with("Connection 'db' is unavailable"));
    }

    #[test]
    fn test_invalid_json_is_unavailable() {
        let err = SnapshotConnection::from_json("db", "{not json").unwrap_err();
        assert!(matches!(err, EngineError::ConnectionUnavailable { .. }));
    }
}
