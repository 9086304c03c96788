//! # Schemagen Introspect
//!
//! Reads a database's physical schema into the IR.
//!
//! - **Connection**: the read-only catalog collaborator traits and a registry
//! - **DDL**: per-dialect parsers for foreign keys and table comments
//! - **Extractor**: assembles `TableSchema`s from catalog rows and DDL dumps
//! - **Snapshot**: a JSON-backed connection for offline generation
//!

pub mod connection;
pub mod ddl;
pub mod extractor;
pub mod snapshot;
pub mod type_catalog;

pub use connection::{
    ColumnMetadata, ConnectionProvider, ConnectionRegistry, IndexRow, SchemaConnection,
    TableMetadata,
};
pub use ddl::{DdlParser, MySqlDdlParser, ParsedDdl};
pub use extractor::SchemaExtractor;
pub use snapshot::{CatalogSnapshot, SnapshotConnection, SnapshotTable};
pub use type_catalog::MySqlTypeCatalog;
