//! # Schemagen IR (Intermediate Representation)
//!
//! This crate provides the intermediate representation extracted from a live
//! database schema. It contains the data structures the migration synthesizer
//! renders, plus the pure transforms applied while building them.
//!
//! ## Core Concepts
//!
//! - **Column**: A table column with its catalog type and mapped builder type
//! - **Index**: A secondary index (the primary key is never modeled as one)
//! - **ForeignKey**: A constraint parsed from the table's DDL dump
//! - **TableSchema**: Everything needed to recreate one table
//! - **MigrationScript**: The ordered set of tables rendered into one migration
//! - **MigrationRequest**: Caller input, validated before any catalog access
//!

// Module declarations
pub mod alias;
pub mod column;
pub mod foreign_key;
pub mod index;
pub mod migration;
pub mod request;
pub mod table;
pub mod type_map;

// Re-export commonly used types at crate root
pub use alias::{AliasContext, is_aliased, table_alias};
pub use column::Column;
pub use foreign_key::ForeignKey;
pub use index::{Index, MAX_INDEX_COLUMNS, PRIMARY_KEY_NAME};
pub use migration::MigrationScript;
pub use request::{
    ALL_TABLES, DEFAULT_CONNECTION, DEFAULT_MIGRATION_PATH, MULTI_TABLE_HINT, MigrationRequest,
    TableSelector, is_valid_migration_name, migration_name_at, suggested_migration_name,
};
pub use table::TableSchema;
pub use type_map::{TypeDescriptor, map_column_type};

// Re-export core types that are commonly used with IR
pub use schemagen_core::{EngineError, EngineResult, NativeType, ReferentialAction, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        AliasContext,
        // Model
        Column,
        // Re-exported from core
        EngineError,
        EngineResult,
        ForeignKey,
        Index,
        MigrationRequest,
        MigrationScript,
        NativeType,
        ReferentialAction,
        TableSchema,
        TableSelector,
        TypeDescriptor,
        Validatable,
        // Transforms
        map_column_type,
        table_alias,
    };
}
