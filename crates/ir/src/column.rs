//! Column definitions
//!
//! This module contains the `Column` struct: one column of an extracted
//! table, in catalog declaration order, together with its mapped type.

use crate::type_map::{TypeDescriptor, map_column_type};
use schemagen_core::{
    EmptyTypeCatalog, EngineError, EngineResult, NativeType, TypeCatalog,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Column
// ============================================================================

/// Represents a column of an extracted table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unique within the table)
    pub name: String,

    /// Abstract type reported by the catalog
    pub native_type: NativeType,

    /// Raw dialect type, e.g. `varchar(255)`
    pub db_type: String,

    /// Declared size or display width
    pub size: Option<u32>,

    /// Declared scale (decimal places)
    pub scale: Option<u32>,

    /// Whether this column is part of the primary key
    pub is_primary_key: bool,

    /// Whether the column is auto-increment
    pub is_auto_increment: bool,

    /// Whether NULL is allowed
    pub allow_null: bool,

    /// Default value as reported by the catalog
    pub default_value: Option<String>,

    /// Column comment
    pub comment: Option<String>,

    /// Portable builder call or raw-type fallback for this column
    pub column_type: TypeDescriptor,
}

impl Column {
    /// Create a nullable column; the type is mapped without a type catalog
    /// until [`Column::resolve_type`] is called.
    pub fn new(name: impl Into<String>, native_type: NativeType, db_type: impl Into<String>) -> Self {
        let db_type = db_type.into();
        let column_type = map_column_type(native_type, &db_type, None, None, &EmptyTypeCatalog);

        Self {
            name: name.into(),
            native_type,
            db_type,
            size: None,
            scale: None,
            is_primary_key: false,
            is_auto_increment: false,
            allow_null: true,
            default_value: None,
            comment: None,
            column_type,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the declared size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self.resolve_type(&EmptyTypeCatalog)
    }

    /// Set the declared scale
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self.resolve_type(&EmptyTypeCatalog)
    }

    /// Mark the column as part of the primary key (implies NOT NULL)
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.allow_null = false;
        self
    }

    /// Mark the column as an auto-increment primary key
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self.primary_key()
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Re-map the column type against a dialect type catalog.
    ///
    /// Call this after size and scale are final.
    pub fn resolve_type(mut self, catalog: &dyn TypeCatalog) -> Self {
        self.column_type = map_column_type(
            self.native_type,
            &self.db_type,
            self.size,
            self.scale,
            catalog,
        );
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the catalog reported a non-empty comment
    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Check the column invariants in the context of `table`
    pub fn validate_in(&self, table: &str) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::column_validation(
                table,
                &self.name,
                "column name cannot be empty",
            ));
        }
        if self.is_auto_increment && !self.is_primary_key {
            return Err(EngineError::column_validation(
                table,
                &self.name,
                "auto-increment columns must be part of the primary key",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
