//! Core traits for Schemagen
//!
//! This module defines the traits shared across the workspace: request and
//! model validation, dialect type catalogs, and the indentation context used
//! while rendering scripts.

use crate::error::EngineResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use schemagen_core::{Validatable, EngineResult, EngineError};
///
/// struct Request {
///     tables: String,
/// }
///
/// impl Validatable for Request {
///     fn validate(&self) -> EngineResult<()> {
///         if self.tables.trim().is_empty() {
///             return Err(EngineError::field_validation("tableName", "cannot be blank"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EngineError` describing the problem.
    fn validate(&self) -> EngineResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// TypeCatalog Trait
// ============================================================================

/// A dialect's own catalog of column type names.
///
/// Used by the type mapper when a column has no portable builder: the raw
/// type only receives a `(size)` suffix when the dialect knows the name.
pub trait TypeCatalog {
    /// Whether `type_name` (bare, without a parameter list) is a type the
    /// dialect recognizes. Matching is case-insensitive.
    fn recognizes(&self, type_name: &str) -> bool;
}

/// Catalog that recognizes nothing; raw types are always emitted verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTypeCatalog;

impl TypeCatalog for EmptyTypeCatalog {
    fn recognizes(&self, _type_name: &str) -> bool {
        false
    }
}

// ============================================================================
// CodeGenContext
// ============================================================================

/// Indentation state passed to script renderers
#[derive(Debug, Clone)]
pub struct CodeGenContext {
    /// Indentation level
    pub indent_level: usize,
    /// Use spaces (true) or tabs (false) for indentation
    pub use_spaces: bool,
    /// Number of spaces per indent level (if use_spaces is true)
    pub spaces_per_indent: usize,
}

impl CodeGenContext {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            use_spaces: true,
            spaces_per_indent: 4,
        }
    }

    /// Context starting at the given level
    pub fn at_level(indent_level: usize) -> Self {
        Self {
            indent_level,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.indent_level * self.spaces_per_indent)
        } else {
            "\t".repeat(self.indent_level)
        }
    }

    /// Create a new context with increased indentation
    pub fn indented(&self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
            ..self.clone()
        }
    }

    /// Prefix `line` with the current indentation
    pub fn line(&self, line: impl AsRef<str>) -> String {
        format!("{}{}", self.indent(), line.as_ref())
    }
}

impl Default for CodeGenContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
