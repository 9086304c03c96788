//! Error types for Schemagen
//!
//! This module provides unified error handling across the workspace:
//! request validation, connection resolution, catalog access, output files
//! and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Schemagen
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single request field failed validation
    #[error("Invalid value for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// A column breaks a model invariant
    #[error("Column validation failed for '{table}.{column}': {message}")]
    ColumnValidation {
        table: String,
        column: String,
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// No connection is registered under the requested id
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// The connection exists but cannot be reached or opened
    #[error("Connection '{connection}' is unavailable: {message}")]
    ConnectionUnavailable { connection: String, message: String },

    /// A catalog query failed while reading a table
    #[error("Catalog query failed for table '{table}': {message}")]
    Catalog { table: String, message: String },

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// Output file already exists
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Create a field-level validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a column validation error
    pub fn column_validation(
        table: impl Into<String>,
        column: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        EngineError::ColumnValidation {
            table: table.into(),
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create a connection-unavailable error
    pub fn unavailable(connection: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::ConnectionUnavailable {
            connection: connection.into(),
            message: msg.into(),
        }
    }

    /// Create a catalog query error
    pub fn catalog(table: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::Catalog {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_)
                | EngineError::FieldValidation { .. }
                | EngineError::ColumnValidation { .. }
        )
    }

    /// Check if this error means the connection cannot be used at all
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            EngineError::ConnectionNotFound(_)
                | EngineError::ConnectionUnavailable { .. }
                | EngineError::Catalog { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
                | EngineError::OutputExists(_)
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = EngineError::validation("Table name is required");
        assert!(err.is_validation());
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Validation error: Table name is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = EngineError::field_validation(
            "migrationName",
            "The migration name should contain letters, digits and/or underscore characters only.",
        );
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid value for 'migrationName': The migration name should contain letters, digits and/or underscore characters only."
        );
    }

    #[test]
    fn test_column_validation_error() {
        let err = EngineError::column_validation("users", "id", "auto-increment requires a primary key");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Column validation failed for 'users.id': auto-increment requires a primary key"
        );
    }

    #[test]
    fn test_connection_errors() {
        let err = EngineError::ConnectionNotFound("db".to_string());
        assert!(err.is_connection());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Connection not found: db");

        let err = EngineError::unavailable("db", "snapshot missing");
        assert!(err.is_connection());
        assert_eq!(
            err.to_string(),
            "Connection 'db' is unavailable: snapshot missing"
        );

        let err = EngineError::catalog("users", "lost connection");
        assert!(err.is_connection());
    }

    #[test]
    fn test_io_error_classification() {
        let err = EngineError::FileWrite {
            path: PathBuf::from("migrations/m1.php"),
            message: "permission denied".to_string(),
        };
        assert!(err.is_io());
        assert!(!err.is_validation());
        assert!(EngineError::OutputExists(PathBuf::from("m1.php")).is_io());
    }
}
