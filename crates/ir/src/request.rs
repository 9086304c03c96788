//! Generation request
//!
//! The inputs a caller hands to the generator, with the normalization and
//! validation rules applied before any catalog is queried.

use chrono::{DateTime, Utc};
use heck::ToSnakeCase;
use schemagen_core::{EngineError, EngineResult, Validatable};
use serde::{Deserialize, Serialize};

/// Default connection id
pub const DEFAULT_CONNECTION: &str = "db";

/// Default output directory for generated migrations
pub const DEFAULT_MIGRATION_PATH: &str = "migrations";

/// Selector value meaning every table of the connection
pub const ALL_TABLES: &str = "*";

/// Name hint for selectors covering several tables
pub const MULTI_TABLE_HINT: &str = "tables";

/// Message for migration names outside `^\w+$`
pub const MIGRATION_NAME_MESSAGE: &str =
    "The migration name should contain letters, digits and/or underscore characters only.";

/// Whether `name` matches `^\w+$` (ASCII word characters)
pub fn is_valid_migration_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Timestamped migration name, e.g. `m261014_093000_create`
pub fn migration_name_at(at: DateTime<Utc>) -> String {
    format!("m{}_create", at.format("%y%m%d_%H%M%S"))
}

/// Timestamped name mentioning a single table, e.g. `m261014_093000_create_user_profile`
pub fn suggested_migration_name(table: &str, at: DateTime<Utc>) -> String {
    let table = table.to_snake_case();
    if table.is_empty() || !is_valid_migration_name(&table) {
        return migration_name_at(at);
    }
    format!("{}_{table}", migration_name_at(at))
}

// ============================================================================
// TableSelector
// ============================================================================

/// Which tables a request covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableSelector {
    /// Every table, in catalog order
    All,
    /// An explicit list, in request order, without duplicates
    Named(Vec<String>),
}

impl TableSelector {
    /// Parse `*` or a comma-separated list. Entries are trimmed and blank
    /// entries dropped; a selection that leaves no names is rejected.
    pub fn parse(selector: &str) -> EngineResult<Self> {
        let selector = selector.trim();
        if selector == ALL_TABLES {
            return Ok(TableSelector::All);
        }

        let mut names: Vec<String> = Vec::new();
        for name in selector.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(EngineError::field_validation(
                "tables",
                "At least one table name is required.",
            ));
        }
        Ok(TableSelector::Named(names))
    }

    /// Resolve to concrete table names; `list_all` is only called for `*`
    pub fn resolve(
        &self,
        list_all: impl FnOnce() -> EngineResult<Vec<String>>,
    ) -> EngineResult<Vec<String>> {
        match self {
            TableSelector::All => list_all(),
            TableSelector::Named(names) => Ok(names.clone()),
        }
    }

    /// Table part of a suggested migration name: the table itself when
    /// exactly one is named, [`MULTI_TABLE_HINT`] otherwise
    pub fn name_hint(&self) -> &str {
        match self {
            TableSelector::Named(names) => match names.as_slice() {
                [name] => name,
                _ => MULTI_TABLE_HINT,
            },
            TableSelector::All => MULTI_TABLE_HINT,
        }
    }
}

// ============================================================================
// MigrationRequest
// ============================================================================

/// Caller input for one generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationRequest {
    /// Connection id to resolve through the connection provider
    pub connection: String,

    /// Directory the artifacts are keyed under
    pub migration_path: String,

    /// Table selector: `*` or a comma-separated list
    pub tables: String,

    /// Class name of the generated migration
    pub migration_name: String,

    /// Rewrite table names to prefix-neutral aliases
    pub use_table_prefix: bool,

    /// Raw storage options for every created table
    pub table_options: String,
}

impl Default for MigrationRequest {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            migration_path: DEFAULT_MIGRATION_PATH.to_string(),
            tables: String::new(),
            migration_name: migration_name_at(Utc::now()),
            use_table_prefix: true,
            table_options: String::new(),
        }
    }
}

impl MigrationRequest {
    /// Request for `tables` with every other field at its default
    pub fn new(tables: impl Into<String>) -> Self {
        Self {
            tables: tables.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.migration_name = name.into();
        self
    }

    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    pub fn with_migration_path(mut self, path: impl Into<String>) -> Self {
        self.migration_path = path.into();
        self
    }

    pub fn with_table_prefix(mut self, use_table_prefix: bool) -> Self {
        self.use_table_prefix = use_table_prefix;
        self
    }

    pub fn with_table_options(mut self, options: impl Into<String>) -> Self {
        self.table_options = options.into();
        self
    }

    /// Trim every string field; the migration path also loses surrounding
    /// backslashes and trailing slashes.
    pub fn normalized(mut self) -> Self {
        self.connection = self.connection.trim().to_string();
        self.tables = self.tables.trim().to_string();
        self.migration_name = self.migration_name.trim().to_string();
        self.table_options = self.table_options.trim().to_string();
        self.migration_path = self
            .migration_path
            .trim()
            .trim_matches('\\')
            .trim_end_matches('/')
            .to_string();
        self
    }

    /// Parsed table selector
    pub fn selector(&self) -> EngineResult<TableSelector> {
        TableSelector::parse(&self.tables)
    }
}

impl Validatable for MigrationRequest {
    fn validate(&self) -> EngineResult<()> {
        let required = [
            ("connection", "Database Connection ID", &self.connection),
            ("migration_path", "Migration Path", &self.migration_path),
            ("tables", "Table Name", &self.tables),
            ("migration_name", "Migration Name", &self.migration_name),
        ];
        for (field, label, value) in required {
            if value.trim().is_empty() {
                return Err(EngineError::field_validation(
                    field,
                    format!("{label} cannot be blank."),
                ));
            }
        }

        if !is_valid_migration_name(self.migration_name.trim()) {
            return Err(EngineError::field_validation("migration_name", MIGRATION_NAME_MESSAGE));
        }

        self.selector().map(|_| ())
    }

    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let required = [
            ("Database Connection ID", &self.connection),
            ("Migration Path", &self.migration_path),
            ("Table Name", &self.tables),
            ("Migration Name", &self.migration_name),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                errors.push(format!("{label} cannot be blank."));
            }
        }
        if !self.migration_name.trim().is_empty()
            && !is_valid_migration_name(self.migration_name.trim())
        {
            errors.push(MIGRATION_NAME_MESSAGE.to_string());
        }
        errors
    }
}
