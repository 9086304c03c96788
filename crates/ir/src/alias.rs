//! Prefix-neutral table aliases
//!
//! A storage name such as `tbl_users` becomes `{{%users}}` when the
//! connection's table prefix is `tbl_`. Replaying a script that uses aliases
//! against a database with a different prefix still resolves to the right
//! physical table.

use serde::{Deserialize, Serialize};

/// Placeholder that stands in for the configured table prefix
pub const PREFIX_MARKER: &str = "%";

/// Opening delimiter of a table reference
pub const ALIAS_OPEN: &str = "{{";

/// Closing delimiter of a table reference
pub const ALIAS_CLOSE: &str = "}}";

/// Whether `name` is already wrapped as a table reference
pub fn is_aliased(name: &str) -> bool {
    name.len() >= ALIAS_OPEN.len() + ALIAS_CLOSE.len()
        && name.starts_with(ALIAS_OPEN)
        && name.ends_with(ALIAS_CLOSE)
}

/// Convert a storage table name into its alias for `prefix`.
///
/// Already-aliased names are returned unchanged.
pub fn table_alias(table_name: &str, prefix: &str) -> String {
    if is_aliased(table_name) {
        return table_name.to_string();
    }

    let marked = if !prefix.is_empty() && table_name.contains(prefix) {
        table_name.replacen(prefix, PREFIX_MARKER, 1)
    } else {
        format!("{PREFIX_MARKER}{table_name}")
    };

    format!("{ALIAS_OPEN}{marked}{ALIAS_CLOSE}")
}

// ============================================================================
// AliasContext
// ============================================================================

/// Read-only alias state for one generation pass: the connection's prefix
/// and every table name the connection knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasContext {
    prefix: String,
    known_table_names: Vec<String>,
}

impl AliasContext {
    /// Create a context. Known names are kept longest first so that DDL
    /// rewriting never replaces part of a longer name.
    pub fn new(prefix: impl Into<String>, known_table_names: Vec<String>) -> Self {
        let mut known_table_names = known_table_names;
        known_table_names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        known_table_names.dedup();

        Self {
            prefix: prefix.into(),
            known_table_names,
        }
    }

    /// The configured table prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Table names known to the connection
    pub fn known_table_names(&self) -> &[String] {
        &self.known_table_names
    }

    /// Alias a single table name
    pub fn alias(&self, table_name: &str) -> String {
        table_alias(table_name, &self.prefix)
    }

    /// Rewrite every back-quoted known table name in a DDL dump to its alias
    pub fn rewrite_ddl(&self, ddl: &str) -> String {
        self.known_table_names
            .iter()
            .fold(ddl.to_string(), |sql, name| {
                sql.replace(&format!("`{name}`"), &self.alias(name))
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
