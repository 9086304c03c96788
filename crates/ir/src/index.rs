//! Secondary index definitions

use serde::{Deserialize, Serialize};

/// Name the catalog reports for the primary key; never modeled as an index
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// Highest column count an index may have (MySQL allows 16 key parts)
pub const MAX_INDEX_COLUMNS: usize = 64;

/// A non-primary index of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name (unique within the table)
    pub name: String,

    /// Column names in index sequence order
    pub columns: Vec<String>,

    /// Whether the index enforces uniqueness
    pub is_unique: bool,
}

impl Index {
    /// Create an empty index
    pub fn new(name: impl Into<String>, is_unique: bool) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            is_unique,
        }
    }

    /// Append a column at the end of the sequence
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Place `column` at the 0-based `position`, growing the sequence when
    /// catalog rows arrive out of order.
    ///
    /// Positions at or beyond [`MAX_INDEX_COLUMNS`] are refused and leave the
    /// index unchanged; returns whether the column was placed.
    pub fn set_column(&mut self, position: usize, column: impl Into<String>) -> bool {
        if position >= MAX_INDEX_COLUMNS {
            return false;
        }
        if self.columns.len() <= position {
            self.columns.resize(position + 1, String::new());
        }
        self.columns[position] = column.into();
        true
    }

    /// Columns joined the way the migration builder expects them
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .filter(|c| !c.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether this is the catalog's primary-key entry
    pub fn is_primary(name: &str) -> bool {
        name == PRIMARY_KEY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_list() {
        let index = Index::new("idx_name", false)
            .with_column("last_name")
            .with_column("first_name");
        assert_eq!(index.column_list(), "last_name, first_name");
    }

    #[test]
    fn test_set_column_out_of_order() {
        let mut index = Index::new("idx", true);
        assert!(index.set_column(1, "b"));
        assert!(index.set_column(0, "a"));
        assert_eq!(index.columns, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_column_refuses_out_of_range_position() {
        let mut index = Index::new("idx", false).with_column("a");
        assert!(!index.set_column(u32::MAX as usize, "b"));
        assert!(!index.set_column(MAX_INDEX_COLUMNS, "b"));
        assert_eq!(index.columns, vec!["a".to_string()]);
        assert!(index.set_column(MAX_INDEX_COLUMNS - 1, "z"));
        assert_eq!(index.columns.len(), MAX_INDEX_COLUMNS);
    }

    #[test]
    fn test_primary_name() {
        assert!(Index::is_primary("PRIMARY"));
        assert!(!Index::is_primary("primary_idx"));
    }
}
