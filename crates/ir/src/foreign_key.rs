//! Foreign key constraints parsed from a table's DDL dump

use schemagen_core::ReferentialAction;
use serde::{Deserialize, Serialize};

/// A `CONSTRAINT ... FOREIGN KEY ... REFERENCES ...` clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name
    pub name: String,

    /// Local column list, as written in the dump
    pub column: String,

    /// Referenced table (aliased when alias rewriting is on)
    pub foreign_table: String,

    /// Referenced column list
    pub foreign_column: String,

    /// `ON DELETE` action, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,

    /// `ON UPDATE` action, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Create a constraint with no referential actions
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Set the `ON DELETE` action
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Set the `ON UPDATE` action
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Replace the referenced table name
    pub fn with_foreign_table(mut self, foreign_table: impl Into<String>) -> Self {
        self.foreign_table = foreign_table.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let fk = ForeignKey::new("fk_orders_user", "user_id", "users", "id")
            .on_delete(ReferentialAction::Cascade);
        assert_eq!(fk.on_delete, Some(ReferentialAction::Cascade));
        assert_eq!(fk.on_update, None);
    }

    #[test]
    fn test_serde_skips_missing_actions() {
        let fk = ForeignKey::new("fk", "a", "b", "c");
        let json = serde_json::to_value(&fk).unwrap();
        assert!(json.get("on_delete").is_none());

        let fk = fk.on_update(ReferentialAction::SetNull);
        let json = serde_json::to_value(&fk).unwrap();
        assert_eq!(json["on_update"], "SET_NULL");
    }
}
