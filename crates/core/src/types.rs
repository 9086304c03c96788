//! Core types used throughout Schemagen
//!
//! This module contains the abstract column types reported by a catalog and
//! the referential actions a foreign key can carry.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Native Column Types
// ============================================================================

/// Abstract column type reported by a connection's catalog.
///
/// The raw dialect type string (e.g. `varchar(255)`) travels next to it;
/// this enum is the dialect-independent classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    /// Auto-increment integer primary key
    #[serde(rename = "pk")]
    PrimaryKey,
    /// Auto-increment big integer primary key
    #[serde(rename = "bigpk")]
    BigPrimaryKey,
    /// Fixed-length string (CHAR)
    Char,
    /// Variable-length string (VARCHAR, ENUM, SET, ...)
    #[default]
    String,
    /// Long-form text
    Text,
    #[serde(rename = "tinyint")]
    TinyInteger,
    #[serde(rename = "smallint")]
    SmallInteger,
    Integer,
    #[serde(rename = "bigint")]
    BigInteger,
    Float,
    Double,
    Decimal,
    #[serde(rename = "datetime")]
    DateTime,
    Timestamp,
    Time,
    Date,
    /// Binary data (BLOB, VARBINARY)
    Binary,
    Boolean,
    Money,
    Json,
    /// Anything the catalog could not classify
    #[serde(other)]
    Unknown,
}

impl NativeType {
    /// Catalog spelling of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::PrimaryKey => "pk",
            NativeType::BigPrimaryKey => "bigpk",
            NativeType::Char => "char",
            NativeType::String => "string",
            NativeType::Text => "text",
            NativeType::TinyInteger => "tinyint",
            NativeType::SmallInteger => "smallint",
            NativeType::Integer => "integer",
            NativeType::BigInteger => "bigint",
            NativeType::Float => "float",
            NativeType::Double => "double",
            NativeType::Decimal => "decimal",
            NativeType::DateTime => "datetime",
            NativeType::Timestamp => "timestamp",
            NativeType::Time => "time",
            NativeType::Date => "date",
            NativeType::Binary => "binary",
            NativeType::Boolean => "boolean",
            NativeType::Money => "money",
            NativeType::Json => "json",
            NativeType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Action taken on a foreign key when the referenced row changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    /// Delete or update related rows along with the parent
    Cascade,
    /// Prevent the change if related rows exist
    Restrict,
    /// Set the foreign key column to NULL
    SetNull,
    /// Do nothing (database default)
    NoAction,
}

impl ReferentialAction {
    /// Get SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
        }
    }

    /// Get all referential actions
    pub fn all() -> &'static [ReferentialAction] {
        &[
            ReferentialAction::Cascade,
            ReferentialAction::Restrict,
            ReferentialAction::SetNull,
            ReferentialAction::NoAction,
        ]
    }
}

impl FromStr for ReferentialAction {
    type Err = String;

    /// Parse a SQL keyword, case-insensitive and tolerant of inner whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        ReferentialAction::all()
            .iter()
            .copied()
            .find(|action| action.to_sql().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown referential action: {s}"))
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_native_type_serde_names() {
        let json = serde_json::to_string(&NativeType::BigInteger).unwrap();
        assert_eq!(json, "\"bigint\"");

        let parsed: NativeType = serde_json::from_str("\"pk\"").unwrap();
        assert_eq!(parsed, NativeType::PrimaryKey);

        let parsed: NativeType = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(parsed, NativeType::DateTime);
    }

    #[test]
    fn test_native_type_unknown_fallback() {
        let parsed: NativeType = serde_json::from_str("\"geometry\"").unwrap();
        assert_eq!(parsed, NativeType::Unknown);
    }

    #[test]
    fn test_native_type_display_matches_serde() {
        for ty in [
            NativeType::Integer,
            NativeType::SmallInteger,
            NativeType::Money,
            NativeType::Json,
        ] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty));
        }
    }

    #[test]
    fn test_referential_action_parse() {
        assert_eq!(
            "cascade".parse::<ReferentialAction>(),
            Ok(ReferentialAction::Cascade)
        );
        assert_eq!(
            "SET   NULL".parse::<ReferentialAction>(),
            Ok(ReferentialAction::SetNull)
        );
        assert_eq!(
            "No Action".parse::<ReferentialAction>(),
            Ok(ReferentialAction::NoAction)
        );
        assert!("SET DEFAULT".parse::<ReferentialAction>().is_err());
    }

    #[test]
    fn test_referential_action_display() {
        assert_eq!(ReferentialAction::SetNull.to_string(), "SET NULL");
        assert_eq!(ReferentialAction::Restrict.to_string(), "RESTRICT");
    }
}
