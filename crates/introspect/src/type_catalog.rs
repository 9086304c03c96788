//! MySQL type catalog

use schemagen_core::TypeCatalog;

/// Bare type names the MySQL schema recognizes
const MYSQL_TYPE_NAMES: &[&str] = &[
    "tinyint",
    "bit",
    "smallint",
    "mediumint",
    "int",
    "integer",
    "bigint",
    "float",
    "double",
    "real",
    "decimal",
    "numeric",
    "tinytext",
    "mediumtext",
    "longtext",
    "longblob",
    "blob",
    "text",
    "varchar",
    "string",
    "char",
    "datetime",
    "year",
    "date",
    "time",
    "timestamp",
    "enum",
    "varbinary",
    "json",
];

/// Type catalog of the MySQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlTypeCatalog;

impl TypeCatalog for MySqlTypeCatalog {
    fn recognizes(&self, type_name: &str) -> bool {
        MYSQL_TYPE_NAMES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_case_insensitively() {
        assert!(MySqlTypeCatalog.recognizes("VARBINARY"));
        assert!(MySqlTypeCatalog.recognizes("tinyint"));
        assert!(!MySqlTypeCatalog.recognizes("geometry"));
        assert!(!MySqlTypeCatalog.recognizes("tinyint(1)"));
    }
}
