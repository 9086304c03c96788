//! Schema extraction
//!
//! Builds one [`TableSchema`] per requested table from a connection's catalog
//! rows and DDL dump. Tables missing from the catalog are skipped; catalog
//! failures abort the whole extraction.

use crate::connection::{ColumnMetadata, IndexRow, SchemaConnection};
use crate::ddl::{DdlParser, MySqlDdlParser};
use schemagen_core::{EngineResult, TypeCatalog};
use schemagen_ir::{AliasContext, Column, Index, MAX_INDEX_COLUMNS, TableSchema};
use tracing::{debug, warn};

/// Extracts table schemas from one connection
pub struct SchemaExtractor<'a> {
    connection: &'a dyn SchemaConnection,
    use_alias: bool,
    parser: Box<dyn DdlParser + 'a>,
}

impl<'a> SchemaExtractor<'a> {
    /// Create an extractor using the MySQL DDL parser
    pub fn new(connection: &'a dyn SchemaConnection, use_alias: bool) -> Self {
        Self {
            connection,
            use_alias,
            parser: Box::new(MySqlDdlParser::new()),
        }
    }

    /// Use a different dialect parser
    pub fn with_parser(mut self, parser: impl DdlParser + 'a) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Alias state for this connection, when alias rewriting is on
    pub fn alias_context(&self) -> EngineResult<Option<AliasContext>> {
        if !self.use_alias {
            return Ok(None);
        }
        Ok(Some(AliasContext::new(
            self.connection.table_prefix(),
            self.connection.table_names()?,
        )))
    }

    /// Extract one table; `Ok(None)` when the catalog does not know it
    pub fn extract(&self, name: &str) -> EngineResult<Option<TableSchema>> {
        let alias = self.alias_context()?;
        self.extract_with(name, alias.as_ref())
    }

    /// Extract every table in `names`, in input order, skipping missing ones
    pub fn extract_all(&self, names: &[String]) -> EngineResult<Vec<TableSchema>> {
        let alias = self.alias_context()?;
        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            if let Some(table) = self.extract_with(name, alias.as_ref())? {
                tables.push(table);
            }
        }
        Ok(tables)
    }

    fn extract_with(
        &self,
        name: &str,
        alias: Option<&AliasContext>,
    ) -> EngineResult<Option<TableSchema>> {
        let Some(metadata) = self.connection.table_metadata(name)? else {
            debug!(table = name, "Table not found in catalog, skipping");
            return Ok(None);
        };

        let catalog = self.connection.type_catalog();
        let mut table = TableSchema::new(name);
        table.columns = metadata
            .columns
            .into_iter()
            .map(|c| build_column(c, catalog))
            .collect();
        table.indexes = group_indexes(self.connection.index_rows(name)?);

        let mut ddl = self.connection.create_table_sql(name)?;
        if let Some(alias) = alias {
            ddl = alias.rewrite_ddl(&ddl);
            table.aliased_name = alias.alias(name);
        }

        let parsed = self.parser.parse(&ddl);
        table.foreign_keys = parsed
            .foreign_keys
            .into_iter()
            .map(|fk| match alias {
                Some(alias) => {
                    let foreign_table = alias.alias(&fk.foreign_table);
                    fk.with_foreign_table(foreign_table)
                }
                None => fk,
            })
            .collect();
        table.comment = parsed.comment;
        table.raw_ddl = ddl;

        debug!(
            table = name,
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            foreign_keys = table.foreign_keys.len(),
            "Extracted table"
        );

        Ok(Some(table))
    }
}

fn build_column(metadata: ColumnMetadata, catalog: &dyn TypeCatalog) -> Column {
    let mut column = Column::new(metadata.name, metadata.native_type, metadata.db_type);
    column.size = metadata.size;
    column.scale = metadata.scale;
    column.is_primary_key = metadata.is_primary_key || metadata.is_auto_increment;
    column.is_auto_increment = metadata.is_auto_increment;
    column.allow_null = metadata.allow_null;
    column.default_value = metadata.default_value;
    column.comment = metadata.comment;
    column.resolve_type(catalog)
}

/// Group raw index rows by key name in first-appearance order, skipping the
/// primary key and placing each column at its 0-based sequence position.
fn group_indexes(rows: Vec<IndexRow>) -> Vec<Index> {
    let mut indexes: Vec<Index> = Vec::new();
    for row in rows {
        if Index::is_primary(&row.key_name) {
            continue;
        }
        let position = row.seq_in_index.saturating_sub(1) as usize;
        if position >= MAX_INDEX_COLUMNS {
            warn!(
                index = %row.key_name,
                seq_in_index = row.seq_in_index,
                "Index column sequence out of range, skipping row"
            );
            continue;
        }
        match indexes.iter_mut().find(|i| i.name == row.key_name) {
            Some(index) => {
                index.is_unique = !row.non_unique;
                index.set_column(position, row.column_name);
            }
            None => {
                let mut index = Index::new(row.key_name, !row.non_unique);
                index.set_column(position, row.column_name);
                indexes.push(index);
            }
        }
    }
    indexes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::TableMetadata;
    use crate::type_catalog::MySqlTypeCatalog;
    use pretty_assertions::assert_eq;
    use schemagen_core::{EngineError, NativeType, ReferentialAction};
    use schemagen_ir::{ForeignKey, TypeDescriptor};

    struct FakeConnection {
        prefix: String,
        tables: Vec<(String, TableMetadata, Vec<IndexRow>, String)>,
        fail_on: Option<String>,
    }

    impl FakeConnection {
        fn lookup(&self, name: &str) -> Option<&(String, TableMetadata, Vec<IndexRow>, String)> {
            self.tables.iter().find(|(n, ..)| n == name)
        }
    }

    impl SchemaConnection for FakeConnection {
        fn table_prefix(&self) -> &str {
            &self.prefix
        }
        fn table_names(&self) -> EngineResult<Vec<String>> {
            Ok(self.tables.iter().map(|(n, ..)| n.clone()).collect())
        }
        fn table_metadata(&self, name: &str) -> EngineResult<Option<TableMetadata>> {
            if self.fail_on.as_deref() == Some(name) {
                return Err(EngineError::catalog(name, "server has gone away"));
            }
            Ok(self.lookup(name).map(|(_, m, ..)| m.clone()))
        }
        fn index_rows(&self, name: &str) -> EngineResult<Vec<IndexRow>> {
            Ok(self.lookup(name).map(|(_, _, i, _)| i.clone()).unwrap_or_default())
        }
        fn create_table_sql(&self, name: &str) -> EngineResult<String> {
            self.lookup(name)
                .map(|(.., ddl)| ddl.clone())
                .ok_or_else(|| EngineError::catalog(name, "no such table"))
        }
        fn type_catalog(&self) -> &dyn TypeCatalog {
            &MySqlTypeCatalog
        }
    }

    fn column(name: &str, native_type: NativeType, db_type: &str) -> ColumnMetadata {
        ColumnMetadata {
            name: name.to_string(),
            native_type,
            db_type: db_type.to_string(),
            size: None,
            scale: None,
            is_primary_key: false,
            is_auto_increment: false,
            allow_null: true,
            default_value: None,
            comment: None,
        }
    }

    fn shop() -> FakeConnection {
        let users = TableMetadata {
            name: "tbl_users".to_string(),
            columns: vec![
                ColumnMetadata {
                    size: Some(11),
                    is_primary_key: true,
                    is_auto_increment: true,
                    allow_null: false,
                    ..column("id", NativeType::Integer, "int(11)")
                },
                ColumnMetadata {
                    size: Some(255),
                    allow_null: false,
                    ..column("email", NativeType::String, "varchar(255)")
                },
                ColumnMetadata {
                    size: Some(3),
                    ..column("flags", NativeType::TinyInteger, "tinyint")
                },
            ],
        };
        let users_indexes = vec![
            IndexRow::new("PRIMARY", "id", 1, false),
            IndexRow::new("idx_email_flags", "flags", 2, false),
            IndexRow::new("idx_email_flags", "email", 1, false),
            IndexRow::new("idx_flags", "flags", 1, true),
        ];
        let users_ddl = "CREATE TABLE `tbl_users` (\n  `id` int(11) NOT NULL AUTO_INCREMENT,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB COMMENT='Accounts'".to_string();

        let orders = TableMetadata {
            name: "tbl_orders".to_string(),
            columns: vec![
                ColumnMetadata {
                    is_primary_key: true,
                    allow_null: false,
                    ..column("id", NativeType::Integer, "int(11)")
                },
                column("user_id", NativeType::Integer, "int(11)"),
            ],
        };
        let orders_ddl = "CREATE TABLE `tbl_orders` (\n  `id` int(11) NOT NULL,\n  `user_id` int(11) DEFAULT NULL,\n  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `tbl_users` (`id`) ON DELETE CASCADE\n) ENGINE=InnoDB".to_string();

        FakeConnection {
            prefix: "tbl_".to_string(),
            tables: vec![
                ("tbl_users".to_string(), users, users_indexes, users_ddl),
                ("tbl_orders".to_string(), orders, vec![], orders_ddl),
            ],
            fail_on: None,
        }
    }

    #[test]
    fn test_extract_columns_and_types() {
        let conn = shop();
        let table = SchemaExtractor::new(&conn, true)
            .extract("tbl_users")
            .unwrap()
            .unwrap();

        assert_eq!(table.name, "tbl_users");
        assert_eq!(table.aliased_name, "{{%users}}");
        assert_eq!(table.comment.as_deref(), Some("Accounts"));

        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email", "flags"]);
        assert_eq!(table.columns[0].column_type, TypeDescriptor::builder("integer", vec![]));
        assert_eq!(table.columns[1].column_type, TypeDescriptor::builder("string", vec![255]));
        assert_eq!(table.columns[2].column_type, TypeDescriptor::raw("TINYINT(3)"));
    }

    #[test]
    fn test_indexes_grouped_by_sequence() {
        let conn = shop();
        let table = SchemaExtractor::new(&conn, false)
            .extract("tbl_users")
            .unwrap()
            .unwrap();

        assert!(table.index("PRIMARY").is_none());
        assert_eq!(table.indexes.len(), 2);
        assert_eq!(table.indexes[0].name, "idx_email_flags");
        assert_eq!(table.indexes[0].columns, vec!["email".to_string(), "flags".to_string()]);
        assert!(table.indexes[0].is_unique);
        assert!(!table.indexes[1].is_unique);
    }

    #[test]
    fn test_alias_rewriting() {
        let conn = shop();
        let table = SchemaExtractor::new(&conn, true)
            .extract("tbl_orders")
            .unwrap()
            .unwrap();

        assert_eq!(table.aliased_name, "{{%orders}}");
        assert!(table.raw_ddl.starts_with("CREATE TABLE {{%orders}} ("));
        assert!(table.raw_ddl.contains("REFERENCES {{%users}} (`id`)"));
        assert_eq!(
            table.foreign_keys,
            vec![
                ForeignKey::new("fk_orders_user", "user_id", "{{%users}}", "id")
                    .on_delete(ReferentialAction::Cascade)
            ]
        );
    }

    #[test]
    fn test_without_alias_names_are_kept() {
        let conn = shop();
        let table = SchemaExtractor::new(&conn, false)
            .extract("tbl_orders")
            .unwrap()
            .unwrap();

        assert_eq!(table.aliased_name, "tbl_orders");
        assert_eq!(table.foreign_keys[0].foreign_table, "tbl_users");
        assert!(table.raw_ddl.contains("`tbl_orders`"));
    }

    #[test]
    fn test_missing_tables_are_skipped() {
        let conn = shop();
        let extractor = SchemaExtractor::new(&conn, true);

        assert!(extractor.extract("tbl_missing").unwrap().is_none());

        let names = vec![
            "tbl_orders".to_string(),
            "tbl_missing".to_string(),
            "tbl_users".to_string(),
        ];
        let tables = extractor.extract_all(&names).unwrap();
        let extracted: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(extracted, vec!["tbl_orders", "tbl_users"]);
    }

    #[test]
    fn test_catalog_failure_aborts() {
        let conn = FakeConnection {
            fail_on: Some("tbl_orders".to_string()),
            ..shop()
        };
        let names = vec!["tbl_users".to_string(), "tbl_orders".to_string()];
        let err = SchemaExtractor::new(&conn, true)
            .extract_all(&names)
            .unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn test_custom_parser() {
        struct NoFacts;
        impl DdlParser for NoFacts {
            fn parse(&self, _ddl: &str) -> crate::ddl::ParsedDdl {
                crate::ddl::ParsedDdl::default()
            }
        }

        let conn = shop();
        let table = SchemaExtractor::new(&conn, true)
            .with_parser(NoFacts)
            .extract("tbl_orders")
            .unwrap()
            .unwrap();
        assert!(table.foreign_keys.is_empty());
        assert_eq!(table.comment, None);
    }

    #[test]
    fn test_group_indexes_out_of_order_rows() {
        let rows = vec![
            IndexRow::new("idx", "c", 3, true),
            IndexRow::new("idx", "a", 1, true),
            IndexRow::new("idx", "b", 2, true),
        ];
        let indexes = group_indexes(rows);
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].column_list(), "a, b, c");
    }

    #[test]
    fn test_group_indexes_skips_out_of_range_sequence() {
        let rows = vec![
            IndexRow::new("idx", "a", 1, true),
            IndexRow::new("idx", "huge", u32::MAX, true),
            IndexRow::new("other", "x", u32::MAX, false),
        ];
        let indexes = group_indexes(rows);
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].columns, vec!["a".to_string()]);
    }
}
