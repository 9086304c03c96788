//! DDL dump parsing
//!
//! Each dialect gets one [`DdlParser`]. A parser extracts only the facts the
//! catalog does not expose directly: foreign-key constraints and the table
//! comment. Parsers never fail; a dump they cannot read yields empty results.

mod mysql;

pub use mysql::MySqlDdlParser;

use schemagen_ir::ForeignKey;

/// Facts extracted from one `CREATE TABLE` dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDdl {
    /// Foreign keys in declaration order
    pub foreign_keys: Vec<ForeignKey>,

    /// Table-level comment, if the dump carries one
    pub comment: Option<String>,
}

/// Extracts foreign keys and the table comment from a dialect's DDL dump
pub trait DdlParser {
    fn parse(&self, ddl: &str) -> ParsedDdl;
}
