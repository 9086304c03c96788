//! # Statement Formatters
//!
//! The synthesizer owns statement ordering and spacing; a
//! [`StatementFormatter`] owns the text of each statement. Two formatters
//! exist:
//!
//! - [`BuilderFormatter`]: `createTable` with column builder calls, separate
//!   `createIndex` and `addForeignKey` statements
//! - [`RawFormatter`]: one `execute("<dump>")` per table, constraints inside
//!   the dump

mod builder;
mod raw;

pub use builder::BuilderFormatter;
pub use raw::RawFormatter;

use crate::ScriptStyle;
use schemagen_core::CodeGenContext;
use schemagen_ir::{ForeignKey, Index, TableSchema};

/// Per-statement text of one script style.
///
/// Every method returns complete lines, each terminated by `\n`, indented
/// with `ctx`.
pub trait StatementFormatter {
    /// The style this formatter produces
    fn style(&self) -> ScriptStyle;

    /// Whether indexes and foreign keys are emitted as their own statements
    fn separate_constraints(&self) -> bool;

    /// Text emitted between two consecutive table definitions in `up()`
    fn table_separator(&self) -> &'static str;

    /// Create statement for `table`; `table_options` is already escaped
    fn create_table(
        &self,
        table: &TableSchema,
        table_options: Option<&str>,
        ctx: &CodeGenContext,
    ) -> String;

    /// Create statement for a secondary index of `table`
    fn create_index(&self, table: &TableSchema, index: &Index, ctx: &CodeGenContext) -> String;

    /// Statement adding a foreign key of `table`
    fn add_foreign_key(
        &self,
        table: &TableSchema,
        foreign_key: &ForeignKey,
        ctx: &CodeGenContext,
    ) -> String;

    /// Drop statement for `table`
    fn drop_table(&self, table: &TableSchema, ctx: &CodeGenContext) -> String;

    /// Raw single-line SQL statement
    fn execute(&self, sql: &str, ctx: &CodeGenContext) -> String {
        ctx.line(format!("$this->execute('{}');\n", php_single_quoted(sql)))
    }
}

// ============================================================================
// Escaping
// ============================================================================

/// Escape a value for a single-quoted PHP string literal
pub fn php_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a value for a double-quoted PHP string literal
pub fn php_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a value for a double-quoted SQL string (`COMMENT "..."`)
pub fn sql_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Storage options for `table`: caller options followed by the table comment.
///
/// The result is escaped for embedding in a single-quoted PHP string and is
/// `None` when nothing remains after trimming.
pub fn table_options(table: &TableSchema, caller_options: Option<&str>) -> Option<String> {
    let mut options = caller_options.unwrap_or_default().to_string();
    if let Some(comment) = table.comment.as_deref().filter(|c| !c.is_empty()) {
        options.push_str(&format!(" COMMENT=\"{}\"", sql_double_quoted(comment)));
    }

    let options = options.trim();
    (!options.is_empty()).then(|| php_single_quoted(options))
}
