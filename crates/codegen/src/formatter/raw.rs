//! Raw-statement style: the table's own DDL dump, executed verbatim

use super::{StatementFormatter, php_double_quoted, php_single_quoted};
use crate::ScriptStyle;
use schemagen_core::CodeGenContext;
use schemagen_ir::{ForeignKey, Index, TableSchema};

/// Formats tables as `$this->execute("<dump>")`
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl RawFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl StatementFormatter for RawFormatter {
    fn style(&self) -> ScriptStyle {
        ScriptStyle::Raw
    }

    fn separate_constraints(&self) -> bool {
        false
    }

    fn table_separator(&self) -> &'static str {
        ""
    }

    fn create_table(
        &self,
        table: &TableSchema,
        _table_options: Option<&str>,
        ctx: &CodeGenContext,
    ) -> String {
        let inner = ctx.indented();
        let dump = php_double_quoted(&table.raw_ddl).replace('\n', &format!("\n{}", inner.indent()));

        let mut out = String::with_capacity(dump.len() + 64);
        out.push_str(&ctx.line("$this->execute(\"\n"));
        out.push_str(&inner.line(dump));
        out.push('\n');
        out.push_str(&ctx.line("\");\n"));
        out
    }

    // Indexes and foreign keys are part of the dump.
    fn create_index(&self, _table: &TableSchema, _index: &Index, _ctx: &CodeGenContext) -> String {
        String::new()
    }

    fn add_foreign_key(
        &self,
        _table: &TableSchema,
        _foreign_key: &ForeignKey,
        _ctx: &CodeGenContext,
    ) -> String {
        String::new()
    }

    fn drop_table(&self, table: &TableSchema, ctx: &CodeGenContext) -> String {
        ctx.line(format!(
            "$this->execute('DROP TABLE {}');\n",
            php_single_quoted(&table.aliased_name)
        ))
    }
}
