//! # Migration Synthesizer
//!
//! Renders a [`MigrationScript`] into a migration class. Statement order and
//! spacing live here and are shared by every style; the text of each
//! statement comes from a [`StatementFormatter`].
//!
//! ## Ordering
//!
//! - `up()`: tables in script order, each followed by its indexes. Foreign
//!   keys come last, grouped per table in script order, each group in
//!   reverse declaration order.
//! - `down()`: foreign key checks suspended, tables dropped in reverse
//!   creation order, checks restored. Empty when the script has no tables.

use crate::GeneratedFile;
use crate::formatter::{StatementFormatter, table_options};
use schemagen_core::CodeGenContext;
use schemagen_ir::MigrationScript;
use std::path::PathBuf;

const DISABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS = 0";
const ENABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS = 1";

/// Base class every generated migration extends
pub const MIGRATION_BASE_CLASS: &str = "yii\\db\\Migration";

/// Renders migration scripts with one statement formatter
#[derive(Debug, Clone)]
pub struct MigrationSynthesizer<F> {
    formatter: F,
}

impl<F: StatementFormatter> MigrationSynthesizer<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// Render `script` as a file under `migration_path`, placed in the
    /// style's subdirectory: `<migration_path>[/<dir>]/<name>.php`
    pub fn render_file(&self, script: &MigrationScript, migration_path: &str) -> GeneratedFile {
        let style = self.formatter.style();
        let mut path = PathBuf::from(migration_path);
        if let Some(dir) = style.subdirectory() {
            path.push(dir);
        }
        path.push(format!("{}.php", script.name));

        GeneratedFile::new(path, self.render(script), style)
    }

    /// Render the complete migration class
    pub fn render(&self, script: &MigrationScript) -> String {
        let mut out = String::with_capacity(4096);

        out.push_str("<?php\n\n");
        out.push_str("use yii\\db\\Schema;\n\n");
        out.push_str(&format!(
            "class {} extends {MIGRATION_BASE_CLASS}\n{{\n",
            script.name
        ));

        out.push_str("    public function up()\n    {\n");
        out.push_str(&self.render_up(script));
        out.push_str("    }\n\n");

        out.push_str("    public function down()\n    {\n");
        out.push_str(&self.render_down(script));
        out.push_str("    }\n");

        out.push_str("}\n");
        out
    }

    /// Body of `up()`
    pub fn render_up(&self, script: &MigrationScript) -> String {
        let ctx = CodeGenContext::at_level(2);
        let f = &self.formatter;
        let mut out = String::new();

        // ── Tables and indexes ───────────────────────────────────────────
        let last = script.tables.len().saturating_sub(1);
        for (i, table) in script.tables.iter().enumerate() {
            let options = table_options(table, script.table_options.as_deref());
            out.push_str(&f.create_table(table, options.as_deref(), &ctx));

            if f.separate_constraints() && table.has_indexes() {
                out.push('\n');
                for index in &table.indexes {
                    out.push_str(&f.create_index(table, index, &ctx));
                }
            }

            if i != last {
                out.push_str(f.table_separator());
            }
        }

        // ── Foreign keys ─────────────────────────────────────────────────
        if f.separate_constraints() {
            let mut first = true;
            for table in script.tables.iter().filter(|t| t.has_foreign_keys()) {
                if first {
                    out.push('\n');
                    first = false;
                }
                out.push('\n');
                for foreign_key in table.foreign_keys_for_render() {
                    out.push_str(&f.add_foreign_key(table, foreign_key, &ctx));
                }
            }
        }

        out
    }

    /// Body of `down()`
    pub fn render_down(&self, script: &MigrationScript) -> String {
        if script.is_empty() {
            return String::new();
        }

        let ctx = CodeGenContext::at_level(2);
        let f = &self.formatter;
        let spaced = script.table_count() > 1;
        let mut out = String::new();

        out.push_str(&f.execute(DISABLE_FOREIGN_KEY_CHECKS, &ctx));
        if spaced {
            out.push('\n');
        }

        for table in script.tables_for_drop() {
            out.push_str(&f.drop_table(table, &ctx));
        }

        if spaced {
            out.push('\n');
        }
        out.push_str(&f.execute(ENABLE_FOREIGN_KEY_CHECKS, &ctx));

        out
    }
}
