//! `SHOW CREATE TABLE` parser for MySQL

use super::{DdlParser, ParsedDdl};
use regex::{Captures, Regex};
use schemagen_core::ReferentialAction;
use schemagen_ir::ForeignKey;
use std::sync::LazyLock;

static FOREIGN_KEY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?msi)CONSTRAINT\s+(?P<name>[^()]+?)\s+FOREIGN\s+KEY\s*\((?P<column>[^()]+)\)\s*REFERENCES\s+(?P<table>[^()]+?)\s*\((?P<foreign_column>[^()]+)\)(?:\s+ON\s+DELETE\s+(?P<on_delete>CASCADE|RESTRICT|SET\s+NULL|NO\s+ACTION))?(?:\s+ON\s+UPDATE\s+(?P<on_update>CASCADE|RESTRICT|SET\s+NULL|NO\s+ACTION))?",
    )
    .ok()
});

static TABLE_COMMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?msi)^CREATE\s+TABLE\s[^(]*\(.*\)[^)]*COMMENT\s*=\s*'(?P<comment>.*)'[^)]*$").ok()
});

/// Parser for MySQL `SHOW CREATE TABLE` output
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDdlParser;

impl MySqlDdlParser {
    pub fn new() -> Self {
        Self
    }

    /// Foreign-key clauses in the order they appear in the dump
    pub fn foreign_keys(&self, ddl: &str) -> Vec<ForeignKey> {
        let Some(pattern) = FOREIGN_KEY.as_ref() else {
            return Vec::new();
        };

        pattern
            .captures_iter(ddl)
            .map(|caps| {
                let mut fk = ForeignKey::new(
                    identifier(&caps, "name"),
                    identifier(&caps, "column"),
                    identifier(&caps, "table"),
                    identifier(&caps, "foreign_column"),
                );
                fk.on_delete = action(&caps, "on_delete");
                fk.on_update = action(&caps, "on_update");
                fk
            })
            .collect()
    }

    /// Table-level `COMMENT='...'` trailing the column list
    pub fn table_comment(&self, ddl: &str) -> Option<String> {
        let pattern = TABLE_COMMENT.as_ref()?;
        let comment = pattern.captures(ddl)?.name("comment")?.as_str();
        (!comment.is_empty()).then(|| comment.replace("''", "'"))
    }
}

impl DdlParser for MySqlDdlParser {
    fn parse(&self, ddl: &str) -> ParsedDdl {
        ParsedDdl {
            foreign_keys: self.foreign_keys(ddl),
            comment: self.table_comment(ddl),
        }
    }
}

fn identifier(caps: &Captures<'_>, group: &str) -> String {
    caps.name(group)
        .map(|m| m.as_str().replace('`', "").trim().to_string())
        .unwrap_or_default()
}

fn action(caps: &Captures<'_>, group: &str) -> Option<ReferentialAction> {
    caps.name(group).and_then(|m| m.as_str().parse().ok())
}
