//! Builder-call statements (`$this->createTable(...)` and friends)

use super::{StatementFormatter, php_single_quoted, sql_double_quoted};
use crate::ScriptStyle;
use schemagen_core::{CodeGenContext, NativeType, ReferentialAction};
use schemagen_ir::{Column, ForeignKey, Index, TableSchema, TypeDescriptor};

/// Formats tables as `createTable` calls with column builders
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderFormatter;

impl BuilderFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Full builder expression of a column, e.g.
    /// `$this->string(255)->notNull() . ' COMMENT "Login"'`
    pub fn column_definition(&self, column: &Column) -> String {
        let mut definition = String::new();
        let mut additional = String::new();

        match primary_key_builder(column) {
            Some(builder) => definition.push_str(builder),
            None => {
                definition.push_str(&type_call(&column.column_type));
                if column.is_primary_key && !is_primary_key_type(&column.column_type) {
                    additional.push_str(" PRIMARY KEY");
                }
            }
        }

        if let Some(default) = &column.default_value {
            definition.push_str(&format!("->defaultValue('{}')", php_single_quoted(default)));
        }

        if !column.allow_null {
            definition.push_str("->notNull()");
        }

        if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
            additional.push_str(&format!(" COMMENT \"{}\"", sql_double_quoted(comment)));
        }

        if !additional.is_empty() {
            definition.push_str(&format!(" . '{}'", php_single_quoted(&additional)));
        }

        definition
    }
}

/// Dedicated builder for auto-increment integer primary keys
fn primary_key_builder(column: &Column) -> Option<&'static str> {
    if !(column.is_primary_key && column.is_auto_increment) {
        return None;
    }
    match column.native_type {
        NativeType::Integer | NativeType::PrimaryKey => Some("$this->primaryKey()"),
        NativeType::BigInteger | NativeType::BigPrimaryKey => Some("$this->bigPrimaryKey()"),
        _ => None,
    }
}

fn is_primary_key_type(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor.builder_name(),
        Some("primaryKey") | Some("bigPrimaryKey")
    )
}

/// `$this->name(args)` or the schema-builder call for a raw type
fn type_call(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Builder { name, args } => {
            let args = args
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("$this->{name}({args})")
        }
        TypeDescriptor::Raw { db_type } => format!(
            "$this->getDb()->getSchema()->createColumnSchemaBuilder('{}')",
            php_single_quoted(db_type)
        ),
    }
}

fn action_literal(action: Option<ReferentialAction>) -> String {
    match action {
        Some(action) => format!("'{}'", action.to_sql()),
        None => "null".to_string(),
    }
}

impl StatementFormatter for BuilderFormatter {
    fn style(&self) -> ScriptStyle {
        ScriptStyle::Builder
    }

    fn separate_constraints(&self) -> bool {
        true
    }

    fn table_separator(&self) -> &'static str {
        "\n\n"
    }

    fn create_table(
        &self,
        table: &TableSchema,
        table_options: Option<&str>,
        ctx: &CodeGenContext,
    ) -> String {
        let inner = ctx.indented();
        let mut out = String::with_capacity(256);

        out.push_str(&ctx.line(format!(
            "$this->createTable('{}', [\n",
            php_single_quoted(&table.aliased_name)
        )));

        for column in &table.columns {
            out.push_str(&inner.line(format!(
                "'{}' => {},\n",
                php_single_quoted(&column.name),
                self.column_definition(column)
            )));
        }

        let options = table_options
            .map(|options| format!(", '{options}'"))
            .unwrap_or_default();
        out.push_str(&ctx.line(format!("]{options});\n")));

        out
    }

    fn create_index(&self, table: &TableSchema, index: &Index, ctx: &CodeGenContext) -> String {
        ctx.line(format!(
            "$this->createIndex('{}', '{}', '{}', {});\n",
            php_single_quoted(&index.name),
            php_single_quoted(&table.aliased_name),
            php_single_quoted(&index.column_list()),
            index.is_unique
        ))
    }

    fn add_foreign_key(
        &self,
        table: &TableSchema,
        foreign_key: &ForeignKey,
        ctx: &CodeGenContext,
    ) -> String {
        ctx.line(format!(
            "$this->addForeignKey('{}', '{}', '{}', '{}', '{}', {}, {});\n",
            php_single_quoted(&foreign_key.name),
            php_single_quoted(&table.aliased_name),
            php_single_quoted(&foreign_key.column),
            php_single_quoted(&foreign_key.foreign_table),
            php_single_quoted(&foreign_key.foreign_column),
            action_literal(foreign_key.on_delete),
            action_literal(foreign_key.on_update),
        ))
    }

    fn drop_table(&self, table: &TableSchema, ctx: &CodeGenContext) -> String {
        ctx.line(format!(
            "$this->dropTable('{}');\n",
            php_single_quoted(&table.aliased_name)
        ))
    }
}
