//! Native type to builder mapping
//!
//! Maps a column's catalog type onto the portable column-builder vocabulary
//! (`string(255)`, `integer()`, `decimal(10, 2)`, ...). The mapping is a
//! decision table evaluated top-down; the last rule is the raw-type fallback,
//! so every column gets a renderable type.

use schemagen_core::{NativeType, TypeCatalog};
use serde::{Deserialize, Serialize};

// ============================================================================
// TypeDescriptor
// ============================================================================

/// Result of mapping a column type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A portable builder call, e.g. `string` with args `[255]`
    Builder { name: String, args: Vec<u32> },
    /// Dialect type emitted verbatim, e.g. `CHAR(36)`
    Raw { db_type: String },
}

impl TypeDescriptor {
    /// Create a builder descriptor
    pub fn builder(name: impl Into<String>, args: Vec<u32>) -> Self {
        TypeDescriptor::Builder {
            name: name.into(),
            args,
        }
    }

    /// Create a raw-type descriptor
    pub fn raw(db_type: impl Into<String>) -> Self {
        TypeDescriptor::Raw {
            db_type: db_type.into(),
        }
    }

    /// Builder name, if this is a builder call
    pub fn builder_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Builder { name, .. } => Some(name),
            TypeDescriptor::Raw { .. } => None,
        }
    }

    /// Whether this is the raw-type fallback
    pub fn is_raw(&self) -> bool {
        matches!(self, TypeDescriptor::Raw { .. })
    }
}

// ============================================================================
// Decision table
// ============================================================================

/// One row of the mapping table
#[derive(Debug, Clone, Copy)]
struct TypeRule {
    native_type: NativeType,
    /// Case-insensitive prefix the raw dialect type must start with
    db_type_prefix: Option<&'static str>,
    /// Display width that is the dialect default and is dropped
    default_width: Option<u32>,
    builder: &'static str,
}

impl TypeRule {
    const fn new(native_type: NativeType, builder: &'static str) -> Self {
        Self {
            native_type,
            db_type_prefix: None,
            default_width: None,
            builder,
        }
    }

    const fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.db_type_prefix = Some(prefix);
        self
    }

    const fn with_default_width(mut self, width: u32) -> Self {
        self.default_width = Some(width);
        self
    }

    fn applies(&self, native_type: NativeType, db_type: &str) -> bool {
        if self.native_type != native_type {
            return false;
        }
        match self.db_type_prefix {
            Some(prefix) => db_type
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            None => true,
        }
    }
}

const TYPE_RULES: &[TypeRule] = &[
    TypeRule::new(NativeType::PrimaryKey, "primaryKey"),
    TypeRule::new(NativeType::BigPrimaryKey, "bigPrimaryKey"),
    TypeRule::new(NativeType::String, "string").with_prefix("varchar"),
    TypeRule::new(NativeType::Integer, "integer").with_default_width(11),
    TypeRule::new(NativeType::BigInteger, "bigInteger"),
    TypeRule::new(NativeType::Float, "float"),
    TypeRule::new(NativeType::Double, "double"),
    TypeRule::new(NativeType::Decimal, "decimal"),
    TypeRule::new(NativeType::DateTime, "dateTime"),
    TypeRule::new(NativeType::Timestamp, "timestamp"),
    TypeRule::new(NativeType::Time, "time"),
    TypeRule::new(NativeType::Date, "date"),
    TypeRule::new(NativeType::Boolean, "boolean"),
    TypeRule::new(NativeType::Money, "money"),
];

// ============================================================================
// Public API
// ============================================================================

/// Map a column's catalog type onto a builder call or a raw-type fallback.
///
/// `size` and `scale` become builder arguments only when present and
/// non-zero; `scale` is dropped when there is no `size`. The fallback uppercases `db_type` and appends `(size)` only when
/// `catalog` recognizes the bare type name and `db_type` has no parameter
/// list of its own.
pub fn map_column_type(
    native_type: NativeType,
    db_type: &str,
    size: Option<u32>,
    scale: Option<u32>,
    catalog: &dyn TypeCatalog,
) -> TypeDescriptor {
    let size = size.filter(|s| *s != 0);
    let scale = scale.filter(|s| *s != 0);

    if let Some(rule) = TYPE_RULES
        .iter()
        .find(|rule| rule.applies(native_type, db_type))
    {
        // Scale is only meaningful after a precision.
        let mut args: Vec<u32> = size
            .map(|size| std::iter::once(size).chain(scale))
            .into_iter()
            .flatten()
            .collect();
        if rule.default_width.is_some_and(|width| args == [width]) {
            args.clear();
        }
        return TypeDescriptor::builder(rule.builder, args);
    }

    raw_fallback(db_type, size, catalog)
}

fn raw_fallback(db_type: &str, size: Option<u32>, catalog: &dyn TypeCatalog) -> TypeDescriptor {
    let mut raw = db_type.trim().to_uppercase();
    let base_name = raw.split_whitespace().next().unwrap_or_default();

    if let Some(size) = size {
        if !raw.contains('(') && catalog.recognizes(base_name) {
            raw = format!("{raw}({size})");
        }
    }

    TypeDescriptor::raw(raw)
}

// ============================================================================
// Tests
// ============================================================================
