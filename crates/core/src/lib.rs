//! # Schemagen Core
//!
//! Core types, traits, and error handling for Schemagen.
//!
//! This crate provides the foundational building blocks used throughout
//! the Schemagen workspace, including:
//!
//! - **Types**: Native column types and referential actions
//! - **Traits**: Common behaviors like `Validatable` and `TypeCatalog`
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use traits::{CodeGenContext, EmptyTypeCatalog, TypeCatalog, Validatable};
pub use types::{NativeType, ReferentialAction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
