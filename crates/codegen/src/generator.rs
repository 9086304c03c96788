//! # Migration Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for migration generation. It
//! takes a [`MigrationRequest`] and a [`ConnectionProvider`], extracts the
//! requested tables, and renders one [`GeneratedFile`] per configured style.
//!
//! ## Pipeline
//!
//! ```text
//! MigrationRequest + ConnectionProvider
//!         │
//!         ▼
//!   validate → resolve connection → resolve table selector
//!         │
//!         ▼
//!   SchemaExtractor::extract_all()       → Vec<TableSchema>
//!         │
//!         ├──► MigrationSynthesizer<BuilderFormatter>  → <path>/<name>.php
//!         ├──► MigrationSynthesizer<RawFormatter>      → <path>/sql/<name>.php
//!         │
//!         ▼
//!   GeneratedMigration { script, files, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemagen_codegen::{Generator, GeneratorConfig};
//! use schemagen_ir::MigrationRequest;
//!
//! let request = MigrationRequest::new("users, orders").with_name("m261014_093005_create");
//! let result = Generator::new(GeneratorConfig::default()).generate(&request, &registry)?;
//!
//! println!("Generated {} files", result.file_count());
//! result.write_to_disk(".", false)?;
//! ```

use schemagen_core::{EngineResult, Validatable};
use schemagen_introspect::{ConnectionProvider, SchemaExtractor};
use schemagen_ir::{MigrationRequest, MigrationScript};
use std::path::PathBuf;

use crate::formatter::{BuilderFormatter, RawFormatter};
use crate::synthesizer::MigrationSynthesizer;
use crate::{GeneratedFile, GeneratedMigration, GeneratorConfig, ScriptStyle};

// ============================================================================
// Generator
// ============================================================================

/// Top-level migration generator.
///
/// The `Generator` is stateless aside from its configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the full generation pipeline for one request.
    ///
    /// # Steps
    ///
    /// 1. **Validate** the normalized request; nothing is queried on failure.
    /// 2. **Resolve** the connection by id.
    /// 3. **Resolve** the table selector (`*` lists the catalog).
    /// 4. **Extract** every table, skipping (with a warning) missing ones.
    /// 5. **Render** each configured style.
    ///
    /// # Errors
    ///
    /// Validation errors, an unknown or unreachable connection, and catalog
    /// failures abort the request without producing any file.
    pub fn generate(
        &self,
        request: &MigrationRequest,
        provider: &dyn ConnectionProvider,
    ) -> EngineResult<GeneratedMigration> {
        // ── 1. Validate ──────────────────────────────────────────────────
        let request = request.clone().normalized();
        request.validate()?;
        let selector = request.selector()?;

        // ── 2. Connection ────────────────────────────────────────────────
        let connection = provider.connection(&request.connection)?;

        // ── 3. Table names ───────────────────────────────────────────────
        let names = selector.resolve(|| connection.table_names())?;

        // ── 4. Extract ───────────────────────────────────────────────────
        let tables = SchemaExtractor::new(connection, request.use_table_prefix).extract_all(&names)?;

        let mut warnings = Vec::new();
        for name in &names {
            if !tables.iter().any(|t| &t.name == name) {
                tracing::warn!(table = %name, "table not found, skipped");
                warnings.push(format!("Table '{name}' was not found and has been skipped."));
            }
        }
        if tables.is_empty() {
            warnings.push("No tables were extracted; the migration is empty.".to_string());
        }

        let script = MigrationScript::new(&request.migration_name)
            .with_tables(tables)
            .with_table_options(&request.table_options);

        // ── 5. Render ────────────────────────────────────────────────────
        let mut output = GeneratedMigration::new(script);
        for file in self.render(&output.script, &request.migration_path) {
            output.add_file(file);
        }
        for warning in warnings {
            output.add_warning(warning);
        }

        tracing::info!(
            migration = %output.name(),
            tables = output.script.table_count(),
            foreign_keys = output.script.foreign_key_count(),
            files = output.file_count(),
            warnings = output.warnings.len(),
            "migration generation complete",
        );

        Ok(output)
    }

    /// Render `script` in every configured style, keyed under
    /// `migration_path`.
    pub fn render(&self, script: &MigrationScript, migration_path: &str) -> Vec<GeneratedFile> {
        self.config
            .styles
            .iter()
            .map(|style| match style {
                ScriptStyle::Builder => {
                    MigrationSynthesizer::new(BuilderFormatter).render_file(script, migration_path)
                }
                ScriptStyle::Raw => {
                    MigrationSynthesizer::new(RawFormatter).render_file(script, migration_path)
                }
            })
            .collect()
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate and write all files under the configured output directory.
    pub fn generate_and_write(
        &self,
        request: &MigrationRequest,
        provider: &dyn ConnectionProvider,
    ) -> EngineResult<(GeneratedMigration, Vec<PathBuf>)> {
        let output = self.generate(request, provider)?;
        let written = output.write_to_disk(&self.config.output_dir, self.config.overwrite)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = written.len(),
            "files written to disk",
        );
        Ok((output, written))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// GenerationSummary — human-readable report
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Migration class name.
    pub migration_name: String,
    /// Number of tables in the script.
    pub tables: usize,
    /// Number of foreign keys across all tables.
    pub foreign_keys: usize,
    /// Number of files generated.
    pub files: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Total bytes of generated content.
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated migration.
    pub fn from_migration(migration: &GeneratedMigration) -> Self {
        Self {
            migration_name: migration.name().to_string(),
            tables: migration.script.table_count(),
            foreign_keys: migration.script.foreign_key_count(),
            files: migration.file_count(),
            warning_count: migration.warnings.len(),
            total_bytes: migration.files.iter().map(|f| f.content.len()).sum(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Migration Generation Complete            ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Migration:    {:<34}║\n", self.migration_name));
        out.push_str(&format!("║  Tables:       {:<34}║\n", self.tables));
        out.push_str(&format!("║  Foreign Keys: {:<34}║\n", self.foreign_keys));
        out.push_str(&format!("║  Files:        {:<34}║\n", self.files));
        out.push_str(&format!("║  Warnings:     {:<34}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        };
        out.push_str(&format!("║  Total Size:   {:<34}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedMigration`].
pub fn summarize(migration: &GeneratedMigration) -> GenerationSummary {
    GenerationSummary::from_migration(migration)
}

// ============================================================================
// Tests
// ============================================================================
