//! # Schemagen Codegen
//!
//! Migration script generation for Schemagen.
//!
//! This crate turns extracted table schemas into migration classes for the
//! `yii\db\Migration` builder vocabulary.
//!
//! ## Features
//!
//! - **Builder Style**: `createTable` with portable column builders, separate
//!   index and foreign-key statements
//! - **Raw Style**: the database's own DDL dump executed verbatim
//! - **Shared Rollback**: both styles drop tables in reverse order with
//!   foreign key checks suspended
//!

// ============================================================================
// Modules
// ============================================================================

pub mod formatter;
pub mod generator;
pub mod synthesizer;

// ============================================================================
// Re-exports
// ============================================================================

pub use formatter::{BuilderFormatter, RawFormatter, StatementFormatter};
pub use generator::{GenerationSummary, Generator, summarize};
pub use synthesizer::MigrationSynthesizer;

use schemagen_core::{EngineError, EngineResult};
use schemagen_ir::MigrationScript;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ============================================================================
// ScriptStyle
// ============================================================================

/// Output style of a generated migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptStyle {
    /// Structured builder calls
    Builder,
    /// Verbatim DDL dump
    Raw,
}

impl ScriptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptStyle::Builder => "builder",
            ScriptStyle::Raw => "raw",
        }
    }

    /// Directory, relative to the migration path, the style is written to
    pub fn subdirectory(&self) -> Option<&'static str> {
        match self {
            ScriptStyle::Builder => None,
            ScriptStyle::Raw => Some("sql"),
        }
    }

    pub fn all() -> &'static [ScriptStyle] {
        &[ScriptStyle::Builder, ScriptStyle::Raw]
    }
}

impl std::fmt::Display for ScriptStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the migration generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base directory artifacts are written under
    pub output_dir: PathBuf,

    /// Styles to render, in output order
    pub styles: Vec<ScriptStyle>,

    /// Whether to overwrite existing files
    pub overwrite: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            styles: ScriptStyle::all().to_vec(),
            overwrite: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Render only the given styles
    pub fn with_styles(mut self, styles: impl IntoIterator<Item = ScriptStyle>) -> Self {
        self.styles = styles.into_iter().collect();
        self.styles.dedup();
        self
    }

    /// Render only the builder style
    pub fn builder_only(self) -> Self {
        self.with_styles([ScriptStyle::Builder])
    }

    /// Render only the raw style
    pub fn raw_only(self) -> Self {
        self.with_styles([ScriptStyle::Raw])
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// Script style the class was rendered in
    pub style: ScriptStyle,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, style: ScriptStyle) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            style,
        }
    }
}

// ============================================================================
// GeneratedMigration
// ============================================================================

/// Result of one generation pass
#[derive(Debug, Clone)]
pub struct GeneratedMigration {
    /// The rendered script model
    pub script: MigrationScript,

    /// Generated artifacts, keyed by path
    pub files: Vec<GeneratedFile>,

    /// Warnings produced during generation (e.g. skipped tables)
    pub warnings: Vec<String>,
}

impl GeneratedMigration {
    pub fn new(script: MigrationScript) -> Self {
        Self {
            script,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Migration class name
    pub fn name(&self) -> &str {
        &self.script.name
    }

    /// Add a file
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The artifact rendered in `style`
    pub fn file(&self, style: ScriptStyle) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.style == style)
    }

    /// Write all files under `base_dir`, returning the written paths.
    ///
    /// Existing files are left untouched and reported as
    /// [`EngineError::OutputExists`] unless `overwrite` is set; no file is
    /// written in that case. Every file is staged next to its target first,
    /// so a failed write leaves none of the set behind.
    pub fn write_to_disk(
        &self,
        base_dir: impl AsRef<Path>,
        overwrite: bool,
    ) -> EngineResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        let targets: Vec<PathBuf> = self.files.iter().map(|f| base_dir.join(&f.path)).collect();

        if !overwrite {
            if let Some(existing) = targets.iter().find(|path| path.exists()) {
                return Err(EngineError::OutputExists(existing.clone()));
            }
        }

        // ── Stage ────────────────────────────────────────────────────────
        // Dropping a staged file removes it.
        let mut staged = Vec::with_capacity(self.files.len());
        for (file, full_path) in self.files.iter().zip(&targets) {
            let parent = full_path.parent().unwrap_or(base_dir);
            std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;

            let write_error = |e: std::io::Error| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            };
            let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
            temp.write_all(file.content.as_bytes()).map_err(write_error)?;
            staged.push((temp, full_path));
        }

        // ── Commit ───────────────────────────────────────────────────────
        for (temp, full_path) in staged {
            temp.persist(full_path).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.error.to_string(),
            })?;
        }

        Ok(targets)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.styles, vec![ScriptStyle::Builder, ScriptStyle::Raw]);
        assert!(!config.overwrite);
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/output")
            .raw_only()
            .allow_overwrite();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
        assert_eq!(config.styles, vec![ScriptStyle::Raw]);
        assert!(config.overwrite);
    }

    fn migration() -> GeneratedMigration {
        let mut migration = GeneratedMigration::new(MigrationScript::new("m1"));
        migration.add_file(GeneratedFile::new("migrations/m1.php", "a", ScriptStyle::Builder));
        migration.add_file(GeneratedFile::new("migrations/sql/m1.php", "b", ScriptStyle::Raw));
        migration
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let written = migration().write_to_disk(dir.path(), false).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("migrations/sql/m1.php")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let migration = migration();
        migration.write_to_disk(dir.path(), false).unwrap();

        let err = migration.write_to_disk(dir.path(), false).unwrap_err();
        assert!(matches!(err, EngineError::OutputExists(_)));
        assert!(migration.write_to_disk(dir.path(), true).is_ok());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_set() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the second artifact's directory should be.
        std::fs::write(dir.path().join("blocked"), "").unwrap();

        let mut migration = GeneratedMigration::new(MigrationScript::new("m1"));
        migration.add_file(GeneratedFile::new("migrations/m1.php", "a", ScriptStyle::Builder));
        migration.add_file(GeneratedFile::new("blocked/sql/m1.php", "b", ScriptStyle::Raw));

        let err = migration.write_to_disk(dir.path(), false).unwrap_err();
        assert!(err.is_io());
        assert!(!dir.path().join("migrations/m1.php").exists());
        assert_eq!(std::fs::read_dir(dir.path().join("migrations")).unwrap().count(), 0);
    }

    #[test]
    fn test_file_by_style() {
        let migration = migration();
        assert_eq!(migration.name(), "m1");
        assert_eq!(
            migration.file(ScriptStyle::Raw).map(|f| f.content.as_str()),
            Some("b")
        );
    }
}
