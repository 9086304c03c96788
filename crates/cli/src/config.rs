//! `schemagen.toml` configuration
//!
//! ```toml
//! [defaults]
//! connection = "db"
//! migration_path = "migrations"
//! use_table_prefix = true
//! table_options = "ENGINE=InnoDB"
//!
//! [connections.db]
//! snapshot = "schema/db.json"
//! prefix = "tbl_"
//! ```
//!
//! Snapshot paths are relative to the directory holding the config file.

use schemagen_core::{EngineError, EngineResult};
use schemagen_introspect::{ConnectionRegistry, SnapshotConnection};
use schemagen_ir::{DEFAULT_CONNECTION, DEFAULT_MIGRATION_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Request defaults applied when a flag is not given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub connection: String,
    pub migration_path: String,
    pub use_table_prefix: bool,
    pub table_options: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            migration_path: DEFAULT_MIGRATION_PATH.to_string(),
            use_table_prefix: true,
            table_options: String::new(),
        }
    }
}

/// One configured connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Catalog snapshot file
    pub snapshot: PathBuf,

    /// Overrides the prefix recorded in the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub connections: BTreeMap<String, ConnectionConfig>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl AppConfig {
    /// Load `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_toml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> EngineResult<Self> {
        toml::from_str(content).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Register `id` when it is configured. Unknown ids leave the registry
    /// empty so the lookup reports the connection as not found.
    pub fn registry_for(&self, id: &str) -> EngineResult<ConnectionRegistry> {
        let mut registry = ConnectionRegistry::new();
        let Some(connection) = self.connections.get(id) else {
            return Ok(registry);
        };

        let mut snapshot = SnapshotConnection::from_file(id, self.resolve(&connection.snapshot))?;
        if let Some(prefix) = &connection.prefix {
            snapshot = snapshot.with_prefix(prefix);
        }
        registry.register(id, snapshot);
        Ok(registry)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
