//! # Generator Configuration
//!
//! Naming and index conventions used by the SQL builders, plus the output
//! settings of the `write` command. Every field has a default, so an empty
//! (or missing) config file reproduces the stock `ts_*` conventions.
//!
//! ## Example `tspart.toml`
//!
//! ```toml
//! cluster_id_column = "cluster_id"
//! log_table = "ts_logs"
//! text_search_config = "english"
//! output_dir = "migrations/core"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tspart_core::{PartitionError, PartitionResult, Validatable};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the migration generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Implicit leading column of every generic (BRIN) index
    pub cluster_id_column: String,

    /// Parent table that receives full-text GIN indexes instead of BRIN
    pub log_table: String,

    /// Host column of the log table
    pub hostname_column: String,

    /// Tags column of the log table
    pub tags_column: String,

    /// Raw text column of the log table, indexed through `to_tsvector`
    pub logline_column: String,

    /// Text search configuration passed to `to_tsvector`
    pub text_search_config: String,

    /// Directory the `write` command places migration files in
    pub output_dir: PathBuf,

    /// Whether to overwrite existing migration files
    pub overwrite: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cluster_id_column: "cluster_id".to_string(),
            log_table: "ts_logs".to_string(),
            hostname_column: "hostname".to_string(),
            tags_column: "tags".to_string(),
            logline_column: "logline".to_string(),
            text_search_config: "english".to_string(),
            output_dir: PathBuf::from("migrations"),
            overwrite: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> PartitionResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| PartitionError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> PartitionResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PartitionError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Load a configuration file if a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> PartitionResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Set the cluster id column
    pub fn with_cluster_id_column(mut self, column: impl Into<String>) -> Self {
        self.cluster_id_column = column.into();
        self
    }

    /// Set the table that gets full-text indexes
    pub fn with_log_table(mut self, table: impl Into<String>) -> Self {
        self.log_table = table.into();
        self
    }

    /// Set the text search configuration
    pub fn with_text_search_config(mut self, config: impl Into<String>) -> Self {
        self.text_search_config = config.into();
        self
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> PartitionResult<()> {
        let required = [
            ("cluster_id_column", &self.cluster_id_column),
            ("log_table", &self.log_table),
            ("hostname_column", &self.hostname_column),
            ("tags_column", &self.tags_column),
            ("logline_column", &self.logline_column),
            ("text_search_config", &self.text_search_config),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(PartitionError::invalid_config(format!(
                    "'{key}' must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
