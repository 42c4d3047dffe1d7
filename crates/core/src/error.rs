//! Error types for tspart
//!
//! This module provides unified error handling for the generator: caller-input
//! defects, configuration problems, and the IO errors raised when migration
//! files are written to disk.
//!
//! Calendar gaps such as February 30th are not errors. The bucket iterator
//! never produces them in the first place.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tspart
#[derive(Debug, Error)]
pub enum PartitionError {
    // ========================================================================
    // Caller-Input Errors
    // ========================================================================
    /// The year could not be parsed as an integer
    #[error("Invalid year '{value}': expected an integer")]
    InvalidYear { value: String },

    /// The year parsed, but cannot be rendered as a four-digit timestamp range
    #[error("Year {year} is out of range: expected {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// Unknown partition granularity
    #[error("Invalid granularity '{0}': expected 'daily' or 'monthly'")]
    InvalidGranularity(String),

    /// Parent table name is empty
    #[error("Parent table name must not be empty")]
    EmptyTableName,

    /// No columns were supplied, so there is no timestamp column
    #[error("At least one column is required; the last column is the timestamp column")]
    MissingTimestampColumn,

    /// A column name in the column list is empty
    #[error("Column name at position {0} must not be empty")]
    EmptyColumnName(usize),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// Migration file already exists and overwriting is disabled
    #[error("Migration file already exists: {0}")]
    OutputExists(PathBuf),

    // ========================================================================
    // Migration Numbering Errors
    // ========================================================================
    /// A file name starts with digits that do not form a usable migration number
    #[error("Migration file '{file}' has an unusable numeric prefix: {message}")]
    InvalidMigrationNumber { file: String, message: String },

    /// The highest existing migration number has no successor
    #[error("No migration number follows {highest}")]
    MigrationNumberExhausted { highest: u32 },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl PartitionError {
    /// Create an invalid-config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        PartitionError::InvalidConfig(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        PartitionError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was caused by malformed caller input
    pub fn is_input_defect(&self) -> bool {
        matches!(
            self,
            PartitionError::InvalidYear { .. }
                | PartitionError::YearOutOfRange { .. }
                | PartitionError::InvalidGranularity(_)
                | PartitionError::EmptyTableName
                | PartitionError::MissingTimestampColumn
                | PartitionError::EmptyColumnName(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PartitionError::Io(_)
                | PartitionError::FileRead { .. }
                | PartitionError::FileWrite { .. }
                | PartitionError::DirectoryCreate { .. }
                | PartitionError::OutputExists(_)
        )
    }
}

/// Result type alias using PartitionError
pub type PartitionResult<T> = Result<T, PartitionError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> PartitionResult<T>;
}

impl<T, E: Into<PartitionError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> PartitionResult<T> {
        self.map_err(|e| {
            let err: PartitionError = e.into();
            PartitionError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
