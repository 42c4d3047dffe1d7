//! # tspart Codegen
//!
//! SQL generation engine for tspart.
//!
//! This crate turns a [`PartitionSpec`](tspart_core::PartitionSpec) into the
//! migration text for a year of inheritance-based time partitions.
//!
//! ## Features
//!
//! - **Child Tables**: one `create table ... inherits` per bucket with a
//!   half-open `CHECK` range
//! - **Indexes**: BRIN per child, or full-text GIN for the log table
//! - **Insert Router**: one PL/pgSQL trigger function routing rows to children
//! - **Drop Scripts**: idempotent reversal of a generated partition set
//! - **Migration Files**: numbered up/down pairs written to a directory
//!

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod context;
pub mod generator;
pub mod indexes;
pub mod migrations;
pub mod partitions;
pub mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::GeneratorConfig;
pub use context::GenerationContext;
pub use generator::{GenerationSummary, Generator, generate_create, generate_drop, summarize};
pub use migrations::{Direction, MigrationDocument, StatementCounts};

use std::path::{Path, PathBuf};
use tspart_core::{PartitionError, PartitionResult, PartitionTarget};

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated migration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// Which half of the pair this file is
    pub direction: Direction,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, direction: Direction) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            direction,
        }
    }
}

// ============================================================================
// MigrationPair
// ============================================================================

/// The up and down files of one numbered migration
#[derive(Debug, Clone)]
pub struct MigrationPair {
    /// Target the pair creates and drops
    pub target: PartitionTarget,

    /// Migration number shared by both files
    pub index: u32,

    /// Create document
    pub up: GeneratedFile,

    /// Drop document
    pub down: GeneratedFile,

    /// Statement counts of both documents combined
    pub counts: StatementCounts,
}

impl MigrationPair {
    /// Both files, up first
    pub fn files(&self) -> [&GeneratedFile; 2] {
        [&self.up, &self.down]
    }

    /// Write both files below `base_dir`.
    ///
    /// Existence is checked for both files before anything is written, so a
    /// refused overwrite leaves the directory untouched.
    pub fn write_to_disk(
        &self,
        base_dir: impl AsRef<Path>,
        overwrite: bool,
    ) -> PartitionResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        let paths: Vec<PathBuf> = self
            .files()
            .iter()
            .map(|f| base_dir.join(&f.path))
            .collect();

        if let Some(existing) = paths.iter().find(|p| p.exists()) {
            if !overwrite {
                return Err(PartitionError::OutputExists(existing.clone()));
            }
            tracing::warn!(path = %existing.display(), "overwriting existing migration file");
        }

        std::fs::create_dir_all(base_dir).map_err(|e| PartitionError::DirectoryCreate {
            path: base_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        for (file, full_path) in self.files().iter().zip(&paths) {
            std::fs::write(full_path, &file.content).map_err(|e| PartitionError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
        }

        Ok(paths)
    }
}

// ============================================================================
// Tests
// ============================================================================
