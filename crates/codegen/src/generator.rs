//! # Migration Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for migration generation. It
//! takes a [`PartitionSpec`] (or, for drops, a [`PartitionTarget`]) and a
//! [`GeneratorConfig`], validates the input, builds a [`GenerationContext`],
//! and delegates to the assembler and reverser.
//!
//! ## Pipeline
//!
//! ```text
//! PartitionSpec + GeneratorConfig
//!         │
//!         ▼
//!   validate()  ── caller-input defect → Err, no text at all
//!         │
//!         ▼
//!   GenerationContext::from_spec()
//!         │
//!         ├──► migrations::assemble_create() → up document
//!         ├──► migrations::assemble_drop()   → down document
//!         │
//!         ▼
//!   MigrationPair { up, down } ──► write_to_disk()
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use tspart_codegen::Generator;
//! use tspart_core::{PartitionSpec, PartitionTarget};
//!
//! let spec = PartitionSpec::from_columns(
//!     PartitionTarget::daily("ts_checks", 2016),
//!     ["check_id", "created"],
//! )?;
//!
//! let up = Generator::with_defaults().generate_create(&spec)?;
//! assert_eq!(up.counts.create_tables, 366);
//! # Ok::<(), tspart_core::PartitionError>(())
//! ```

use std::path::PathBuf;
use tspart_core::{
    Granularity, PartitionResult, PartitionSpec, PartitionTarget, ResultExt, Validatable,
};

use crate::context::GenerationContext;
use crate::migrations::{self, Direction, MigrationDocument, StatementCounts};
use crate::{GeneratedFile, GeneratorConfig, MigrationPair};

// ============================================================================
// Generator
// ============================================================================

/// Top-level generator that orchestrates the full pipeline.
///
/// The `Generator` is stateless aside from its configuration; identical
/// inputs always produce byte-identical documents.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    /// Naming conventions and output settings
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

    /// Render the create document for a spec.
    ///
    /// # Errors
    ///
    /// Returns a caller-input error if the partition spec is invalid (empty table name,
    /// year out of range, missing or empty column). Nothing is rendered in
    /// that case.
    pub fn generate_create(&self, spec: &PartitionSpec) -> PartitionResult<MigrationDocument> {
        spec.validate()?;

        let ctx = GenerationContext::from_spec(spec.clone(), self.config.clone());
        let doc = migrations::assemble_create(&ctx);

        tracing::info!(
            table = spec.table(),
            year = spec.year(),
            granularity = %spec.granularity(),
            tables = doc.counts.create_tables,
            indexes = doc.counts.create_indexes,
            branches = doc.counts.router_branches,
            "create migration generated",
        );

        Ok(doc)
    }

    /// Render the drop document for a target.
    ///
    /// # Errors
    ///
    /// Returns a caller-input error if the target is invalid.
    pub fn generate_drop(&self, target: &PartitionTarget) -> PartitionResult<MigrationDocument> {
        target.validate()?;

        let doc = migrations::assemble_drop(target);

        tracing::info!(
            table = %target.table,
            year = target.year,
            granularity = %target.granularity,
            tables = doc.counts.drop_tables,
            "drop migration generated",
        );

        Ok(doc)
    }

    /// Render both halves of a numbered migration.
    pub fn generate_pair(
        &self,
        spec: &PartitionSpec,
        index: u32,
    ) -> PartitionResult<MigrationPair> {
        let up = self.generate_create(spec)?;
        let down = self.generate_drop(&spec.target)?;

        Ok(MigrationPair {
            target: spec.target.clone(),
            index,
            counts: up.counts.combined(down.counts),
            up: GeneratedFile::new(
                migrations::migration_file_name(index, &spec.target, Direction::Up),
                up.content,
                Direction::Up,
            ),
            down: GeneratedFile::new(
                migrations::migration_file_name(index, &spec.target, Direction::Down),
                down.content,
                Direction::Down,
            ),
        })
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate a migration pair and write it to the configured output
    /// directory.
    ///
    /// When `index` is `None` the next free number in the output directory
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the partition spec is invalid, the directory cannot be
    /// scanned, or a file exists and overwriting is disabled.
    pub fn generate_and_write(
        &self,
        spec: &PartitionSpec,
        index: Option<u32>,
    ) -> PartitionResult<(MigrationPair, Vec<PathBuf>)> {
        let index = match index {
            Some(index) => index,
            None => migrations::next_migration_index(&self.config.output_dir)
                .with_context("Failed to pick the next migration number")?,
        };

        let pair = self.generate_pair(spec, index)?;
        let written = pair.write_to_disk(&self.config.output_dir, self.config.overwrite)?;

        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            index,
            files = written.len(),
            "migration files written to disk",
        );

        Ok((pair, written))
    }
}

// ============================================================================
// Standalone convenience functions
// ============================================================================

/// Render the create document using default configuration.
///
/// This is a shorthand for `Generator::with_defaults().generate_create(spec)`.
pub fn generate_create(spec: &PartitionSpec) -> PartitionResult<MigrationDocument> {
    Generator::with_defaults().generate_create(spec)
}

/// Render the drop document using default configuration.
pub fn generate_drop(target: &PartitionTarget) -> PartitionResult<MigrationDocument> {
    Generator::with_defaults().generate_drop(target)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a generated migration pair.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Parent table
    pub table: String,
    /// Year covered
    pub year: i32,
    /// Bucket width
    pub granularity: Granularity,
    /// Migration number
    pub index: u32,
    /// Statement counts of both documents
    pub counts: StatementCounts,
    /// Total bytes of generated content
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a migration pair.
    pub fn from_pair(pair: &MigrationPair) -> Self {
        Self {
            table: pair.target.table.clone(),
            year: pair.target.year,
            granularity: pair.target.granularity,
            index: pair.index,
            counts: pair.counts,
            total_bytes: pair.up.content.len() + pair.down.content.len(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Partition Migration Generated            ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Table:       {:<35}║\n", self.table));
        out.push_str(&format!("║  Year:        {:<35}║\n", self.year));
        out.push_str(&format!("║  Granularity: {:<35}║\n", self.granularity));
        let migration = format!("{:04}", self.index);
        out.push_str(&format!("║  Migration:   {:<35}║\n", migration));
        out.push_str(&format!("║  Tables:      {:<35}║\n", self.counts.create_tables));
        out.push_str(&format!("║  Indexes:     {:<35}║\n", self.counts.create_indexes));
        out.push_str(&format!("║  Branches:    {:<35}║\n", self.counts.router_branches));
        let drops = self.counts.drop_tables + self.counts.drop_functions;
        out.push_str(&format!("║  Drops:       {:<35}║\n", drops));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`MigrationPair`].
pub fn summarize(pair: &MigrationPair) -> GenerationSummary {
    GenerationSummary::from_pair(pair)
}

// ============================================================================
// Tests
// ============================================================================
