//! # Generation Context
//!
//! The `GenerationContext` holds everything the SQL builders need to produce
//! a create migration. It is built from a validated `PartitionSpec` and a
//! `GeneratorConfig` and provides accessors for:
//!
//! - Parent table, year, granularity and timestamp column
//! - Bucket enumeration for the year
//! - Router function and trigger names
//! - Index variant selection and index column lists
//!

use tspart_core::{Buckets, Granularity, PartitionSpec, PartitionTarget, bucket_count};

use crate::GeneratorConfig;
use crate::indexes::IndexVariant;

// ============================================================================
// GenerationContext
// ============================================================================

/// Context carrying all information needed for create-migration generation.
///
/// Built once per invocation and shared (by reference) with every builder.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Table, year, granularity and columns
    spec: PartitionSpec,

    /// Naming and index conventions
    config: GeneratorConfig,
}

impl GenerationContext {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Build a context from a spec and generator config.
    pub fn from_spec(spec: PartitionSpec, config: GeneratorConfig) -> Self {
        Self { spec, config }
    }

    /// Build a context with the default conventions.
    pub fn from_spec_default(spec: PartitionSpec) -> Self {
        Self::from_spec(spec, GeneratorConfig::default())
    }

    // ====================================================================
    // Spec accessors
    // ====================================================================

    /// `(table, year, granularity)`
    pub fn target(&self) -> &PartitionTarget {
        &self.spec.target
    }

    /// Parent table name
    pub fn table(&self) -> &str {
        self.spec.table()
    }

    /// Year covered
    pub fn year(&self) -> i32 {
        self.spec.year()
    }

    /// Bucket width
    pub fn granularity(&self) -> Granularity {
        self.spec.granularity()
    }

    /// Column the range predicates test
    pub fn timestamp_column(&self) -> &str {
        &self.spec.timestamp_column
    }

    // ====================================================================
    // Derived values
    // ====================================================================

    /// Fresh chronological bucket iterator for the year
    pub fn buckets(&self) -> Buckets {
        self.spec.buckets()
    }

    /// Number of buckets (and so child tables) in the year
    pub fn bucket_count(&self) -> usize {
        bucket_count(self.year(), self.granularity())
    }

    /// Name of the insert-routing function
    pub fn router_function_name(&self) -> String {
        self.target().router_function_name()
    }

    /// Name of the trigger invoking the routing function
    pub fn router_trigger_name(&self) -> String {
        self.target().router_trigger_name()
    }

    /// Which index family the parent table gets
    pub fn index_variant(&self) -> IndexVariant {
        if self.table() == self.config.log_table {
            IndexVariant::FullText
        } else {
            IndexVariant::Brin
        }
    }

    /// Columns of the generic index: the cluster id followed by every
    /// positional column, in order.
    pub fn brin_index_columns(&self) -> Vec<String> {
        std::iter::once(self.config.cluster_id_column.clone())
            .chain(self.spec.extra_index_columns.iter().cloned())
            .collect()
    }

    /// Plain columns of the log-table index, without the text vector.
    pub fn fulltext_index_columns(&self) -> Vec<String> {
        vec![
            self.config.cluster_id_column.clone(),
            self.timestamp_column().to_string(),
            self.config.hostname_column.clone(),
            self.config.tags_column.clone(),
        ]
    }

    /// `to_tsvector(...)` expression over the log line column.
    pub fn text_vector_expression(&self) -> String {
        format!(
            "to_tsvector('{}', {})",
            self.config.text_search_config, self.config.logline_column
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
