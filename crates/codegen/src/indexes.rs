//! # Index Generation
//!
//! One index per child table. Two families exist:
//!
//! - **BRIN** (generic tables): a block-range index over the cluster id and
//!   every positional column. Rows arrive in timestamp order, so a range
//!   index stays small and precise without the write cost of a B-tree.
//! - **GIN** (the configured log table): a full-text index over the cluster
//!   id, timestamp, hostname, tags and `to_tsvector` of the log line, which
//!   scopes text search to a single day's child table.
//!
//! Index names are `idx_{child}_{columns joined by '_'}`. The child name is
//! unique per bucket and the two families use different column lists, so
//! names never collide.

use tspart_core::Bucket;

use crate::context::GenerationContext;

// ============================================================================
// IndexVariant
// ============================================================================

/// Index family for a parent table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexVariant {
    /// Block-range index over `[cluster_id] + columns`
    Brin,
    /// Inverted full-text index over the fixed log column set
    FullText,
}

impl IndexVariant {
    /// Access method used in `create index ... using {method}`
    pub fn method(&self) -> &'static str {
        match self {
            IndexVariant::Brin => "brin",
            IndexVariant::FullText => "gin",
        }
    }
}

// ============================================================================
// IndexDefinition
// ============================================================================

/// A single per-child index, before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    /// Index name
    pub name: String,
    /// Child table the index is built on
    pub table: String,
    /// Index family
    pub variant: IndexVariant,
    /// Indexed columns and expressions, in order
    pub columns: Vec<String>,
}

impl IndexDefinition {
    /// Render as a `create index` statement
    pub fn to_sql(&self) -> String {
        format!(
            "create index {} on {} using {} ({});",
            self.name,
            self.table,
            self.variant.method(),
            self.columns.join(",")
        )
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Generate the index definitions for every bucket of the year, in
/// chronological order.
pub fn generate_indexes(ctx: &GenerationContext) -> Vec<String> {
    let indexes: Vec<String> = ctx
        .buckets()
        .map(|bucket| build_index(ctx, &bucket).to_sql())
        .collect();

    tracing::debug!(
        table = ctx.table(),
        variant = ctx.index_variant().method(),
        count = indexes.len(),
        "generated index definitions",
    );

    indexes
}

/// Build the index for a single bucket, choosing the family from the parent
/// table.
pub fn build_index(ctx: &GenerationContext, bucket: &Bucket) -> IndexDefinition {
    match ctx.index_variant() {
        IndexVariant::Brin => brin_index(ctx, bucket),
        IndexVariant::FullText => fulltext_index(ctx, bucket),
    }
}

// ============================================================================
// Builders
// ============================================================================

fn brin_index(ctx: &GenerationContext, bucket: &Bucket) -> IndexDefinition {
    let columns = ctx.brin_index_columns();

    IndexDefinition {
        name: index_name(&bucket.suffix, &columns),
        table: bucket.suffix.clone(),
        variant: IndexVariant::Brin,
        columns,
    }
}

fn fulltext_index(ctx: &GenerationContext, bucket: &Bucket) -> IndexDefinition {
    let named = ctx.fulltext_index_columns();
    let name = index_name(&bucket.suffix, &named);

    let mut columns = named;
    columns.push(ctx.text_vector_expression());

    IndexDefinition {
        name,
        table: bucket.suffix.clone(),
        variant: IndexVariant::FullText,
        columns,
    }
}

fn index_name(child: &str, columns: &[String]) -> String {
    format!("idx_{}_{}", child, columns.join("_"))
}

// ============================================================================
// Tests
// ============================================================================
