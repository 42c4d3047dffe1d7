//! # Child Table Generation
//!
//! One `create table ... inherits (...)` statement per bucket. Each child is
//! restricted by a half-open `CHECK` range on the timestamp column, so the
//! constraints of a full year tile `[Jan 1, Jan 1 next year)` exactly and the
//! planner can exclude children by constraint.
//!
//! ```sql
//! create table ts_checks_2016_02_29 (check (created >= TIMESTAMP '2016-02-29 00:00:00-00' and created < TIMESTAMP '2016-03-01 00:00:00-00')) inherits (ts_checks);
//! ```

use tspart_core::Bucket;

use crate::context::GenerationContext;

// ============================================================================
// Public API
// ============================================================================

/// Generate the child-table definitions for every bucket of the year, in
/// chronological order.
pub fn generate_partitions(ctx: &GenerationContext) -> Vec<String> {
    let tables: Vec<String> = ctx
        .buckets()
        .map(|bucket| build_partition(ctx, &bucket))
        .collect();

    tracing::debug!(
        table = ctx.table(),
        year = ctx.year(),
        count = tables.len(),
        "generated child table definitions",
    );

    tables
}

/// Build the child-table definition for a single bucket.
pub fn build_partition(ctx: &GenerationContext, bucket: &Bucket) -> String {
    let column = ctx.timestamp_column();

    format!(
        "create table {child} (check ({column} >= {start} and {column} < {end})) inherits ({parent});",
        child = bucket.suffix,
        start = bucket.start_literal(),
        end = bucket.end_literal(),
        parent = ctx.table(),
    )
}

// ============================================================================
// Tests
// ============================================================================
