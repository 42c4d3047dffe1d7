//! # Insert Router Generation
//!
//! Inheritance-based partitions are not routed by the database, so every
//! `(table, year)` gets one PL/pgSQL trigger function that redirects each row
//! inserted into the parent to its child table, plus a `before insert`
//! trigger binding it to the parent.
//!
//! The function is a single `if ... elsif ... end if` chain with one branch
//! per bucket in chronological order. Branch predicates are the same
//! half-open ranges as the child `CHECK` constraints, so a row with an
//! in-year timestamp matches exactly one branch.
//!
//! The function always returns `null`, which suppresses the insert into the
//! parent. A row whose timestamp lies outside the year matches no branch and
//! is therefore discarded without error.

use tspart_core::Bucket;

use crate::context::GenerationContext;

// ============================================================================
// Types
// ============================================================================

/// Position of a branch in the conditional chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// The opening `if`
    Primary,
    /// Every following `elsif`
    Secondary,
}

impl BranchKind {
    /// PL/pgSQL keyword opening the branch
    pub fn keyword(&self) -> &'static str {
        match self {
            BranchKind::Primary => "if",
            BranchKind::Secondary => "elsif",
        }
    }
}

/// The rendered router function and its trigger binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterDefinition {
    /// Trigger function name
    pub function_name: String,
    /// Trigger name
    pub trigger_name: String,
    /// `create or replace function ...` statement
    pub function: String,
    /// `create trigger ...` statement
    pub trigger: String,
    /// Number of conditional branches in the function
    pub branch_count: usize,
}

// ============================================================================
// Public API
// ============================================================================

/// Generate the routing function and trigger for the context's table and year.
pub fn generate_router(ctx: &GenerationContext) -> RouterDefinition {
    let function_name = ctx.router_function_name();
    let trigger_name = ctx.router_trigger_name();

    let branches: Vec<String> = ctx
        .buckets()
        .enumerate()
        .map(|(i, bucket)| {
            let kind = if i == 0 {
                BranchKind::Primary
            } else {
                BranchKind::Secondary
            };
            build_branch(ctx.timestamp_column(), &bucket, kind)
        })
        .collect();

    let function = build_function(&function_name, &branches);
    let trigger = build_trigger(&trigger_name, ctx.table(), &function_name);

    tracing::debug!(
        function = %function_name,
        branches = branches.len(),
        "generated insert router",
    );

    RouterDefinition {
        function_name,
        trigger_name,
        function,
        trigger,
        branch_count: branches.len(),
    }
}

/// Build one branch of the chain: the range predicate and the insert into
/// the bucket's child table.
pub fn build_branch(column: &str, bucket: &Bucket, kind: BranchKind) -> String {
    format!(
        "    {keyword} (new.{column} >= {start} and new.{column} < {end}) then\n        insert into {child} values (new.*);",
        keyword = kind.keyword(),
        start = bucket.start_literal(),
        end = bucket.end_literal(),
        child = bucket.suffix,
    )
}

// ============================================================================
// Builders
// ============================================================================

fn build_function(function_name: &str, branches: &[String]) -> String {
    let mut out = String::with_capacity(256 + branches.iter().map(|b| b.len() + 1).sum::<usize>());

    out.push_str(&format!(
        "create or replace function {function_name}() returns trigger as $$\nbegin\n"
    ));

    if !branches.is_empty() {
        out.push_str(&branches.join("\n"));
        out.push_str("\n    end if;\n\n");
    }

    out.push_str("    return null;\nend;\n$$ language plpgsql;");
    out
}

fn build_trigger(trigger_name: &str, table: &str, function_name: &str) -> String {
    format!(
        "create trigger {trigger_name}\n    before insert on {table}\n    for each row execute procedure {function_name}();"
    )
}

// ============================================================================
// Tests
// ============================================================================
