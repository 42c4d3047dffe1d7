//! # Migration Assembly
//!
//! This module turns the per-bucket fragments into the two documents a
//! partition set is committed as:
//!
//! - **create** (`.up.sql`): every child table, then every index, then the
//!   router function and its trigger, separated by blank lines.
//! - **drop** (`.down.sql`): `DROP TABLE IF EXISTS ... CASCADE` for every
//!   child, then `DROP FUNCTION IF EXISTS ... CASCADE` for the router. Each
//!   statement is idempotent, so the document can be re-applied safely.
//!
//! ## Generated Files
//!
//! A pair is written under the configured output directory as:
//! ```text
//! {index:04}_add-{table-kebab}-{year}.up.sql
//! {index:04}_add-{table-kebab}-{year}.down.sql
//! ```
//!
//! Both documents are pure functions of their inputs: the same spec always
//! renders byte-identical text.

pub mod create;
pub mod drop;
pub mod naming;

pub use create::assemble_create;
pub use drop::assemble_drop;
pub use naming::{Direction, migration_file_name, migration_stem, next_migration_index};

use serde::Serialize;

// ============================================================================
// MigrationDocument
// ============================================================================

/// Number of statements of each kind in a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatementCounts {
    /// `create table` statements
    pub create_tables: usize,
    /// `create index` statements
    pub create_indexes: usize,
    /// Conditional branches in the router function
    pub router_branches: usize,
    /// `create or replace function` statements
    pub create_functions: usize,
    /// `create trigger` statements
    pub create_triggers: usize,
    /// `DROP TABLE` statements
    pub drop_tables: usize,
    /// `DROP FUNCTION` statements
    pub drop_functions: usize,
}

impl StatementCounts {
    /// Field-wise sum of two counts
    pub fn combined(self, other: Self) -> Self {
        Self {
            create_tables: self.create_tables + other.create_tables,
            create_indexes: self.create_indexes + other.create_indexes,
            router_branches: self.router_branches + other.router_branches,
            create_functions: self.create_functions + other.create_functions,
            create_triggers: self.create_triggers + other.create_triggers,
            drop_tables: self.drop_tables + other.drop_tables,
            drop_functions: self.drop_functions + other.drop_functions,
        }
    }
}

/// A rendered migration document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDocument {
    /// Newline-terminated SQL text
    pub content: String,
    /// What the text contains
    pub counts: StatementCounts,
}
