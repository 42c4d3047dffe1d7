//! # tspart Core
//!
//! Core types, calendar arithmetic, traits, and error handling for tspart.
//!
//! This crate provides the foundational building blocks used by the SQL
//! generators, including:
//!
//! - **Types**: `PartitionTarget`, `PartitionSpec`, `Granularity`, `Bucket`
//! - **Calendar**: leap-year aware month lengths and the `Buckets` iterator
//! - **Traits**: `Validatable`
//! - **Errors**: Unified error handling with `PartitionError` and `PartitionResult`
//!

pub mod calendar;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use calendar::{Buckets, bucket_count, days_in_month, days_in_year, is_leap_year};
pub use error::{PartitionError, PartitionResult, ResultExt};
pub use traits::Validatable;
pub use types::{
    Bucket, Granularity, MAX_YEAR, MIN_YEAR, PartitionSpec, PartitionTarget, parse_year,
    timestamp_literal,
};
