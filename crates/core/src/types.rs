//! Core types used throughout tspart
//!
//! This module contains the data model shared by the bucket iterator and the
//! SQL builders: the partition granularity, the `(table, year, granularity)`
//! target, the full partition spec with its column list, and the half-open
//! time bucket.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::Buckets;
use crate::error::{PartitionError, PartitionResult};
use crate::traits::Validatable;

/// Smallest year a partition set can be generated for.
pub const MIN_YEAR: i32 = 1;

/// Largest year a partition set can be generated for. The last bucket ends on
/// January 1st of `year + 1`, which must still be a four-digit year.
pub const MAX_YEAR: i32 = 9998;

// ============================================================================
// Granularity
// ============================================================================

/// Width of a single partition bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One child table per calendar day
    #[default]
    Daily,
    /// One child table per calendar month
    Monthly,
}

impl Granularity {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }

    /// Child-table name for the bucket starting at `(year, month, day)`.
    ///
    /// Daily buckets are named `{table}_{year}_{MM}_{DD}`, monthly buckets
    /// `{table}_m{month}_{year}`. The day is ignored for monthly buckets.
    pub fn suffix(&self, table: &str, year: i32, month: u32, day: u32) -> String {
        match self {
            Granularity::Daily => format!("{}_{}_{:02}_{:02}", table, year, month, day),
            Granularity::Monthly => format!("{}_m{}_{}", table, month, year),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Granularity::Daily),
            "monthly" | "month" | "m" => Ok(Granularity::Monthly),
            _ => Err(PartitionError::InvalidGranularity(s.to_string())),
        }
    }
}

/// Parse a positional year argument.
///
/// Fails on non-numeric input and on years outside [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn parse_year(value: &str) -> PartitionResult<i32> {
    let year = value
        .trim()
        .parse::<i32>()
        .map_err(|_| PartitionError::InvalidYear {
            value: value.to_string(),
        })?;
    check_year(year)?;
    Ok(year)
}

fn check_year(year: i32) -> PartitionResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(PartitionError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

// ============================================================================
// PartitionTarget
// ============================================================================

/// The `(table, year, granularity)` triple that fully determines the set of
/// child tables and the router function.
///
/// Create and drop migrations both derive every object name from this type,
/// so a drop document always targets exactly what the create document built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionTarget {
    /// Parent table the children inherit from
    pub table: String,
    /// Calendar year covered by the partition set
    pub year: i32,
    /// Bucket width
    #[serde(default)]
    pub granularity: Granularity,
}

impl PartitionTarget {
    /// Create a new target
    pub fn new(table: impl Into<String>, year: i32, granularity: Granularity) -> Self {
        Self {
            table: table.into(),
            year,
            granularity,
        }
    }

    /// Create a daily target
    pub fn daily(table: impl Into<String>, year: i32) -> Self {
        Self::new(table, year, Granularity::Daily)
    }

    /// Create a monthly target
    pub fn monthly(table: impl Into<String>, year: i32) -> Self {
        Self::new(table, year, Granularity::Monthly)
    }

    /// Iterate the buckets of this target in chronological order.
    ///
    /// Every call returns a fresh iterator starting at January 1st.
    pub fn buckets(&self) -> Buckets {
        Buckets::new(&self.table, self.year, self.granularity)
    }

    /// Name of the insert-routing trigger function
    pub fn router_function_name(&self) -> String {
        format!("on_{}_insert_{}", self.table, self.year)
    }

    /// Name of the trigger binding the router function to the parent table
    pub fn router_trigger_name(&self) -> String {
        format!("trigger_{}", self.router_function_name())
    }
}

impl Validatable for PartitionTarget {
    fn validate(&self) -> PartitionResult<()> {
        if self.table.trim().is_empty() {
            return Err(PartitionError::EmptyTableName);
        }
        check_year(self.year)
    }
}

// ============================================================================
// PartitionSpec
// ============================================================================

/// Everything needed to generate a create migration.
///
/// Built once per invocation from the positional `columns` list, whose last
/// entry is the timestamp column the range constraints are placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Table, year and granularity
    pub target: PartitionTarget,
    /// Column the `CHECK` ranges and router predicates test
    pub timestamp_column: String,
    /// Columns indexed after the implicit cluster id column, in order.
    /// Includes the timestamp column as its last entry.
    pub extra_index_columns: Vec<String>,
}

impl PartitionSpec {
    /// Build a spec from the positional column list.
    ///
    /// The last column becomes the timestamp column; the whole list (timestamp
    /// included) forms the composite index columns.
    pub fn from_columns<I, S>(target: PartitionTarget, columns: I) -> PartitionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let timestamp_column = columns
            .last()
            .cloned()
            .ok_or(PartitionError::MissingTimestampColumn)?;

        Ok(Self {
            target,
            timestamp_column,
            extra_index_columns: columns,
        })
    }

    /// Parent table name
    pub fn table(&self) -> &str {
        &self.target.table
    }

    /// Year covered
    pub fn year(&self) -> i32 {
        self.target.year
    }

    /// Bucket width
    pub fn granularity(&self) -> Granularity {
        self.target.granularity
    }

    /// Iterate the buckets of this spec in chronological order
    pub fn buckets(&self) -> Buckets {
        self.target.buckets()
    }
}

impl Validatable for PartitionSpec {
    fn validate(&self) -> PartitionResult<()> {
        self.target.validate()?;

        if self.timestamp_column.trim().is_empty() {
            return Err(PartitionError::MissingTimestampColumn);
        }

        if let Some(position) = self
            .extra_index_columns
            .iter()
            .position(|c| c.trim().is_empty())
        {
            return Err(PartitionError::EmptyColumnName(position + 1));
        }

        Ok(())
    }
}

// ============================================================================
// Bucket
// ============================================================================

/// A half-open time range `[start, end)` backed by one child table.
///
/// `end` is exclusive and equals the `start` of the following bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Inclusive lower bound (midnight UTC)
    pub start: NaiveDateTime,
    /// Exclusive upper bound (midnight UTC)
    pub end: NaiveDateTime,
    /// Child-table name
    pub suffix: String,
}

impl Bucket {
    /// SQL literal for the inclusive lower bound
    pub fn start_literal(&self) -> String {
        timestamp_literal(&self.start)
    }

    /// SQL literal for the exclusive upper bound
    pub fn end_literal(&self) -> String {
        timestamp_literal(&self.end)
    }

    /// Check whether an instant falls inside this bucket
    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

/// Render an instant as a UTC `TIMESTAMP` literal.
pub fn timestamp_literal(instant: &NaiveDateTime) -> String {
    format!("TIMESTAMP '{}-00'", instant.format("%Y-%m-%d %H:%M:%S"))
}

// ============================================================================
// Tests
// ============================================================================
