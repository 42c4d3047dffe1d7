//! Calendar arithmetic and bucket enumeration
//!
//! [`days_in_month`] is the single source of truth for month lengths and the
//! Gregorian leap rule. [`Buckets`] walks a year with it, so nonexistent dates
//! such as February 30th are never produced and never need filtering later.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::iter::FusedIterator;

use crate::types::{Bucket, Granularity};

// ============================================================================
// Calendar queries
// ============================================================================

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`. Returns 0 for months
/// outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal of `(month, day)` within `year`.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    (1..month).map(|m| days_in_month(year, m)).sum::<u32>() + day
}

/// The calendar day after `(year, month, day)`, rolling over month and year.
pub fn next_day(year: i32, month: u32, day: u32) -> (i32, u32, u32) {
    if day < days_in_month(year, month) {
        (year, month, day + 1)
    } else if month < 12 {
        (year, month + 1, 1)
    } else {
        (year + 1, 1, 1)
    }
}

/// The first month after `(year, month)`, rolling over the year.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month < 12 {
        (year, month + 1)
    } else {
        (year + 1, 1)
    }
}

/// Number of buckets a full year holds at the given granularity.
pub fn bucket_count(year: i32, granularity: Granularity) -> usize {
    match granularity {
        Granularity::Daily => days_in_year(year) as usize,
        Granularity::Monthly => 12,
    }
}

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(NaiveTime::MIN))
}

// ============================================================================
// Buckets
// ============================================================================

/// Chronological iterator over the buckets of one calendar year.
///
/// The iterator is finite (at most 366 items) and cheap to clone; cloning it
/// or asking the target for a new one restarts enumeration.
///
/// Consecutive buckets are contiguous: each `end` equals the next `start`, the
/// first bucket starts at January 1st of `year` and the last one ends at
/// January 1st of `year + 1`.
///
/// ```
/// use tspart_core::{Buckets, Granularity};
///
/// let days: Vec<_> = Buckets::new("ts_checks", 2016, Granularity::Daily).collect();
/// assert_eq!(days.len(), 366);
/// assert_eq!(days[59].suffix, "ts_checks_2016_02_29");
/// ```
#[derive(Debug, Clone)]
pub struct Buckets {
    table: String,
    year: i32,
    granularity: Granularity,
    /// `(month, day)` of the next bucket start, `None` once exhausted
    cursor: Option<(u32, u32)>,
}

impl Buckets {
    /// Start enumerating `year` for `table` at the given granularity.
    ///
    /// Years whose range cannot be represented yield no buckets at all.
    pub fn new(table: impl Into<String>, year: i32, granularity: Granularity) -> Self {
        let representable = year
            .checked_add(1)
            .and_then(|next| midnight(next, 1, 1))
            .and(midnight(year, 1, 1))
            .is_some();

        Self {
            table: table.into(),
            year,
            granularity,
            cursor: representable.then_some((1, 1)),
        }
    }

    fn remaining(&self) -> usize {
        match (self.cursor, self.granularity) {
            (None, _) => 0,
            (Some((month, day)), Granularity::Daily) => {
                (days_in_year(self.year) - day_of_year(self.year, month, day) + 1) as usize
            }
            (Some((month, _)), Granularity::Monthly) => (12 - month + 1) as usize,
        }
    }
}

impl Iterator for Buckets {
    type Item = Bucket;

    fn next(&mut self) -> Option<Bucket> {
        let (month, day) = self.cursor?;

        let (end_year, end_month, end_day) = match self.granularity {
            Granularity::Daily => next_day(self.year, month, day),
            Granularity::Monthly => {
                let (y, m) = next_month(self.year, month);
                (y, m, 1)
            }
        };

        self.cursor = (end_year == self.year).then_some((end_month, end_day));

        Some(Bucket {
            start: midnight(self.year, month, day)?,
            end: midnight(end_year, end_month, end_day)?,
            suffix: self.granularity.suffix(&self.table, self.year, month, day),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Buckets {}

impl FusedIterator for Buckets {}

// ============================================================================
// Tests
// ============================================================================
