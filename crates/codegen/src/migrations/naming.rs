//! Migration file naming and version numbering.
//!
//! Migration directories hold numbered pairs such as
//! `0032_add-ts-checks-2016.up.sql` / `0032_add-ts-checks-2016.down.sql`.
//! The next number is one past the largest numeric prefix already present.

use heck::ToKebabCase;
use std::path::Path;
use tspart_core::{Granularity, PartitionError, PartitionResult, PartitionTarget};
use walkdir::WalkDir;

/// Which half of a migration pair a file is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The create document
    Up,
    /// The drop document
    Down,
}

impl Direction {
    /// File extension including the direction marker
    pub fn extension(&self) -> &'static str {
        match self {
            Direction::Up => "up.sql",
            Direction::Down => "down.sql",
        }
    }
}

/// Shared file stem of a migration pair, e.g. `0032_add-ts-checks-2016`.
///
/// Monthly partition sets carry a `-monthly` marker so they never share a
/// stem with a daily set of the same table and year.
pub fn migration_stem(index: u32, target: &PartitionTarget) -> String {
    let table = target.table.to_kebab_case();
    match target.granularity {
        Granularity::Daily => format!("{:04}_add-{}-{}", index, table, target.year),
        Granularity::Monthly => format!("{:04}_add-{}-monthly-{}", index, table, target.year),
    }
}

/// Full file name for one half of a migration pair.
pub fn migration_file_name(index: u32, target: &PartitionTarget, direction: Direction) -> String {
    format!("{}.{}", migration_stem(index, target), direction.extension())
}

/// Next free migration number in `dir`.
///
/// Only the directory's own entries are considered. Names without a numeric
/// prefix before the first `_` are ignored. A missing or empty directory
/// starts numbering at 1.
///
/// # Errors
///
/// Fails if the directory cannot be scanned, if a numeric prefix does not
/// fit in `u32` (e.g. timestamp-style `20240101120000_init.up.sql`), or if
/// the highest number is already `u32::MAX`.
pub fn next_migration_index(dir: &Path) -> PartitionResult<u32> {
    if !dir.exists() {
        return Ok(1);
    }

    let mut highest = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            std::io::Error::other(format!("failed to scan '{}': {}", dir.display(), e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if let Some(index) = leading_index(name)? {
            highest = highest.max(index);
        }
    }

    tracing::debug!(dir = %dir.display(), highest, "scanned migration directory");
    highest
        .checked_add(1)
        .ok_or(PartitionError::MigrationNumberExhausted { highest })
}

fn leading_index(file_name: &str) -> PartitionResult<Option<u32>> {
    let Some((prefix, _)) = file_name.split_once('_') else {
        return Ok(None);
    };
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    prefix
        .parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| PartitionError::InvalidMigrationNumber {
            file: file_name.to_string(),
            message: e.to_string(),
        })
}
