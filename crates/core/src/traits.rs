//! Core traits for tspart
//!
//! This module defines the validation trait implemented by the partition
//! target and spec. Generators validate their input before emitting any text,
//! so a malformed invocation never produces a partial migration.

use crate::error::PartitionResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust
/// use tspart_core::{PartitionError, PartitionResult, Validatable};
///
/// struct Column(String);
///
/// impl Validatable for Column {
///     fn validate(&self) -> PartitionResult<()> {
///         if self.0.is_empty() {
///             return Err(PartitionError::EmptyColumnName(1));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(Column("created".into()).is_valid());
/// assert!(!Column(String::new()).is_valid());
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `PartitionError` describing the problem.
    fn validate(&self) -> PartitionResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}
