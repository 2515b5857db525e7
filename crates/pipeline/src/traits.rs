//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::error::Result;
use crate::types::{Candidate, EnrollmentContext};

/// Core trait for filtering candidates.
///
/// `Send + Sync` lets one engine serve concurrent requests. Filters take
/// ownership of the candidates and must preserve the relative order of the
/// ones they keep, since ranking relies on a stable sort over corpus order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &EnrollmentContext,
    ) -> Result<Vec<Candidate>>;
}
