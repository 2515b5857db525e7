//! Filter to remove courses the student is already enrolled in.

use crate::error::Result;
use crate::traits::Filter;
use crate::types::{Candidate, EnrollmentContext};

/// Removes candidates whose position is in the enrollment.
///
/// Uses the HashSet in EnrollmentContext.enrolled_set for O(1) lookups.
pub struct AlreadyEnrolledFilter;

impl Filter for AlreadyEnrolledFilter {
    fn name(&self) -> &str {
        "AlreadyEnrolledFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &EnrollmentContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.enrolled_set.contains(&candidate.position))
            .collect();
        Ok(filtered)
    }
}
