//! Aggregate similarity rows across the enrolled courses.

use crate::error::{PipelineError, Result};
use crate::types::{Candidate, EnrollmentContext};
use vectorizer::SimilarityMatrix;

/// Score every course by its mean similarity to the enrolled positions.
///
/// Returns one candidate per matrix position, in position order. Enrolled
/// positions are included here; filtering removes them later. Duplicate
/// enrolled positions weigh the mean as many times as they appear.
pub fn score_candidates(
    matrix: &SimilarityMatrix,
    context: &EnrollmentContext,
) -> Result<Vec<Candidate>> {
    let size = matrix.len();
    let mut sums = vec![0.0f64; size];

    for &position in &context.enrolled_positions {
        let row = matrix
            .row(position)
            .ok_or(PipelineError::PositionOutOfRange { position, size })?;
        for (sum, value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }

    let count = context.enrolled_positions.len();
    if count == 0 {
        return Ok(Vec::new());
    }
    let count = count as f64;

    Ok(sums
        .into_iter()
        .enumerate()
        .map(|(position, sum)| Candidate::new(position, sum / count))
        .collect())
}
