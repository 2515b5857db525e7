//! The FilterPipeline orchestrates multiple filters.
//!
//! Filters are chained with the builder pattern and run in insertion order.

use crate::error::Result;
use crate::traits::Filter;
use crate::types::{Candidate, EnrollmentContext};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new().add_filter(AlreadyEnrolledFilter);
/// let remaining = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &EnrollmentContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::filters::AlreadyEnrolledFilter;

    /// Fails on the first candidate past the end of a catalog of `size` courses
    struct BoundsCheck {
        size: usize,
    }

    impl Filter for BoundsCheck {
        fn name(&self) -> &str {
            "BoundsCheck"
        }

        fn apply(&self, candidates: Vec<Candidate>, _: &EnrollmentContext) -> Result<Vec<Candidate>> {
            if let Some(c) = candidates.iter().find(|c| c.position >= self.size) {
                return Err(PipelineError::PositionOutOfRange {
                    position: c.position,
                    size: self.size,
                });
            }
            Ok(candidates)
        }
    }

    fn candidates() -> Vec<Candidate> {
        vec![Candidate::new(0, 0.9), Candidate::new(1, 0.8)]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let filtered = pipeline.apply(candidates(), &EnrollmentContext::new()).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let mut context = EnrollmentContext::new();
        context.push(0);

        let pipeline = FilterPipeline::new().add_filter(AlreadyEnrolledFilter);
        let filtered = pipeline.apply(candidates(), &context).unwrap();

        assert_eq!(pipeline.len(), 1);
        assert_eq!(filtered, vec![Candidate::new(1, 0.8)]);
    }

    #[test]
    fn test_filter_error_propagates() {
        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyEnrolledFilter)
            .add_filter(BoundsCheck { size: 1 });
        let err = pipeline.apply(candidates(), &EnrollmentContext::new()).unwrap_err();
        assert_eq!(err, PipelineError::PositionOutOfRange { position: 1, size: 1 });
    }
}
