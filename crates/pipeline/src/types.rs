//! Per-request types flowing through the pipeline.

use data_loader::{CourseId, CoursePosition};
use std::collections::HashSet;

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Ranked by mean similarity to the enrolled courses
    Similarity,
    /// Sampled at random because there was no usable enrollment
    Random,
}

/// A course being considered for recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: CoursePosition,
    /// Mean similarity to the enrolled courses
    pub score: f64,
}

impl Candidate {
    pub fn new(position: CoursePosition, score: f64) -> Self {
        Self { position, score }
    }
}

/// Enrollment resolved against the catalog
#[derive(Debug, Clone, Default)]
pub struct EnrollmentContext {
    /// Resolved positions in request order; duplicates kept
    pub enrolled_positions: Vec<CoursePosition>,
    /// Same positions as a set, for exclusion
    pub enrolled_set: HashSet<CoursePosition>,
    /// Number of ids that did not resolve
    pub unresolved: usize,
}

impl EnrollmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved position
    pub fn push(&mut self, position: CoursePosition) {
        self.enrolled_positions.push(position);
        self.enrolled_set.insert(position);
    }

    /// True when no enrolled id resolved to a course
    pub fn is_empty(&self) -> bool {
        self.enrolled_positions.is_empty()
    }
}

/// Final recommendation returned to callers
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecommendation {
    pub course_id: CourseId,
    pub title: String,
    /// Mean similarity; `None` for random picks
    pub score: Option<f64>,
    pub source: RecommendationSource,
}
