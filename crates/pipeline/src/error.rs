//! Error types for the recommendation pipeline.
//!
//! Unknown course ids and empty enrollments are not errors; they are
//! absorbed by the engine. These variants mean the shared in-memory
//! structures disagree with each other.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The catalog and the similarity matrix were built from different corpora
    #[error("Catalog has {catalog} courses but similarity matrix has {matrix} rows")]
    DimensionMismatch { catalog: usize, matrix: usize },

    /// A course position has no row or no course behind it
    #[error("Course position {position} is out of range for {size} courses")]
    PositionOutOfRange { position: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
