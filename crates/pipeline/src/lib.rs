//! Content-based course recommendation pipeline.
//!
//! This crate provides:
//! - EnrollmentContext: enrolled course ids resolved to catalog positions
//! - Mean-similarity scoring over the precomputed SimilarityMatrix
//! - Filter trait, FilterPipeline and AlreadyEnrolledFilter
//! - RecommendationEngine, the immutable handle that ties it together
//!
//! ## Architecture
//! 1. Resolve enrollment (unknown ids dropped; nothing left → random sample)
//! 2. Score every course by mean similarity to the enrollment
//! 3. Filters remove enrolled courses
//! 4. Stable ranking by descending score, top N titles returned
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RecommendationEngine;
//!
//! let engine = RecommendationEngine::build(Arc::new(catalog));
//! let recs = engine.recommend(&["65a1f0c2".to_string()], 5)?;
//! for rec in recs {
//!     println!("{} ({:?})", rec.title, rec.score);
//! }
//! ```

pub mod error;
pub mod types;
pub mod context;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod scoring;
pub mod engine;

// Re-export main types
pub use context::build_enrollment_context;
pub use engine::RecommendationEngine;
pub use error::{PipelineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
pub use types::{Candidate, CourseRecommendation, EnrollmentContext, RecommendationSource};
