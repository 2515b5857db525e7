//! Filter implementations for the candidate pipeline.

pub mod already_enrolled;

// Re-export for convenience
pub use already_enrolled::AlreadyEnrolledFilter;
