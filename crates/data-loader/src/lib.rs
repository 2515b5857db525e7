//! # Data Loader Crate
//!
//! Loads the course and student tables and exposes them as an immutable
//! in-memory corpus.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Course, Student, CourseCatalog, StudentRoster, CorpusStore)
//! - **parser**: Parse the CSV tables into Rust structs
//! - **index**: Assemble and validate the CorpusStore
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CorpusStore;
//! use std::path::Path;
//!
//! let store = CorpusStore::load_from_dir(Path::new("data"))?;
//! let course = store.catalog().get_by_id("65a1f0c2").unwrap();
//! println!("{} is at position {:?}", course.title, store.catalog().position_of(&course.id));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{COURSES_FILE, STUDENTS_FILE};
pub use types::{
    // Type aliases
    CourseId,
    CoursePosition,
    StudentId,
    // Core types
    Course,
    CourseCatalog,
    CorpusStore,
    Student,
    StudentRoster,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new("c1", "Deep Learning", "neural nets"),
            Course::new("c2", "Machine Learning Basics", "intro to ML"),
            Course::new("c3", "deep learning", "duplicate title, different id"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CourseCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get(0).is_none());
        assert!(catalog.position_of("c1").is_none());
    }

    #[test]
    fn test_positions_are_contiguous() {
        let catalog = sample_catalog();
        for (position, course) in catalog.courses().iter().enumerate() {
            assert_eq!(catalog.position_of(&course.id), Some(position));
        }
        assert_eq!(catalog.get_by_id("c2").unwrap().title, "Machine Learning Basics");
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let err = CourseCatalog::new(vec![
            Course::new("c1", "A", "a"),
            Course::new("c1", "B", "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateCourse { ref id } if id == "c1"));
    }

    #[test]
    fn test_text_features() {
        let catalog = sample_catalog();
        assert_eq!(catalog.text_features()[1], "Machine Learning Basics intro to ML");
    }

    #[test]
    fn test_search_by_title_orders_exact_first() {
        let catalog = sample_catalog();

        let results = catalog.search_by_title("Deep Learning");
        let ids: Vec<_> = results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);

        let results = catalog.search_by_title("learning");
        let ids: Vec<_> = results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);

        assert!(catalog.search_by_title("  ").is_empty());
    }

    #[test]
    fn test_roster_queries() {
        let mut roster = StudentRoster::new();
        roster
            .insert(Student {
                id: "s2".to_string(),
                enrolled: vec!["c1".to_string()],
            })
            .unwrap();
        roster
            .insert(Student {
                id: "s1".to_string(),
                enrolled: vec![],
            })
            .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.student_ids(), vec!["s1", "s2"]);
        assert!(roster.get("s3").is_none());
    }
}
