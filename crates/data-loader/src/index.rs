//! CorpusStore building and validation.
//!
//! Both tables are parsed in parallel, then assembled into the immutable
//! catalog and roster. Students enrolled in unknown courses are kept as-is:
//! the engine drops unknown ids at request time.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

/// Default course table name inside a data directory
pub const COURSES_FILE: &str = "courses_with_objectids.csv";

/// Default student table name inside a data directory
pub const STUDENTS_FILE: &str = "students_with_recommendations.csv";

impl CorpusStore {
    /// Load both tables from a directory using the default file names
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load_from_files(&data_dir.join(COURSES_FILE), &data_dir.join(STUDENTS_FILE))
    }

    /// Load the course and student tables.
    ///
    /// This is the main entry point for loading data. Any failure here is
    /// fatal to startup.
    pub fn load_from_files(courses_path: &Path, students_path: &Path) -> Result<Self> {
        info!(
            "Loading corpus from {:?} and {:?}",
            courses_path, students_path
        );

        let (courses, students) = rayon::join(
            || parser::parse_courses(courses_path),
            || parser::parse_students(students_path),
        );
        let courses = courses?;
        let students = students?;

        info!("Loaded {} courses, {} students", courses.len(), students.len());

        let store = Self::from_records(courses, students)?;
        store.validate();

        Ok(store)
    }

    /// Assemble a store from already-parsed records
    pub fn from_records(courses: Vec<Course>, students: Vec<Student>) -> Result<Self> {
        let catalog = CourseCatalog::new(courses)?;
        let mut roster = StudentRoster::new();
        for student in students {
            roster.insert(student)?;
        }
        Ok(Self { catalog, roster })
    }

    /// Report enrollments that reference courses missing from the catalog.
    ///
    /// Returns the number of dangling references; these are tolerated.
    pub fn validate(&self) -> usize {
        let mut dangling = 0;
        for id in self.roster.student_ids() {
            let Some(student) = self.roster.get(id) else {
                continue;
            };
            let unknown = student
                .enrolled
                .iter()
                .filter(|course_id| self.catalog.position_of(course_id).is_none())
                .count();
            if unknown > 0 {
                warn!(
                    "Student {} is enrolled in {} unknown course(s)",
                    student.id, unknown
                );
                dangling += unknown;
            }
        }
        if self.catalog.is_empty() {
            warn!("Course table is empty; recommendations will always be empty");
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataLoadError;

    fn student(id: &str, enrolled: &[&str]) -> Student {
        Student {
            id: id.to_string(),
            enrolled: enrolled.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_from_records_assigns_positions() {
        let store = CorpusStore::from_records(
            vec![
                Course::new("c1", "Machine Learning", "intro"),
                Course::new("c2", "Cooking", "recipes"),
            ],
            vec![student("s1", &["c1"])],
        )
        .unwrap();

        assert_eq!(store.counts(), (2, 1));
        assert_eq!(store.catalog().position_of("c2"), Some(1));
        assert_eq!(store.validate(), 0);
    }

    #[test]
    fn test_validate_counts_dangling_enrollments() {
        let store = CorpusStore::from_records(
            vec![Course::new("c1", "Machine Learning", "intro")],
            vec![student("s1", &["c1", "gone", "gone"]), student("s2", &["missing"])],
        )
        .unwrap();

        assert_eq!(store.validate(), 3);
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let err = CorpusStore::from_records(
            vec![],
            vec![student("s1", &[]), student("s1", &["c1"])],
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateStudent { .. }));
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual dataset files
        let data_dir = Path::new("../../data");

        if data_dir.join(COURSES_FILE).exists() && data_dir.join(STUDENTS_FILE).exists() {
            let store = CorpusStore::load_from_dir(data_dir).unwrap();
            let (courses, _) = store.counts();
            assert!(courses > 0);
        }
    }
}
