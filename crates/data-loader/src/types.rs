//! Core domain types for the course corpus.
//!
//! The catalog and roster are built once at startup and are read-only
//! afterwards; everything downstream indexes courses by their dense
//! [`CoursePosition`] rather than by the opaque [`CourseId`].

use crate::error::{DataLoadError, Result};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque course identifier (a document id in the source tables)
pub type CourseId = String;

/// Opaque student identifier
pub type StudentId = String;

/// Dense index of a course in `[0, N)`, used for all matrix lookups
pub type CoursePosition = usize;

// =============================================================================
// Records
// =============================================================================

/// A course in the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
}

impl Course {
    pub fn new(
        id: impl Into<CourseId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Title and description joined by a single space.
    ///
    /// This is the text the vectorizer sees for the course.
    pub fn text_features(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A student and the courses they are enrolled in
///
/// `enrolled` may contain duplicates and unknown ids; the engine tolerates both.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub enrolled: Vec<CourseId>,
}

// =============================================================================
// CourseCatalog
// =============================================================================

/// Immutable, position-indexed set of courses.
///
/// Positions follow input order and are contiguous. The id to position map
/// is a bijection: duplicate ids are rejected on construction.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    positions: HashMap<CourseId, CoursePosition>,
    // Computed once at load time so repeated vectorization never re-joins strings
    text_features: Vec<String>,
}

impl CourseCatalog {
    /// Build a catalog, assigning positions in input order
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if positions.insert(course.id.clone(), position).is_some() {
                return Err(DataLoadError::DuplicateCourse {
                    id: course.id.clone(),
                });
            }
        }
        let text_features = courses.iter().map(Course::text_features).collect();

        Ok(Self {
            courses,
            positions,
            text_features,
        })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Get the course stored at a position
    pub fn get(&self, position: CoursePosition) -> Option<&Course> {
        self.courses.get(position)
    }

    /// Resolve a course id to its position
    pub fn position_of(&self, id: &str) -> Option<CoursePosition> {
        self.positions.get(id).copied()
    }

    /// Get a course by its id
    pub fn get_by_id(&self, id: &str) -> Option<&Course> {
        self.position_of(id).and_then(|position| self.get(position))
    }

    /// All courses in position order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Title + description for every course, in position order
    pub fn text_features(&self) -> &[String] {
        &self.text_features
    }

    /// Case-insensitive title search.
    ///
    /// Exact title matches come first, then substring matches; each group
    /// keeps corpus order.
    pub fn search_by_title(&self, query: &str) -> Vec<&Course> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut partial = Vec::new();
        for course in &self.courses {
            let title = course.title.to_lowercase();
            if title == needle {
                exact.push(course);
            } else if title.contains(&needle) {
                partial.push(course);
            }
        }
        exact.extend(partial);
        exact
    }
}

// =============================================================================
// StudentRoster
// =============================================================================

/// Stored student records, keyed by id
#[derive(Debug, Clone, Default)]
pub struct StudentRoster {
    students: HashMap<StudentId, Student>,
}

impl StudentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a student; a second record with the same id is an error
    pub fn insert(&mut self, student: Student) -> Result<()> {
        if self.students.contains_key(&student.id) {
            return Err(DataLoadError::DuplicateStudent { id: student.id });
        }
        self.students.insert(student.id.clone(), student);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// All student ids, sorted so callers get a stable listing
    pub fn student_ids(&self) -> Vec<&StudentId> {
        let mut ids: Vec<&StudentId> = self.students.keys().collect();
        ids.sort();
        ids
    }
}

// =============================================================================
// CorpusStore
// =============================================================================

/// Everything loaded from the startup tables
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    pub(crate) catalog: CourseCatalog,
    pub(crate) roster: StudentRoster,
}

impl CorpusStore {
    pub fn new(catalog: CourseCatalog, roster: StudentRoster) -> Self {
        Self { catalog, roster }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn roster(&self) -> &StudentRoster {
        &self.roster
    }

    /// Split into the catalog and roster so each can be shared separately
    pub fn into_parts(self) -> (CourseCatalog, StudentRoster) {
        (self.catalog, self.roster)
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.catalog.len(), self.roster.len())
    }
}
