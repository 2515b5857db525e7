//! Parsers for the course and student tables.
//!
//! - courses: `_id,title,description` (extra columns ignored)
//! - students: `_id,courses` where `courses` is a stringified list such as
//!   `['65a1...', '65a2...']`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// One row of the course table as it appears on disk
#[derive(Debug, Deserialize)]
struct CourseRecord {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

/// One row of the student table as it appears on disk
#[derive(Debug, Deserialize)]
struct StudentRecord {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    courses: Option<String>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let io_error = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
            source,
        },
        _ => DataLoadError::IoError {
            path: path.display().to_string(),
            source,
        },
    };

    let file = File::open(path).map_err(io_error)?;
    // Opening a directory succeeds on unix; reading it would not
    if file.metadata().map_err(io_error)?.is_dir() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::IsADirectory,
            "expected a CSV file, found a directory",
        )));
    }
    Ok(csv::ReaderBuilder::new().flexible(true).from_reader(file))
}

/// Line number of a record, falling back to its index (+1 for the header)
fn record_line(err: &csv::Error, idx: usize) -> usize {
    err.position()
        .map(|pos| pos.line() as usize)
        .unwrap_or(idx + 2)
}

/// Parse the course table
pub fn parse_courses(path: &Path) -> Result<Vec<Course>> {
    let file = file_name(path);
    let mut reader = open_reader(path)?;
    let mut courses = Vec::new();

    for (idx, record) in reader.deserialize::<CourseRecord>().enumerate() {
        let line_no = idx + 2;
        let record = record.map_err(|e| DataLoadError::ParseError {
            file: file.clone(),
            line: record_line(&e, idx),
            reason: e.to_string(),
        })?;

        let id = record.id.trim();
        if id.is_empty() {
            return Err(DataLoadError::ParseError {
                file,
                line: line_no,
                reason: "Missing course id".to_string(),
            });
        }
        if record.title.trim().is_empty() {
            return Err(DataLoadError::ParseError {
                file,
                line: line_no,
                reason: format!("Missing title for course {}", id),
            });
        }

        courses.push(Course::new(
            id,
            record.title,
            record.description.unwrap_or_default(),
        ));
    }

    Ok(courses)
}

/// Parse the student table
pub fn parse_students(path: &Path) -> Result<Vec<Student>> {
    let file = file_name(path);
    let mut reader = open_reader(path)?;
    let mut students = Vec::new();

    for (idx, record) in reader.deserialize::<StudentRecord>().enumerate() {
        let line_no = idx + 2;
        let record = record.map_err(|e| DataLoadError::ParseError {
            file: file.clone(),
            line: record_line(&e, idx),
            reason: e.to_string(),
        })?;

        let id = record.id.trim();
        if id.is_empty() {
            return Err(DataLoadError::ParseError {
                file,
                line: line_no,
                reason: "Missing student id".to_string(),
            });
        }

        let enrolled = parse_course_list(record.courses.as_deref().unwrap_or(""))
            .map_err(|reason| DataLoadError::ParseError {
                file: file.clone(),
                line: line_no,
                reason,
            })?;

        students.push(Student {
            id: id.to_string(),
            enrolled,
        });
    }

    Ok(students)
}

/// Parse a stringified list of course ids.
///
/// Accepts `[]`, `['a', 'b']`, `["a", "b"]` and bare `[a, b]`. A blank
/// cell is an empty list.
///
/// Example: `"['c1', \"c2\"]"` -> `vec!["c1", "c2"]`
pub fn parse_course_list(raw: &str) -> std::result::Result<Vec<CourseId>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("Course list is not bracketed: {}", trimmed))?;

    let mut ids = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        if item.is_empty() {
            // Trailing comma or the empty list
            continue;
        }
        ids.push(unquote(item)?.to_string());
    }
    Ok(ids)
}

fn unquote(item: &str) -> std::result::Result<&str, String> {
    for quote in ['\'', '"'] {
        if let Some(rest) = item.strip_prefix(quote) {
            return rest
                .strip_suffix(quote)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("Unbalanced quotes in course list item: {}", item));
        }
        if item.ends_with(quote) {
            return Err(format!("Unbalanced quotes in course list item: {}", item));
        }
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("data-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_course_list_variants() {
        assert_eq!(parse_course_list("[]").unwrap(), Vec::<String>::new());
        assert_eq!(parse_course_list("   ").unwrap(), Vec::<String>::new());
        assert_eq!(
            parse_course_list("['c1', \"c2\"]").unwrap(),
            vec!["c1".to_string(), "c2".to_string()]
        );
        assert_eq!(parse_course_list("[c3,]").unwrap(), vec!["c3".to_string()]);
    }

    #[test]
    fn test_parse_course_list_rejects_malformed() {
        assert!(parse_course_list("'c1', 'c2'").is_err());
        assert!(parse_course_list("['c1]").is_err());
        assert!(parse_course_list("[c1']").is_err());
    }

    #[test]
    fn test_parse_courses() {
        let path = write_temp(
            "courses.csv",
            "_id,title,description,category\n\
             c1,Machine Learning,\"Intro to ML, with Python\",cs\n\
             c2,Cooking 101,,food\n",
        );
        let courses = parse_courses(&path).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, "c1");
        assert_eq!(courses[0].description, "Intro to ML, with Python");
        assert_eq!(courses[1].description, "");
        assert_eq!(courses[1].text_features(), "Cooking 101 ");
    }

    #[test]
    fn test_parse_courses_missing_title() {
        let path = write_temp("courses_bad.csv", "_id,title,description\nc1,,desc\n");
        let err = parse_courses(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_parse_students() {
        let path = write_temp(
            "students.csv",
            "_id,courses,recommended\n\
             s1,\"['c1', 'c2']\",x\n\
             s2,[],y\n",
        );
        let students = parse_students(&path).unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].enrolled, vec!["c1".to_string(), "c2".to_string()]);
        assert!(students[1].enrolled.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_courses(Path::new("/nonexistent/courses.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_path_is_io_error() {
        let table = write_temp("placeholder.csv", "_id,title\n");
        let dir = table.parent().unwrap();

        let err = parse_students(dir).unwrap_err();
        match &err {
            DataLoadError::IoError { path, source } => {
                assert_eq!(path, &dir.display().to_string());
                assert_eq!(source.kind(), io::ErrorKind::IsADirectory);
            }
            other => panic!("expected IoError, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
