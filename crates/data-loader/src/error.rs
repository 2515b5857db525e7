//! Error types for the data-loader crate.
//!
//! Every failure here happens at startup, before the service accepts
//! requests, so each variant carries enough context to fix the input file.

use thiserror::Error;

/// Errors that can occur while loading and indexing the course corpus
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File does not exist
    #[error("Failed to open file: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File exists but could not be read (permissions, a directory, ...)
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record couldn't be decoded into the expected columns
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The same course id appears on more than one row
    #[error("Duplicate course id: {id}")]
    DuplicateCourse { id: String },

    /// The same student id appears on more than one row
    #[error("Duplicate student id: {id}")]
    DuplicateStudent { id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
