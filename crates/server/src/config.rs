//! Server configuration.

use std::path::PathBuf;

use data_loader::{COURSES_FILE, STUDENTS_FILE};

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:6000";

/// Recommendations returned when a request does not ask for a count
pub const DEFAULT_COUNT: usize = 5;

/// Upper bound on the count a caller may request
pub const MAX_COUNT: usize = 50;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub courses_path: PathBuf,
    pub students_path: PathBuf,
    pub default_count: usize,
    pub max_count: usize,
}

impl ServerConfig {
    /// Clamp a requested count to `max_count`, falling back to `default_count`
    pub fn resolve_count(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_count).min(self.max_count)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            courses_path: data_dir.join(COURSES_FILE),
            students_path: data_dir.join(STUDENTS_FILE),
            default_count: DEFAULT_COUNT,
            max_count: MAX_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:6000");
        assert_eq!(config.courses_path, PathBuf::from("data/courses_with_objectids.csv"));
        assert_eq!(config.default_count, 5);
    }

    #[test]
    fn test_resolve_count() {
        let config = ServerConfig::default();
        assert_eq!(config.resolve_count(None), 5);
        assert_eq!(config.resolve_count(Some(12)), 12);
        assert_eq!(config.resolve_count(Some(500)), 50);
        assert_eq!(config.resolve_count(Some(0)), 0);
    }
}
