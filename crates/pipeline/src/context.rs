//! Resolve a caller's enrolled course ids into catalog positions.

use crate::types::EnrollmentContext;
use data_loader::{CourseCatalog, CourseId};
use tracing::debug;

/// Build an EnrollmentContext from raw course ids.
///
/// Ids missing from the catalog are dropped and counted, never rejected.
/// Stored students and ad-hoc request lists go through the same path.
pub fn build_enrollment_context(catalog: &CourseCatalog, enrolled: &[CourseId]) -> EnrollmentContext {
    let mut context = EnrollmentContext::new();
    for id in enrolled {
        match catalog.position_of(id) {
            Some(position) => context.push(position),
            None => context.unresolved += 1,
        }
    }

    if context.unresolved > 0 {
        debug!(
            "Dropped {} unknown course id(s) out of {}",
            context.unresolved,
            enrolled.len()
        );
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Course;

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new("a", "Machine Learning", "intro"),
            Course::new("b", "Deep Learning", "nets"),
        ])
        .unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<CourseId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_known_ids() {
        let context = build_enrollment_context(&catalog(), &ids(&["b", "a"]));
        assert_eq!(context.enrolled_positions, vec![1, 0]);
        assert_eq!(context.unresolved, 0);
    }

    #[test]
    fn test_drops_unknown_ids() {
        let context = build_enrollment_context(&catalog(), &ids(&["zzz", "a", "yyy"]));
        assert_eq!(context.enrolled_positions, vec![0]);
        assert_eq!(context.unresolved, 2);
    }

    #[test]
    fn test_keeps_duplicates() {
        let context = build_enrollment_context(&catalog(), &ids(&["a", "a"]));
        assert_eq!(context.enrolled_positions, vec![0, 0]);
        assert_eq!(context.enrolled_set.len(), 1);
    }

    #[test]
    fn test_empty_when_nothing_resolves() {
        assert!(build_enrollment_context(&catalog(), &[]).is_empty());
        assert!(build_enrollment_context(&catalog(), &ids(&["nope"])).is_empty());
    }
}
