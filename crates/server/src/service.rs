//! # Recommendation Service
//!
//! Shared handle over the immutable engine and student roster. The engine
//! is CPU-bound, so every query runs on the blocking pool via
//! `tokio::task::spawn_blocking` and never stalls the async workers.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use data_loader::{CorpusStore, CourseCatalog, CourseId, StudentRoster};
use pipeline::{CourseRecommendation, RecommendationEngine};

use crate::config::ServerConfig;
use crate::error::{ApiError, Result};
use crate::request::RecommendationQuery;

#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<RecommendationEngine>,
    roster: Arc<StudentRoster>,
    config: ServerConfig,
}

impl RecommendationService {
    pub fn new(
        engine: Arc<RecommendationEngine>,
        roster: Arc<StudentRoster>,
        config: ServerConfig,
    ) -> Self {
        Self {
            engine,
            roster,
            config,
        }
    }

    /// Vectorize the corpus and build the similarity matrix.
    ///
    /// Runs synchronously; call before binding the listener.
    pub fn from_store(store: CorpusStore, config: ServerConfig) -> Self {
        let start = Instant::now();
        let (catalog, roster) = store.into_parts();
        let engine = RecommendationEngine::build(Arc::new(catalog));
        info!("Recommendation engine built in {:?}", start.elapsed());

        Self::new(Arc::new(engine), Arc::new(roster), config)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CourseCatalog {
        self.engine.catalog()
    }

    pub fn roster(&self) -> &StudentRoster {
        &self.roster
    }

    /// Recommend for an explicit enrollment list
    #[instrument(skip(self, query), fields(student = %query.student_id, count = query.count))]
    pub async fn recommend(&self, query: RecommendationQuery) -> Result<Vec<CourseRecommendation>> {
        self.run_engine(query.enrolled, query.count).await
    }

    /// Recommend for a stored student using their recorded enrollment
    #[instrument(skip(self))]
    pub async fn recommend_for_student(
        &self,
        student_id: &str,
        count: usize,
    ) -> Result<Vec<CourseRecommendation>> {
        let student = self
            .roster
            .get(student_id)
            .ok_or_else(|| ApiError::StudentNotFound(student_id.to_string()))?;
        debug!("Student {} has {} stored courses", student_id, student.enrolled.len());

        self.run_engine(student.enrolled.clone(), count).await
    }

    async fn run_engine(
        &self,
        enrolled: Vec<CourseId>,
        count: usize,
    ) -> Result<Vec<CourseRecommendation>> {
        let start = Instant::now();
        let engine = self.engine.clone();

        let recommendations = tokio::task::spawn_blocking(move || engine.recommend(&enrolled, count))
            .await
            .map_err(|e| ApiError::Internal(format!("recommendation task failed: {}", e)))??;

        debug!(
            "Produced {} recommendations in {:?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use data_loader::{Course, Student};
    use pipeline::RecommendationSource;

    pub(crate) fn build_test_service() -> RecommendationService {
        let store = CorpusStore::from_records(
            vec![
                Course::new("A", "Machine Learning Basics", "intro to ML"),
                Course::new("B", "Deep Learning", "neural nets"),
                Course::new("C", "Cooking 101", "recipes and kitchen"),
            ],
            vec![
                Student {
                    id: "s1".to_string(),
                    enrolled: vec!["A".to_string()],
                },
                Student {
                    id: "s2".to_string(),
                    enrolled: vec![],
                },
            ],
        )
        .unwrap();
        RecommendationService::from_store(store, ServerConfig::default())
    }

    fn query(enrolled: &[&str], count: usize) -> RecommendationQuery {
        RecommendationQuery {
            student_id: "s1".to_string(),
            enrolled: enrolled.iter().map(|s| s.to_string()).collect(),
            count,
        }
    }

    #[tokio::test]
    async fn test_recommend_ranks_by_similarity() {
        let service = build_test_service();
        let recs = service.recommend(query(&["A"], 5)).await.unwrap();

        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Deep Learning", "Cooking 101"]);
    }

    #[tokio::test]
    async fn test_recommend_without_enrollment_is_random() {
        let service = build_test_service();
        let recs = service.recommend(query(&[], 2)).await.unwrap();

        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::Random));
    }

    #[tokio::test]
    async fn test_recommend_for_stored_student() {
        let service = build_test_service();
        let recs = service.recommend_for_student("s1", 1).await.unwrap();
        assert_eq!(recs[0].title, "Deep Learning");

        let recs = service.recommend_for_student("s2", 5).await.unwrap();
        assert_eq!(recs.len(), 3);
    }

    #[tokio::test]
    async fn test_recommend_for_unknown_student() {
        let service = build_test_service();
        let err = service.recommend_for_student("nobody", 5).await.unwrap_err();
        assert_eq!(err, ApiError::StudentNotFound("nobody".to_string()));
    }
}
