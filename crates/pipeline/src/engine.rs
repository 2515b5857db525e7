//! # Recommendation Engine
//!
//! Owns the immutable corpus structures and answers per-request queries:
//! 1. Resolve enrolled ids to positions (unknown ids dropped)
//! 2. Fall back to random sampling when nothing resolves
//! 3. Score every course by mean similarity to the enrollment
//! 4. Filter out enrolled courses
//! 5. Stable-sort by descending score and keep the top N
//!
//! The engine is built once and shared behind an `Arc`; `recommend` only
//! reads from it.

use std::sync::Arc;

use rand::Rng;
use rand::seq::index;
use tracing::{debug, info, instrument};

use data_loader::{CourseCatalog, CourseId};
use vectorizer::{SimilarityMatrix, TfidfVectorizer};

use crate::context::build_enrollment_context;
use crate::error::{PipelineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::AlreadyEnrolledFilter;
use crate::scoring::score_candidates;
use crate::types::{Candidate, CourseRecommendation, RecommendationSource};

/// Content-based course recommender
pub struct RecommendationEngine {
    catalog: Arc<CourseCatalog>,
    matrix: Arc<SimilarityMatrix>,
    filter_pipeline: FilterPipeline,
}

impl RecommendationEngine {
    /// Vectorize the catalog and precompute the similarity matrix.
    ///
    /// This is the one-time startup build; it cannot fail because the
    /// matrix is derived from the same catalog.
    pub fn build(catalog: Arc<CourseCatalog>) -> Self {
        let model = TfidfVectorizer::new().fit_transform(catalog.text_features());
        info!(
            "Vectorized {} courses over a vocabulary of {} terms",
            catalog.len(),
            model.dimension()
        );

        let matrix = Arc::new(SimilarityMatrix::build(&model.vectors));
        info!("Similarity matrix ready ({}x{})", matrix.len(), matrix.len());

        Self {
            catalog,
            matrix,
            filter_pipeline: default_filters(),
        }
    }

    /// Assemble an engine from a prebuilt matrix.
    ///
    /// Fails if the matrix was not built from a corpus of the same size.
    pub fn from_parts(catalog: Arc<CourseCatalog>, matrix: Arc<SimilarityMatrix>) -> Result<Self> {
        if catalog.len() != matrix.len() {
            return Err(PipelineError::DimensionMismatch {
                catalog: catalog.len(),
                matrix: matrix.len(),
            });
        }
        Ok(Self {
            catalog,
            matrix,
            filter_pipeline: default_filters(),
        })
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Recommend up to `count` courses for an enrollment, using the thread RNG
    /// for the random fallback.
    pub fn recommend(&self, enrolled: &[CourseId], count: usize) -> Result<Vec<CourseRecommendation>> {
        self.recommend_with_rng(enrolled, count, &mut rand::rng())
    }

    /// Courses most similar to a single course
    pub fn similar_courses(&self, course_id: &str, count: usize) -> Result<Vec<CourseRecommendation>> {
        self.recommend(&[course_id.to_string()], count)
    }

    /// Recommend up to `count` courses, drawing random fallbacks from `rng`.
    ///
    /// Returns fewer than `count` results when fewer candidates remain and
    /// an empty list for `count == 0` or an empty corpus.
    #[instrument(skip(self, enrolled, rng), fields(enrolled = enrolled.len()))]
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        enrolled: &[CourseId],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CourseRecommendation>> {
        if self.catalog.len() != self.matrix.len() {
            return Err(PipelineError::DimensionMismatch {
                catalog: self.catalog.len(),
                matrix: self.matrix.len(),
            });
        }
        if count == 0 || self.catalog.is_empty() {
            return Ok(Vec::new());
        }

        let context = build_enrollment_context(&self.catalog, enrolled);
        if context.is_empty() {
            debug!("No resolvable enrollment, sampling {} random courses", count);
            return self.sample_random(count, rng);
        }

        let candidates = score_candidates(&self.matrix, &context)?;
        let candidates = self.filter_pipeline.apply(candidates, &context)?;
        debug!("{} candidates after filtering", candidates.len());

        self.rank_and_select(candidates, count)
    }

    /// Uniform sample without replacement over the whole catalog
    fn sample_random<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CourseRecommendation>> {
        let amount = count.min(self.catalog.len());
        index::sample(rng, self.catalog.len(), amount)
            .into_iter()
            .map(|position| self.to_recommendation(position, None, RecommendationSource::Random))
            .collect()
    }

    /// Rank candidates by score and select top N.
    ///
    /// `sort_by` is stable, so tied scores keep ascending position order.
    fn rank_and_select(
        &self,
        mut candidates: Vec<Candidate>,
        count: usize,
    ) -> Result<Vec<CourseRecommendation>> {
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(count);

        candidates
            .into_iter()
            .map(|candidate| {
                self.to_recommendation(
                    candidate.position,
                    Some(candidate.score),
                    RecommendationSource::Similarity,
                )
            })
            .collect()
    }

    fn to_recommendation(
        &self,
        position: usize,
        score: Option<f64>,
        source: RecommendationSource,
    ) -> Result<CourseRecommendation> {
        let course = self
            .catalog
            .get(position)
            .ok_or(PipelineError::PositionOutOfRange {
                position,
                size: self.catalog.len(),
            })?;
        Ok(CourseRecommendation {
            course_id: course.id.clone(),
            title: course.title.clone(),
            score,
            source,
        })
    }
}

fn default_filters() -> FilterPipeline {
    FilterPipeline::new().add_filter(AlreadyEnrolledFilter)
}
