//! Inbound request schema for `POST /recommend`.

use serde::Deserialize;

use data_loader::{CourseId, StudentId};

use crate::config::ServerConfig;
use crate::error::{ApiError, Result};

/// Student ids arrive either as strings or as bare JSON numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

/// JSON body of a recommendation request
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(rename = "userId")]
    user_id: Option<WireId>,
    #[serde(default)]
    courses: Option<Vec<CourseId>>,
    #[serde(default)]
    count: Option<usize>,
}

/// Validated request, ready for the engine
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub student_id: StudentId,
    pub enrolled: Vec<CourseId>,
    pub count: usize,
}

impl RecommendRequest {
    /// Decode and validate a raw request body.
    ///
    /// `userId` must be present and non-blank. A missing or null `courses`
    /// list means no enrollment.
    pub fn parse(body: &[u8], config: &ServerConfig) -> Result<RecommendationQuery> {
        let request: RecommendRequest = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
        request.into_query(config)
    }

    fn into_query(self, config: &ServerConfig) -> Result<RecommendationQuery> {
        let student_id = self
            .user_id
            .map(WireId::into_string)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::MalformedRequest("missing userId".to_string()))?;

        Ok(RecommendationQuery {
            student_id,
            enrolled: self.courses.unwrap_or_default(),
            count: config.resolve_count(self.count),
        })
    }
}
