//! HTTP routes.
//!
//! - `POST /recommend` → JSON array of course titles
//! - `GET /students/:student_id/recommendations?count=N` → titles for a stored student
//! - `GET /health` → corpus counts

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use pipeline::CourseRecommendation;

use crate::error::ApiError;
use crate::request::RecommendRequest;
use crate::service::RecommendationService;

type SharedService = Arc<RecommendationService>;

pub fn build_router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/recommend", post(recommend_handler))
        .route(
            "/students/:student_id/recommendations",
            get(student_recommendations_handler),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub count: Option<usize>,
}

fn titles(recommendations: Vec<CourseRecommendation>) -> Vec<String> {
    recommendations.into_iter().map(|rec| rec.title).collect()
}

async fn health_handler(State(service): State<SharedService>) -> Response {
    Json(json!({
        "status": "ok",
        "courses": service.catalog().len(),
        "students": service.roster().len(),
    }))
    .into_response()
}

// Raw bytes: malformed JSON must produce the fixed 400 payload, not axum's rejection.
async fn recommend_handler(State(service): State<SharedService>, body: Bytes) -> Response {
    info!("Received recommendation request: {}", String::from_utf8_lossy(&body));

    let query = match RecommendRequest::parse(&body, service.config()) {
        Ok(query) => query,
        Err(err) => return err.into_response(),
    };

    match service.recommend(query).await {
        Ok(recommendations) => Json(titles(recommendations)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn student_recommendations_handler(
    State(service): State<SharedService>,
    Path(student_id): Path<String>,
    params: Result<Query<CountParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return ApiError::MalformedRequest(rejection.body_text()).into_response(),
    };
    let count = service.config().resolve_count(params.count);
    match service.recommend_for_student(&student_id, count).await {
        Ok(recommendations) => Json(titles(recommendations)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::build_test_service;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn service() -> SharedService {
        Arc::new(build_test_service())
    }

    #[tokio::test]
    async fn test_recommend_returns_titles() {
        let body = Bytes::from(r#"{"userId": "s1", "courses": ["A"]}"#);
        let response = recommend_handler(State(service()), body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["Deep Learning", "Cooking 101"]));
    }

    #[tokio::test]
    async fn test_recommend_missing_user_id_is_bad_request() {
        let body = Bytes::from(r#"{"courses": ["A"]}"#);
        let response = recommend_handler(State(service()), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Invalid input format"}));
    }

    #[tokio::test]
    async fn test_recommend_invalid_json_is_bad_request() {
        let response = recommend_handler(State(service()), Bytes::from("{userId")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommend_empty_enrollment_returns_random_titles() {
        let body = Bytes::from(r#"{"userId": "s9"}"#);
        let response = recommend_handler(State(service()), body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let titles = body_json(response).await;
        assert_eq!(titles.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_student_recommendations() {
        let response = student_recommendations_handler(
            State(service()),
            Path("s1".to_string()),
            Ok(Query(CountParams { count: Some(1) })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["Deep Learning"]));
    }

    #[tokio::test]
    async fn test_unknown_student_is_not_found() {
        let response = student_recommendations_handler(
            State(service()),
            Path("ghost".to_string()),
            Ok(Query(CountParams { count: None })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Student not found"}));
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let response = health_handler(State(service())).await;
        assert_eq!(
            body_json(response).await,
            json!({"status": "ok", "courses": 3, "students": 2})
        );
    }

    #[tokio::test]
    async fn test_router_serves_student_recommendations() {
        let request = Request::builder()
            .uri("/students/s1/recommendations?count=1")
            .body(Body::empty())
            .unwrap();
        let response = build_router(service()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["Deep Learning"]));
    }

    #[tokio::test]
    async fn test_non_numeric_count_is_generic_bad_request() {
        let request = Request::builder()
            .uri("/students/s1/recommendations?count=abc")
            .body(Body::empty())
            .unwrap();
        let response = build_router(service()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Invalid input format"}));
    }
}
