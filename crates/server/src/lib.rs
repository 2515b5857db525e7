//! Server crate for the course recommendation engine.
//!
//! Wraps the immutable [`pipeline::RecommendationEngine`] in a shared
//! [`RecommendationService`] and exposes it over HTTP.

pub mod config;
pub mod error;
pub mod request;
pub mod routes;
pub mod service;

pub use config::ServerConfig;
pub use error::{ApiError, Result};
pub use request::{RecommendRequest, RecommendationQuery};
pub use routes::build_router;
pub use service::RecommendationService;
