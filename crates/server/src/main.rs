//! Course recommendation HTTP server.
//!
//! Loads the course and student tables, builds the similarity matrix, then
//! serves recommendations until interrupted.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use data_loader::CorpusStore;
use server::config::{DEFAULT_BIND_ADDR, DEFAULT_COUNT, MAX_COUNT};
use server::{RecommendationService, ServerConfig, build_router};

/// Course recommendation server
#[derive(Parser)]
#[command(name = "course-recs-server", about = "Serve content-based course recommendations over HTTP")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "COURSE_RECS_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Course table (CSV: _id,title,description)
    #[arg(long, env = "COURSE_RECS_COURSES", default_value = "data/courses_with_objectids.csv")]
    courses: PathBuf,

    /// Student table (CSV: _id,courses)
    #[arg(long, env = "COURSE_RECS_STUDENTS", default_value = "data/students_with_recommendations.csv")]
    students: PathBuf,

    /// Recommendations returned when a request gives no count
    #[arg(long, env = "COURSE_RECS_DEFAULT_COUNT", default_value_t = DEFAULT_COUNT)]
    default_count: usize,

    /// Largest count a request may ask for
    #[arg(long, env = "COURSE_RECS_MAX_COUNT", default_value_t = MAX_COUNT)]
    max_count: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: args.bind_addr,
            courses_path: args.courses,
            students_path: args.students,
            default_count: args.default_count,
            max_count: args.max_count,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Args::parse());

    info!(
        "Loading corpus from {} and {}",
        config.courses_path.display(),
        config.students_path.display()
    );
    let start = Instant::now();
    let store = CorpusStore::load_from_files(&config.courses_path, &config.students_path)
        .context("Failed to load course corpus")?;
    let (courses, students) = store.counts();
    info!(
        "Loaded {} courses and {} students in {:?}",
        courses,
        students,
        start.elapsed()
    );

    let service = Arc::new(RecommendationService::from_store(store, config.clone()));
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
