use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CorpusStore, CourseId, StudentId, COURSES_FILE, STUDENTS_FILE};
use pipeline::{CourseRecommendation, RecommendationSource};
use rand::seq::IndexedRandom;
use server::{RecommendationQuery, RecommendationService, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Course Recs - Content-based Course Recommendation Engine
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Course recommendations from TF-IDF similarity of titles and descriptions", long_about = None)]
struct Cli {
    /// Directory holding the course and student CSV tables
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend courses for a list of enrolled course ids
    Recommend {
        /// Enrolled course ids, comma separated (omit for random picks)
        #[arg(long, value_delimiter = ',')]
        courses: Vec<CourseId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        count: usize,

        /// Show score and source for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Show a stored student's courses and recommendations
    Student {
        /// Student ID to display
        #[arg(long)]
        student_id: StudentId,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Search for courses by title
    Search {
        /// Course title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        courses_path: cli.data_dir.join(COURSES_FILE),
        students_path: cli.data_dir.join(STUDENTS_FILE),
        ..ServerConfig::default()
    };

    println!("Loading course corpus from {}...", cli.data_dir.display());
    let start = Instant::now();
    let store = CorpusStore::load_from_files(&config.courses_path, &config.students_path)
        .context("Failed to load course corpus")?;
    let (courses, students) = store.counts();
    println!(
        "{} Loaded {} courses and {} students in {:?}",
        "✓".green(),
        courses,
        students,
        start.elapsed()
    );

    // Search needs no similarity matrix
    if let Commands::Search { title } = &cli.command {
        return handle_search(&store, title);
    }

    let start = Instant::now();
    let service = Arc::new(RecommendationService::from_store(store, config));
    println!("{} Built similarity matrix in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            courses,
            count,
            explain,
        } => handle_recommend(&service, courses, count, explain).await?,
        Commands::Student { student_id, count } => {
            handle_student(&service, &student_id, count).await?
        }
        Commands::Search { .. } => {}
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    courses: Vec<CourseId>,
    count: usize,
    explain: bool,
) -> Result<()> {
    for id in &courses {
        if service.catalog().get_by_id(id).is_none() {
            println!("{} Unknown course id {} (ignored)", "!".yellow(), id);
        }
    }

    let query = RecommendationQuery {
        student_id: "cli".to_string(),
        enrolled: courses,
        count,
    };
    let recommendations = service.recommend(query).await?;

    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'student' command
async fn handle_student(
    service: &RecommendationService,
    student_id: &str,
    count: usize,
) -> Result<()> {
    let student = service
        .roster()
        .get(student_id)
        .ok_or_else(|| anyhow!("Student {} not found", student_id))?;

    println!("{}", format!("Student ID: {}", student_id).bold().blue());
    println!("{}Enrolled courses: {}", "• ".green(), student.enrolled.len());
    for id in &student.enrolled {
        match service.catalog().get_by_id(id) {
            Some(course) => println!("  - {} ({})", course.title, id),
            None => println!("  - {} {}", id, "(not in catalog)".dimmed()),
        }
    }

    let recommendations = service.recommend_for_student(student_id, count).await?;
    print_recommendations(&recommendations, true);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &CorpusStore, title: &str) -> Result<()> {
    let matches = store.catalog().search_by_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  {}", "no matching courses".dimmed());
    }
    for course in matches.iter().take(20) {
        println!("{}: {}", course.id.cyan(), course.title);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: Arc<RecommendationService>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let student_ids: Vec<StudentId> = service.roster().student_ids().into_iter().cloned().collect();
    if student_ids.is_empty() {
        bail!("No stored students to benchmark with");
    }

    // Random stored students, drawn with replacement
    let picks: Vec<StudentId> = {
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| student_ids.choose(&mut rng).cloned())
            .collect()
    };

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for student_id in picks {
        let service = service.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            service.recommend_for_student(&student_id, 5).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[CourseRecommendation], explain: bool) {
    println!("{}", "Course Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  {}", "no courses to recommend".dimmed());
    }

    for (idx, rec) in recommendations.iter().enumerate() {
        let rank = idx + 1;
        println!("{}. {}", rank.to_string().green(), rec.title);
        if explain {
            match (rec.source, rec.score) {
                (RecommendationSource::Similarity, Some(score)) => {
                    println!("   {} mean similarity {:.4} ({})", "↳".dimmed(), score, rec.course_id)
                }
                _ => println!("   {} random pick, no usable enrollment ({})", "↳".dimmed(), rec.course_id),
            }
        }
    }
}
