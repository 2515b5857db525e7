use data_loader::CorpusStore;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading course corpus...\n");

    let start = Instant::now();
    let store = CorpusStore::load_from_dir(data_dir)
        .expect("Failed to load corpus");
    let elapsed = start.elapsed();

    let (courses, students) = store.counts();
    let enrollments: usize = store
        .roster()
        .student_ids()
        .iter()
        .filter_map(|id| store.roster().get(id))
        .map(|s| s.enrolled.len())
        .sum();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Courses: {}", courses);
    println!("Students: {}", students);
    println!("Enrollments: {}", enrollments);
}
