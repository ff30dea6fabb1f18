use data_loader::ImdbTables;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("Datasets");

    println!("Loading IMDb dumps...\n");

    let start = Instant::now();
    let tables = ImdbTables::load_from_dir(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let counts = tables.counts();
    let total = counts.titles + counts.names + counts.episodes + counts.principals + counts.ratings;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Titles: {}", counts.titles);
    println!("People: {}", counts.names);
    println!("Episodes: {}", counts.episodes);
    println!("Principals: {}", counts.principals);
    println!("Ratings: {}", counts.ratings);
    println!("\nPerformance: {:.0} rows/second",
             total as f64 / elapsed.as_secs_f64());
}
