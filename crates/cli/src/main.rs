use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::ImdbTables;
use orchestrator::{EtlConfig, EtlOrchestrator, RunSummary, SinkConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// imdb-etl - load IMDb dumps into a document store
#[derive(Parser)]
#[command(name = "imdb-etl")]
#[command(about = "Reshape IMDb TSV dumps into movie, series, short and people collections", long_about = None)]
struct Cli {
    /// Directory holding the IMDb .tsv dumps
    #[arg(short, long, default_value = "Datasets")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every collection and write it, replacing what was there
    Run(RunArgs),

    /// Read the dumps and build the collections without writing anything
    Inspect,
}

#[derive(Args)]
struct RunArgs {
    /// Size of the compute pool (defaults to all cores)
    #[arg(long)]
    workers: Option<usize>,

    /// MongoDB connection URI
    #[arg(long, default_value = "mongodb://localhost:27017")]
    mongo_uri: String,

    /// Target database
    #[arg(long, default_value = "imdb")]
    database: String,

    /// Write JSON Lines files into this directory instead of MongoDB
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write each collection as concurrent partitions
    #[arg(long)]
    repartition: bool,

    /// Number of partitions used with --repartition
    #[arg(long, default_value = "200")]
    partitions: usize,

    /// Documents per insert request
    #[arg(long, default_value = "10000")]
    batch_size: usize,

    /// Recreate the unified `titles` view after writing
    #[arg(long)]
    titles_view: bool,

    /// Recreate the `peopleWithTitles` view after writing
    #[arg(long)]
    people_view: bool,
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

    match cli.command {
        Commands::Run(args) => handle_run(cli.data_dir, args).await?,
        Commands::Inspect => handle_inspect(cli.data_dir)?,
    }

    Ok(())
}

/// Handle the 'run' command
async fn handle_run(data_dir: PathBuf, args: RunArgs) -> Result<()> {
    let sink = match args.output_dir {
        Some(output_dir) => SinkConfig::JsonLines { output_dir },
        None => SinkConfig::Mongo {
            uri: args.mongo_uri,
            database: args.database,
        },
    };
    let config = EtlConfig {
        data_dir,
        sink,
        workers: args.workers,
        repartition: args.repartition,
        partitions: args.partitions,
        batch_size: args.batch_size,
        titles_view: args.titles_view,
        people_view: args.people_view,
        ..EtlConfig::default()
    };

    info!("Starting run with {:?}", config);
    let orchestrator = EtlOrchestrator::new(config)
        .await
        .context("Failed to start session")?;
    let summary = orchestrator.run().await?;

    print_summary(&summary);
    Ok(())
}

/// Handle the 'inspect' command
fn handle_inspect(data_dir: PathBuf) -> Result<()> {
    let start = Instant::now();
    let tables = ImdbTables::load_from_dir(&data_dir)
        .with_context(|| format!("Failed to read datasets from {}", data_dir.display()))?;
    println!("{} Read dumps in {:?}", "✓".green(), start.elapsed());

    let counts = tables.counts();
    println!("{}", "Source tables:".bold().blue());
    println!("  titles:     {}", counts.titles);
    println!("  people:     {}", counts.names);
    println!("  episodes:   {}", counts.episodes);
    println!("  principals: {}", counts.principals);
    println!("  ratings:    {}", counts.ratings);

    let start = Instant::now();
    let collections = pipeline::build_collections(&tables);
    println!("{} Built collections in {:?}", "✓".green(), start.elapsed());

    let with_episodes = collections
        .tv_series
        .iter()
        .filter(|s| s.episodes.is_some())
        .count();
    println!("{}", "Collections:".bold().blue());
    println!("  movies:   {}", collections.movies.len());
    println!("  tvSeries: {} ({} with episodes)", collections.tv_series.len(), with_episodes);
    println!("  shorts:   {}", collections.shorts.len());
    println!("  people:   {}", collections.people.len());
    Ok(())
}

/// Helper function to format and print the outcome of a run
fn print_summary(summary: &RunSummary) {
    println!("{}", "Run summary:".bold().blue());
    for write in &summary.writes {
        println!(
            "{} {}: {} documents ({} partitions)",
            "•".green(),
            write.collection,
            write.documents,
            write.partitions
        );
    }
    for (stage, elapsed) in &summary.stage_timings {
        println!("{} {} took {:.2?}", "•".cyan(), stage, elapsed);
    }
    if summary.view_created {
        println!("{} titles view created", "✓".green());
    }
    if summary.people_view_created {
        println!("{} peopleWithTitles view created", "✓".green());
    }

    println!("{}", "Top genres by average movie rating:".bold().blue());
    for (rank, genre) in summary.genre_ratings.iter().take(10).enumerate() {
        let avg = genre
            .average_rating
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{}. {} - {} ({} movies)",
            (rank + 1).to_string().green(),
            genre.genre,
            avg,
            genre.total_titles
        );
    }
    println!("Total time: {:.2?}", summary.elapsed);
}
