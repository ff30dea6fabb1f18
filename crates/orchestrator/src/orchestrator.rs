//! # ETL Orchestrator
//!
//! Sequences one run of the job:
//! 1. Read the five IMDb dumps
//! 2. Aggregate principals per title
//! 3. Build the movie, TV series and short collections
//! 4. Embed episodes into TV series
//! 5. Write movies, tvSeries, shorts
//! 6. Build and write the people collection
//! 7. Optionally recreate the `titles` and `peopleWithTitles` views
//!
//! The session is stopped on every exit path. If the run failed, that error
//! is returned after teardown; nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::EtlConfig;
use crate::session::EtlSession;
use data_loader::{ImdbTables, TableCounts};
use pipeline::{
    GenreRating, RatingLookup, TitleCollections, TitleLookup, add_episodes_to_tv_series,
    aggregate_principals, genre_ratings, prepare_title_collections, process_people,
};
use store::{CollectionWriter, PeopleView, TitlesView, WriteSummary, to_documents};

/// What a successful run did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub tables: TableCounts,
    pub writes: Vec<WriteSummary>,
    /// Average movie rating per genre
    pub genre_ratings: Vec<GenreRating>,
    pub stage_timings: Vec<(&'static str, Duration)>,
    pub view_created: bool,
    pub people_view_created: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, stage: &'static str, started: Instant) {
        let elapsed = started.elapsed();
        info!("Stage {} finished in {:.2?}", stage, elapsed);
        self.stage_timings.push((stage, elapsed));
    }

    /// Documents written to a collection, if it was written
    pub fn documents_in(&self, collection: &str) -> Option<usize> {
        self.writes
            .iter()
            .find(|w| w.collection == collection)
            .map(|w| w.documents)
    }
}

pub struct EtlOrchestrator {
    config: EtlConfig,
    session: EtlSession,
}

impl EtlOrchestrator {
    /// Start a session for `config`, connecting to its sink
    pub async fn new(config: EtlConfig) -> Result<Self> {
        let session = EtlSession::start(&config).await?;
        Ok(Self { config, session })
    }

    /// Use a caller-provided writer instead of the configured sink
    pub fn with_writer(config: EtlConfig, writer: Arc<dyn CollectionWriter>) -> Result<Self> {
        let session = EtlSession::with_writer(&config, writer)?;
        Ok(Self { config, session })
    }

    /// Run the whole job, then stop the session.
    pub async fn run(self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let outcome = self.run_pipeline().await;

        let EtlOrchestrator { session, .. } = self;
        let stopped = session.stop().await;

        match (outcome, stopped) {
            (Ok(mut summary), Ok(())) => {
                summary.elapsed = start_time.elapsed();
                info!("Run finished in {:.2?}", summary.elapsed);
                Ok(summary)
            }
            (Ok(_), Err(stop_err)) => Err(stop_err),
            (Err(run_err), stopped) => {
                if let Err(stop_err) = stopped {
                    error!("Session teardown also failed: {:#}", stop_err);
                }
                Err(run_err)
            }
        }
    }

    async fn run_pipeline(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let names = self.config.collections.clone();

        let started = Instant::now();
        let tables = self.read_datasets().await?;
        summary.tables = tables.counts();
        summary.record("read_datasets", started);

        let started = Instant::now();
        let TitleCollections {
            movies,
            tv_series,
            shorts,
        } = self.prepare_titles(tables.clone()).await?;
        summary.record("prepare_titles", started);

        let (movies, report) = self
            .session
            .compute(move || {
                let report = genre_ratings(&movies);
                (movies, report)
            })
            .await?;
        log_genre_ratings(&report);
        summary.genre_ratings = report;

        let started = Instant::now();
        summary.writes.push(self.write_collection(&names.movies, movies).await?);
        summary.writes.push(self.write_collection(&names.tv_series, tv_series).await?);
        summary.writes.push(self.write_collection(&names.shorts, shorts).await?);
        summary.record("write_titles", started);

        let started = Instant::now();
        let people = self.process_people(tables).await?;
        summary.writes.push(self.write_collection(&names.people, people).await?);
        summary.record("people", started);

        if self.config.titles_view {
            summary.view_created = self.create_titles_view().await?;
        }
        if self.config.people_view {
            summary.people_view_created = self.create_people_view().await?;
        }
        Ok(summary)
    }

    async fn read_datasets(&self) -> Result<Arc<ImdbTables>> {
        let data_dir: PathBuf = self.config.data_dir.clone();
        let tables = self
            .session
            .compute(move || ImdbTables::load_from_dir(&data_dir))
            .await?
            .with_context(|| format!("Failed to read datasets from {}", self.config.data_dir.display()))?;
        Ok(Arc::new(tables))
    }

    /// Principals, title collections and episodes, on the compute pool
    async fn prepare_titles(&self, tables: Arc<ImdbTables>) -> Result<TitleCollections> {
        self.session
            .compute(move || {
                let ratings = RatingLookup::new(&tables.ratings);
                let people = aggregate_principals(&tables.principals, &tables.names);
                let mut collections = prepare_title_collections(&tables.titles, people, &ratings);

                let titles = TitleLookup::new(&tables.titles);
                add_episodes_to_tv_series(&mut collections.tv_series, &tables.episodes, &titles, &ratings);
                collections
            })
            .await
    }

    async fn process_people(&self, tables: Arc<ImdbTables>) -> Result<Vec<pipeline::PersonDocument>> {
        self.session
            .compute(move || {
                let titles = TitleLookup::new(&tables.titles);
                process_people(&tables.names, &titles)
            })
            .await
    }

    /// Convert on the pool, then hand the documents to the writer
    async fn write_collection<T>(&self, collection: &str, items: Vec<T>) -> Result<WriteSummary>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let documents = self
            .session
            .compute(move || to_documents(&items))
            .await?
            .with_context(|| format!("Failed to convert collection {}", collection))?;

        self.session
            .writer()
            .write(collection, documents, self.session.write_options())
            .await
            .with_context(|| format!("Failed to write collection {}", collection))
    }

    async fn create_titles_view(&self) -> Result<bool> {
        let names = &self.config.collections;
        let view = TitlesView {
            name: "titles".to_string(),
            series: names.tv_series.clone(),
            shorts: names.shorts.clone(),
            movies: names.movies.clone(),
        };
        let created = self
            .session
            .writer()
            .create_titles_view(&view)
            .await
            .context("Failed to create titles view")?;
        if !created {
            self.warn_view_skipped(&view.name);
        }
        Ok(created)
    }

    async fn create_people_view(&self) -> Result<bool> {
        let names = &self.config.collections;
        let view = PeopleView {
            name: "peopleWithTitles".to_string(),
            people: names.people.clone(),
            movies: names.movies.clone(),
            series: names.tv_series.clone(),
            shorts: names.shorts.clone(),
        };
        let created = self
            .session
            .writer()
            .create_people_view(&view)
            .await
            .context("Failed to create people view")?;
        if !created {
            self.warn_view_skipped(&view.name);
        }
        Ok(created)
    }

    fn warn_view_skipped(&self, view: &str) {
        warn!(
            "Writer {} does not support views, skipping '{}'",
            self.session.writer().name(),
            view
        );
    }
}

fn log_genre_ratings(report: &[GenreRating]) {
    for row in report {
        match row.average_rating {
            Some(avg) => info!("Genre {}: average rating {:.2} over {} movies", row.genre, avg, row.total_titles),
            None => info!("Genre {}: unrated, {} movies", row.genre, row.total_titles),
        }
    }
}
