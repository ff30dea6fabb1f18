//! Static configuration of a run.
//!
//! The defaults reproduce the job as it has always been run: dumps under
//! `Datasets/`, a local MongoDB, database `imdb`.

use std::fmt;
use std::path::PathBuf;

use store::redact_uri;

/// Where the collections go
#[derive(Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Mongo { uri: String, database: String },
    JsonLines { output_dir: PathBuf },
}

// Config gets logged, the URI may carry credentials
impl fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkConfig::Mongo { uri, database } => f
                .debug_struct("Mongo")
                .field("uri", &redact_uri(uri))
                .field("database", database)
                .finish(),
            SinkConfig::JsonLines { output_dir } => f
                .debug_struct("JsonLines")
                .field("output_dir", output_dir)
                .finish(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig::Mongo {
            uri: "mongodb://localhost:27017".to_string(),
            database: "imdb".to_string(),
        }
    }
}

/// Target collection names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub movies: String,
    pub tv_series: String,
    pub shorts: String,
    pub people: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            movies: "movies".to_string(),
            tv_series: "tvSeries".to_string(),
            shorts: "shorts".to_string(),
            people: "people".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlConfig {
    /// Directory holding the five `.tsv` dumps
    pub data_dir: PathBuf,
    pub sink: SinkConfig,
    pub collections: CollectionNames,
    /// Size of the compute thread pool. `None` uses every core.
    pub workers: Option<usize>,
    /// Split each collection into `partitions` concurrent writes
    pub repartition: bool,
    pub partitions: usize,
    /// Documents per insert request
    pub batch_size: usize,
    /// Recreate the unified `titles` view after writing
    pub titles_view: bool,
    /// Recreate the `peopleWithTitles` view after writing
    pub people_view: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Datasets"),
            sink: SinkConfig::default(),
            collections: CollectionNames::default(),
            workers: None,
            repartition: false,
            partitions: 200,
            batch_size: 10_000,
            titles_view: false,
            people_view: false,
        }
    }
}
