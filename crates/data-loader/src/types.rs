//! Typed rows for the IMDb source tables.
//!
//! One struct per registered table. Nullable columns are `Option`s, the key
//! column never is (rows without a key are dropped while parsing).

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// IMDb title identifier, e.g. "tt0111161"
pub type Tconst = String;

/// IMDb person identifier, e.g. "nm0000209"
pub type Nconst = String;

// =============================================================================
// Rows
// =============================================================================

/// A row of title.basics.tsv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleBasics {
    pub tconst: Tconst,
    /// Type tag such as "movie", "tvSeries", "short", "tvEpisode"
    pub title_type: Option<String>,
    pub primary_title: Option<String>,
    pub original_title: Option<String>,
    pub is_adult: Option<i32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    /// Comma separated, as found in the dump
    pub genres: Option<String>,
}

/// A row of name.basics.tsv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameBasics {
    pub nconst: Nconst,
    pub primary_name: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub primary_profession: Option<String>,
    pub known_for_titles: Option<String>,
}

/// A row of title.episode.tsv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleEpisode {
    pub tconst: Tconst,
    pub parent_tconst: Option<Tconst>,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
}

/// A row of title.principals.tsv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePrincipal {
    pub tconst: Tconst,
    pub ordering: Option<i32>,
    pub nconst: Option<Nconst>,
    pub category: Option<String>,
    pub job: Option<String>,
    /// JSON-ish list as found in the dump, e.g. `["Self"]`
    pub characters: Option<String>,
}

/// A row of title.ratings.tsv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRating {
    pub tconst: Tconst,
    pub average_rating: Option<f64>,
    pub num_votes: Option<i32>,
}

// =============================================================================
// ImdbTables - every source table, loaded
// =============================================================================

/// All five source tables held in memory.
///
/// Rows keep file order. Lookups by key are built by the pipeline stages
/// that need them, so this struct stays a plain bag of rows.
#[derive(Debug, Clone, Default)]
pub struct ImdbTables {
    pub titles: Vec<TitleBasics>,
    pub names: Vec<NameBasics>,
    pub episodes: Vec<TitleEpisode>,
    pub principals: Vec<TitlePrincipal>,
    pub ratings: Vec<TitleRating>,
}

/// Row counts per table, for logging and sanity checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub titles: usize,
    pub names: usize,
    pub episodes: usize,
    pub principals: usize,
    pub ratings: usize,
}

impl ImdbTables {
    /// Creates an empty set of tables
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            titles: self.titles.len(),
            names: self.names.len(),
            episodes: self.episodes.len(),
            principals: self.principals.len(),
            ratings: self.ratings.len(),
        }
    }
}
