//! Output document shapes.
//!
//! Field names are the ones stored in the document database, hence the
//! serde renames. `None` serializes as an explicit null so every document of
//! a collection carries the same keys.

use data_loader::{Nconst, Tconst};
use serde::{Deserialize, Serialize};

/// Rating sub-document, embedded in titles and episodes.
///
/// Always present, with null fields when the title has no rating row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDocument {
    pub num_votes: Option<i32>,
    pub average_rating: Option<f64>,
}

/// A cast/crew member embedded in a title, ordered by `ordering`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub ordering: Option<i32>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub job: Option<String>,
    pub characters: Option<Vec<String>>,
    pub nconst: Option<Nconst>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub primary_profession: Option<Vec<String>>,
}

/// Movies and shorts. These only carry a start year, exposed as `year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDocument {
    pub tconst: Tconst,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub is_adult: Option<i32>,
    pub year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub people: Option<Vec<Participant>>,
    pub rating: RatingDocument,
}

/// Shorts share the movie shape
pub type ShortDocument = MovieDocument;

/// TV series, with their episodes embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDocument {
    pub tconst: Tconst,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub is_adult: Option<i32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub people: Option<Vec<Participant>>,
    pub rating: RatingDocument,
    pub episodes: Option<Vec<EpisodeDocument>>,
}

/// Position of an episode within its series.
///
/// The derived `Ord` compares season then episode, and `None` sorts before
/// any number, so episodes with an unknown position come first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeOrdering {
    #[serde(rename = "Season")]
    pub season: Option<i32>,
    #[serde(rename = "Episode")]
    pub episode: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDocument {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    pub is_adult: Option<i32>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub ordering: EpisodeOrdering,
    pub rating: RatingDocument,
}

/// A title a person is known for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub tconst: Tconst,
    pub title: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocument {
    pub nconst: Nconst,
    pub primary_name: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub primary_profession: Option<Vec<String>>,
    pub main_titles: Option<Vec<TitleSummary>>,
}
