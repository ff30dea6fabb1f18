//! Reshaping the IMDb tables into document collections.
//!
//! This crate provides:
//! - Principal aggregation (cast/crew lists per title)
//! - The movie, TV series and short collections
//! - Episode lists embedded in TV series
//! - The people collection with resolved known-for titles
//!
//! ## Architecture
//! Every stage is an explicit batch join over borrowed rows:
//! 1. The smaller table becomes a keyed lookup (`lookup`)
//! 2. The larger table is scanned in parallel with rayon and probes it
//! 3. Group-bys fold into per-worker hash maps that are merged and sorted
//!
//! Joins are left joins: an unmatched key null-fills fields, it never drops
//! the left row.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::build_collections;
//!
//! let tables = data_loader::ImdbTables::load_from_dir(Path::new("Datasets"))?;
//! let collections = build_collections(&tables);
//! println!("{} movies", collections.movies.len());
//! ```

pub mod documents;
pub mod lists;
pub mod lookup;
pub mod principals;
pub mod titles;
pub mod episodes;
pub mod people;
pub mod report;

// Re-export main types
pub use documents::{
    EpisodeDocument, EpisodeOrdering, MovieDocument, Participant, PersonDocument, RatingDocument,
    SeriesDocument, ShortDocument, TitleSummary,
};
pub use episodes::add_episodes_to_tv_series;
pub use lookup::{RatingLookup, TitleLookup};
pub use people::process_people;
pub use principals::{PeopleByTitle, aggregate_principals};
pub use report::{GenreRating, genre_ratings};
pub use titles::{TitleCollections, TitleKind, prepare_title_collections};

use data_loader::ImdbTables;

/// Every output collection of one run
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub movies: Vec<MovieDocument>,
    pub tv_series: Vec<SeriesDocument>,
    pub shorts: Vec<ShortDocument>,
    pub people: Vec<PersonDocument>,
}

/// Run every stage over the loaded tables.
pub fn build_collections(tables: &ImdbTables) -> Collections {
    let titles = TitleLookup::new(&tables.titles);
    let ratings = RatingLookup::new(&tables.ratings);

    let people_by_title = aggregate_principals(&tables.principals, &tables.names);
    let TitleCollections {
        movies,
        mut tv_series,
        shorts,
    } = prepare_title_collections(&tables.titles, people_by_title, &ratings);
    add_episodes_to_tv_series(&mut tv_series, &tables.episodes, &titles, &ratings);
    let people = process_people(&tables.names, &titles);

    Collections {
        movies,
        tv_series,
        shorts,
        people,
    }
}
