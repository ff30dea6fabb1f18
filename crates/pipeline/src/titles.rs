//! Splitting title.basics into the movie, TV series and short collections.

use crate::documents::{MovieDocument, SeriesDocument};
use crate::lists::split_list;
use crate::lookup::RatingLookup;
use crate::principals::PeopleByTitle;
use data_loader::TitleBasics;
use tracing::info;

/// Title types that get their own collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleKind {
    Movie,
    TvSeries,
    Short,
}

impl TitleKind {
    /// Parse the `titleType` tag of title.basics. Other types are ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(TitleKind::Movie),
            "tvSeries" => Some(TitleKind::TvSeries),
            "short" => Some(TitleKind::Short),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::TvSeries => "tvSeries",
            TitleKind::Short => "short",
        }
    }
}

/// The three title collections, before episodes are attached
#[derive(Debug, Clone, Default)]
pub struct TitleCollections {
    pub movies: Vec<MovieDocument>,
    pub tv_series: Vec<SeriesDocument>,
    pub shorts: Vec<MovieDocument>,
}

fn movie_document(title: &TitleBasics, people: &mut PeopleByTitle, ratings: &RatingLookup) -> MovieDocument {
    MovieDocument {
        tconst: title.tconst.clone(),
        title: title.primary_title.clone(),
        original_title: title.original_title.clone(),
        is_adult: title.is_adult,
        year: title.start_year,
        runtime_minutes: title.runtime_minutes,
        genres: split_list(title.genres.as_deref()),
        people: people.remove(&title.tconst),
        rating: ratings.rating_for(&title.tconst),
    }
}

fn series_document(title: &TitleBasics, people: &mut PeopleByTitle, ratings: &RatingLookup) -> SeriesDocument {
    SeriesDocument {
        tconst: title.tconst.clone(),
        title: title.primary_title.clone(),
        original_title: title.original_title.clone(),
        is_adult: title.is_adult,
        start_year: title.start_year,
        end_year: title.end_year,
        runtime_minutes: title.runtime_minutes,
        genres: split_list(title.genres.as_deref()),
        people: people.remove(&title.tconst),
        rating: ratings.rating_for(&title.tconst),
        episodes: None,
    }
}

/// Partition titles by type and attach participants and ratings.
///
/// Consumes the aggregated participants: each list is moved into the
/// document of its title. Participants of titles outside the three kinds
/// are discarded with the map.
pub fn prepare_title_collections(
    titles: &[TitleBasics],
    mut people: PeopleByTitle,
    ratings: &RatingLookup,
) -> TitleCollections {
    info!("Preparing title collections ...");

    let mut collections = TitleCollections::default();
    for title in titles {
        let Some(kind) = title.title_type.as_deref().and_then(TitleKind::from_tag) else {
            continue;
        };
        match kind {
            TitleKind::Movie => collections
                .movies
                .push(movie_document(title, &mut people, ratings)),
            TitleKind::TvSeries => collections
                .tv_series
                .push(series_document(title, &mut people, ratings)),
            TitleKind::Short => collections
                .shorts
                .push(movie_document(title, &mut people, ratings)),
        }
    }

    info!(
        "Prepared {} movies, {} tv series, {} shorts",
        collections.movies.len(),
        collections.tv_series.len(),
        collections.shorts.len()
    );
    collections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{Participant, RatingDocument};
    use data_loader::TitleRating;

    fn title(tconst: &str, kind: &str) -> TitleBasics {
        TitleBasics {
            tconst: tconst.to_string(),
            title_type: Some(kind.to_string()),
            primary_title: Some(format!("Title {}", tconst)),
            original_title: None,
            is_adult: Some(0),
            start_year: Some(2001),
            end_year: Some(2005),
            runtime_minutes: Some(42),
            genres: Some("Drama,Comedy".to_string()),
        }
    }

    #[test]
    fn test_title_kind_tags() {
        for kind in [TitleKind::Movie, TitleKind::TvSeries, TitleKind::Short] {
            assert_eq!(TitleKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(TitleKind::from_tag("tvEpisode"), None);
    }

    #[test]
    fn test_partition_by_type() {
        let titles = vec![
            title("tt1", "movie"),
            title("tt2", "tvSeries"),
            title("tt3", "short"),
            title("tt4", "tvEpisode"),
            TitleBasics {
                title_type: None,
                ..title("tt5", "movie")
            },
        ];
        let ratings: Vec<TitleRating> = Vec::new();
        let collections =
            prepare_title_collections(&titles, PeopleByTitle::new(), &RatingLookup::new(&ratings));

        assert_eq!(collections.movies.len(), 1);
        assert_eq!(collections.tv_series.len(), 1);
        assert_eq!(collections.shorts.len(), 1);

        let series = &collections.tv_series[0];
        assert_eq!(series.start_year, Some(2001));
        assert_eq!(series.end_year, Some(2005));
        assert_eq!(series.episodes, None);

        let movie = &collections.movies[0];
        assert_eq!(movie.year, Some(2001));
        assert_eq!(movie.title.as_deref(), Some("Title tt1"));
        assert_eq!(movie.is_adult, Some(0));
        assert_eq!(
            movie.genres,
            Some(vec!["Drama".to_string(), "Comedy".to_string()])
        );
    }

    #[test]
    fn test_people_and_rating_attached() {
        let titles = vec![title("tt1", "movie"), title("tt2", "movie")];
        let ratings = vec![TitleRating {
            tconst: "tt1".to_string(),
            average_rating: Some(6.5),
            num_votes: Some(99),
        }];
        let mut people = PeopleByTitle::new();
        people.insert(
            "tt1".to_string(),
            vec![Participant {
                ordering: Some(1),
                name: Some("Ann".to_string()),
                category: Some("director".to_string()),
                job: None,
                characters: None,
                nconst: Some("nm1".to_string()),
                birth_year: None,
                death_year: None,
                primary_profession: None,
            }],
        );

        let collections = prepare_title_collections(&titles, people, &RatingLookup::new(&ratings));
        let (tt1, tt2) = (&collections.movies[0], &collections.movies[1]);

        assert_eq!(tt1.people.as_ref().map(Vec::len), Some(1));
        assert_eq!(tt1.rating.average_rating, Some(6.5));
        assert_eq!(tt2.people, None);
        assert_eq!(tt2.rating, RatingDocument::default());
    }
}
