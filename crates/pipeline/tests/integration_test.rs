//! Integration tests for the pipeline.
//!
//! These build every collection from a small hand-written dataset and check
//! the shape of the documents that would be stored.

use data_loader::{
    ImdbTables, NameBasics, TitleBasics, TitleEpisode, TitlePrincipal, TitleRating,
};
use pipeline::build_collections;
use serde_json::json;

fn title(tconst: &str, kind: &str, name: &str, genres: Option<&str>, start: i32) -> TitleBasics {
    TitleBasics {
        tconst: tconst.to_string(),
        title_type: Some(kind.to_string()),
        primary_title: Some(name.to_string()),
        original_title: Some(name.to_string()),
        is_adult: Some(0),
        start_year: Some(start),
        end_year: None,
        runtime_minutes: Some(30),
        genres: genres.map(str::to_string),
    }
}

fn episode(tconst: &str, parent: &str, season: i32, number: i32) -> TitleEpisode {
    TitleEpisode {
        tconst: tconst.to_string(),
        parent_tconst: Some(parent.to_string()),
        season_number: Some(season),
        episode_number: Some(number),
    }
}

fn principal(tconst: &str, ordering: i32, nconst: &str, category: &str) -> TitlePrincipal {
    TitlePrincipal {
        tconst: tconst.to_string(),
        ordering: Some(ordering),
        nconst: Some(nconst.to_string()),
        category: Some(category.to_string()),
        job: None,
        characters: None,
    }
}

fn create_test_tables() -> ImdbTables {
    let mut tables = ImdbTables::new();

    tables.titles = vec![
        title("tt001", "movie", "Foo", Some("Drama,Comedy"), 1999),
        title("tt002", "tvSeries", "Show", Some("Drama"), 2008),
        title("tt003", "short", "Tiny", None, 1910),
        title("tt004", "movie", "Bar", Some("Action"), 2010),
        title("tt005", "tvSeries", "Quiet", Some("Drama"), 2015),
        title("tt010", "tvEpisode", "Pilot", None, 2008),
        title("tt011", "tvEpisode", "Second", None, 2008),
        title("tt012", "tvEpisode", "Finale", None, 2009),
        title("tt020", "tvEpisode", "Orphan", None, 2009),
    ];

    tables.episodes = vec![
        episode("tt012", "tt002", 2, 1),
        episode("tt011", "tt002", 1, 2),
        episode("tt010", "tt002", 1, 1),
        // parent is a movie, never embedded
        episode("tt020", "tt004", 1, 1),
    ];

    tables.principals = vec![
        principal("tt004", 2, "nm002", "actress"),
        principal("tt004", 1, "nm001", "director"),
        principal("tt004", 3, "nm999", "actor"),
        principal("tt002", 1, "nm002", "actress"),
    ];

    tables.names = vec![
        NameBasics {
            nconst: "nm001".to_string(),
            primary_name: Some("Dee Rector".to_string()),
            birth_year: Some(1970),
            death_year: None,
            primary_profession: Some("director,writer".to_string()),
            known_for_titles: Some("tt004,tt404".to_string()),
        },
        NameBasics {
            nconst: "nm002".to_string(),
            primary_name: Some("Ann Actress".to_string()),
            birth_year: Some(1980),
            death_year: None,
            primary_profession: Some("actress".to_string()),
            known_for_titles: None,
        },
    ];

    tables.ratings = vec![
        TitleRating {
            tconst: "tt004".to_string(),
            average_rating: Some(7.1),
            num_votes: Some(1500),
        },
        TitleRating {
            tconst: "tt010".to_string(),
            average_rating: Some(8.4),
            num_votes: Some(300),
        },
    ];

    tables
}

#[test]
fn test_movie_without_principals_or_rating() {
    let collections = build_collections(&create_test_tables());

    let foo = collections
        .movies
        .iter()
        .find(|m| m.tconst == "tt001")
        .expect("tt001 should be a movie");
    let value = serde_json::to_value(foo).unwrap();

    assert_eq!(value["title"], json!("Foo"));
    assert_eq!(value["genres"], json!(["Drama", "Comedy"]));
    assert_eq!(value["year"], json!(1999));
    assert!(value.get("endYear").is_none());
    assert_eq!(value["people"], json!(null));
    assert_eq!(value["rating"], json!({"numVotes": null, "averageRating": null}));
}

#[test]
fn test_every_title_lands_once_in_its_collection() {
    let collections = build_collections(&create_test_tables());

    let movie_ids: Vec<_> = collections.movies.iter().map(|m| m.tconst.as_str()).collect();
    let series_ids: Vec<_> = collections.tv_series.iter().map(|s| s.tconst.as_str()).collect();
    let short_ids: Vec<_> = collections.shorts.iter().map(|s| s.tconst.as_str()).collect();

    assert_eq!(movie_ids, vec!["tt001", "tt004"]);
    assert_eq!(series_ids, vec!["tt002", "tt005"]);
    assert_eq!(short_ids, vec!["tt003"]);
}

#[test]
fn test_shorts_have_no_end_year() {
    let collections = build_collections(&create_test_tables());
    for short in &collections.shorts {
        let value = serde_json::to_value(short).unwrap();
        assert!(value.get("endYear").is_none());
        assert_eq!(value["genres"], json!(null));
    }
}

#[test]
fn test_participants_sorted_and_unknown_person_kept() {
    let collections = build_collections(&create_test_tables());
    let bar = collections.movies.iter().find(|m| m.tconst == "tt004").unwrap();
    let people = bar.people.as_ref().expect("tt004 has principals");

    let ranks: Vec<_> = people.iter().map(|p| p.ordering).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(people[0].name.as_deref(), Some("Dee Rector"));

    let unknown = &people[2];
    assert_eq!(unknown.nconst.as_deref(), Some("nm999"));
    assert_eq!(unknown.name, None);
    assert_eq!(unknown.primary_profession, None);

    assert_eq!(bar.rating.num_votes, Some(1500));
}

#[test]
fn test_series_episodes_ordered() {
    let collections = build_collections(&create_test_tables());
    let show = &collections.tv_series[0];
    let episodes = show.episodes.as_ref().expect("tt002 has episodes");

    assert_eq!(episodes.len(), 3);
    let positions: Vec<_> = episodes.iter().map(|e| e.ordering).collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));

    let first = serde_json::to_value(&episodes[0]).unwrap();
    assert_eq!(first["Title"], json!("Pilot"));
    assert_eq!(first["ordering"], json!({"Season": 1, "Episode": 1}));
    assert_eq!(first["rating"], json!({"numVotes": 300, "averageRating": 8.4}));

    let second = serde_json::to_value(&episodes[1]).unwrap();
    assert_eq!(second["ordering"], json!({"Season": 1, "Episode": 2}));
}

#[test]
fn test_series_without_episodes_and_orphan_episodes() {
    let collections = build_collections(&create_test_tables());

    let quiet = collections.tv_series.iter().find(|s| s.tconst == "tt005").unwrap();
    assert!(quiet.episodes.is_none());
    let value = serde_json::to_value(quiet).unwrap();
    assert_eq!(value["episodes"], json!(null));

    // tt020 points at a movie, so it lands in no series
    let embedded: Vec<_> = collections
        .tv_series
        .iter()
        .filter_map(|s| s.episodes.as_ref())
        .flatten()
        .filter_map(|e| e.title.as_deref())
        .collect();
    assert_eq!(embedded.len(), 3);
    assert!(!embedded.contains(&"Orphan"));
    assert!(collections.movies.iter().all(|m| serde_json::to_value(m).unwrap().get("episodes").is_none()));
}

#[test]
fn test_people_collection() {
    let collections = build_collections(&create_test_tables());
    assert_eq!(collections.people.len(), 2);

    let director = &collections.people[0];
    let value = serde_json::to_value(director).unwrap();
    assert_eq!(value["primaryProfession"], json!(["director", "writer"]));
    assert_eq!(
        value["mainTitles"],
        json!([
            {"tconst": "tt004", "title": "Bar", "year": 2010},
            {"tconst": "tt404", "title": null, "year": null}
        ])
    );

    assert_eq!(collections.people[1].main_titles, None);
}

#[test]
fn test_empty_tables() {
    let collections = build_collections(&ImdbTables::new());
    assert!(collections.movies.is_empty());
    assert!(collections.tv_series.is_empty());
    assert!(collections.shorts.is_empty());
    assert!(collections.people.is_empty());
}
