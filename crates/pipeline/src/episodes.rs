//! Embedding episode lists into TV series.
//!
//! title.episode only links an episode to its parent. Its own name, year
//! and runtime live in title.basics under the episode's tconst, and its
//! rating in title.ratings, so every episode row is joined to both before
//! being grouped under its parent series.

use crate::documents::{EpisodeDocument, EpisodeOrdering, SeriesDocument};
use crate::lookup::{RatingLookup, TitleLookup};
use data_loader::{Tconst, TitleEpisode};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// Episode lists keyed by parent series
pub type EpisodesBySeries = HashMap<Tconst, Vec<EpisodeDocument>>;

fn episode_document(row: &TitleEpisode, titles: &TitleLookup, ratings: &RatingLookup) -> EpisodeDocument {
    let meta = titles.get(&row.tconst);
    EpisodeDocument {
        title: meta.and_then(|t| t.primary_title.clone()),
        is_adult: meta.and_then(|t| t.is_adult),
        year: meta.and_then(|t| t.start_year),
        runtime: meta.and_then(|t| t.runtime_minutes),
        ordering: EpisodeOrdering {
            season: row.season_number,
            episode: row.episode_number,
        },
        rating: ratings.rating_for(&row.tconst),
    }
}

/// Season then episode, unknown positions first, then by title so the
/// result does not depend on input order
fn episode_order(a: &EpisodeDocument, b: &EpisodeDocument) -> Ordering {
    a.ordering
        .cmp(&b.ordering)
        .then_with(|| a.title.cmp(&b.title))
}

fn merge_groups(mut left: EpisodesBySeries, mut right: EpisodesBySeries) -> EpisodesBySeries {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (parent, mut list) in right {
        left.entry(parent).or_default().append(&mut list);
    }
    left
}

/// Build the ordered episode list of every parent referenced in title.episode.
///
/// Episodes without a parent reference are skipped.
pub fn group_episodes(
    episodes: &[TitleEpisode],
    titles: &TitleLookup,
    ratings: &RatingLookup,
) -> EpisodesBySeries {
    let mut grouped = episodes
        .par_iter()
        .filter_map(|row| row.parent_tconst.as_ref().map(|parent| (parent, row)))
        .fold(EpisodesBySeries::new, |mut acc, (parent, row)| {
            acc.entry(parent.clone())
                .or_default()
                .push(episode_document(row, titles, ratings));
            acc
        })
        .reduce(EpisodesBySeries::new, merge_groups);

    grouped
        .par_iter_mut()
        .for_each(|(_, list)| list.sort_by(episode_order));
    grouped
}

/// Attach episode lists to the TV series collection.
///
/// A series without episodes keeps `episodes = None`. Episode groups whose
/// parent is not in `series` are dropped.
pub fn add_episodes_to_tv_series(
    series: &mut [SeriesDocument],
    episodes: &[TitleEpisode],
    titles: &TitleLookup,
    ratings: &RatingLookup,
) {
    info!("Adding episode details to TV Series ...");

    let mut grouped = group_episodes(episodes, titles, ratings);
    let parents = grouped.len();

    let mut attached = 0usize;
    for doc in series.iter_mut() {
        doc.episodes = grouped.remove(&doc.tconst);
        if doc.episodes.is_some() {
            attached += 1;
        }
    }

    if !grouped.is_empty() {
        debug!(
            "{} of {} episode parents are not tv series, their episodes are dropped",
            grouped.len(),
            parents
        );
    }
    info!("Attached episodes to {} of {} tv series", attached, series.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{TitleBasics, TitleRating};

    fn episode(tconst: &str, parent: &str, season: Option<i32>, number: Option<i32>) -> TitleEpisode {
        TitleEpisode {
            tconst: tconst.to_string(),
            parent_tconst: Some(parent.to_string()),
            season_number: season,
            episode_number: number,
        }
    }

    fn episode_title(tconst: &str, name: &str) -> TitleBasics {
        TitleBasics {
            tconst: tconst.to_string(),
            title_type: Some("tvEpisode".to_string()),
            primary_title: Some(name.to_string()),
            original_title: None,
            is_adult: Some(0),
            start_year: Some(2010),
            end_year: None,
            runtime_minutes: Some(45),
            genres: None,
        }
    }

    #[test]
    fn test_group_sorted_by_season_then_episode() {
        let rows = vec![
            episode("e3", "s1", Some(2), Some(1)),
            episode("e2", "s1", Some(1), Some(2)),
            episode("e1", "s1", Some(1), Some(1)),
            episode("e0", "s1", None, None),
        ];
        let titles: Vec<TitleBasics> = Vec::new();
        let ratings: Vec<TitleRating> = Vec::new();

        let grouped = group_episodes(&rows, &TitleLookup::new(&titles), &RatingLookup::new(&ratings));
        let order: Vec<_> = grouped["s1"]
            .iter()
            .map(|e| (e.ordering.season, e.ordering.episode))
            .collect();

        assert_eq!(
            order,
            vec![(None, None), (Some(1), Some(1)), (Some(1), Some(2)), (Some(2), Some(1))]
        );
    }

    #[test]
    fn test_episode_metadata_and_rating_joined() {
        let rows = vec![episode("e1", "s1", Some(1), Some(1)), episode("e2", "s1", Some(1), Some(2))];
        let titles = vec![episode_title("e1", "Pilot")];
        let ratings = vec![TitleRating {
            tconst: "e1".to_string(),
            average_rating: Some(9.0),
            num_votes: Some(5000),
        }];

        let grouped = group_episodes(&rows, &TitleLookup::new(&titles), &RatingLookup::new(&ratings));
        let list = &grouped["s1"];

        assert_eq!(list[0].title.as_deref(), Some("Pilot"));
        assert_eq!(list[0].runtime, Some(45));
        assert_eq!(list[0].rating.num_votes, Some(5000));
        // no title row: metadata null, episode kept
        assert_eq!(list[1].title, None);
        assert_eq!(list[1].year, None);
        assert_eq!(list[1].rating.num_votes, None);
    }

    #[test]
    fn test_episode_without_parent_is_skipped() {
        let mut orphan = episode("e1", "x", Some(1), Some(1));
        orphan.parent_tconst = None;
        let titles: Vec<TitleBasics> = Vec::new();
        let ratings: Vec<TitleRating> = Vec::new();

        let grouped = group_episodes(&[orphan], &TitleLookup::new(&titles), &RatingLookup::new(&ratings));
        assert!(grouped.is_empty());
    }
}
