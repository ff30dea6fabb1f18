//! Average rating per genre over a title collection.
//!
//! Titles with null genres do not count toward any genre. Titles without a
//! rating count toward `total_titles` but not toward the average.

use crate::documents::MovieDocument;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct GenreRating {
    pub genre: String,
    /// `None` when no title of the genre has a rating
    pub average_rating: Option<f64>,
    pub total_titles: usize,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    rated: usize,
    total: usize,
}

/// Per-genre averages, highest average first, unrated genres last
pub fn genre_ratings(titles: &[MovieDocument]) -> Vec<GenreRating> {
    let mut by_genre: HashMap<&str, Accumulator> = HashMap::new();
    for title in titles {
        for genre in title.genres.iter().flatten() {
            let acc = by_genre.entry(genre.as_str()).or_default();
            acc.total += 1;
            if let Some(avg) = title.rating.average_rating {
                acc.sum += avg;
                acc.rated += 1;
            }
        }
    }

    let mut report: Vec<GenreRating> = by_genre
        .into_iter()
        .map(|(genre, acc)| GenreRating {
            genre: genre.to_string(),
            average_rating: (acc.rated > 0).then(|| acc.sum / acc.rated as f64),
            total_titles: acc.total,
        })
        .collect();

    report.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    report
}
