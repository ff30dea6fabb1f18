//! Keyed views over the source tables, used as the build side of joins.
//!
//! Both lookups borrow the rows they index, so building one costs a hash
//! table of pointers and no copies of the data.

use crate::documents::RatingDocument;
use data_loader::{TitleBasics, TitleRating};
use rayon::prelude::*;
use std::collections::HashMap;

/// title.basics keyed by tconst
pub struct TitleLookup<'a> {
    by_id: HashMap<&'a str, &'a TitleBasics>,
}

impl<'a> TitleLookup<'a> {
    pub fn new(titles: &'a [TitleBasics]) -> Self {
        let by_id = titles
            .par_iter()
            .map(|t| (t.tconst.as_str(), t))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, tconst: &str) -> Option<&'a TitleBasics> {
        self.by_id.get(tconst).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// title.ratings keyed by tconst
pub struct RatingLookup<'a> {
    by_id: HashMap<&'a str, &'a TitleRating>,
}

impl<'a> RatingLookup<'a> {
    pub fn new(ratings: &'a [TitleRating]) -> Self {
        let by_id = ratings
            .par_iter()
            .map(|r| (r.tconst.as_str(), r))
            .collect();
        Self { by_id }
    }

    /// Rating sub-document for a title, null-filled when there is no row
    pub fn rating_for(&self, tconst: &str) -> RatingDocument {
        match self.by_id.get(tconst) {
            Some(r) => RatingDocument {
                num_votes: r.num_votes,
                average_rating: r.average_rating,
            },
            None => RatingDocument::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_for_missing_title_is_null_filled() {
        let ratings = vec![TitleRating {
            tconst: "tt1".to_string(),
            average_rating: Some(8.2),
            num_votes: Some(1200),
        }];
        let lookup = RatingLookup::new(&ratings);

        assert_eq!(
            lookup.rating_for("tt1"),
            RatingDocument {
                num_votes: Some(1200),
                average_rating: Some(8.2)
            }
        );
        assert_eq!(lookup.rating_for("tt2"), RatingDocument::default());
    }
}
