//! Cast and crew aggregation.
//!
//! Every principal row is left-joined to name.basics, then the rows are
//! grouped by title into a participant list sorted by `ordering`.
//!
//! The people table is the broadcast side: one shared lookup is built and
//! probed from every rayon worker, while the much larger principals table is
//! split across workers and folded into per-worker groups.

use crate::documents::Participant;
use crate::lists::{parse_characters, split_list};
use data_loader::{NameBasics, Tconst, TitlePrincipal};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// Participant lists keyed by title
pub type PeopleByTitle = HashMap<Tconst, Vec<Participant>>;

fn to_participant(row: &TitlePrincipal, person: Option<&NameBasics>) -> Participant {
    Participant {
        ordering: row.ordering,
        name: person.and_then(|p| p.primary_name.clone()),
        category: row.category.clone(),
        job: row.job.clone(),
        characters: parse_characters(row.characters.as_deref()),
        nconst: row.nconst.clone(),
        birth_year: person.and_then(|p| p.birth_year),
        death_year: person.and_then(|p| p.death_year),
        primary_profession: person.and_then(|p| split_list(p.primary_profession.as_deref())),
    }
}

/// Rank ascending with unknown ranks first, ties broken by person id
fn participant_order(a: &Participant, b: &Participant) -> Ordering {
    a.ordering
        .cmp(&b.ordering)
        .then_with(|| a.nconst.cmp(&b.nconst))
}

fn merge_groups(mut left: PeopleByTitle, mut right: PeopleByTitle) -> PeopleByTitle {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (tconst, mut list) in right {
        left.entry(tconst).or_default().append(&mut list);
    }
    left
}

/// Build the sorted participant list of every title that has principals.
///
/// Titles without any principal row are absent from the result; a principal
/// whose person is unknown is kept with null person fields.
pub fn aggregate_principals(principals: &[TitlePrincipal], names: &[NameBasics]) -> PeopleByTitle {
    info!("Processing principals and joining with people data ...");

    let people: HashMap<&str, &NameBasics> = names
        .par_iter()
        .map(|n| (n.nconst.as_str(), n))
        .collect();

    let misses = principals
        .par_iter()
        .filter(|row| {
            row.nconst
                .as_deref()
                .is_none_or(|n| !people.contains_key(n))
        })
        .count();
    if misses > 0 {
        debug!("{} principal rows have no matching person", misses);
    }

    let mut grouped = principals
        .par_iter()
        .fold(PeopleByTitle::new, |mut acc, row| {
            let person = row.nconst.as_deref().and_then(|n| people.get(n).copied());
            acc.entry(row.tconst.clone())
                .or_default()
                .push(to_participant(row, person));
            acc
        })
        .reduce(PeopleByTitle::new, merge_groups);

    grouped
        .par_iter_mut()
        .for_each(|(_, list)| list.sort_by(participant_order));

    info!("Aggregated principals for {} titles", grouped.len());
    grouped
}
