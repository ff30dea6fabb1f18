//! The people collection.
//!
//! Each person's comma separated `knownForTitles` is resolved against
//! title.basics into `{tconst, title, year}` summaries. Unresolved ids keep
//! a summary with a null title and year. The summaries keep the order of
//! the source column, so the output is the same on every run.

use crate::documents::{PersonDocument, TitleSummary};
use crate::lists::split_list;
use crate::lookup::TitleLookup;
use data_loader::NameBasics;
use rayon::prelude::*;
use tracing::info;

fn title_summary(reference: &str, titles: &TitleLookup) -> TitleSummary {
    let tconst = reference.trim();
    let resolved = titles.get(tconst);
    TitleSummary {
        tconst: tconst.to_string(),
        title: resolved.and_then(|t| t.primary_title.clone()),
        year: resolved.and_then(|t| t.start_year),
    }
}

fn person_document(row: &NameBasics, titles: &TitleLookup) -> PersonDocument {
    let main_titles = row.known_for_titles.as_deref().map(|known_for| {
        known_for
            .split(',')
            .map(|reference| title_summary(reference, titles))
            .collect()
    });

    PersonDocument {
        nconst: row.nconst.clone(),
        primary_name: row.primary_name.clone(),
        birth_year: row.birth_year,
        death_year: row.death_year,
        primary_profession: split_list(row.primary_profession.as_deref()),
        main_titles,
    }
}

/// Build one document per row of name.basics, in file order.
pub fn process_people(names: &[NameBasics], titles: &TitleLookup) -> Vec<PersonDocument> {
    info!("Processing people and enriching with main titles ...");

    let people: Vec<PersonDocument> = names
        .par_iter()
        .map(|row| person_document(row, titles))
        .collect();

    info!("Processed {} people", people.len());
    people
}
