//! Loading the full set of IMDb tables from a dataset directory.
//!
//! The five files are independent, so they are parsed in parallel with
//! nested `rayon::join` calls.

use crate::error::Result;
use crate::parser::{self, FromRecord};
use crate::types::*;
use std::path::Path;
use tracing::info;

fn load<T: FromRecord>(data_dir: &Path) -> Result<Vec<T>> {
    let path = data_dir.join(T::SCHEMA.file_name);
    let rows = parser::parse_table::<T>(&path)?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

impl ImdbTables {
    /// Load every registered table from `data_dir`.
    ///
    /// Any missing or unreadable file fails the whole load.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Reading datasets from {:?}", data_dir);

        let ((titles, names), (episodes, (principals, ratings))) = rayon::join(
            || {
                rayon::join(
                    || load::<TitleBasics>(data_dir),
                    || load::<NameBasics>(data_dir),
                )
            },
            || {
                rayon::join(
                    || load::<TitleEpisode>(data_dir),
                    || {
                        rayon::join(
                            || load::<TitlePrincipal>(data_dir),
                            || load::<TitleRating>(data_dir),
                        )
                    },
                )
            },
        );

        let tables = ImdbTables {
            titles: titles?,
            names: names?,
            episodes: episodes?,
            principals: principals?,
            ratings: ratings?,
        };

        let counts = tables.counts();
        info!(
            "Loaded {} titles, {} people, {} episodes, {} principals, {} ratings",
            counts.titles, counts.names, counts.episodes, counts.principals, counts.ratings
        );
        Ok(tables)
    }
}
