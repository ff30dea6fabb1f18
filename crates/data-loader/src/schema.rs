//! Static column layouts for the five IMDb source tables.
//!
//! The reader checks each file's header against these declarations and
//! resolves columns by name, so a dump with reordered columns still loads.

/// Field delimiter used by every IMDb dump
pub const DELIMITER: char = '\t';

/// Token IMDb writes in place of a missing value
pub const NULL_SENTINEL: &str = "\\N";

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Double,
}

/// One declared column
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

/// Layout of one source table
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Logical table name used in logs
    pub name: &'static str,
    /// File name inside the dataset directory
    pub file_name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSchema {
    /// Position of a column within the declaration, if it exists
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    /// Names of the columns that must never be null (row keys)
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().filter(|c| !c.nullable).map(|c| c.name)
    }
}

const fn col(name: &'static str, kind: ColumnKind, nullable: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        nullable,
    }
}

use ColumnKind::{Double, Integer, Text};

pub const TITLE_BASICS: TableSchema = TableSchema {
    name: "title_basics",
    file_name: "title.basics.tsv",
    columns: &[
        col("tconst", Text, false),
        col("titleType", Text, true),
        col("primaryTitle", Text, true),
        col("originalTitle", Text, true),
        col("isAdult", Integer, true),
        col("startYear", Integer, true),
        col("endYear", Integer, true),
        col("runtimeMinutes", Integer, true),
        col("genres", Text, true),
    ],
};

pub const NAME_BASICS: TableSchema = TableSchema {
    name: "name_basics",
    file_name: "name.basics.tsv",
    columns: &[
        col("nconst", Text, false),
        col("primaryName", Text, true),
        col("birthYear", Integer, true),
        col("deathYear", Integer, true),
        col("primaryProfession", Text, true),
        col("knownForTitles", Text, true),
    ],
};

pub const TITLE_EPISODE: TableSchema = TableSchema {
    name: "title_episode",
    file_name: "title.episode.tsv",
    columns: &[
        col("tconst", Text, false),
        col("parentTconst", Text, true),
        col("seasonNumber", Integer, true),
        col("episodeNumber", Integer, true),
    ],
};

pub const TITLE_PRINCIPALS: TableSchema = TableSchema {
    name: "title_principals",
    file_name: "title.principals.tsv",
    columns: &[
        col("tconst", Text, false),
        col("ordering", Integer, true),
        col("nconst", Text, true),
        col("category", Text, true),
        col("job", Text, true),
        col("characters", Text, true),
    ],
};

pub const TITLE_RATINGS: TableSchema = TableSchema {
    name: "title_ratings",
    file_name: "title.ratings.tsv",
    columns: &[
        col("tconst", Text, false),
        col("averageRating", Double, true),
        col("numVotes", Integer, true),
    ],
};

/// Every registered table, in load order
pub const ALL_TABLES: [TableSchema; 5] = [
    TITLE_BASICS,
    NAME_BASICS,
    TITLE_EPISODE,
    TITLE_PRINCIPALS,
    TITLE_RATINGS,
];
