//! Parser for the IMDb tab-separated dumps.
//!
//! Every file starts with a header row. Fields are separated by a tab and a
//! missing value is written as `\N`. IMDb does not quote fields, so a plain
//! split on the delimiter is exact.
//!
//! Parsing is permissive: a value that does not coerce to its declared type
//! becomes `None`, a short row null-fills its trailing columns, and only a
//! row without its key column is dropped.

use crate::error::{DataLoadError, Result};
use crate::schema::{self, TableSchema};
use crate::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, warn};

/// One data line, with fields addressed by their schema position.
pub struct Record<'a> {
    fields: Vec<&'a str>,
    /// positions[i] is the file column holding schema column i
    positions: &'a [usize],
}

impl<'a> Record<'a> {
    fn raw(&self, column: usize) -> Option<&'a str> {
        let field = *self.fields.get(*self.positions.get(column)?)?;
        if field == schema::NULL_SENTINEL {
            None
        } else {
            Some(field)
        }
    }

    /// Text value, `None` for the null sentinel or a missing field
    pub fn text(&self, column: usize) -> Option<String> {
        self.raw(column).map(str::to_string)
    }

    /// Integer value, `None` if absent or not a valid integer
    pub fn int(&self, column: usize) -> Option<i32> {
        self.raw(column)?.trim().parse().ok()
    }

    /// Floating point value, `None` if absent or not a valid number
    pub fn double(&self, column: usize) -> Option<f64> {
        self.raw(column)?.trim().parse().ok()
    }
}

/// A row type that can be built from a [`Record`] of its registered table.
pub trait FromRecord: Sized {
    /// Layout the file must follow
    const SCHEMA: TableSchema;

    /// Build the row. Returns `None` when the key column is null.
    fn from_record(record: &Record<'_>) -> Option<Self>;
}

impl FromRecord for TitleBasics {
    const SCHEMA: TableSchema = schema::TITLE_BASICS;

    fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(TitleBasics {
            tconst: r.text(0)?,
            title_type: r.text(1),
            primary_title: r.text(2),
            original_title: r.text(3),
            is_adult: r.int(4),
            start_year: r.int(5),
            end_year: r.int(6),
            runtime_minutes: r.int(7),
            genres: r.text(8),
        })
    }
}

impl FromRecord for NameBasics {
    const SCHEMA: TableSchema = schema::NAME_BASICS;

    fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(NameBasics {
            nconst: r.text(0)?,
            primary_name: r.text(1),
            birth_year: r.int(2),
            death_year: r.int(3),
            primary_profession: r.text(4),
            known_for_titles: r.text(5),
        })
    }
}

impl FromRecord for TitleEpisode {
    const SCHEMA: TableSchema = schema::TITLE_EPISODE;

    fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(TitleEpisode {
            tconst: r.text(0)?,
            parent_tconst: r.text(1),
            season_number: r.int(2),
            episode_number: r.int(3),
        })
    }
}

impl FromRecord for TitlePrincipal {
    const SCHEMA: TableSchema = schema::TITLE_PRINCIPALS;

    fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(TitlePrincipal {
            tconst: r.text(0)?,
            ordering: r.int(1),
            nconst: r.text(2),
            category: r.text(3),
            job: r.text(4),
            characters: r.text(5),
        })
    }
}

impl FromRecord for TitleRating {
    const SCHEMA: TableSchema = schema::TITLE_RATINGS;

    fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(TitleRating {
            tconst: r.text(0)?,
            average_rating: r.double(1),
            num_votes: r.int(2),
        })
    }
}

/// Map each schema column to its position in the header line
fn resolve_header(header: &str, table: &TableSchema) -> Result<Vec<usize>> {
    let names: Vec<&str> = header.split(schema::DELIMITER).map(str::trim).collect();
    table
        .columns
        .iter()
        .map(|column| {
            names
                .iter()
                .position(|name| *name == column.name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    file: table.file_name.to_string(),
                    column: column.name.to_string(),
                })
        })
        .collect()
}

/// Read one line into `buf`, dropping the line terminator.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the load.
fn next_line<R: BufRead>(reader: &mut R, bytes: &mut Vec<u8>, buf: &mut String) -> Result<bool> {
    bytes.clear();
    buf.clear();
    if reader.read_until(b'\n', bytes)? == 0 {
        return Ok(false);
    }
    while matches!(bytes.last(), Some(b'\n') | Some(b'\r')) {
        bytes.pop();
    }
    buf.push_str(&String::from_utf8_lossy(bytes));
    Ok(true)
}

/// Parse a whole table from any buffered reader.
pub fn parse_reader<T: FromRecord, R: BufRead>(mut reader: R) -> Result<Vec<T>> {
    let table = T::SCHEMA;
    let mut bytes = Vec::new();
    let mut line = String::new();

    if !next_line(&mut reader, &mut bytes, &mut line)? {
        return Err(DataLoadError::EmptyFile {
            file: table.file_name.to_string(),
        });
    }
    let positions = resolve_header(&line, &table)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    while next_line(&mut reader, &mut bytes, &mut line)? {
        if line.is_empty() {
            continue;
        }
        let record = Record {
            fields: line.split(schema::DELIMITER).collect(),
            positions: &positions,
        };
        match T::from_record(&record) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} rows without a key from {}",
            dropped, table.file_name
        );
    }
    debug!("Parsed {} rows from {}", rows.len(), table.file_name);
    Ok(rows)
}

/// Parse a table file from disk.
pub fn parse_table<T: FromRecord>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    // Dumps are hundreds of MB, a larger buffer cuts read syscalls
    parse_reader(BufReader::with_capacity(1 << 20, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_titles_with_null_sentinel() {
        let data = "tconst\ttitleType\tprimaryTitle\toriginalTitle\tisAdult\tstartYear\tendYear\truntimeMinutes\tgenres\n\
                    tt0000001\tshort\tCarmencita\tCarmencita\t0\t1894\t\\N\t1\tDocumentary,Short\n";
        let titles: Vec<TitleBasics> = parse_reader(Cursor::new(data)).unwrap();

        assert_eq!(titles.len(), 1);
        let t = &titles[0];
        assert_eq!(t.tconst, "tt0000001");
        assert_eq!(t.title_type.as_deref(), Some("short"));
        assert_eq!(t.is_adult, Some(0));
        assert_eq!(t.start_year, Some(1894));
        assert_eq!(t.end_year, None);
        assert_eq!(t.genres.as_deref(), Some("Documentary,Short"));
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let data = "numVotes\ttconst\taverageRating\n42\ttt1\t7.5\n";
        let ratings: Vec<TitleRating> = parse_reader(Cursor::new(data)).unwrap();

        assert_eq!(ratings[0].tconst, "tt1");
        assert_eq!(ratings[0].num_votes, Some(42));
        assert_eq!(ratings[0].average_rating, Some(7.5));
    }

    #[test]
    fn test_bad_values_become_null() {
        let data = "tconst\taverageRating\tnumVotes\r\ntt1\tabc\t12x\r\ntt2\t8.1\r\n";
        let ratings: Vec<TitleRating> = parse_reader(Cursor::new(data)).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].average_rating, None);
        assert_eq!(ratings[0].num_votes, None);
        // short row: trailing column null-filled
        assert_eq!(ratings[1].average_rating, Some(8.1));
        assert_eq!(ratings[1].num_votes, None);
    }

    #[test]
    fn test_rows_without_key_are_dropped() {
        let data = "tconst\tparentTconst\tseasonNumber\tepisodeNumber\n\\N\ttt1\t1\t1\ntt2\ttt1\t1\t2\n\n";
        let episodes: Vec<TitleEpisode> = parse_reader(Cursor::new(data)).unwrap();

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].tconst, "tt2");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut data = b"tconst\tprimaryName\tbirthYear\tdeathYear\tprimaryProfession\tknownForTitles\n".to_vec();
        data.extend_from_slice(b"nm1\tBj\xF6rk\t1965\t\\N\tsoundtrack\ttt1\n");
        let names: Vec<NameBasics> = parse_reader(Cursor::new(data)).unwrap();

        assert_eq!(names.len(), 1);
        assert_eq!(names[0].primary_name.as_deref(), Some("Bj\u{FFFD}rk"));
        assert_eq!(names[0].birth_year, Some(1965));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "tconst\taverageRating\n";
        let err = parse_reader::<TitleRating, _>(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "numVotes"));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = parse_reader::<TitleRating, _>(Cursor::new("")).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyFile { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_table::<TitleRating>(Path::new("/definitely/not/here.tsv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
