//! Error types for the data-loader crate.
//!
//! Only problems that make a whole table unusable are errors. Bad values
//! inside a row are coerced to null by the parser instead.

use thiserror::Error;

/// Errors that can occur while reading the IMDb dumps
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file has no header row
    #[error("File {file} is empty, expected a header row")]
    EmptyFile { file: String },

    /// A column registered in the schema is absent from the header
    #[error("Column {column} not found in header of {file}")]
    MissingColumn { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
