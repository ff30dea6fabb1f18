//! # Data Loader Crate
//!
//! Reads the IMDb tab-separated dumps into typed, in-memory tables.
//!
//! ## Main Components
//!
//! - **schema**: Static column layouts of the five source tables
//! - **types**: Row structs and the `ImdbTables` container
//! - **parser**: TSV parsing with the `\N` null sentinel
//! - **index**: Parallel loading of a whole dataset directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ImdbTables;
//! use std::path::Path;
//!
//! let tables = ImdbTables::load_from_dir(Path::new("Datasets"))?;
//! println!("{} titles", tables.counts().titles);
//! ```

// Public modules
pub mod error;
pub mod schema;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use schema::{ColumnKind, ColumnSpec, TableSchema};
pub use types::{
    // Type aliases
    Tconst,
    Nconst,
    // Rows
    TitleBasics,
    NameBasics,
    TitleEpisode,
    TitlePrincipal,
    TitleRating,
    // Containers
    ImdbTables,
    TableCounts,
};
