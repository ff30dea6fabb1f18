//! Persistence of the output collections.
//!
//! This crate provides the `CollectionWriter` trait and three destinations:
//! - `MongoWriter`: the document database (overwrite mode)
//! - `JsonLinesWriter`: one JSON Lines file per collection
//! - `MemoryWriter`: in-process, for tests
//!
//! Documents are handed over as BSON. `to_documents` converts any
//! serializable type, keeping `None` fields as explicit nulls.

pub mod error;
pub mod writer;
pub mod mongo;
pub mod jsonl;
pub mod memory;

pub use error::{Result, WriteError};
pub use jsonl::JsonLinesWriter;
pub use memory::MemoryWriter;
pub use mongo::{MongoWriter, people_view_pipeline, redact_uri, titles_view_pipeline};
pub use writer::{
    CollectionWriter, PeopleView, TitlesView, WriteOptions, WriteSummary, partition, to_documents,
};

/// Re-exported so callers build documents with the same BSON version
pub use mongodb::bson;
