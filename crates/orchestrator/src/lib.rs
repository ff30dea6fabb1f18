//! Orchestrator crate for the IMDb ETL job.
//!
//! This crate owns the compute session and sequences the pipeline stages
//! from reading the dumps to writing every collection.

pub mod config;
pub mod session;
pub mod orchestrator;

pub use config::{CollectionNames, EtlConfig, SinkConfig};
pub use orchestrator::{EtlOrchestrator, RunSummary};
pub use session::EtlSession;
