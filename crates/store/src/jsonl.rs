//! JSON Lines destination: one `<collection>.jsonl` file per collection.
//!
//! Useful to inspect a run without a database. Documents are written as
//! relaxed extended JSON, the same form `mongoexport` produces, so the files
//! can be loaded with `mongoimport` later.

use crate::error::{Result, WriteError};
use crate::writer::{CollectionWriter, WriteOptions, WriteSummary};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct JsonLinesWriter {
    output_dir: PathBuf,
}

impl JsonLinesWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// File a collection is written to
    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.output_dir.join(format!("{}.jsonl", collection))
    }
}

fn write_file(path: &Path, documents: Vec<Document>) -> Result<()> {
    // File::create truncates, which gives overwrite semantics
    let mut out = BufWriter::new(File::create(path)?);
    for document in documents {
        let value = Bson::Document(document).into_relaxed_extjson();
        serde_json::to_writer(&mut out, &value)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[async_trait]
impl CollectionWriter for JsonLinesWriter {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn write(
        &self,
        collection: &str,
        documents: Vec<Document>,
        options: &WriteOptions,
    ) -> Result<WriteSummary> {
        let path = self.path_for(collection);
        info!("Writing collection '{}' to {}", collection, path.display());
        if let Some(n) = options.repartition {
            debug!("Ignoring repartition {} for a single output file", n);
        }

        let count = documents.len();
        tokio::task::spawn_blocking(move || write_file(&path, documents))
            .await
            .map_err(|e| WriteError::write(collection, e))??;

        Ok(WriteSummary {
            collection: collection.to_string(),
            documents: count,
            partitions: 1,
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
