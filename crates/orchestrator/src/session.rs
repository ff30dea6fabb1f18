//! The compute session: a rayon pool for the CPU stages plus the writer.
//!
//! Created once per run and stopped once, whatever the outcome of the run.

use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use crate::config::{EtlConfig, SinkConfig};
use store::{CollectionWriter, JsonLinesWriter, MongoWriter, WriteOptions};

pub struct EtlSession {
    pool: Arc<ThreadPool>,
    writer: Arc<dyn CollectionWriter>,
    write_options: WriteOptions,
}

impl EtlSession {
    /// Build the pool and open the writer described by `config.sink`.
    ///
    /// The pool comes first, so a failure there never leaves an open
    /// connection behind.
    pub async fn start(config: &EtlConfig) -> Result<Self> {
        let pool = build_pool(config)?;
        let writer: Arc<dyn CollectionWriter> = match &config.sink {
            SinkConfig::Mongo { uri, database } => Arc::new(
                MongoWriter::connect(uri, database)
                    .await
                    .context("Failed to connect to MongoDB")?,
            ),
            SinkConfig::JsonLines { output_dir } => Arc::new(
                JsonLinesWriter::new(output_dir)
                    .with_context(|| format!("Failed to create {}", output_dir.display()))?,
            ),
        };
        Ok(Self::assemble(config, pool, writer))
    }

    /// Build a session around an already opened writer
    pub fn with_writer(config: &EtlConfig, writer: Arc<dyn CollectionWriter>) -> Result<Self> {
        let pool = build_pool(config)?;
        Ok(Self::assemble(config, pool, writer))
    }

    fn assemble(config: &EtlConfig, pool: ThreadPool, writer: Arc<dyn CollectionWriter>) -> Self {
        let mut write_options = WriteOptions {
            repartition: None,
            batch_size: config.batch_size,
        };
        if config.repartition {
            write_options = write_options.with_repartition(config.partitions);
        }

        info!(
            "Started session: {} workers, writer {}",
            pool.current_num_threads(),
            writer.name()
        );
        Self {
            pool: Arc::new(pool),
            writer,
            write_options,
        }
    }

    /// Run CPU-bound work on the session pool without blocking the runtime.
    pub async fn compute<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || pool.install(work))
            .await
            .context("Compute task panicked")
    }

    pub fn writer(&self) -> &dyn CollectionWriter {
        self.writer.as_ref()
    }

    pub fn write_options(&self) -> &WriteOptions {
        &self.write_options
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Close the writer and release the pool.
    pub async fn stop(self) -> Result<()> {
        let closed = self.writer.close().await.context("Failed to close writer");
        drop(self.pool);
        info!("Session stopped.");
        closed
    }
}

fn build_pool(config: &EtlConfig) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("etl-worker-{}", i));
    if let Some(workers) = config.workers {
        builder = builder.num_threads(workers);
    }
    builder.build().context("Failed to build compute pool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_with_jsonl_sink() {
        let dir = tempfile::tempdir().unwrap();
        let config = EtlConfig {
            sink: SinkConfig::JsonLines {
                output_dir: dir.path().join("out"),
            },
            workers: Some(2),
            repartition: true,
            partitions: 8,
            ..EtlConfig::default()
        };

        let session = EtlSession::start(&config).await.unwrap();
        assert_eq!(session.workers(), 2);
        assert_eq!(session.writer().name(), "jsonl");
        assert_eq!(session.write_options().repartition, Some(8));
        assert!(dir.path().join("out").is_dir());

        let name = session
            .compute(|| std::thread::current().name().map(str::to_string))
            .await
            .unwrap();
        assert!(name.unwrap().starts_with("etl-worker-"));
        session.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_fails_on_unusable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let config = EtlConfig {
            sink: SinkConfig::JsonLines {
                output_dir: blocker.join("out"),
            },
            ..EtlConfig::default()
        };

        let err = EtlSession::start(&config).await.err().unwrap();
        assert!(format!("{:#}", err).contains("Failed to create"));
    }
}
