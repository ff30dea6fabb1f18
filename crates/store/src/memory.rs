//! In-process destination, for tests and dry runs.

use crate::error::{Result, WriteError};
use crate::writer::{CollectionWriter, PeopleView, TitlesView, WriteOptions, WriteSummary, partition};
use async_trait::async_trait;
use mongodb::bson::Document;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Keeps written collections in memory.
///
/// Can be told to fail on one collection, to exercise error paths.
#[derive(Default)]
pub struct MemoryWriter {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    summaries: Mutex<Vec<WriteSummary>>,
    views: Mutex<Vec<String>>,
    fail_on: Option<String>,
    closed: AtomicBool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose writes to `collection` fail
    pub fn failing_on(collection: &str) -> Self {
        Self {
            fail_on: Some(collection.to_string()),
            ..Self::default()
        }
    }

    /// Current contents of a collection
    pub fn collection(&self, name: &str) -> Option<Vec<Document>> {
        self.lock_collections().get(name).cloned()
    }

    /// Every write performed, in order
    pub fn summaries(&self) -> Vec<WriteSummary> {
        self.summaries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Names of the views created, in order
    pub fn views(&self) -> Vec<String> {
        self.views
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn record_view(&self, name: &str) {
        self.views
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(name.to_string());
    }

    fn lock_collections(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Document>>> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CollectionWriter for MemoryWriter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write(
        &self,
        collection: &str,
        documents: Vec<Document>,
        options: &WriteOptions,
    ) -> Result<WriteSummary> {
        if self.fail_on.as_deref() == Some(collection) {
            return Err(WriteError::write(collection, "injected failure"));
        }

        let count = documents.len();
        let (documents, partitions) = match options.repartition {
            None => (documents, 1),
            Some(n) => {
                let chunks = partition(documents, n);
                let used = chunks.len();
                (chunks.into_iter().flatten().collect(), used)
            }
        };
        self.lock_collections()
            .insert(collection.to_string(), documents);

        let summary = WriteSummary {
            collection: collection.to_string(),
            documents: count,
            partitions,
        };
        self.summaries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(summary.clone());
        Ok(summary)
    }

    async fn create_titles_view(&self, view: &TitlesView) -> Result<bool> {
        self.record_view(&view.name);
        Ok(true)
    }

    async fn create_people_view(&self, view: &PeopleView) -> Result<bool> {
        self.record_view(&view.name);
        Ok(true)
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
