//! The `CollectionWriter` trait and what every implementation shares.

use crate::error::Result;
use async_trait::async_trait;
use mongodb::bson::{self, Document};
use rayon::prelude::*;
use serde::Serialize;

/// How a collection is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Split the documents into this many partitions written concurrently.
    /// `None` writes sequentially.
    pub repartition: Option<usize>,
    /// Documents per insert request
    pub batch_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            repartition: None,
            batch_size: 10_000,
        }
    }
}

impl WriteOptions {
    pub fn with_repartition(mut self, partitions: usize) -> Self {
        self.repartition = Some(partitions);
        self
    }
}

/// Outcome of one collection write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub collection: String,
    pub documents: usize,
    pub partitions: usize,
}

/// Names of the unified read-only `titles` view and its sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlesView {
    pub name: String,
    pub series: String,
    pub shorts: String,
    pub movies: String,
}

impl Default for TitlesView {
    fn default() -> Self {
        Self {
            name: "titles".to_string(),
            series: "tvSeries".to_string(),
            shorts: "shorts".to_string(),
            movies: "movies".to_string(),
        }
    }
}

/// Names of the `peopleWithTitles` view and the collections it joins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleView {
    pub name: String,
    pub people: String,
    pub movies: String,
    pub series: String,
    pub shorts: String,
}

impl Default for PeopleView {
    fn default() -> Self {
        Self {
            name: "peopleWithTitles".to_string(),
            people: "people".to_string(),
            movies: "movies".to_string(),
            series: "tvSeries".to_string(),
            shorts: "shorts".to_string(),
        }
    }
}

/// Destination for the output collections.
///
/// Writes replace the whole target: whatever the collection held before is
/// gone afterwards, nothing is merged or upserted.
#[async_trait]
pub trait CollectionWriter: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Replace `collection` with `documents`.
    async fn write(
        &self,
        collection: &str,
        documents: Vec<Document>,
        options: &WriteOptions,
    ) -> Result<WriteSummary>;

    /// (Re)create the unified titles view.
    ///
    /// Returns `false` when the destination has no notion of views.
    async fn create_titles_view(&self, _view: &TitlesView) -> Result<bool> {
        Ok(false)
    }

    /// (Re)create the view listing every title a person takes part in.
    ///
    /// Returns `false` when the destination has no notion of views.
    async fn create_people_view(&self, _view: &PeopleView) -> Result<bool> {
        Ok(false)
    }

    /// Release connections and flush buffers. Called once, on every exit path.
    async fn close(&self) -> Result<()>;
}

/// Convert typed documents into BSON, in parallel.
pub fn to_documents<T: Serialize + Sync>(items: &[T]) -> Result<Vec<Document>> {
    let documents = items
        .par_iter()
        .map(bson::to_document)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(documents)
}

/// Distribute documents round-robin over `partitions` chunks.
///
/// Empty chunks are left out, so fewer documents than partitions gives one
/// chunk per document.
pub fn partition(documents: Vec<Document>, partitions: usize) -> Vec<Vec<Document>> {
    let partitions = partitions.max(1).min(documents.len().max(1));
    let mut chunks: Vec<Vec<Document>> = (0..partitions)
        .map(|_| Vec::with_capacity(documents.len() / partitions + 1))
        .collect();
    for (i, document) in documents.into_iter().enumerate() {
        chunks[i % partitions].push(document);
    }
    chunks.retain(|chunk| !chunk.is_empty());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{Bson, doc};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Rating {
        num_votes: Option<i32>,
        average_rating: Option<f64>,
    }

    #[test]
    fn test_to_documents_keeps_nulls() {
        let docs = to_documents(&[Rating {
            num_votes: None,
            average_rating: Some(7.5),
        }])
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get("numVotes"), Some(&Bson::Null));
        assert_eq!(docs[0].get_f64("averageRating").unwrap(), 7.5);
    }

    #[test]
    fn test_partition_round_robin() {
        let docs: Vec<Document> = (0..10).map(|i| doc! { "i": i }).collect();
        let chunks = partition(docs, 3);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert_eq!(chunks[1][0].get_i32("i").unwrap(), 1);
    }

    #[test]
    fn test_partition_more_partitions_than_documents() {
        let docs: Vec<Document> = (0..2).map(|i| doc! { "i": i }).collect();
        assert_eq!(partition(docs, 10_000).len(), 2);
        assert!(partition(Vec::new(), 4).is_empty());
    }
}
