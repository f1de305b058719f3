//! Corpus storage abstraction.
//!
//! The [`CorpusStore`] trait defines everything the routing and retrieval
//! core needs from a corpus backend: snapshot reads of fragments, records,
//! and the two ordered filename lists, plus the append-only writes used by
//! the external ingestion collaborator. The core itself never writes.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//! Reads return owned snapshots: no concurrent writer runs during a query,
//! so a snapshot is consistent for the whole request.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DataRecord, DocumentFragment};

/// Abstract corpus backend.
///
/// All operations are async (via `async-trait`); in-memory implementations
/// return immediately-ready futures.
///
/// | Method | Caller | Purpose |
/// |--------|--------|---------|
/// | [`add_document`](CorpusStore::add_document) | ingestion | Append a document's fragments |
/// | [`add_dataset`](CorpusStore::add_dataset) | ingestion | Append a dataset's records |
/// | [`fragments`](CorpusStore::fragments) | core | Snapshot of all fragments |
/// | [`records`](CorpusStore::records) | core | Snapshot of all records |
/// | [`document_names`](CorpusStore::document_names) | core | Ordered distinct document filenames |
/// | [`dataset_names`](CorpusStore::dataset_names) | core | Ordered distinct dataset filenames |
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Append a document's fragments under `name`.
    ///
    /// The filename joins the ordered document list if not already known.
    async fn add_document(&self, name: &str, fragments: Vec<DocumentFragment>) -> Result<()>;

    /// Append a dataset's records under `name`.
    ///
    /// The filename joins the ordered dataset list if not already known.
    async fn add_dataset(&self, name: &str, records: Vec<DataRecord>) -> Result<()>;

    /// Snapshot of all ingested fragments, in ingestion order.
    async fn fragments(&self) -> Result<Vec<DocumentFragment>>;

    /// Snapshot of all ingested records, in ingestion order.
    async fn records(&self) -> Result<Vec<DataRecord>>;

    /// Ordered, distinct document filenames.
    async fn document_names(&self) -> Result<Vec<String>>;

    /// Ordered, distinct dataset filenames.
    async fn dataset_names(&self) -> Result<Vec<String>>;
}
