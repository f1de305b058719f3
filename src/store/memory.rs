//! In-memory [`CorpusStore`] implementation.
//!
//! Uses plain `Vec`s behind `std::sync::RwLock` for thread safety. This is
//! the backend for a single session's in-memory lifetime; there is no
//! persistence layer.

use std::collections::HashSet;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DataRecord, DocumentFragment};

use super::CorpusStore;

#[derive(Default)]
struct Inner {
    fragments: Vec<DocumentFragment>,
    records: Vec<DataRecord>,
    document_names: Vec<String>,
    dataset_names: Vec<String>,
}

/// Session-scoped in-memory corpus.
#[derive(Default)]
pub struct InMemoryCorpus {
    inner: RwLock<Inner>,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }
}

fn push_distinct(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

#[async_trait]
impl CorpusStore for InMemoryCorpus {
    async fn add_document(&self, name: &str, fragments: Vec<DocumentFragment>) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        // Re-uploading the same file must not double its fragments.
        let known: HashSet<(String, String)> = inner
            .fragments
            .iter()
            .map(|f| (f.source.clone(), f.hash.clone()))
            .collect();
        for fragment in fragments {
            if !known.contains(&(fragment.source.clone(), fragment.hash.clone())) {
                inner.fragments.push(fragment);
            }
        }
        push_distinct(&mut inner.document_names, name);
        Ok(())
    }

    async fn add_dataset(&self, name: &str, records: Vec<DataRecord>) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.records.extend(records);
        push_distinct(&mut inner.dataset_names, name);
        Ok(())
    }

    async fn fragments(&self) -> Result<Vec<DocumentFragment>> {
        Ok(self.inner.read().unwrap().fragments.clone())
    }

    async fn records(&self) -> Result<Vec<DataRecord>> {
        Ok(self.inner.read().unwrap().records.clone())
    }

    async fn document_names(&self) -> Result<Vec<String>> {
        Ok(self.inner.read().unwrap().document_names.clone())
    }

    async fn dataset_names(&self) -> Result<Vec<String>> {
        Ok(self.inner.read().unwrap().dataset_names.clone())
    }
}
