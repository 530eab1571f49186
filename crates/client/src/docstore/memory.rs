//! In-memory implementation of the document store seam.
//!
//! Backs the test suites and any tooling that needs a hermetic store. Honors
//! the same contract as the hosted API: ids are assigned on create, the list
//! is ordered `createdAt` descending, point gets of missing documents return
//! `None`, updates of missing documents fail with a 404-equivalent status,
//! and array appends are set-union merges.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::types::{ProjectDoc, StoreTimestamp};
use super::{DocumentStore, ProjectPatch, RemoteError, StoredDoc};

/// An in-process document store.
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    seq: u64,
    /// Documents in insertion order; list ordering is derived on read.
    docs: Vec<(String, ProjectDoc)>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_project(&self, mut doc: ProjectDoc) -> Result<String, RemoteError> {
        let mut state = self.state.lock().await;
        state.seq += 1;
        let id = format!("p-{}", state.seq);
        doc.created_at = Some(StoreTimestamp::now());
        state.docs.push((id.clone(), doc));
        Ok(id)
    }

    async fn list_projects(&self) -> Result<Vec<StoredDoc>, RemoteError> {
        let state = self.state.lock().await;
        let mut docs: Vec<StoredDoc> = state
            .docs
            .iter()
            .map(|(id, doc)| StoredDoc {
                id: id.clone(),
                doc: doc.clone(),
            })
            .collect();
        // Stable sort: equal timestamps keep insertion order
        docs.sort_by(|a, b| b.doc.created_at.cmp(&a.doc.created_at));
        Ok(docs)
    }

    async fn get_project(&self, id: &str) -> Result<Option<StoredDoc>, RemoteError> {
        let state = self.state.lock().await;
        Ok(state
            .docs
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(doc_id, doc)| StoredDoc {
                id: doc_id.clone(),
                doc: doc.clone(),
            }))
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let doc = state
            .docs
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc)
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                message: format!("no document with id {id}"),
            })?;

        if let Some(current_funding) = patch.current_funding {
            doc.current_funding = current_funding;
        }
        if let Some(backer) = patch.add_backer
            && !doc.backers.contains(&backer)
        {
            doc.backers.push(backer);
        }
        if let Some(comment) = patch.add_comment
            && !doc.comments.contains(&comment)
        {
            doc.comments.push(comment);
        }
        Ok(())
    }
}
