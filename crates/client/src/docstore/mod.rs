//! Document store backends.
//!
//! The hosted document store is the authoritative copy of every project.
//! [`DocumentStore`] is the seam the rest of the client programs against:
//! [`RestDocumentStore`] speaks to the hosted API over HTTPS, and
//! [`MemoryDocumentStore`] provides the same contract in-process for tests
//! and hermetic tooling.
//!
//! # Contract
//!
//! - `create_project` - create-with-generated-id; the store stamps `createdAt`
//! - `list_projects` - ordered range query, `createdAt` descending
//! - `get_project` - point get; a missing document is `None`, not an error
//! - `update_project` - one call applying a [`ProjectPatch`]: a whole-field
//!   write of `currentFunding` and/or set-union appends to the backer and
//!   comment arrays

mod memory;
mod rest;
mod types;

pub use memory::MemoryDocumentStore;
pub use rest::RestDocumentStore;
pub use types::{BackerDoc, CommentDoc, ProjectDoc, RewardDoc, StoreTimestamp};

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the caller's credentials.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The store returned a non-success status.
    #[error("Store returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The store returned a document missing server-assigned fields.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// A wire document paired with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDoc {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// The document body.
    pub doc: ProjectDoc,
}

/// A single update call against one project document.
///
/// Field writes and array appends travel together in one store round trip,
/// matching the update primitive the hosted API exposes. Array appends are
/// set-union merges: the store drops elements already present.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    /// Whole-field write of `currentFunding`.
    pub current_funding: Option<Decimal>,
    /// Backer to append to the `backers` array.
    pub add_backer: Option<BackerDoc>,
    /// Comment to append to the `comments` array.
    pub add_comment: Option<CommentDoc>,
}

impl ProjectPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole-field write of `currentFunding`.
    #[must_use]
    pub fn set_current_funding(mut self, amount: Decimal) -> Self {
        self.current_funding = Some(amount);
        self
    }

    /// Append a backer to the `backers` array.
    #[must_use]
    pub fn push_backer(mut self, backer: BackerDoc) -> Self {
        self.add_backer = Some(backer);
        self
    }

    /// Append a comment to the `comments` array.
    #[must_use]
    pub fn push_comment(mut self, comment: CommentDoc) -> Self {
        self.add_comment = Some(comment);
        self
    }
}

/// The document store seam.
///
/// Implementations must honor the contract documented at the module level;
/// the repository and its tests rely on it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new project document and return its assigned id.
    async fn create_project(&self, doc: ProjectDoc) -> Result<String, RemoteError>;

    /// Every project document, ordered by `createdAt` descending.
    async fn list_projects(&self) -> Result<Vec<StoredDoc>, RemoteError>;

    /// Point lookup. Returns `None` for a missing document.
    async fn get_project(&self, id: &str) -> Result<Option<StoredDoc>, RemoteError>;

    /// Apply a [`ProjectPatch`] to one document in a single call.
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Permission("token expired".to_string());
        assert_eq!(err.to_string(), "Permission denied: token expired");

        let err = RemoteError::Status {
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "Store returned 500: internal");

        let err = RemoteError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");
    }

    #[test]
    fn test_patch_builder_accumulates() {
        let patch = ProjectPatch::new().set_current_funding(Decimal::from(350));
        assert_eq!(patch.current_funding, Some(Decimal::from(350)));
        assert!(patch.add_backer.is_none());
        assert!(patch.add_comment.is_none());
    }
}
