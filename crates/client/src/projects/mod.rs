//! The projects repository.
//!
//! [`ProjectsClient`] is the sole mediator between the Project aggregate and
//! the remote document store. Reads go through a `moka` TTL cache that local
//! mutations invalidate; writes never touch the projection store directly -
//! visibility to watchers comes from the subscription's next snapshot.

mod conversions;
mod subscription;
mod types;

pub use subscription::{Subscription, WatchEvent};
pub use types::{
    Backer, Comment, Project, ProjectDraft, Reward, RewardDraft, ValidationError,
};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use groundswell_core::{CommentId, Principal, ProjectId};

use crate::config::ClientConfig;
use crate::docstore::{DocumentStore, ProjectPatch, RemoteError};

use conversions::{backer_to_doc, comment_to_doc, doc_from_draft, project_from_doc};

/// Errors surfaced by repository operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input failed policy checks before any remote call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote store failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Cache key for repository reads.
const LIST_CACHE_KEY: &str = "projects";

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    List(Vec<Project>),
    One(Box<Project>),
}

/// Client for the projects collection.
///
/// Cheaply cloneable; all clones share one store handle and one read cache.
pub struct ProjectsClient<S> {
    inner: Arc<ClientInner<S>>,
}

impl<S> Clone for ProjectsClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ClientInner<S> {
    store: Arc<S>,
    cache: Cache<String, CacheValue>,
    watch_poll_interval: Duration,
}

impl<S: DocumentStore + 'static> ProjectsClient<S> {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(store: S, config: &ClientConfig) -> Self {
        Self::with_settings(store, config.cache_ttl, config.watch_poll_interval)
    }

    /// Create a client with explicit cache and polling settings.
    #[must_use]
    pub fn with_settings(store: S, cache_ttl: Duration, watch_poll_interval: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Self {
            inner: Arc::new(ClientInner {
                store: Arc::new(store),
                cache,
                watch_poll_interval,
            }),
        }
    }

    /// Persist a new project and return its assigned id.
    ///
    /// The draft is checked against creation policy before any remote call.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a draft that fails policy, or
    /// `ClientError::Remote` if the store rejects the write.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: &ProjectDraft) -> Result<ProjectId, ClientError> {
        draft.validate()?;

        let doc = doc_from_draft(draft);
        let id = self.inner.store.create_project(doc).await?;

        self.inner.cache.invalidate(LIST_CACHE_KEY).await;
        Ok(ProjectId::new(id))
    }

    /// Every project, ordered by creation time descending (newest first).
    ///
    /// Returns an empty sequence when none exist.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` on transport failure.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Project>, ClientError> {
        if let Some(CacheValue::List(projects)) =
            self.inner.cache.get(LIST_CACHE_KEY).await
        {
            debug!("cache hit for project list");
            return Ok(projects);
        }

        let stored = self.inner.store.list_projects().await?;
        let projects = stored
            .into_iter()
            .map(project_from_doc)
            .collect::<Result<Vec<_>, _>>()?;

        self.inner
            .cache
            .insert(LIST_CACHE_KEY.to_owned(), CacheValue::List(projects.clone()))
            .await;

        Ok(projects)
    }

    /// Point lookup. Returns `None` for a missing project - never an error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` on transport failure.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn fetch_one(&self, project_id: &ProjectId) -> Result<Option<Project>, ClientError> {
        let cache_key = project_cache_key(project_id);

        if let Some(CacheValue::One(project)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for project");
            return Ok(Some(*project));
        }

        let Some(stored) = self.inner.store.get_project(project_id.as_str()).await? else {
            return Ok(None);
        };
        let project = project_from_doc(stored)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::One(Box::new(project.clone())))
            .await;

        Ok(Some(project))
    }

    /// Open a live feed over one project.
    ///
    /// The feed delivers the latest full snapshot on every observed change,
    /// starting with the current state (`Snapshot(None)` if the project does
    /// not exist). See [`Subscription`] for the cancellation contract.
    #[must_use]
    pub fn subscribe(&self, project_id: &ProjectId) -> Subscription {
        Subscription::spawn(
            Arc::clone(&self.inner.store),
            project_id.clone(),
            self.inner.watch_poll_interval,
        )
    }

    /// Record a contribution: append the backer and raise `currentFunding`.
    ///
    /// This is a read-then-write sequence against the store and is **not
    /// atomic**: two concurrent contributions can read the same base funding
    /// and the final total will undercount one of them. The store update
    /// itself is a single call, so the backer append is never lost - only the
    /// funding increment can be. A contribution against a missing project is
    /// a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a non-positive amount or a
    /// reward the amount does not qualify for, `ClientError::Remote` if the
    /// store fails.
    #[instrument(skip(self, backer), fields(project_id = %project_id, amount = %amount))]
    pub async fn contribute(
        &self,
        project_id: &ProjectId,
        backer: Backer,
        amount: Decimal,
    ) -> Result<(), ClientError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }

        // Read directly from the store: the funding base must be fresh, and
        // the reward check below runs against the same snapshot.
        let Some(stored) = self.inner.store.get_project(project_id.as_str()).await? else {
            warn!("contribution to a project that does not exist; skipping");
            return Ok(());
        };

        if let Some(reward_id) = &backer.reward_id {
            let reward = stored
                .doc
                .rewards
                .iter()
                .find(|reward| reward.id == reward_id.as_str())
                .ok_or_else(|| ValidationError::UnknownReward(reward_id.clone()))?;
            if reward.amount > amount {
                return Err(ValidationError::RewardMinimumNotMet {
                    id: reward_id.clone(),
                    minimum: reward.amount,
                }
                .into());
            }
        }

        let patch = ProjectPatch::new()
            .set_current_funding(stored.doc.current_funding + amount)
            .push_backer(backer_to_doc(&backer));
        self.inner
            .store
            .update_project(project_id.as_str(), patch)
            .await?;

        self.invalidate_project(project_id).await;
        Ok(())
    }

    /// Append a comment and return its locally synthesized id.
    ///
    /// The append is a set-union merge on the store side, so concurrent
    /// comments from different clients never overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for content that is empty after
    /// trimming, `ClientError::Remote` if the store fails (including a
    /// comment against a missing project).
    #[instrument(skip(self, author, content), fields(project_id = %project_id))]
    pub async fn comment(
        &self,
        project_id: &ProjectId,
        author: &Principal,
        content: &str,
    ) -> Result<CommentId, ClientError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::new(now.timestamp_millis().to_string()),
            user_id: author.uid.clone(),
            user_name: author.display_label().to_owned(),
            content: content.to_owned(),
            created_at: now,
        };

        let patch = ProjectPatch::new().push_comment(comment_to_doc(&comment));
        self.inner
            .store
            .update_project(project_id.as_str(), patch)
            .await?;

        self.invalidate_project(project_id).await;
        Ok(comment.id)
    }

    /// Drop one project (and the list) from the read cache.
    async fn invalidate_project(&self, project_id: &ProjectId) {
        self.inner
            .cache
            .invalidate(&project_cache_key(project_id))
            .await;
        self.inner.cache.invalidate(LIST_CACHE_KEY).await;
    }

    /// Drop all cached reads.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

fn project_cache_key(project_id: &ProjectId) -> String {
    format!("project:{project_id}")
}
