//! Live project feeds.
//!
//! A [`Subscription`] is the client's one long-lived background activity: a
//! poll task that watches a single project document and forwards full
//! snapshots over a channel whenever the document changes. The hosted API has
//! no streaming listen endpoint, so the push channel is maintained by polling
//! the point get; consumers only see the channel contract.
//!
//! Cancellation gates delivery: once [`Subscription::cancel`] returns, the
//! receiver yields nothing further, including events that were already
//! queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use groundswell_core::ProjectId;

use crate::docstore::{DocumentStore, RemoteError};

use super::conversions::project_from_doc;
use super::types::Project;

/// Channel capacity for a single feed.
const EVENT_BUFFER: usize = 16;

/// One delivery on a project feed.
#[derive(Debug)]
pub enum WatchEvent {
    /// The latest full snapshot; `None` means the document does not exist.
    /// Delivered on every observed change, including the very first poll.
    Snapshot(Option<Project>),
    /// A delivery failure. The feed keeps polling; it is the consumer's call
    /// whether to cancel.
    Error(RemoteError),
}

/// A cancellable live feed over one project.
pub struct Subscription {
    events: mpsc::Receiver<WatchEvent>,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Spawn the poll task backing a feed.
    pub(crate) fn spawn<S>(store: Arc<S>, project_id: ProjectId, poll_interval: Duration) -> Self
    where
        S: DocumentStore + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let gate = Arc::clone(&cancelled);
        let (tx, events) = mpsc::channel(EVENT_BUFFER);

        let task = tokio::spawn(async move {
            let mut last_seen: Option<Option<Project>> = None;
            loop {
                if gate.load(Ordering::SeqCst) {
                    break;
                }

                let event = match store.get_project(project_id.as_str()).await {
                    Ok(stored) => match stored.map(project_from_doc).transpose() {
                        Ok(snapshot) => {
                            if last_seen.as_ref() == Some(&snapshot) {
                                None
                            } else {
                                last_seen = Some(snapshot.clone());
                                Some(WatchEvent::Snapshot(snapshot))
                            }
                        }
                        Err(err) => Some(WatchEvent::Error(err)),
                    },
                    Err(err) => Some(WatchEvent::Error(err)),
                };

                if let Some(event) = event {
                    // Re-check the gate immediately before delivery
                    if gate.load(Ordering::SeqCst) {
                        break;
                    }
                    if tx.send(event).await.is_err() {
                        // Receiver dropped; nothing left to deliver to
                        break;
                    }
                }

                tokio::time::sleep(poll_interval).await;
            }
            debug!(project_id = %project_id, "project feed stopped");
        });

        Self {
            events,
            cancelled,
            task,
        }
    }

    /// Receive the next event.
    ///
    /// Returns `None` once the feed is cancelled, even for events that were
    /// queued before cancellation.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        if self.cancelled.load(Ordering::SeqCst) {
            return None;
        }
        let event = self.events.recv().await;
        if self.cancelled.load(Ordering::SeqCst) {
            return None;
        }
        event
    }

    /// Stop the feed.
    ///
    /// Idempotent: safe to call repeatedly, and safe to call after the poll
    /// task has already stopped on its own.
    pub fn cancel(&mut self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.task.abort();
            self.events.close();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
