//! Subscription lifecycle: first snapshot, change delivery, error channel,
//! and cancellation gating.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::time::timeout;

use groundswell_client::docstore::{ProjectDoc, ProjectPatch, StoredDoc};
use groundswell_client::{
    DocumentStore, MemoryDocumentStore, ProjectsClient, RemoteError, Subscription, WatchEvent,
};
use groundswell_core::ProjectId;

const WAIT: Duration = Duration::from_secs(1);

/// Receive the next event or panic after a generous deadline.
async fn next_event(sub: &mut Subscription) -> WatchEvent {
    timeout(WAIT, sub.recv())
        .await
        .expect("event within deadline")
        .expect("feed still open")
}

#[tokio::test]
async fn first_snapshot_is_delivered_immediately() {
    let client = common::client();
    let id = client
        .create(&common::draft("Field Recorder"))
        .await
        .expect("create");

    let mut sub = client.subscribe(&id);
    match next_event(&mut sub).await {
        WatchEvent::Snapshot(Some(project)) => assert_eq!(project.id, id),
        other => panic!("expected an initial snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_project_first_snapshot_is_none() {
    let client = common::client();
    let mut sub = client.subscribe(&ProjectId::new("p-404"));
    match next_event(&mut sub).await {
        WatchEvent::Snapshot(None) => {}
        other => panic!("expected Snapshot(None), got {other:?}"),
    }
}

#[tokio::test]
async fn change_pushes_a_fresh_snapshot() {
    let client = common::client();
    let id = client
        .create(&common::draft("Field Recorder"))
        .await
        .expect("create");

    let mut sub = client.subscribe(&id);
    let _ = next_event(&mut sub).await;

    client
        .contribute(&id, common::backer("u-2", "Grace", 100, None), Decimal::from(100))
        .await
        .expect("contribute");

    match next_event(&mut sub).await {
        WatchEvent::Snapshot(Some(project)) => {
            assert_eq!(project.current_funding, Decimal::from(100));
            assert_eq!(project.backers.len(), 1);
        }
        other => panic!("expected the updated snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn unchanged_project_sends_no_duplicate_snapshots() {
    let client = common::client();
    let id = client
        .create(&common::draft("Field Recorder"))
        .await
        .expect("create");

    let mut sub = client.subscribe(&id);
    let _ = next_event(&mut sub).await;

    // Several poll intervals pass with no change: nothing arrives
    let quiet = timeout(Duration::from_millis(100), sub.recv()).await;
    assert!(quiet.is_err(), "expected silence, got {quiet:?}");
}

#[tokio::test]
async fn cancel_is_idempotent_and_gates_queued_events() {
    let client = common::client();
    let id = client
        .create(&common::draft("Field Recorder"))
        .await
        .expect("create");

    let mut sub = client.subscribe(&id);
    // Give the poll task time to queue the first snapshot, without receiving it
    tokio::time::sleep(Duration::from_millis(50)).await;

    sub.cancel();
    sub.cancel();

    // The queued snapshot is gated, not delivered late
    assert!(sub.recv().await.is_none());
    assert!(sub.recv().await.is_none());
}

/// Delegates to the in-memory store; once armed, every point get fails.
struct FlakyStore {
    inner: MemoryDocumentStore,
    failing: Arc<AtomicBool>,
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn create_project(&self, doc: ProjectDoc) -> Result<String, RemoteError> {
        self.inner.create_project(doc).await
    }

    async fn list_projects(&self) -> Result<Vec<StoredDoc>, RemoteError> {
        self.inner.list_projects().await
    }

    async fn get_project(&self, id: &str) -> Result<Option<StoredDoc>, RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Permission("token revoked".to_string()));
        }
        self.inner.get_project(id).await
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<(), RemoteError> {
        self.inner.update_project(id, patch).await
    }
}

#[tokio::test]
async fn delivery_failures_use_the_error_channel_and_the_feed_survives() {
    let failing = Arc::new(AtomicBool::new(false));
    let store = FlakyStore {
        inner: MemoryDocumentStore::new(),
        failing: Arc::clone(&failing),
    };
    let client =
        ProjectsClient::with_settings(store, Duration::from_secs(60), Duration::from_millis(10));

    let id = client
        .create(&common::draft("Field Recorder"))
        .await
        .expect("create");

    let mut sub = client.subscribe(&id);
    let _ = next_event(&mut sub).await;

    // Revoke access mid-stream: the failure is delivered, not swallowed
    failing.store(true, Ordering::SeqCst);
    match next_event(&mut sub).await {
        WatchEvent::Error(RemoteError::Permission(_)) => {}
        other => panic!("expected a permission error event, got {other:?}"),
    }

    // Restore access and mutate: the feed is still alive
    failing.store(false, Ordering::SeqCst);
    client
        .contribute(&id, common::backer("u-2", "Grace", 100, None), Decimal::from(100))
        .await
        .expect("contribute");

    loop {
        match next_event(&mut sub).await {
            WatchEvent::Snapshot(Some(project))
                if project.current_funding == Decimal::from(100) =>
            {
                break;
            }
            WatchEvent::Error(_) | WatchEvent::Snapshot(_) => {}
        }
    }
}
