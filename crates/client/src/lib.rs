//! Groundswell Client - headless client core for the crowdfunding platform.
//!
//! # Architecture
//!
//! - The hosted document store is the source of truth - NO local sync, direct
//!   API calls through the [`docstore::DocumentStore`] seam
//! - [`projects::ProjectsClient`] is the sole mediator between the Project
//!   aggregate and the store; reads are cached in-memory via `moka`
//! - [`projection::ProjectsStore`] is the client-local cache the presentation
//!   layer renders from, rebuilt from fetch results and subscription snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use groundswell_client::config::ClientConfig;
//! use groundswell_client::docstore::RestDocumentStore;
//! use groundswell_client::projects::ProjectsClient;
//!
//! let config = ClientConfig::from_env()?;
//! let client = ProjectsClient::new(RestDocumentStore::new(&config), &config);
//!
//! // Browse projects, newest first
//! let projects = client.fetch_all().await?;
//!
//! // Follow one project live
//! let mut feed = client.subscribe(&projects[0].id);
//! while let Some(event) = feed.recv().await {
//!     // render the snapshot, or surface the error
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod docstore;
pub mod projection;
pub mod projects;

pub use config::{ClientConfig, ConfigError};
pub use docstore::{DocumentStore, MemoryDocumentStore, RemoteError, RestDocumentStore};
pub use projection::{CategoryFilter, ProjectsStore, SortBy};
pub use projects::{
    Backer, ClientError, Comment, Project, ProjectDraft, ProjectsClient, Reward, RewardDraft,
    Subscription, ValidationError, WatchEvent,
};
