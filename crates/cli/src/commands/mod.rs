//! CLI command implementations.

pub mod back;
pub mod browse;
pub mod comment;
pub mod create;
pub mod show;
pub mod watch;

use thiserror::Error;

use groundswell_client::{ClientConfig, ProjectsClient, RestDocumentStore};
use groundswell_core::Principal;

/// Errors shared across commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A mutation was attempted without an authenticated principal.
    #[error("sign in required: set GROUNDSWELL_AUTH_UID (and GROUNDSWELL_AUTH_NAME)")]
    SignInRequired,
}

/// Load configuration and connect a client to the hosted store.
pub fn connect() -> Result<
    (ClientConfig, ProjectsClient<RestDocumentStore>),
    groundswell_client::ConfigError,
> {
    let config = ClientConfig::from_env()?;
    let store = RestDocumentStore::new(&config);
    let client = ProjectsClient::new(store, &config);
    Ok((config, client))
}

/// The acting principal, or [`CommandError::SignInRequired`] for anonymous
/// sessions. Mutating commands all gate on this.
pub fn require_principal(config: &ClientConfig) -> Result<Principal, CommandError> {
    config.principal.clone().ok_or(CommandError::SignInRequired)
}
