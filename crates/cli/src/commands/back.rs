//! Back a project with a contribution.
//!
//! # Usage
//!
//! ```bash
//! gs-cli back p-42 --amount 100
//! gs-cli back p-42 --amount 100 --reward 2
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use groundswell_client::Backer;
use groundswell_core::{ProjectId, RewardId};

/// Errors specific to the back command.
#[derive(Debug, Error)]
pub enum BackError {
    /// The amount flag did not parse as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Run the back command.
///
/// # Errors
///
/// Returns an error when not signed in, for a malformed amount, for a
/// contribution that fails policy (non-positive amount, unqualified reward),
/// or if the store rejects the write.
pub async fn run(
    id: &str,
    amount: &str,
    reward: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = super::connect()?;
    let principal = super::require_principal(&config)?;

    let amount: Decimal = amount
        .parse()
        .map_err(|_| BackError::InvalidAmount(amount.to_string()))?;
    let project_id = ProjectId::new(id);

    let backer = Backer {
        user_id: principal.uid.clone(),
        user_name: principal.display_label().to_owned(),
        amount,
        reward_id: reward.map(RewardId::new),
        backed_at: Utc::now(),
    };

    client.contribute(&project_id, backer, amount).await?;
    tracing::info!(project_id = %project_id, amount = %amount, "Contribution recorded");

    #[allow(clippy::print_stdout)]
    {
        println!("Backed {project_id} with ${amount}");
    }
    Ok(())
}
