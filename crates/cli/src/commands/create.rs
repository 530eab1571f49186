//! Create a new project.
//!
//! # Usage
//!
//! ```bash
//! gs-cli create --title "Field Recorder" \
//!     --description "A pocket field recorder" \
//!     --category technology --goal 1000 \
//!     --start 2026-01-01 --end 2026-03-01 \
//!     --reward "25:Early Bird:Early access:2026-06-01" \
//!     --reward "100:Signed Unit:A signed production unit:2026-07-01"
//! ```
//!
//! Reward specs are `amount:title:description:delivery-date`, repeatable.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;

use groundswell_client::{ProjectDraft, RewardDraft};
use groundswell_core::Category;

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Project title
    #[arg(long)]
    pub title: String,

    /// Project description
    #[arg(long)]
    pub description: String,

    /// Category (e.g. technology, art, music)
    #[arg(long)]
    pub category: String,

    /// Funding goal
    #[arg(long)]
    pub goal: String,

    /// Campaign start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Campaign end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Reward tier as "amount:title:description:delivery-date", repeatable
    #[arg(long = "reward")]
    pub rewards: Vec<String>,
}

/// Errors specific to the create command.
#[derive(Debug, Error)]
pub enum CreateError {
    /// An amount flag did not parse as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A date flag did not parse as YYYY-MM-DD.
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A reward spec did not have four `:`-separated parts.
    #[error("invalid reward spec: {0} (expected amount:title:description:delivery-date)")]
    InvalidReward(String),
}

/// Run the create command.
///
/// # Errors
///
/// Returns an error when not signed in, for malformed flags, for a draft
/// that fails creation policy, or if the store rejects the write.
pub async fn run(args: CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = super::connect()?;
    let principal = super::require_principal(&config)?;

    let draft = ProjectDraft {
        title: args.title,
        description: args.description,
        category: Category::from(args.category),
        funding_goal: parse_amount(&args.goal)?,
        start_date: parse_date(&args.start)?,
        end_date: parse_date(&args.end)?,
        creator_id: principal.uid.clone(),
        creator_name: principal.display_label().to_owned(),
        rewards: args
            .rewards
            .iter()
            .map(|spec| parse_reward(spec))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let id = client.create(&draft).await?;
    tracing::info!("Project created");

    #[allow(clippy::print_stdout)]
    {
        println!("{id}");
    }
    Ok(())
}

fn parse_amount(value: &str) -> Result<Decimal, CreateError> {
    value
        .parse::<Decimal>()
        .map_err(|_| CreateError::InvalidAmount(value.to_string()))
}

/// Parse a calendar date flag into the midnight-UTC instant the store keeps.
fn parse_date(value: &str) -> Result<DateTime<Utc>, CreateError> {
    let date = value
        .parse::<NaiveDate>()
        .map_err(|_| CreateError::InvalidDate(value.to_string()))?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CreateError::InvalidDate(value.to_string()))?
        .and_utc())
}

fn parse_reward(spec: &str) -> Result<RewardDraft, CreateError> {
    let mut parts = spec.splitn(4, ':');
    let (Some(amount), Some(title), Some(description), Some(delivery)) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(CreateError::InvalidReward(spec.to_string()));
    };

    Ok(RewardDraft {
        amount: parse_amount(amount)?,
        title: title.to_string(),
        description: description.to_string(),
        estimated_delivery: delivery
            .parse::<NaiveDate>()
            .map_err(|_| CreateError::InvalidDate(delivery.to_string()))?,
    })
}
