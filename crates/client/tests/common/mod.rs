#![allow(dead_code)]

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use groundswell_client::{
    Backer, MemoryDocumentStore, ProjectDraft, ProjectsClient, RewardDraft,
};
use groundswell_core::{Category, RewardId, UserId};

/// A client over a fresh in-memory store, with a short cache TTL and a fast
/// subscription poll so the async tests stay quick.
pub fn client() -> ProjectsClient<MemoryDocumentStore> {
    ProjectsClient::with_settings(
        MemoryDocumentStore::new(),
        Duration::from_secs(60),
        Duration::from_millis(10),
    )
}

/// A valid draft with two reward tiers (minimums 25 and 100).
pub fn draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: format!("{title}, a project worth backing"),
        category: Category::Technology,
        funding_goal: Decimal::from(1000),
        start_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        creator_id: UserId::new("u-creator"),
        creator_name: "Ada".to_string(),
        rewards: vec![
            RewardDraft {
                amount: Decimal::from(25),
                title: "Early Bird".to_string(),
                description: "Early access and a thank you".to_string(),
                estimated_delivery: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            },
            RewardDraft {
                amount: Decimal::from(100),
                title: "Signed Unit".to_string(),
                description: "A signed production unit".to_string(),
                estimated_delivery: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            },
        ],
    }
}

/// A backer record for `uid` contributing `amount`.
pub fn backer(uid: &str, name: &str, amount: u32, reward: Option<&str>) -> Backer {
    Backer {
        user_id: UserId::new(uid),
        user_name: name.to_string(),
        amount: Decimal::from(amount),
        reward_id: reward.map(RewardId::new),
        backed_at: Utc::now(),
    }
}
