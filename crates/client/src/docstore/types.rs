//! Wire types for project documents.
//!
//! Documents serialize as camelCase JSON, the shape the hosted store keeps on
//! disk. Timestamps cross the boundary as [`StoreTimestamp`] and are converted
//! to and from the domain's `DateTime<Utc>` by the conversions module; wire
//! types never leak past the repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The store's native timestamp type (RFC 3339 on the wire).
///
/// Distinct from the domain's `DateTime<Utc>` so the boundary conversion is
/// explicit in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreTimestamp(DateTime<Utc>);

impl StoreTimestamp {
    /// Capture the current instant as a store timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl From<DateTime<Utc>> for StoreTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<StoreTimestamp> for DateTime<Utc> {
    fn from(value: StoreTimestamp) -> Self {
        value.0
    }
}

/// A project document as the store holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDoc {
    pub title: String,
    pub description: String,
    pub category: String,
    pub funding_goal: Decimal,
    pub current_funding: Decimal,
    pub start_date: StoreTimestamp,
    pub end_date: StoreTimestamp,
    pub creator_id: String,
    pub creator_name: String,
    #[serde(default)]
    pub rewards: Vec<RewardDoc>,
    #[serde(default)]
    pub backers: Vec<BackerDoc>,
    #[serde(default)]
    pub comments: Vec<CommentDoc>,
    /// Assigned by the store at creation time; absent on the create payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<StoreTimestamp>,
}

/// A reward tier embedded in a project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDoc {
    pub id: String,
    pub amount: Decimal,
    pub title: String,
    pub description: String,
    /// Calendar date, not an instant - stored as `YYYY-MM-DD`.
    pub estimated_delivery: NaiveDate,
}

/// A backer record embedded in a project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackerDoc {
    pub user_id: String,
    pub user_name: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_id: Option<String>,
    pub backed_at: StoreTimestamp,
}

/// A comment record embedded in a project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDoc {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: StoreTimestamp,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_doc() -> ProjectDoc {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        ProjectDoc {
            title: "Field Recorder".to_string(),
            description: "A pocket field recorder".to_string(),
            category: "technology".to_string(),
            funding_goal: Decimal::from(1000),
            current_funding: Decimal::from(250),
            start_date: start.into(),
            end_date: end.into(),
            creator_id: "u-1".to_string(),
            creator_name: "Ada".to_string(),
            rewards: vec![RewardDoc {
                id: "1".to_string(),
                amount: Decimal::from(25),
                title: "Early Bird".to_string(),
                description: "Early access".to_string(),
                estimated_delivery: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            }],
            backers: vec![],
            comments: vec![],
            created_at: Some(start.into()),
        }
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let json = serde_json::to_value(sample_doc()).unwrap();
        assert!(json.get("fundingGoal").is_some());
        assert!(json.get("currentFunding").is_some());
        assert!(json.get("creatorName").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("funding_goal").is_none());
    }

    #[test]
    fn test_round_trip_preserves_document() {
        let doc = sample_doc();
        let json = serde_json::to_string(&doc).unwrap();
        let back: ProjectDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_missing_arrays_default_empty() {
        let json = r#"{
            "title": "t", "description": "d", "category": "art",
            "fundingGoal": "100", "currentFunding": "0",
            "startDate": "2026-01-01T00:00:00Z", "endDate": "2026-02-01T00:00:00Z",
            "creatorId": "u-1", "creatorName": "Ada"
        }"#;
        let doc: ProjectDoc = serde_json::from_str(json).unwrap();
        assert!(doc.rewards.is_empty());
        assert!(doc.backers.is_empty());
        assert!(doc.comments.is_empty());
        assert!(doc.created_at.is_none());
    }

    #[test]
    fn test_create_payload_omits_created_at() {
        let mut doc = sample_doc();
        doc.created_at = None;
        let json = serde_json::to_value(doc).unwrap();
        assert!(json.get("createdAt").is_none());
    }
}
