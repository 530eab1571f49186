//! Conversions between wire documents and domain types.
//!
//! All store boundary crossings happen here, in both directions, including
//! the `StoreTimestamp` to `DateTime<Utc>` mapping.

use groundswell_core::{Category, CommentId, ProjectId, RewardId, UserId};

use crate::docstore::{BackerDoc, CommentDoc, ProjectDoc, RemoteError, RewardDoc, StoredDoc};

use super::types::{Backer, Comment, Project, ProjectDraft, Reward};

/// Build a domain Project from a stored document.
///
/// # Errors
///
/// Returns [`RemoteError::Malformed`] when the document lacks the
/// store-assigned `createdAt` field.
pub(crate) fn project_from_doc(stored: StoredDoc) -> Result<Project, RemoteError> {
    let StoredDoc { id, doc } = stored;
    let created_at = doc
        .created_at
        .ok_or_else(|| RemoteError::Malformed(format!("document {id} has no createdAt")))?;

    Ok(Project {
        id: ProjectId::new(id),
        title: doc.title,
        description: doc.description,
        category: Category::from(doc.category),
        funding_goal: doc.funding_goal,
        current_funding: doc.current_funding,
        start_date: doc.start_date.into(),
        end_date: doc.end_date.into(),
        creator_id: UserId::new(doc.creator_id),
        creator_name: doc.creator_name,
        rewards: doc.rewards.into_iter().map(reward_from_doc).collect(),
        backers: doc.backers.into_iter().map(backer_from_doc).collect(),
        comments: doc.comments.into_iter().map(comment_from_doc).collect(),
        created_at: created_at.into(),
    })
}

fn reward_from_doc(doc: RewardDoc) -> Reward {
    Reward {
        id: RewardId::new(doc.id),
        amount: doc.amount,
        title: doc.title,
        description: doc.description,
        estimated_delivery: doc.estimated_delivery,
    }
}

fn backer_from_doc(doc: BackerDoc) -> Backer {
    Backer {
        user_id: UserId::new(doc.user_id),
        user_name: doc.user_name,
        amount: doc.amount,
        reward_id: doc.reward_id.map(RewardId::new),
        backed_at: doc.backed_at.into(),
    }
}

fn comment_from_doc(doc: CommentDoc) -> Comment {
    Comment {
        id: CommentId::new(doc.id),
        user_id: UserId::new(doc.user_id),
        user_name: doc.user_name,
        content: doc.content,
        created_at: doc.created_at.into(),
    }
}

/// Build the creation document for a draft.
///
/// Funding starts at zero, backer and comment collections start empty, reward
/// ids are assigned ordinally, and `createdAt` is left for the store to stamp.
pub(crate) fn doc_from_draft(draft: &ProjectDraft) -> ProjectDoc {
    ProjectDoc {
        title: draft.title.clone(),
        description: draft.description.clone(),
        category: draft.category.as_str().to_owned(),
        funding_goal: draft.funding_goal,
        current_funding: rust_decimal::Decimal::ZERO,
        start_date: draft.start_date.into(),
        end_date: draft.end_date.into(),
        creator_id: draft.creator_id.as_str().to_owned(),
        creator_name: draft.creator_name.clone(),
        rewards: draft
            .rewards
            .iter()
            .enumerate()
            .map(|(index, reward)| RewardDoc {
                id: (index + 1).to_string(),
                amount: reward.amount,
                title: reward.title.clone(),
                description: reward.description.clone(),
                estimated_delivery: reward.estimated_delivery,
            })
            .collect(),
        backers: vec![],
        comments: vec![],
        created_at: None,
    }
}

pub(crate) fn backer_to_doc(backer: &Backer) -> BackerDoc {
    BackerDoc {
        user_id: backer.user_id.as_str().to_owned(),
        user_name: backer.user_name.clone(),
        amount: backer.amount,
        reward_id: backer.reward_id.as_ref().map(|id| id.as_str().to_owned()),
        backed_at: backer.backed_at.into(),
    }
}

pub(crate) fn comment_to_doc(comment: &Comment) -> CommentDoc {
    CommentDoc {
        id: comment.id.as_str().to_owned(),
        user_id: comment.user_id.as_str().to_owned(),
        user_name: comment.user_name.clone(),
        content: comment.content.clone(),
        created_at: comment.created_at.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::docstore::StoreTimestamp;
    use crate::projects::types::RewardDraft;

    fn draft() -> ProjectDraft {
        ProjectDraft {
            title: "Field Recorder".to_string(),
            description: "A pocket field recorder".to_string(),
            category: Category::Technology,
            funding_goal: Decimal::from(1000),
            start_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            creator_id: UserId::new("u-1"),
            creator_name: "Ada".to_string(),
            rewards: vec![
                RewardDraft {
                    amount: Decimal::from(25),
                    title: "Early Bird".to_string(),
                    description: "Early access".to_string(),
                    estimated_delivery: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                },
                RewardDraft {
                    amount: Decimal::from(100),
                    title: "Signed Unit".to_string(),
                    description: "A signed recorder".to_string(),
                    estimated_delivery: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                },
            ],
        }
    }

    #[test]
    fn test_draft_document_starts_empty() {
        let doc = doc_from_draft(&draft());
        assert_eq!(doc.current_funding, Decimal::ZERO);
        assert!(doc.backers.is_empty());
        assert!(doc.comments.is_empty());
        assert!(doc.created_at.is_none());
    }

    #[test]
    fn test_reward_ids_assigned_ordinally() {
        let doc = doc_from_draft(&draft());
        let ids: Vec<&str> = doc.rewards.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_project_from_doc_maps_fields() {
        let mut doc = doc_from_draft(&draft());
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        doc.created_at = Some(StoreTimestamp::from(created));

        let project = project_from_doc(StoredDoc {
            id: "p-7".to_string(),
            doc,
        })
        .unwrap();

        assert_eq!(project.id.as_str(), "p-7");
        assert_eq!(project.category, Category::Technology);
        assert_eq!(project.created_at, created);
        assert_eq!(project.rewards.len(), 2);
    }

    #[test]
    fn test_missing_created_at_is_malformed() {
        let doc = doc_from_draft(&draft());
        let err = project_from_doc(StoredDoc {
            id: "p-7".to_string(),
            doc,
        })
        .unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }
}
