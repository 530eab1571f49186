//! Project domain types.
//!
//! These are the validated in-memory aggregates the presentation layer works
//! with, separate from the wire documents in `docstore`. The Project owns its
//! Rewards, Backers and Comments outright - none of them has identity or
//! lifecycle outside the parent.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use groundswell_core::{Category, CommentId, ProjectId, RewardId, UserId};

/// Input that failed policy checks before any remote call was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The funding goal must be a positive amount.
    #[error("funding goal must be positive")]
    NonPositiveGoal,

    /// The campaign must end after it starts.
    #[error("campaign end date must be after its start date")]
    EndBeforeStart,

    /// A contribution must be a positive amount.
    #[error("contribution amount must be positive")]
    NonPositiveAmount,

    /// A comment must have content after trimming.
    #[error("comment cannot be empty")]
    EmptyComment,

    /// The selected reward does not exist on the project.
    #[error("reward {0} does not exist on this project")]
    UnknownReward(RewardId),

    /// The contribution is below the selected reward's minimum.
    #[error("reward {id} requires a contribution of at least {minimum}")]
    RewardMinimumNotMet {
        /// The selected reward.
        id: RewardId,
        /// Its minimum qualifying contribution.
        minimum: Decimal,
    },
}

/// A crowdfunding project - the aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Assigned by the store on creation.
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Positive amount, immutable after creation.
    pub funding_goal: Decimal,
    /// Non-negative; only increased by accepted contributions.
    pub current_funding: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: UserId,
    pub creator_name: String,
    /// Reward tiers, fixed at creation.
    pub rewards: Vec<Reward>,
    /// Append-only.
    pub backers: Vec<Backer>,
    /// Append-only.
    pub comments: Vec<Comment>,
    /// Assigned by the store at creation time.
    pub created_at: DateTime<Utc>,
}

/// A reward tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    /// Unique within the project.
    pub id: RewardId,
    /// Minimum contribution to qualify.
    pub amount: Decimal,
    pub title: String,
    pub description: String,
    pub estimated_delivery: NaiveDate,
}

/// One contribution record.
#[derive(Debug, Clone, PartialEq)]
pub struct Backer {
    pub user_id: UserId,
    pub user_name: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Must reference a reward whose minimum the amount covers; checked
    /// client-side only.
    pub reward_id: Option<RewardId>,
    pub backed_at: DateTime<Utc>,
}

/// One comment record.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub user_name: String,
    /// Non-empty after trimming.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A reward tier as submitted at creation time.
///
/// Ids are assigned ordinally (`"1"`, `"2"`, ...) when the draft is turned
/// into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardDraft {
    pub amount: Decimal,
    pub title: String,
    pub description: String,
    pub estimated_delivery: NaiveDate,
}

/// A fully-formed project creation input.
///
/// Everything the store does not assign itself: no id, no creation timestamp,
/// funding starts at zero, backer and comment collections start empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub funding_goal: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: UserId,
    pub creator_name: String,
    pub rewards: Vec<RewardDraft>,
}

impl ProjectDraft {
    /// Check the draft against creation policy.
    ///
    /// Runs entirely client-side, before any remote call.
    ///
    /// # Errors
    ///
    /// Returns the first failed check: blank title, description or category,
    /// non-positive goal, end date not after start date, or a blank reward
    /// title.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.category.as_str().trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if self.funding_goal <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveGoal);
        }
        if self.end_date <= self.start_date {
            return Err(ValidationError::EndBeforeStart);
        }
        for reward in &self.rewards {
            if reward.title.trim().is_empty() {
                return Err(ValidationError::MissingField("reward title"));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Derived Metrics
// =============================================================================

const SECONDS_PER_DAY: i64 = 86_400;

impl Project {
    /// How far along funding is, as a percentage clamped to `[0, 100]`.
    #[must_use]
    pub fn funding_percentage(&self) -> Decimal {
        if self.funding_goal <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let percentage = self.current_funding * Decimal::ONE_HUNDRED / self.funding_goal;
        percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Whole days until the campaign ends, rounded up, never negative.
    #[must_use]
    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (self.end_date - now).num_seconds();
        if seconds <= 0 {
            return 0;
        }
        // `i64::div_ceil` is unstable on stable toolchains; `seconds` is
        // guaranteed positive above, so compute via the stable unsigned method.
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        {
            (seconds as u64).div_ceil(SECONDS_PER_DAY as u64) as i64
        }
    }

    /// [`Self::days_remaining_at`] against the current clock.
    #[must_use]
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_at(Utc::now())
    }

    /// The rewards a contribution of `amount` qualifies for, in their
    /// original order.
    #[must_use]
    pub fn eligible_rewards(&self, amount: Decimal) -> Vec<&Reward> {
        self.rewards
            .iter()
            .filter(|reward| reward.amount <= amount)
            .collect()
    }

    /// The most recent `limit` backers, newest first.
    #[must_use]
    pub fn recent_backers(&self, limit: usize) -> Vec<&Backer> {
        let mut backers: Vec<&Backer> = self.backers.iter().collect();
        backers.sort_by(|a, b| b.backed_at.cmp(&a.backed_at));
        backers.truncate(limit);
        backers
    }

    /// Comments in display order: newest first.
    #[must_use]
    pub fn comments_newest_first(&self) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.comments.iter().collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn project() -> Project {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        Project {
            id: ProjectId::new("p-1"),
            title: "Field Recorder".to_string(),
            description: "A pocket field recorder".to_string(),
            category: Category::Technology,
            funding_goal: Decimal::from(1000),
            current_funding: Decimal::from(250),
            start_date: start,
            end_date: end,
            creator_id: UserId::new("u-1"),
            creator_name: "Ada".to_string(),
            rewards: vec![
                reward("1", 10),
                reward("2", 25),
                reward("3", 100),
            ],
            backers: vec![],
            comments: vec![],
            created_at: start,
        }
    }

    fn reward(id: &str, amount: u32) -> Reward {
        Reward {
            id: RewardId::new(id),
            amount: Decimal::from(amount),
            title: format!("Tier {id}"),
            description: "a reward".to_string(),
            estimated_delivery: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        }
    }

    fn draft() -> ProjectDraft {
        let p = project();
        ProjectDraft {
            title: p.title,
            description: p.description,
            category: p.category,
            funding_goal: p.funding_goal,
            start_date: p.start_date,
            end_date: p.end_date,
            creator_id: p.creator_id,
            creator_name: p.creator_name,
            rewards: vec![RewardDraft {
                amount: Decimal::from(25),
                title: "Early Bird".to_string(),
                description: "Early access".to_string(),
                estimated_delivery: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            }],
        }
    }

    #[test]
    fn test_funding_percentage_quarter_funded() {
        // goal 1000, funding 250
        assert_eq!(project().funding_percentage(), Decimal::from(25));
    }

    #[test]
    fn test_funding_percentage_clamps_overfunding() {
        let mut p = project();
        p.current_funding = Decimal::from(2500);
        assert_eq!(p.funding_percentage(), Decimal::from(100));
    }

    #[test]
    fn test_funding_percentage_zero_funding() {
        let mut p = project();
        p.current_funding = Decimal::ZERO;
        assert_eq!(p.funding_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        let p = project();
        // 36 hours before the deadline counts as 2 days
        let now = p.end_date - chrono::Duration::hours(36);
        assert_eq!(p.days_remaining_at(now), 2);
    }

    #[test]
    fn test_days_remaining_exact_boundary() {
        let p = project();
        let now = p.end_date - chrono::Duration::days(3);
        assert_eq!(p.days_remaining_at(now), 3);
    }

    #[test]
    fn test_days_remaining_never_negative() {
        let p = project();
        let now = p.end_date + chrono::Duration::days(10);
        assert_eq!(p.days_remaining_at(now), 0);
    }

    #[test]
    fn test_eligible_rewards_exact_threshold_and_order() {
        let p = project();
        let eligible = p.eligible_rewards(Decimal::from(25));
        let ids: Vec<&str> = eligible.iter().map(|r| r.id.as_str()).collect();
        // amount 25 qualifies for the 10 and 25 tiers, in original order
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_eligible_rewards_none_qualify() {
        let p = project();
        assert!(p.eligible_rewards(Decimal::from(5)).is_empty());
    }

    #[test]
    fn test_recent_backers_newest_first_and_truncated() {
        let mut p = project();
        for day in 1..=7 {
            p.backers.push(Backer {
                user_id: UserId::new(format!("u-{day}")),
                user_name: format!("Backer {day}"),
                amount: Decimal::from(10),
                reward_id: None,
                backed_at: Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap(),
            });
        }
        let recent = p.recent_backers(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent.first().unwrap().user_name, "Backer 7");
        assert_eq!(recent.last().unwrap().user_name, "Backer 3");
    }

    #[test]
    fn test_comments_newest_first() {
        let mut p = project();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap();
        for (id, at) in [("1", t1), ("2", t2)] {
            p.comments.push(Comment {
                id: CommentId::new(id),
                user_id: UserId::new("u-2"),
                user_name: "Grace".to_string(),
                content: "nice".to_string(),
                created_at: at,
            });
        }
        let ordered = p.comments_newest_first();
        // T1 < T2, so the T2 comment renders above the T1 comment
        assert_eq!(ordered.first().unwrap().id.as_str(), "2");
        assert_eq!(ordered.last().unwrap().id.as_str(), "1");
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(
            d.validate(),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_draft_rejects_non_positive_goal() {
        let mut d = draft();
        d.funding_goal = Decimal::ZERO;
        assert_eq!(d.validate(), Err(ValidationError::NonPositiveGoal));
    }

    #[test]
    fn test_draft_rejects_end_before_start() {
        let mut d = draft();
        d.end_date = d.start_date;
        assert_eq!(d.validate(), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_draft_rejects_blank_reward_title() {
        let mut d = draft();
        d.rewards.first_mut().unwrap().title = String::new();
        assert_eq!(
            d.validate(),
            Err(ValidationError::MissingField("reward title"))
        );
    }
}
