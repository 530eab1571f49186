//! Show one project in detail.
//!
//! # Usage
//!
//! ```bash
//! gs-cli show p-42
//! ```

use thiserror::Error;

use groundswell_client::Project;
use groundswell_core::ProjectId;

/// How many recent backers to list.
const RECENT_BACKERS: usize = 5;

/// Errors specific to the show command.
#[derive(Debug, Error)]
pub enum ShowError {
    /// No project with the given id.
    #[error("project not found: {0}")]
    NotFound(String),
}

/// Run the show command.
///
/// # Errors
///
/// Returns [`ShowError::NotFound`] for a missing project, or the underlying
/// configuration/store error.
pub async fn run(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_, client) = super::connect()?;
    let project_id = ProjectId::new(id);

    let project = client
        .fetch_one(&project_id)
        .await?
        .ok_or_else(|| ShowError::NotFound(id.to_string()))?;

    print_project(&project);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_project(project: &Project) {
    println!("{}", project.title);
    println!(
        "by {} · {} · created {}",
        project.creator_name,
        project.category,
        project.created_at.format("%Y-%m-%d")
    );
    println!();
    println!("{}", project.description);
    println!();
    println!(
        "${} raised of ${} goal ({}%) · {} days to go · {} backers",
        project.current_funding,
        project.funding_goal,
        project.funding_percentage().round(),
        project.days_remaining(),
        project.backers.len(),
    );

    if !project.rewards.is_empty() {
        println!();
        println!("Rewards:");
        for reward in &project.rewards {
            println!(
                "  ${}+  {} (estimated delivery {})",
                reward.amount, reward.title, reward.estimated_delivery
            );
            println!("        {}", reward.description);
        }
    }

    let recent = project.recent_backers(RECENT_BACKERS);
    if !recent.is_empty() {
        println!();
        println!("Recent backers:");
        for backer in recent {
            println!("  {}  ${}", backer.user_name, backer.amount);
        }
    }

    println!();
    let comments = project.comments_newest_first();
    println!("Comments ({}):", comments.len());
    for comment in comments {
        println!(
            "  {} · {}",
            comment.user_name,
            comment.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("    {}", comment.content);
    }
}
