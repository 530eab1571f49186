//! Comment on a project.
//!
//! # Usage
//!
//! ```bash
//! gs-cli comment p-42 --message "Looking forward to this"
//! ```

use groundswell_core::ProjectId;

/// Run the comment command.
///
/// # Errors
///
/// Returns an error when not signed in, for an empty message, or if the
/// store rejects the write (including an unknown project id).
pub async fn run(id: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = super::connect()?;
    let principal = super::require_principal(&config)?;

    let project_id = ProjectId::new(id);
    let comment_id = client.comment(&project_id, &principal, message).await?;
    tracing::info!(project_id = %project_id, comment_id = %comment_id, "Comment posted");

    #[allow(clippy::print_stdout)]
    {
        println!("Comment {comment_id} posted to {project_id}");
    }
    Ok(())
}
