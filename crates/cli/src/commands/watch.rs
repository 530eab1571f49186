//! Follow a project live until interrupted.
//!
//! # Usage
//!
//! ```bash
//! gs-cli watch p-42
//! ```
//!
//! Every snapshot the feed delivers is reconciled into the projection store
//! as the focused project, then rendered; Ctrl-C cancels the subscription
//! cleanly.

use groundswell_client::{Project, ProjectsStore, WatchEvent};
use groundswell_core::ProjectId;

/// Run the watch command.
///
/// # Errors
///
/// Returns an error for missing configuration; feed delivery failures are
/// reported and the feed keeps running.
pub async fn run(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_, client) = super::connect()?;
    let project_id = ProjectId::new(id);

    let mut store = ProjectsStore::new();
    let mut feed = client.subscribe(&project_id);
    tracing::info!(project_id = %project_id, "Watching; Ctrl-C to stop");

    loop {
        tokio::select! {
            event = feed.recv() => match event {
                Some(WatchEvent::Snapshot(snapshot)) => {
                    store.set_current_project(snapshot);
                    match store.current_project() {
                        Some(project) => print_summary(project),
                        None => tracing::warn!(project_id = %project_id, "Project does not exist"),
                    }
                }
                Some(WatchEvent::Error(e)) => {
                    store.set_error(Some(e.to_string()));
                    tracing::error!(project_id = %project_id, error = %e, "Feed delivery failed");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                feed.cancel();
                break;
            }
        }
    }

    tracing::info!(project_id = %project_id, "Stopped watching");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(project: &Project) {
    println!(
        "{}  ${} of ${} ({}%)  {} backers  {} comments",
        project.title,
        project.current_funding,
        project.funding_goal,
        project.funding_percentage().round(),
        project.backers.len(),
        project.comments.len(),
    );
}
