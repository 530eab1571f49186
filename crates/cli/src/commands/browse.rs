//! Browse the project list with filters and sorting.
//!
//! # Usage
//!
//! ```bash
//! gs-cli browse
//! gs-cli browse --search recorder --category technology --sort funding
//! ```

use thiserror::Error;

use groundswell_client::{CategoryFilter, ProjectsStore, SortBy};
use groundswell_core::Category;

/// Errors specific to the browse command.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The sort flag was not one of the known orders.
    #[error("unknown sort order: {0}. Valid orders: newest, funding, deadline")]
    UnknownSort(String),
}

/// Run the browse command.
///
/// # Errors
///
/// Returns an error for an unknown sort order, missing configuration, or a
/// store failure.
pub async fn run(
    search: Option<String>,
    category: Option<String>,
    sort: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let sort_by = parse_sort(sort)?;
    let (_, client) = super::connect()?;

    let mut store = ProjectsStore::new();
    store.set_loading(true);

    match client.fetch_all().await {
        Ok(projects) => store.set_projects(projects),
        Err(e) => {
            // The caller owns resetting the loading indicator on failure
            store.set_error(Some(e.to_string()));
            return Err(e.into());
        }
    }

    if let Some(term) = search {
        store.set_search_term(term);
    }
    store.set_category_filter(
        category.map_or(CategoryFilter::All, |c| CategoryFilter::One(Category::from(c))),
    );
    store.set_sort_by(sort_by);

    print_listing(&store);
    Ok(())
}

fn parse_sort(sort: &str) -> Result<SortBy, BrowseError> {
    match sort {
        "newest" => Ok(SortBy::Newest),
        "funding" => Ok(SortBy::Funding),
        "deadline" => Ok(SortBy::Deadline),
        other => Err(BrowseError::UnknownSort(other.to_string())),
    }
}

#[allow(clippy::print_stdout)]
fn print_listing(store: &ProjectsStore) {
    let visible = store.visible_projects();

    if visible.is_empty() {
        println!("No projects found. Try adjusting your search or filter criteria.");
        return;
    }

    for project in &visible {
        println!(
            "{} [{}]  {}  {}% funded  {} days left  {} backers",
            project.title,
            project.id,
            project.category,
            project.funding_percentage().round(),
            project.days_remaining(),
            project.backers.len(),
        );
    }

    let stats = store.stats();
    println!();
    println!(
        "{} projects · {} backers · ${} raised",
        stats.project_count, stats.backer_count, stats.total_raised
    );
}
