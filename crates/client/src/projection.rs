//! Client-side projection of remote state.
//!
//! [`ProjectsStore`] is the cache the presentation layer renders from: the
//! fetched project list, the single focused project, and transient
//! filter/sort state. It is rebuilt from repository results and subscription
//! snapshots through a fixed set of mutation entry points - there is no
//! ambient mutation, and `&mut self` makes the single-consumer assumption
//! structural rather than conventional.
//!
//! Derived queries are computed on read and never stored.

use rust_decimal::Decimal;

use groundswell_core::Category;

use crate::projects::Project;

/// Sort order for the visible project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Creation time, newest first.
    #[default]
    Newest,
    /// Current funding, highest first.
    Funding,
    /// End date, soonest first.
    Deadline,
}

/// Category filter for the visible project list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Exact category match.
    One(Category),
}

/// Aggregate numbers over the unfiltered project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of projects.
    pub project_count: usize,
    /// Total backers across all projects.
    pub backer_count: usize,
    /// Total funds raised across all projects.
    pub total_raised: Decimal,
}

/// The client-local cache of remote state plus UI filter/sort parameters.
///
/// The remote store stays authoritative; everything here is a cached copy.
#[derive(Debug, Default)]
pub struct ProjectsStore {
    projects: Vec<Project>,
    current_project: Option<Project>,
    loading: bool,
    error: Option<String>,
    search_term: String,
    category_filter: CategoryFilter,
    sort_by: SortBy,
}

impl ProjectsStore {
    /// An empty store: no projects, not loading, no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutation entry points (one per action)
    // =========================================================================

    /// Mark a fetch as started or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the project list wholesale and clear the loading flag.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.loading = false;
    }

    /// Prepend a newly created project.
    pub fn add_project(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    /// Replace the focused project wholesale.
    pub fn set_current_project(&mut self, project: Option<Project>) {
        self.current_project = project;
    }

    /// Reconcile one updated snapshot: replace it in the list if present, and
    /// replace the focused project if it is the same one. Whole-snapshot
    /// replacement only - partial field merges never happen.
    pub fn apply_update(&mut self, project: Project) {
        if let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) {
            *slot = project.clone();
        }
        if self
            .current_project
            .as_ref()
            .is_some_and(|current| current.id == project.id)
        {
            self.current_project = Some(project);
        }
    }

    /// Record a failure message and clear the loading flag.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.loading = false;
    }

    /// Set the free-text search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Set the category filter.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    /// Set the sort order.
    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    // =========================================================================
    // Read accessors and derived queries
    // =========================================================================

    /// The unfiltered project list, as last fetched.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The focused project, if any.
    #[must_use]
    pub const fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last recorded failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The filtered-and-sorted view of the project list.
    ///
    /// Search matches case-insensitively against title or description; the
    /// category filter is an exact match. The sort is stable, so projects
    /// that compare equal keep their original collection order.
    #[must_use]
    pub fn visible_projects(&self) -> Vec<&Project> {
        let search = self.search_term.to_lowercase();

        let mut visible: Vec<&Project> = self
            .projects
            .iter()
            .filter(|project| {
                search.is_empty()
                    || project.title.to_lowercase().contains(&search)
                    || project.description.to_lowercase().contains(&search)
            })
            .filter(|project| match &self.category_filter {
                CategoryFilter::All => true,
                CategoryFilter::One(category) => project.category == *category,
            })
            .collect();

        match self.sort_by {
            SortBy::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Funding => {
                visible.sort_by(|a, b| b.current_funding.cmp(&a.current_funding));
            }
            SortBy::Deadline => visible.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
        }

        visible
    }

    /// Aggregate numbers over the unfiltered list.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            project_count: self.projects.len(),
            backer_count: self.projects.iter().map(|p| p.backers.len()).sum(),
            total_raised: self.projects.iter().map(|p| p.current_funding).sum(),
        }
    }
}
