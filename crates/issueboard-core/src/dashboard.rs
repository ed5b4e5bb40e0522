//! Dashboard view state.
//!
//! Holds what the issue list screen shows: the loaded issues, the two filter
//! selections, whether the first snapshot has arrived, and the last error
//! notice. The visible set is recomputed synchronously whenever the issues
//! or a filter change.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{DocumentStore, Subscription};
use crate::error::BoardError;
use crate::model::{Issue, Priority, Status};
use crate::query::{IssueFilters, Selection, visible_issues};

#[derive(Debug, Clone)]
pub struct Dashboard {
    issues: Vec<Issue>,
    filters: IssueFilters,
    /// Issues passing `filters`, in list order.
    visible: Vec<Issue>,
    loading: bool,
    notice: Option<String>,
}

impl Dashboard {
    #[must_use]
    pub fn new(filters: IssueFilters) -> Self {
        Self {
            issues: Vec::new(),
            filters,
            visible: Vec::new(),
            loading: true,
            notice: None,
        }
    }

    /// Subscribe `dashboard` to `store`. The returned handle keeps it live;
    /// drop it when the view goes away.
    ///
    /// If the subscription cannot be established, loading stops, the
    /// failure is recorded as the notice, and `None` is returned.
    pub fn attach<S>(store: &S, dashboard: &Rc<RefCell<Self>>) -> Option<Subscription>
    where
        S: DocumentStore + ?Sized,
    {
        let target = Rc::clone(dashboard);
        let listener = Box::new(move |issues: &[Issue]| {
            target.borrow_mut().apply_snapshot(issues.to_vec());
        });

        match store.subscribe(listener) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::error!(error = %err, "failed to subscribe to issues");
                dashboard.borrow_mut().apply_error(&err);
                None
            }
        }
    }

    /// Replace the loaded issues with a fresh newest-first snapshot.
    pub fn apply_snapshot(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
        self.loading = false;
        self.notice = None;
        self.refresh();
    }

    /// Record a load failure.
    pub fn apply_error(&mut self, err: &BoardError) {
        self.loading = false;
        self.notice = Some(err.user_message());
    }

    pub fn set_status_filter(&mut self, status: Selection<Status>) {
        self.filters.status = status;
        self.refresh();
    }

    pub fn set_priority_filter(&mut self, priority: Selection<Priority>) {
        self.filters.priority = priority;
        self.refresh();
    }

    #[must_use]
    pub const fn filters(&self) -> IssueFilters {
        self.filters
    }

    /// True until the first snapshot (or failure) arrives.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Every loaded issue, newest first.
    #[must_use]
    pub fn all(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues passing the current filters, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&Issue> {
        self.visible.iter().collect()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Find a loaded issue by ID.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    fn refresh(&mut self) {
        self.visible = visible_issues(&self.issues, self.filters.status, self.filters.priority)
            .into_iter()
            .cloned()
            .collect();
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(IssueFilters::default())
    }
}
