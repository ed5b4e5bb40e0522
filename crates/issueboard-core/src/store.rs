//! In-memory document store for the `issues` collection.
//!
//! Implements [`DocumentStore`] without any database. Use `open()` to load
//! from a JSONL file and `save()` to persist back.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::backend::{ChangeListener, DocumentStore, ListenerRegistry, Subscription};
use crate::error::{BoardError, Result};
use crate::jsonl;
use crate::model::{Issue, IssueUpdate, NewIssue};
use crate::util::{ISSUE_ID_PREFIX, generate_id};

/// In-memory issue store.
///
/// Issues are kept in insertion order; listings sort newest `created_at`
/// first, and issues created within the same clock tick list later-created
/// first.
pub struct InMemoryStore {
    issues: Vec<Issue>,
    listeners: ListenerRegistry,
    jsonl_path: Option<PathBuf>,
    dirty: bool,
}

impl InMemoryStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            listeners: ListenerRegistry::new(),
            jsonl_path: None,
            dirty: false,
        }
    }

    /// Create a store holding `issues` as already-persisted documents.
    #[must_use]
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            ..Self::new()
        }
    }

    /// Open and load from a JSONL file. A missing file opens an empty store
    /// that will be written on the first `save()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let issues: Vec<Issue> = jsonl::load_or_empty(path)?;
        tracing::debug!(path = %path.display(), issues = issues.len(), "opened issue store");

        let mut store = Self::with_issues(issues);
        store.jsonl_path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no file path is set, or `Io` on write failure.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .jsonl_path
            .clone()
            .ok_or_else(|| BoardError::Config("No file path set; use save_to()".to_string()))?;
        self.save_to(&path)?;
        self.dirty = false;
        Ok(())
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        jsonl::save(path.as_ref(), &self.issues)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Issues newest first.
    #[must_use]
    pub fn ordered(&self) -> Vec<Issue> {
        let mut ordered: Vec<Issue> = self.issues.iter().rev().cloned().collect();
        // Stable sort keeps later inserts first among equal timestamps.
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ordered
    }

    #[must_use]
    pub fn id_exists(&self, id: &str) -> bool {
        self.issues.iter().any(|i| i.id == id)
    }

    /// Whether there are writes not yet saved.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn notify(&self) {
        if !self.listeners.is_empty() {
            self.listeners.notify(&self.ordered());
        }
    }
}

impl DocumentStore for InMemoryStore {
    fn create_issue(&mut self, fields: NewIssue) -> Result<Issue> {
        let now = Utc::now();
        let seed = format!("{}|{}", fields.title, fields.created_by);
        let id = generate_id(ISSUE_ID_PREFIX, &seed, now, self.issues.len(), |id| {
            self.id_exists(id)
        });

        let issue = Issue {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            assigned_to: fields.assigned_to,
            status: fields.status,
            created_by: fields.created_by,
            created_at: now,
        };

        tracing::info!(id = %issue.id, title = %issue.title, "issue created");
        self.issues.push(issue.clone());
        self.dirty = true;
        self.notify();

        Ok(issue)
    }

    fn update_issue(&mut self, id: &str, update: &IssueUpdate) -> Result<()> {
        let issue = self
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BoardError::IssueNotFound { id: id.to_string() })?;

        if update.is_empty() {
            return Ok(());
        }

        if let Some(status) = update.status {
            tracing::info!(id, from = %issue.status, to = %status, "status updated");
            issue.status = status;
        }

        self.dirty = true;
        self.notify();
        Ok(())
    }

    fn list_issues(&self) -> Result<Vec<Issue>> {
        Ok(self.ordered())
    }

    fn get_issue(&self, id: &str) -> Result<Issue> {
        self.issues
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| BoardError::IssueNotFound { id: id.to_string() })
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<Subscription> {
        Ok(self.listeners.register(listener, &self.ordered()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn new_issue(title: &str) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Medium,
            assigned_to: None,
            status: Status::Open,
            created_by: "kim@example.com".to_string(),
        }
    }

    fn stored(id: &str, title: &str, minutes: i64) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Low,
            assigned_to: None,
            status: Status::Open,
            created_by: "kim@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let mut store = InMemoryStore::new();
        let before = Utc::now();
        let created = store.create_issue(new_issue("Login bug")).unwrap();
        assert!(created.id.starts_with("iss-"));
        assert!(created.created_at >= before);
        assert_eq!(created.status, Status::Open);
        assert_eq!(store.get_issue(&created.id).unwrap(), created);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_list_newest_first() {
        let store = InMemoryStore::with_issues(vec![
            stored("iss-a", "oldest", 0),
            stored("iss-c", "newest", 20),
            stored("iss-b", "middle", 10),
        ]);
        let titles: Vec<String> = store
            .list_issues()
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_list_ties_prefer_later_insert() {
        let store = InMemoryStore::with_issues(vec![
            stored("iss-a", "first", 5),
            stored("iss-b", "second", 5),
        ]);
        let ids: Vec<String> = store.ordered().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["iss-b", "iss-a"]);
    }

    #[test]
    fn test_update_status_only() {
        let mut store = InMemoryStore::with_issues(vec![stored("iss-a", "A", 0)]);
        store
            .update_issue("iss-a", &IssueUpdate::status(Status::InProgress))
            .unwrap();
        let issue = store.get_issue("iss-a").unwrap();
        assert_eq!(issue.status, Status::InProgress);
        assert_eq!(issue.title, "A");
    }

    #[test]
    fn test_update_nonexistent() {
        let mut store = InMemoryStore::new();
        let result = store.update_issue("iss-nope", &IssueUpdate::status(Status::Done));
        assert!(matches!(result, Err(BoardError::IssueNotFound { .. })));
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let mut store = InMemoryStore::new();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sizes);
        let sub = store
            .subscribe(Box::new(move |issues: &[Issue]| {
                sink.borrow_mut().push(issues.len());
            }))
            .unwrap();

        let created = store.create_issue(new_issue("One")).unwrap();
        store.create_issue(new_issue("Two")).unwrap();
        store
            .update_issue(&created.id, &IssueUpdate::status(Status::InProgress))
            .unwrap();
        assert_eq!(*sizes.borrow(), vec![0, 1, 2, 2]);

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
        store.create_issue(new_issue("Three")).unwrap();
        assert_eq!(sizes.borrow().len(), 4);
    }

    #[test]
    fn test_open_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.jsonl");

        let mut store = InMemoryStore::open(&path).unwrap();
        assert!(store.is_empty());
        let created = store.create_issue(new_issue("Persist me")).unwrap();
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reopened = InMemoryStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get_issue(&created.id).unwrap(), created);
    }

    #[test]
    fn test_save_without_path() {
        let mut store = InMemoryStore::new();
        assert!(matches!(store.save(), Err(BoardError::Config(_))));
    }
}
