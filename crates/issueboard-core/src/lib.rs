//! `issueboard-core` - Issue lifecycle, filtering and duplicate detection.
//!
//! Backend-agnostic core of the issue board. Storage and sign-in sit behind
//! the [`DocumentStore`] and [`IdentityProvider`] traits; [`InMemoryStore`]
//! and [`InMemoryIdentity`] implement them in process with JSONL persistence.
//!
//! # Quick Start
//!
//! ```no_run
//! use issueboard_core::{InMemoryIdentity, InMemoryStore, IssueDraft, Status, workflow};
//!
//! let mut identity = InMemoryIdentity::open(".issueboard/users.jsonl", ".issueboard/session.json").unwrap();
//! let mut store = InMemoryStore::open(".issueboard/issues.jsonl").unwrap();
//!
//! let user = workflow::log_in(&mut identity, "kim@example.com", "hunter22").unwrap();
//!
//! // Ask before creating a likely duplicate
//! let outcome = workflow::create_issue(&mut store, &user, IssueDraft::new("Login bug"), |similar| {
//!     similar.is_empty()
//! })
//! .unwrap();
//!
//! if let Some(issue) = outcome.issue() {
//!     // Open -> Done is refused; go through In Progress
//!     let issue = workflow::change_status(&mut store, issue, Status::InProgress).unwrap();
//!     workflow::change_status(&mut store, &issue, Status::Done).unwrap();
//! }
//!
//! store.save().unwrap();
//! ```

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backend;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod jsonl;
pub mod model;
pub mod query;
pub mod similarity;
pub mod store;
pub mod transition;
pub mod util;
pub mod validation;
pub mod workflow;

pub use backend::{ChangeListener, DocumentStore, IdentityProvider, Subscription};
pub use dashboard::Dashboard;
pub use error::{BoardError, Result, ValidationError};
pub use identity::InMemoryIdentity;
pub use model::{Issue, IssueDraft, IssueUpdate, NewIssue, Priority, Status, User};
pub use query::{IssueFilters, PriorityFilter, Selection, StatusFilter, visible_issues};
pub use similarity::{check_for_similar_issues, find_similar, is_similar};
pub use store::InMemoryStore;
pub use transition::{attempt_transition, check_transition};
pub use workflow::CreateOutcome;
