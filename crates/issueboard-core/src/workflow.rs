//! User-facing operations composed from the core pieces.
//!
//! Each function takes its collaborators and the acting user explicitly.

use crate::backend::{DocumentStore, IdentityProvider};
use crate::error::{BoardError, Result};
use crate::model::{Issue, IssueDraft, IssueUpdate, Status, User};
use crate::similarity::check_for_similar_issues;
use crate::transition::check_transition;
use crate::validation::IssueValidator;

/// Result of a creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The issue was written.
    Created(Issue),
    /// Similar issues exist and the user chose not to continue.
    Declined { similar: Vec<String> },
}

impl CreateOutcome {
    #[must_use]
    pub const fn issue(&self) -> Option<&Issue> {
        match self {
            Self::Created(issue) => Some(issue),
            Self::Declined { .. } => None,
        }
    }
}

/// Create an issue on behalf of `author`.
///
/// The draft is validated, then checked for similar titles. When any are
/// found `confirm` is called with them; returning `false` aborts with
/// nothing written. The similarity check finishes before the write starts.
///
/// # Errors
///
/// Returns a validation error for a bad draft, or the store's error if the
/// write fails. A failing similarity check is not an error.
pub fn create_issue<S, F>(
    store: &mut S,
    author: &User,
    draft: IssueDraft,
    confirm: F,
) -> Result<CreateOutcome>
where
    S: DocumentStore + ?Sized,
    F: FnOnce(&[String]) -> bool,
{
    IssueValidator::validate(&draft).map_err(BoardError::from_validation_errors)?;

    let similar = check_for_similar_issues(&*store, draft.title.trim());
    if !similar.is_empty() {
        tracing::info!(count = similar.len(), "similar issues found");
        if !confirm(&similar) {
            tracing::info!("creation declined");
            return Ok(CreateOutcome::Declined { similar });
        }
    }

    let created = store.create_issue(draft.into_new_issue(author))?;
    Ok(CreateOutcome::Created(created))
}

/// Move `issue` to `requested` and persist the change.
///
/// Uses the status on the given copy; there is no check against the stored
/// version, so concurrent writers resolve last-write-wins at the store.
///
/// # Errors
///
/// Returns `RuleViolation` without writing if the move is forbidden, or the
/// store's error if the write fails.
pub fn change_status<S>(store: &mut S, issue: &Issue, requested: Status) -> Result<Issue>
where
    S: DocumentStore + ?Sized,
{
    if let Err(err) = check_transition(issue.status, requested) {
        tracing::warn!(id = %issue.id, from = %issue.status, to = %requested, "transition refused");
        return Err(err);
    }

    store.update_issue(&issue.id, &IssueUpdate::status(requested))?;

    let mut updated = issue.clone();
    updated.status = requested;
    Ok(updated)
}

/// Create an account, then sign out so the user logs in explicitly.
///
/// # Errors
///
/// Returns the provider's error if the account cannot be created.
pub fn sign_up<P>(identity: &mut P, email: &str, password: &str) -> Result<User>
where
    P: IdentityProvider + ?Sized,
{
    let user = identity.create_account(email, password)?;
    identity.end_session()?;
    Ok(user)
}

/// Sign in.
///
/// # Errors
///
/// Returns `InvalidCredentials` or a backend failure.
pub fn log_in<P>(identity: &mut P, email: &str, password: &str) -> Result<User>
where
    P: IdentityProvider + ?Sized,
{
    identity.authenticate(email.trim(), password)
}

/// Sign out.
///
/// # Errors
///
/// Returns a backend failure if the session cannot be cleared.
pub fn log_out<P>(identity: &mut P) -> Result<()>
where
    P: IdentityProvider + ?Sized,
{
    identity.end_session()
}

/// The signed-in user, required for protected operations.
///
/// # Errors
///
/// Returns `NotAuthenticated` when nobody is signed in.
pub fn require_user<P>(identity: &P) -> Result<User>
where
    P: IdentityProvider + ?Sized,
{
    identity.current_user().ok_or(BoardError::NotAuthenticated)
}
