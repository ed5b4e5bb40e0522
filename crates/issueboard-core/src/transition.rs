//! Status transition guard.
//!
//! The workflow is free-form with a single guardrail: an issue cannot jump
//! from `Open` straight to `Done`. Every other move, including moving back
//! from `Done` and re-selecting the current status, is allowed.

use crate::error::{BoardError, Result};
use crate::model::{Issue, Status};

/// Check whether `from -> to` is an allowed status change.
///
/// # Errors
///
/// Returns `RuleViolation` for `Open -> Done`.
pub fn check_transition(from: Status, to: Status) -> Result<()> {
    match (from, to) {
        (Status::Open, Status::Done) => Err(BoardError::RuleViolation { from, to }),
        _ => Ok(()),
    }
}

/// Apply a requested status change to a local copy of an issue.
///
/// On success only `status` changes. On failure the issue is untouched and
/// the caller must not write anything to the store.
///
/// # Errors
///
/// Returns `RuleViolation` if the transition is forbidden.
pub fn attempt_transition(issue: &mut Issue, requested: Status) -> Result<()> {
    check_transition(issue.status, requested)?;
    issue.status = requested;
    Ok(())
}
