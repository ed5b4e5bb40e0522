//! Status command implementation.

use issueboard_core::{DocumentStore, Result, workflow};

use crate::cli::{CommandContext, StatusArgs};
use crate::format::{StatusChange, format_status_icon, print_json};

/// Execute the status command.
///
/// # Errors
///
/// Returns `RuleViolation` for Open -> Done, `IssueNotFound` for an unknown
/// id, or an error if the change cannot be saved.
pub fn execute(args: &StatusArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    super::signed_in(&paths)?;
    let mut store = paths.open_store()?;

    let issue = store.get_issue(args.id.trim())?;
    let from = issue.status;
    let updated = workflow::change_status(&mut store, &issue, args.status)?;
    store.save()?;

    if ctx.is_json() {
        print_json(&StatusChange {
            id: updated.id,
            from,
            to: updated.status,
        })?;
    } else {
        println!(
            "{} {}: {} -> {}",
            format_status_icon(updated.status),
            updated.id,
            from,
            updated.status
        );
    }
    Ok(())
}
