//! Show command implementation.

use issueboard_core::{DocumentStore, Result};

use crate::cli::{CommandContext, ShowArgs};
use crate::format::{format_issue_card, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the issue does not exist.
pub fn execute(args: &ShowArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    super::signed_in(&paths)?;
    let store = paths.open_store()?;
    let issue = store.get_issue(args.id.trim())?;

    if ctx.is_json() {
        print_json(&issue)?;
    } else {
        print!("{}", format_issue_card(&issue));
    }
    Ok(())
}
