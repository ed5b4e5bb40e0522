//! Similar command implementation.

use issueboard_core::{BoardError, Result, check_for_similar_issues};

use crate::cli::{CommandContext, SimilarArgs};
use crate::format::{SimilarReport, print_json};

/// Execute the similar command.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the title is blank, or the
/// board cannot be opened. A failing lookup is reported as no matches.
pub fn execute(args: &SimilarArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    super::signed_in(&paths)?;

    // A blank candidate is a substring of every title.
    let title = args.title.trim();
    if title.is_empty() {
        return Err(BoardError::validation("title", "cannot be empty"));
    }

    let store = paths.open_store()?;
    let similar = check_for_similar_issues(&store, title);

    if ctx.is_json() {
        print_json(&SimilarReport {
            title: title.to_string(),
            similar,
        })?;
    } else if similar.is_empty() {
        println!("No similar issues.");
    } else {
        for existing in &similar {
            println!("- {existing}");
        }
    }
    Ok(())
}
