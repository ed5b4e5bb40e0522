//! Output formatting for `issueboard`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON goes to stdout; diagnostics stay on stderr.
//!
//! # JSON Output Types
//!
//! - [`IssueList`] - Filtered issues (list)
//! - [`CreateResult`] - Created issue or declined duplicates (create)
//! - [`StatusChange`] - Applied transition (status)
//! - [`SimilarReport`] - Detector result (similar)

mod output;
mod text;

use serde::Serialize;

pub use output::{CreateResult, ErrorOutput, IssueList, SimilarReport, StatusChange};
pub use text::{
    TITLE_WIDTH, format_issue_card, format_issue_line, format_priority, format_similar_prompt,
    format_status_icon, icons, truncate_to_width,
};

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> issueboard_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
