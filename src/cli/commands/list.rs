//! List command implementation.
//!
//! Renders the dashboard: every issue newest first, narrowed by the status
//! and priority filters.

use std::cell::RefCell;
use std::rc::Rc;

use issueboard_core::{BoardError, Dashboard, IssueFilters, Result};

use crate::cli::{CommandContext, ListArgs};
use crate::format::{IssueList, format_issue_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the issues cannot be loaded.
pub fn execute(args: &ListArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    super::signed_in(&paths)?;
    let store = paths.open_store()?;

    let dashboard = Rc::new(RefCell::new(Dashboard::new(IssueFilters {
        status: args.status,
        priority: args.priority,
    })));
    let subscription = Dashboard::attach(&store, &dashboard);

    let view = dashboard.borrow();
    if let Some(notice) = view.notice() {
        return Err(BoardError::backend(notice));
    }
    let issues = view.visible();
    tracing::debug!(
        total = view.all().len(),
        visible = issues.len(),
        "dashboard loaded"
    );

    if ctx.is_json() {
        print_json(&IssueList {
            status: args.status.to_string(),
            priority: args.priority.to_string(),
            total: issues.len(),
            issues: issues.into_iter().cloned().collect(),
        })?;
    } else if issues.is_empty() {
        println!("No issues found matching your filters.");
    } else {
        for issue in &issues {
            println!("{}", format_issue_line(issue));
        }
        println!("\n{} issue(s)", issues.len());
    }

    drop(view);
    drop(subscription);
    Ok(())
}
