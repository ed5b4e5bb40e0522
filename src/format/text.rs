//! Text formatting functions for `issueboard`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Priority badges
//! - Issue lines and detail cards
//! - The similar-issues confirmation prompt

use std::fmt::Write as _;

use issueboard_core::{Issue, Priority, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open - not started (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Done - completed (checkmark).
    pub const DONE: &str = "✓";
}

/// Longest title shown on a list line, in terminal columns.
pub const TITLE_WIDTH: usize = 60;

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Done => icons::DONE,
    }
}

/// Format priority as a bracketed badge.
#[must_use]
pub fn format_priority(priority: Priority) -> String {
    format!("[{priority}]")
}

/// Cut `text` to at most `max` terminal columns, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{priority}] {title} ({assignee})`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "{} {} {} {} ({})",
        format_status_icon(issue.status),
        issue.id,
        format_priority(issue.priority),
        truncate_to_width(&issue.title, TITLE_WIDTH),
        issue.assignee_label(),
    )
}

/// Format the full detail view of one issue.
#[must_use]
pub fn format_issue_card(issue: &Issue) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", issue.id, issue.title);
    let _ = writeln!(
        out,
        "Status:      {} {}",
        format_status_icon(issue.status),
        issue.status
    );
    let _ = writeln!(out, "Priority:    {}", issue.priority);
    let _ = writeln!(out, "Assigned to: {}", issue.assignee_label());
    let _ = writeln!(out, "Created by:  {}", issue.created_by);
    let _ = writeln!(
        out,
        "Created:     {}",
        issue.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    if !issue.description.trim().is_empty() {
        out.push('\n');
        out.push_str(issue.description.trim_end());
        out.push('\n');
    }
    out
}

/// The question asked before creating a likely duplicate.
#[must_use]
pub fn format_similar_prompt(similar: &[String]) -> String {
    let mut out = String::from("We found similar issues:\n");
    for title in similar {
        out.push_str("- ");
        out.push_str(title);
        out.push('\n');
    }
    out.push_str("\nDo you still want to create this issue?");
    out
}
