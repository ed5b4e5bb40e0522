use issueboard_core::{Issue, Status};
use serde::Serialize;

/// Filtered issue list for the list view.
#[derive(Debug, Clone, Serialize)]
pub struct IssueList {
    pub status: String,
    pub priority: String,
    pub total: usize,
    pub issues: Vec<Issue>,
}

/// Result of a create attempt.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
    pub similar: Vec<String>,
}

/// Result of a status change.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub id: String,
    pub from: Status,
    pub to: Status,
}

/// Titles similar to a candidate.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarReport {
    pub title: String,
    pub similar: Vec<String>,
}

/// Error payload printed to stdout in JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    pub error: String,
}
