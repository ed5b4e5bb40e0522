//! Error types for `issueboard-core`.
//!
//! Every failure the core can produce ends up in [`BoardError`]. The CLI
//! never shows these raw; it calls [`BoardError::user_message`] so backend
//! failures become a generic notice and rule violations stay actionable.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Status;

/// Primary error type for issue board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    // === Workflow Errors ===
    /// Requested status change is not allowed.
    #[error("Rule violation: cannot move directly from {from} to {to}; move to In Progress first")]
    RuleViolation { from: Status, to: Status },

    // === Issue Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", join_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status} (expected Open, In Progress or Done)")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority} (expected Low, Medium or High)")]
    InvalidPriority { priority: String },

    // === Identity Errors ===
    /// No user is signed in.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Credentials were rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("Email already in use: {email}")]
    EmailInUse { email: String },

    // === Backend Errors ===
    /// The identity provider or document store could not complete a request.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Workspace has not been initialized.
    #[error("Issue board not initialized: run 'ib init'")]
    NotInitialized,

    /// Workspace already exists.
    #[error("Issue board already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    // === JSONL Errors ===
    /// Failed to parse a line in a JSONL file.
    #[error("JSONL parse error at line {line}: {reason}")]
    JsonlParse { line: usize, reason: String },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BoardError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn backend(reason: impl std::fmt::Display) -> Self {
        Self::BackendUnavailable(reason.to_string())
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for failures of the identity provider or document store.
    ///
    /// I/O and decoding failures count: for the file-backed collaborators
    /// they are how an unreachable backend shows up.
    #[must_use]
    pub const fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable(_)
                | Self::Io(_)
                | Self::Json(_)
                | Self::JsonlParse { .. }
                | Self::FileNotFound(_)
        )
    }

    /// The message shown to the user for this failure.
    ///
    /// Rule violations and input problems are actionable and shown as-is.
    /// Backend failures collapse to a generic notice; the details go to the
    /// log instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RuleViolation { .. } => {
                "Rule violation: you cannot move an issue directly from Open to Done. \
                 Move it to In Progress first."
                    .to_string()
            }
            Self::NotAuthenticated => "You must log in first (ib login <email>).".to_string(),
            err if err.is_backend_failure() => {
                "Something went wrong talking to the issue board backend. Please try again."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type using `BoardError`.
pub type Result<T> = std::result::Result<T, BoardError>;
