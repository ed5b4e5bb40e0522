//! Command implementations.

pub mod auth;
pub mod completions;
pub mod create;
pub mod init;
pub mod list;
pub mod show;
pub mod similar;
pub mod status;
pub mod version;

use issueboard_core::{Result, User, workflow};

use crate::storage::BoardPaths;

/// The signed-in user; protected commands call this first.
fn signed_in(paths: &BoardPaths) -> Result<User> {
    let identity = paths.open_identity()?;
    let user = workflow::require_user(&identity)?;
    tracing::debug!(user = %user.email, "authenticated");
    Ok(user)
}
