//! File-backed workspace for `issueboard`.
//!
//! A workspace is a `.issueboard/` directory holding:
//! - `issues.jsonl` - the issues collection
//! - `users.jsonl` - accounts
//! - `session.json` - the signed-in user, absent when signed out
//! - `config.yaml` - workspace configuration

use std::fs;
use std::path::{Path, PathBuf};

use issueboard_core::{BoardError, InMemoryIdentity, InMemoryStore, Result};

use crate::config::CONFIG_FILE_NAME;

pub const ISSUES_FILE: &str = "issues.jsonl";
pub const USERS_FILE: &str = "users.jsonl";
pub const SESSION_FILE: &str = "session.json";

const CONFIG_TEMPLATE: &str = r"# Issue board configuration
# default_priority: low
# log_file: ~/.local/state/issueboard/ib.log
# json: false
";

const GITIGNORE: &str = r"# Accounts and session stay local
users.jsonl
session.json

# Temporary
*.tmp
";

/// Paths inside one workspace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPaths {
    pub root: PathBuf,
    pub issues: PathBuf,
    pub users: PathBuf,
    pub session: PathBuf,
    pub config: PathBuf,
}

impl BoardPaths {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            issues: root.join(ISSUES_FILE),
            users: root.join(USERS_FILE),
            session: root.join(SESSION_FILE),
            config: root.join(CONFIG_FILE_NAME),
            root,
        }
    }

    /// Load the issues collection.
    ///
    /// # Errors
    ///
    /// Returns an error if `issues.jsonl` exists but cannot be parsed.
    pub fn open_store(&self) -> Result<InMemoryStore> {
        InMemoryStore::open(&self.issues)
    }

    /// Load accounts and the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if `users.jsonl` or `session.json` cannot be parsed.
    pub fn open_identity(&self) -> Result<InMemoryIdentity> {
        InMemoryIdentity::open(&self.users, &self.session)
    }
}

/// Create a workspace at `root`.
///
/// Existing config and `.gitignore` files are kept. With `force`, an
/// existing workspace is accepted and its issues file left as is.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if `root` already holds an issues file and
/// `force` is not set, or `Io` if a file cannot be written.
pub fn init_board(root: &Path, force: bool) -> Result<BoardPaths> {
    let paths = BoardPaths::new(root);

    if paths.issues.exists() && !force {
        return Err(BoardError::AlreadyInitialized { path: paths.issues });
    }
    fs::create_dir_all(&paths.root)?;

    if !paths.issues.exists() {
        fs::write(&paths.issues, "")?;
    }
    if !paths.config.exists() {
        fs::write(&paths.config, CONFIG_TEMPLATE)?;
    }
    let gitignore = paths.root.join(".gitignore");
    if !gitignore.exists() {
        fs::write(gitignore, GITIGNORE)?;
    }

    tracing::info!(path = %paths.root.display(), "initialized issue board");
    Ok(paths)
}
