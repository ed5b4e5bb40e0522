//! In-memory identity provider.
//!
//! Accounts are keyed by lower-cased email and store a salted SHA-256
//! password digest. The signed-in user is a session that can be persisted
//! next to the accounts file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::backend::IdentityProvider;
use crate::error::{BoardError, Result};
use crate::jsonl;
use crate::model::User;
use crate::util::{USER_ID_PREFIX, generate_id, password_digest};
use crate::validation::CredentialValidator;

/// A stored account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

impl Account {
    fn user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }

    fn verify(&self, password: &str) -> bool {
        password_digest(&self.id, password) == self.password_hash
    }
}

/// In-memory identity provider with optional file persistence.
#[derive(Debug, Default)]
pub struct InMemoryIdentity {
    accounts: HashMap<String, Account>,
    current: Option<User>,
    accounts_path: Option<PathBuf>,
    session_path: Option<PathBuf>,
}

impl InMemoryIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load accounts and the persisted session.
    ///
    /// Missing files are treated as empty. A session naming an account that
    /// no longer exists is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if either file exists but cannot be parsed.
    pub fn open(accounts_path: impl AsRef<Path>, session_path: impl AsRef<Path>) -> Result<Self> {
        let accounts_path = accounts_path.as_ref();
        let session_path = session_path.as_ref();

        let loaded: Vec<Account> = jsonl::load_or_empty(accounts_path)?;
        let accounts: HashMap<String, Account> = loaded
            .into_iter()
            .map(|a| (normalize_email(&a.email), a))
            .collect();

        let current = match fs::read_to_string(session_path) {
            Ok(text) if !text.trim().is_empty() => {
                let user: User = serde_json::from_str(&text)?;
                accounts
                    .get(&normalize_email(&user.email))
                    .filter(|a| a.id == user.id)
                    .map(Account::user)
            }
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(BoardError::Io(e)),
        };

        Ok(Self {
            accounts,
            current,
            accounts_path: Some(accounts_path.to_path_buf()),
            session_path: Some(session_path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn persist_accounts(&self) -> Result<()> {
        let Some(path) = self.accounts_path.as_deref() else {
            return Ok(());
        };
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        jsonl::save(path, &accounts)
    }

    fn persist_session(&self) -> Result<()> {
        let Some(path) = self.session_path.as_deref() else {
            return Ok(());
        };
        match &self.current {
            Some(user) => fs::write(path, serde_json::to_string_pretty(user)?)?,
            None => match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(BoardError::Io(e)),
            },
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl IdentityProvider for InMemoryIdentity {
    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    fn create_account(&mut self, email: &str, password: &str) -> Result<User> {
        CredentialValidator::validate_new_account(email, password)
            .map_err(BoardError::from_validation_errors)?;

        let key = normalize_email(email);
        if self.accounts.contains_key(&key) {
            return Err(BoardError::EmailInUse { email: key });
        }

        let id = generate_id(USER_ID_PREFIX, &key, Utc::now(), self.accounts.len(), |id| {
            self.accounts.values().any(|a| a.id == id)
        });
        let account = Account {
            password_hash: password_digest(&id, password),
            id,
            email: email.trim().to_string(),
        };
        let user = account.user();
        self.accounts.insert(key, account);
        self.persist_accounts()?;

        // Signing up signs the new user in, like the hosted provider does.
        self.current = Some(user.clone());
        self.persist_session()?;
        tracing::info!(user = %user.email, "account created");

        Ok(user)
    }

    fn authenticate(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self
            .accounts
            .get(&normalize_email(email))
            .filter(|a| a.verify(password))
            .map(Account::user)
            .ok_or(BoardError::InvalidCredentials)?;

        self.current = Some(user.clone());
        self.persist_session()?;
        tracing::info!(user = %user.email, "signed in");
        Ok(user)
    }

    fn end_session(&mut self) -> Result<()> {
        if let Some(user) = self.current.take() {
            tracing::info!(user = %user.email, "signed out");
        }
        self.persist_session()
    }
}
