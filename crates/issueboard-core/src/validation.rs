//! Validation helpers.
//!
//! These routines enforce the board's field constraints and return
//! structured validation errors without touching any collaborator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::model::IssueDraft;

const MAX_TITLE_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 102_400;
const MAX_ASSIGNEE_LEN: usize = 200;
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates the user-supplied fields of a new issue.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a draft and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(draft: &IssueDraft) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Title: required, max 500 chars.
        if draft.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }
        if draft.title.chars().count() > MAX_TITLE_LEN {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        // Description: free text, max 100KB.
        if draft.description.len() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::new("description", "exceeds 100KB"));
        }

        if let Some(assignee) = draft.assigned_to.as_ref() {
            if assignee.chars().count() > MAX_ASSIGNEE_LEN {
                errors.push(ValidationError::new(
                    "assigned_to",
                    "exceeds 200 characters",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validates sign-up and sign-in credentials.
pub struct CredentialValidator;

impl CredentialValidator {
    /// Validate an email address.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the address is malformed.
    pub fn validate_email(email: &str) -> Result<(), ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::new("email", "cannot be empty"));
        }
        if !EMAIL_RE.is_match(email.trim()) {
            return Err(ValidationError::new("email", "invalid email address"));
        }
        Ok(())
    }

    /// Validate a new account's password.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the password is too short.
    pub fn validate_password(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                "must be at least 6 characters",
            ));
        }
        Ok(())
    }

    /// Validate both fields of a new account, collecting every error.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if either field is invalid.
    pub fn validate_new_account(email: &str, password: &str) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            Self::validate_email(email).err(),
            Self::validate_password(password).err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = IssueDraft {
            title: "Login button not working".to_string(),
            description: "Nothing happens on click".to_string(),
            ..Default::default()
        };
        assert!(IssueValidator::validate(&draft).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let errors = IssueValidator::validate(&IssueDraft::new("   ")).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new("title", "cannot be empty")]);
    }

    #[test]
    fn test_long_fields_all_reported() {
        let draft = IssueDraft {
            title: "x".repeat(501),
            description: String::new(),
            assigned_to: Some("y".repeat(201)),
            ..Default::default()
        };
        let errors = IssueValidator::validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "assigned_to");
    }

    #[test]
    fn test_email_validation() {
        assert!(CredentialValidator::validate_email("kim@example.com").is_ok());
        assert!(CredentialValidator::validate_email("kim@example").is_err());
        assert!(CredentialValidator::validate_email("kim example.com").is_err());
        assert!(CredentialValidator::validate_email("").is_err());
    }

    #[test]
    fn test_password_minimum() {
        assert!(CredentialValidator::validate_password("hunter2").is_ok());
        assert!(CredentialValidator::validate_password("12345").is_err());
    }

    #[test]
    fn test_new_account_collects_both_errors() {
        let errors = CredentialValidator::validate_new_account("nope", "123").unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }
}
