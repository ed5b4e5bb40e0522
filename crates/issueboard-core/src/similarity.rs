//! Duplicate detection for new issue titles.
//!
//! Two titles are similar when, ignoring case, either one contains the other
//! as a contiguous substring. That catches both a longer rephrasing of an
//! existing issue ("Checkout fails on mobile" vs "checkout fails") and a
//! shorter one ("bug" vs "Login bug report").
//!
//! Every check is a linear scan over all existing titles with no index and
//! no fuzzy matching. Boards are small, and edit-distance matching would
//! flag issues users do not consider duplicates.
//!
//! The check fails open: if the store cannot be read, no duplicates are
//! reported and creation goes ahead.

use crate::backend::DocumentStore;

/// Case-folded form used for comparison.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Whether `candidate` and `existing` are similar titles.
///
/// An empty candidate is contained in every title; callers reject empty
/// titles before asking.
#[must_use]
pub fn is_similar(candidate: &str, existing: &str) -> bool {
    let candidate = fold(candidate);
    let existing = fold(existing);
    candidate.contains(&existing) || existing.contains(&candidate)
}

/// Titles from `existing_titles` similar to `candidate`, in scan order.
///
/// Duplicated titles are reported once per occurrence.
#[must_use]
pub fn find_similar<I, S>(candidate: &str, existing_titles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let folded = fold(candidate);
    existing_titles
        .into_iter()
        .filter(|title| {
            let existing = fold(title.as_ref());
            folded.contains(&existing) || existing.contains(&folded)
        })
        .map(|title| title.as_ref().to_string())
        .collect()
}

/// Look up titles similar to `candidate` among all issues in `store`.
///
/// Never fails: when the store cannot be read the failure is logged and an
/// empty list is returned so creation stays available.
#[must_use]
pub fn check_for_similar_issues<S>(store: &S, candidate: &str) -> Vec<String>
where
    S: DocumentStore + ?Sized,
{
    match store.list_issues() {
        Ok(issues) => {
            let similar = find_similar(candidate, issues.iter().map(|i| i.title.as_str()));
            tracing::debug!(
                candidate,
                scanned = issues.len(),
                matches = similar.len(),
                "similarity check"
            );
            similar
        }
        Err(err) => {
            tracing::warn!(error = %err, "similarity check failed; assuming no similar issues");
            Vec::new()
        }
    }
}
