//! Filter types for the issue list.

use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::model::{Issue, Priority, Status};

/// A dropdown-style filter selection: everything, or one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => write!(f, "{value}"),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = BoardError>,
{
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

pub type StatusFilter = Selection<Status>;
pub type PriorityFilter = Selection<Priority>;

/// The two independent filter selections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueFilters {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl IssueFilters {
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.status.matches(&issue.status) && self.priority.matches(&issue.priority)
    }
}

/// Visible subset of `all`, in the order given.
#[must_use]
pub fn visible_issues<'a>(
    all: &'a [Issue],
    status: StatusFilter,
    priority: PriorityFilter,
) -> Vec<&'a Issue> {
    let filters = IssueFilters { status, priority };
    all.iter().filter(|issue| filters.matches(issue)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn make_issue(id: &str, status: Status, priority: Priority) -> Issue {
        Issue {
            id: id.to_string(),
            title: format!("Issue {id}"),
            description: String::new(),
            priority,
            assigned_to: None,
            status,
            created_by: "kim@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Issue> {
        vec![
            make_issue("iss-5", Status::Open, Priority::High),
            make_issue("iss-4", Status::Done, Priority::Low),
            make_issue("iss-3", Status::InProgress, Priority::High),
            make_issue("iss-2", Status::Open, Priority::Low),
            make_issue("iss-1", Status::Done, Priority::Medium),
        ]
    }

    fn ids(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_all_all_is_identity() {
        let all = sample();
        let visible = visible_issues(&all, Selection::All, Selection::All);
        assert_eq!(ids(&visible), vec!["iss-5", "iss-4", "iss-3", "iss-2", "iss-1"]);
    }

    #[test]
    fn test_status_filter() {
        let all = sample();
        let visible = visible_issues(&all, Selection::Only(Status::Open), Selection::All);
        assert_eq!(ids(&visible), vec!["iss-5", "iss-2"]);
    }

    #[test]
    fn test_combined_filters() {
        let all = sample();
        let visible = visible_issues(
            &all,
            Selection::Only(Status::Done),
            Selection::Only(Priority::Medium),
        );
        assert_eq!(ids(&visible), vec!["iss-1"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = sample();
        let visible = visible_issues(
            &all,
            Selection::Only(Status::InProgress),
            Selection::Only(Priority::Low),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn test_order_preserved_regardless_of_timestamps() {
        let mut all = sample();
        // Filter must not re-sort; it keeps whatever order the store gave.
        all[0].created_at = Utc::now() - Duration::days(30);
        let visible = visible_issues(&all, Selection::All, Selection::Only(Priority::High));
        assert_eq!(ids(&visible), vec!["iss-5", "iss-3"]);
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), Selection::All);
        assert_eq!(
            "in progress".parse::<StatusFilter>().unwrap(),
            Selection::Only(Status::InProgress)
        );
        assert_eq!(
            "High".parse::<PriorityFilter>().unwrap(),
            Selection::Only(Priority::High)
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }

    fn any_issue() -> impl Strategy<Value = (Status, Priority)> {
        (
            prop_oneof![
                Just(Status::Open),
                Just(Status::InProgress),
                Just(Status::Done)
            ],
            prop_oneof![
                Just(Priority::Low),
                Just(Priority::Medium),
                Just(Priority::High)
            ],
        )
    }

    proptest! {
        #[test]
        fn prop_status_filter_only_returns_that_status(
            shapes in proptest::collection::vec(any_issue(), 0..20),
            wanted in prop_oneof![Just(Status::Open), Just(Status::InProgress), Just(Status::Done)],
        ) {
            let all: Vec<Issue> = shapes
                .iter()
                .enumerate()
                .map(|(n, (s, p))| make_issue(&format!("iss-{n}"), *s, *p))
                .collect();
            let visible = visible_issues(&all, Selection::Only(wanted), Selection::All);
            prop_assert!(visible.iter().all(|i| i.status == wanted));
            let expected = all.iter().filter(|i| i.status == wanted).count();
            prop_assert_eq!(visible.len(), expected);
        }

        #[test]
        fn prop_unfiltered_is_identity(shapes in proptest::collection::vec(any_issue(), 0..20)) {
            let all: Vec<Issue> = shapes
                .iter()
                .enumerate()
                .map(|(n, (s, p))| make_issue(&format!("iss-{n}"), *s, *p))
                .collect();
            let visible: Vec<Issue> = visible_issues(&all, Selection::All, Selection::All)
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(visible, all);
        }
    }
}
