//! Enumerations and field types for study tasks.
//!
//! This module defines the structured values used to categorise and filter
//! tasks: priority levels, the status and subject filters, and the names of
//! the mandatory task fields reported by validation.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How pressing a task is. New tasks default to `Medium`.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

/// Completion-state filter for task listings.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Whether a task with the given completion flag passes this filter.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !completed,
            StatusFilter::Completed => completed,
        }
    }

    /// The next filter in display order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

/// Subject filter: either every subject or one exact subject string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubjectFilter {
    #[default]
    All,
    Subject(String),
}

impl SubjectFilter {
    /// Exact, case-sensitive comparison against a task subject.
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::Subject(s) => s == subject,
        }
    }
}

impl FromStr for SubjectFilter {
    type Err = std::convert::Infallible;

    /// The literal `all` selects every subject; anything else is an exact subject.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(SubjectFilter::All)
        } else {
            Ok(SubjectFilter::Subject(s.to_string()))
        }
    }
}

impl fmt::Display for SubjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectFilter::All => f.write_str("all"),
            SubjectFilter::Subject(s) => f.write_str(s),
        }
    }
}

/// Mandatory task fields checked before a create or update is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Subject,
    DueDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::Subject => f.write_str("subject"),
            Field::DueDate => f.write_str("dueDate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(true));
        assert!(StatusFilter::All.matches(false));
        assert!(StatusFilter::Pending.matches(false));
        assert!(!StatusFilter::Pending.matches(true));
        assert!(StatusFilter::Completed.matches(true));
        assert!(!StatusFilter::Completed.matches(false));
    }

    #[test]
    fn test_subject_filter_parses_all_literal() {
        assert_eq!("all".parse::<SubjectFilter>().unwrap(), SubjectFilter::All);
        assert_eq!(
            "Math".parse::<SubjectFilter>().unwrap(),
            SubjectFilter::Subject("Math".into())
        );
        // Exact match only.
        assert!(!SubjectFilter::Subject("Math".into()).matches("math"));
    }
}
