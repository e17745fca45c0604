//! Description matchers
//!
//! A [`Matcher`] is the predicate half of a classification rule. Matching is
//! exact and case-sensitive; there is no fuzzy matching.

use serde::{Deserialize, Serialize};

/// Marker every tab event description contains
pub const TAB_MARKER: &str = "Tab";

/// Predicate over a trimmed action description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Description equals the string
    Exact(String),

    /// Description equals one of the strings
    OneOf(Vec<String>),

    /// Description contains [`TAB_MARKER`] and at least one of the verbs
    TabEvent(Vec<String>),
}

impl Matcher {
    /// Exact match on a single description
    #[inline]
    #[must_use]
    pub fn exact(description: impl Into<String>) -> Self {
        Self::Exact(description.into())
    }

    /// Exact match on any description in a set
    #[must_use]
    pub fn one_of<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(descriptions.into_iter().map(Into::into).collect())
    }

    /// Substring match on tab events with any of the given verbs
    #[must_use]
    pub fn tab_event<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TabEvent(verbs.into_iter().map(Into::into).collect())
    }

    /// Test the matcher against a description
    #[must_use]
    pub fn matches(&self, description: &str) -> bool {
        match self {
            Self::Exact(expected) => description == expected,
            Self::OneOf(set) => set.iter().any(|candidate| description == candidate),
            Self::TabEvent(verbs) => {
                description.contains(TAB_MARKER)
                    && verbs.iter().any(|verb| description.contains(verb.as_str()))
            }
        }
    }
}
