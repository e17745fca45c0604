//! Aggregation configuration

use crate::row::LogRow;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Sub-key function for [`Partition::Custom`]
pub type PartitionFn = for<'a> fn(&LogRow<'a>) -> String;

/// How rows of one source are split into records
#[derive(Clone, Copy, Default)]
pub enum Partition {
    /// One record keyed by the source identity
    #[default]
    WholeSource,

    /// One record per user, keyed `source/local-part`
    ByUser,

    /// One record per sub-key, keyed `source/sub-key`
    Custom(PartitionFn),
}

impl Partition {
    /// Sub-key for `row`, or `None` when the source is not partitioned
    #[must_use]
    pub fn key<'a>(&self, row: &LogRow<'a>) -> Option<Cow<'a, str>> {
        match self {
            Self::WholeSource => None,
            Self::ByUser => Some(Cow::Borrowed(row.user_local_part())),
            Self::Custom(f) => Some(Cow::Owned(f(row))),
        }
    }

    /// Check if records are split below the source level
    #[inline]
    #[must_use]
    pub fn is_partitioned(&self) -> bool {
        !matches!(self, Self::WholeSource)
    }
}

impl fmt::Debug for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeSource => f.write_str("WholeSource"),
            Self::ByUser => f.write_str("ByUser"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// What the orchestrator does when a source fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the run on the first failing source
    #[default]
    FailFast,

    /// Log and skip failing sources, keep the rest
    BestEffort,
}

/// Aggregation settings
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationConfig {
    /// Record partitioning within a source
    pub partition: Partition,
    /// Per-source failure handling
    pub failure_mode: FailureMode,
}

impl AggregationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one record per (source, user) pair
    #[inline]
    #[must_use]
    pub fn with_separate_users(mut self, separate_users: bool) -> Self {
        self.partition = if separate_users {
            Partition::ByUser
        } else {
            Partition::WholeSource
        };
        self
    }

    /// With explicit partitioning
    #[inline]
    #[must_use]
    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partition = partition;
        self
    }

    /// With failure handling
    #[inline]
    #[must_use]
    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }
}
