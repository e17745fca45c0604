//! Error types for the aggregation engine
//!
//! Unrecognised descriptions are not errors; they resolve to `Unclassified`
//! and are excluded from the counts.

/// Aggregation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// Row has fewer fields than the audit-trail layout requires
    #[error("malformed row {row} in source {source_id}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        /// Source the row came from
        source_id: String,
        /// Zero-based position in the input, header included
        row: usize,
        /// Fields present
        found: usize,
        /// Fields required
        expected: usize,
    },

    /// Two inputs claim the same result-table key
    #[error("duplicate source identity: {key}")]
    DuplicateSourceIdentity {
        /// Colliding key
        key: String,
    },
}

impl AggregateError {
    /// Check if the error only invalidates the source it came from
    ///
    /// Best-effort orchestration may skip such sources; anything else aborts
    /// the whole run.
    #[inline]
    #[must_use]
    pub fn is_source_local(&self) -> bool {
        matches!(self, Self::MalformedRow { .. })
    }

    /// Source or key the error refers to
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::MalformedRow { source_id, .. } => source_id,
            Self::DuplicateSourceIdentity { key } => key,
        }
    }
}
