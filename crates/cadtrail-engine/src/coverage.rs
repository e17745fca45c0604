//! Rule coverage
//!
//! Tallies trimmed descriptions that neither taxonomy recognises. Coverage is
//! analysis only and never changes the counts.

use crate::error::AggregateError;
use crate::row::LogRow;
use cadtrail_classify::{standard_classifier, ActionClassifier};
use indexmap::IndexMap;
use serde::Serialize;

/// Unclassified-description tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    rows_seen: usize,
    gaps: IndexMap<String, usize>,
}

impl Coverage {
    /// Create new empty tally
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one source with the built-in rules
    ///
    /// # Errors
    /// [`AggregateError::MalformedRow`] as in aggregation.
    pub fn scan<I, R, S>(source_id: &str, rows: I) -> Result<Self, AggregateError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Self::scan_with(standard_classifier(), source_id, rows)
    }

    /// Scan one source with an explicit classifier
    ///
    /// # Errors
    /// [`AggregateError::MalformedRow`] as in aggregation.
    pub fn scan_with<C, I, R, S>(
        classifier: &C,
        source_id: &str,
        rows: I,
    ) -> Result<Self, AggregateError>
    where
        C: ActionClassifier + ?Sized,
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut coverage = Self::new();
        for (position, raw) in rows.into_iter().enumerate().skip(1) {
            let row = LogRow::from_fields(source_id, position, raw.as_ref())?;
            coverage.observe(classifier, row.action());
        }
        Ok(coverage)
    }

    /// Count one trimmed description
    pub fn observe<C: ActionClassifier + ?Sized>(&mut self, classifier: &C, action: &str) {
        self.rows_seen += 1;
        if classifier.classify(action).is_unclassified() {
            *self.gaps.entry(action.to_string()).or_default() += 1;
        }
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: Coverage) {
        self.rows_seen += other.rows_seen;
        for (action, count) in other.gaps {
            *self.gaps.entry(action).or_default() += count;
        }
    }

    /// Data rows observed
    #[inline]
    #[must_use]
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Rows unrecognised by both taxonomies
    #[must_use]
    pub fn unclassified_rows(&self) -> usize {
        self.gaps.values().sum()
    }

    /// Distinct unrecognised descriptions, most frequent first
    #[must_use]
    pub fn gaps(&self) -> Vec<(&str, usize)> {
        let mut gaps: Vec<_> = self.gaps.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        gaps.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadtrail_test_utils::audit_trail;

    #[test]
    fn tallies_unclassified_only() {
        let rows = audit_trail(&[
            ("a@x.com", "Close document"),
            ("a@x.com", "Tab opened"),
            ("b@x.com", " Close document "),
            ("b@x.com", "Open document"),
            // action-type only still counts as covered
            ("b@x.com", "Set mate values"),
        ]);

        let coverage = Coverage::scan("trail", &rows).unwrap();

        assert_eq!(coverage.rows_seen(), 5);
        assert_eq!(coverage.unclassified_rows(), 3);
        assert_eq!(
            coverage.gaps(),
            vec![("Close document", 2), ("Open document", 1)]
        );
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Coverage::scan("a", &audit_trail(&[("a@x.com", "Close document")])).unwrap();
        let b = Coverage::scan("b", &audit_trail(&[("b@x.com", "Close document")])).unwrap();
        a.merge(b);

        assert_eq!(a.rows_seen(), 2);
        assert_eq!(a.gaps(), vec![("Close document", 2)]);
    }

    #[test]
    fn malformed_rows_fail() {
        let mut rows = audit_trail(&[]);
        rows.push(vec![String::new()]);
        assert!(Coverage::scan("trail", &rows).is_err());
    }
}
