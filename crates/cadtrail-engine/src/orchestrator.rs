//! Multi-source orchestration
//!
//! Runs the [`RowAggregator`] over many named sources and merges the
//! per-source tables into one. Keys are unique per source, so the merge is a
//! disjoint union; a collision is a configuration error.

use crate::aggregator::RowAggregator;
use crate::config::{AggregationConfig, FailureMode};
use crate::error::AggregateError;
use crate::table::ResultTable;
use cadtrail_classify::{standard_classifier, ActionClassifier, RuleClassifier};
use rayon::prelude::*;

/// Named, fully loaded source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Source identity, usually the file stem
    pub id: String,
    /// Raw rows, header first
    pub rows: Vec<Vec<String>>,
}

impl Source {
    /// Create new source
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }
}

/// Source skipped in best-effort mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// Failing source identity
    pub source_id: String,
    /// Why it failed
    pub error: AggregateError,
}

/// Outcome of an orchestration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestrationReport {
    /// Merged counts
    pub table: ResultTable,
    /// Sources merged into the table
    pub sources_processed: usize,
    /// Sources skipped under [`FailureMode::BestEffort`]
    pub failures: Vec<SourceFailure>,
}

impl OrchestrationReport {
    /// Check if every source made it into the table
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Aggregates many sources into one table
#[derive(Debug, Clone)]
pub struct Orchestrator<C> {
    aggregator: RowAggregator<C>,
    failure_mode: FailureMode,
}

impl Orchestrator<&'static RuleClassifier> {
    /// Orchestrator using the built-in rule tables
    #[inline]
    #[must_use]
    pub fn standard(config: &AggregationConfig) -> Self {
        Self::new(standard_classifier(), config)
    }
}

impl<C: ActionClassifier> Orchestrator<C> {
    /// Create orchestrator
    #[must_use]
    pub fn new(classifier: C, config: &AggregationConfig) -> Self {
        Self {
            aggregator: RowAggregator::new(classifier, config.partition),
            failure_mode: config.failure_mode,
        }
    }

    /// Per-source aggregator
    #[inline]
    #[must_use]
    pub fn aggregator(&self) -> &RowAggregator<C> {
        &self.aggregator
    }

    /// Aggregate sources in order
    ///
    /// # Errors
    /// - Under [`FailureMode::FailFast`], the first source error.
    /// - In any mode, [`AggregateError::DuplicateSourceIdentity`] on a key collision.
    pub fn run<I, N, X, R, S>(&self, sources: I) -> Result<OrchestrationReport, AggregateError>
    where
        I: IntoIterator<Item = (N, X)>,
        N: AsRef<str>,
        X: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut report = OrchestrationReport::default();
        for (id, rows) in sources {
            let id = id.as_ref();
            let result = self.aggregator.aggregate(id, rows);
            self.absorb(&mut report, id, result)?;
        }
        Self::finish(&report);
        Ok(report)
    }

    /// Aggregate loaded sources on the rayon pool
    ///
    /// Sources share no state while aggregating and merge in input order, so
    /// the report equals that of [`Orchestrator::run`] on the same input.
    ///
    /// # Errors
    /// Same as [`Orchestrator::run`].
    pub fn run_parallel(&self, sources: &[Source]) -> Result<OrchestrationReport, AggregateError> {
        let results: Vec<_> = sources
            .par_iter()
            .map(|source| self.aggregator.aggregate(&source.id, &source.rows))
            .collect();

        let mut report = OrchestrationReport::default();
        for (source, result) in sources.iter().zip(results) {
            self.absorb(&mut report, &source.id, result)?;
        }
        Self::finish(&report);
        Ok(report)
    }

    fn absorb(
        &self,
        report: &mut OrchestrationReport,
        source_id: &str,
        result: Result<ResultTable, AggregateError>,
    ) -> Result<(), AggregateError> {
        match result {
            Ok(table) => {
                report.table.merge(table)?;
                report.sources_processed += 1;
                Ok(())
            }
            Err(error)
                if self.failure_mode == FailureMode::BestEffort && error.is_source_local() =>
            {
                tracing::warn!(source = source_id, %error, "skipping source");
                report.failures.push(SourceFailure {
                    source_id: source_id.to_string(),
                    error,
                });
                Ok(())
            }
            Err(error) => {
                tracing::error!(source = source_id, %error, "aggregation failed");
                Err(error)
            }
        }
    }

    fn finish(report: &OrchestrationReport) {
        tracing::info!(
            sources = report.sources_processed,
            failed = report.failures.len(),
            records = report.table.len(),
            "aggregation complete"
        );
    }
}

/// Aggregate many sources with the built-in rules
///
/// Always fails fast, whatever `config.failure_mode` says. Best-effort runs go
/// through [`Orchestrator::run`], which lists skipped sources in
/// [`OrchestrationReport::failures`].
///
/// # Errors
/// The first source error, or [`AggregateError::DuplicateSourceIdentity`].
pub fn aggregate_many<I, N, X, R, S>(
    sources: I,
    config: &AggregationConfig,
) -> Result<ResultTable, AggregateError>
where
    I: IntoIterator<Item = (N, X)>,
    N: AsRef<str>,
    X: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let config = config.with_failure_mode(FailureMode::FailFast);
    Orchestrator::standard(&config)
        .run(sources)
        .map(|report| report.table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadtrail_classify::DesignSpace;
    use cadtrail_test_utils::audit_trail;
    use pretty_assertions::assert_eq;

    fn malformed() -> Vec<Vec<String>> {
        let mut rows = audit_trail(&[]);
        rows.push(vec!["1".to_string()]);
        rows
    }

    #[test]
    fn merges_sources() {
        let sources = vec![
            ("alice", audit_trail(&[("a@x.com", "Copy paste sketch")])),
            ("bob", audit_trail(&[("b@x.com", "Tab opened")])),
        ];

        let table = aggregate_many(sources, &AggregationConfig::new()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("alice").unwrap().design_space_count(DesignSpace::Sketching),
            1
        );
        assert_eq!(
            table.get("bob").unwrap().design_space_count(DesignSpace::Browsing),
            1
        );
    }

    #[test]
    fn duplicate_source_is_rejected() {
        let sources = vec![("alice", audit_trail(&[])), ("alice", audit_trail(&[]))];

        let err = aggregate_many(sources, &AggregationConfig::new()).unwrap_err();
        assert_eq!(
            err,
            AggregateError::DuplicateSourceIdentity {
                key: "alice".to_string()
            }
        );
    }

    #[test]
    fn duplicate_is_fatal_even_in_best_effort() {
        let config = AggregationConfig::new().with_failure_mode(FailureMode::BestEffort);
        let sources = vec![("alice", audit_trail(&[])), ("alice", audit_trail(&[]))];

        assert!(Orchestrator::standard(&config).run(sources).is_err());
    }

    #[test]
    fn fail_fast_stops_on_malformed_source() {
        let sources = vec![("bad", malformed()), ("good", audit_trail(&[]))];

        let err = aggregate_many(sources, &AggregationConfig::new()).unwrap_err();
        assert!(matches!(err, AggregateError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn aggregate_many_never_skips_silently() {
        let config = AggregationConfig::new().with_failure_mode(FailureMode::BestEffort);
        let sources = vec![
            ("bad", malformed()),
            ("good", audit_trail(&[("a@x.com", "Tab opened")])),
        ];

        let err = aggregate_many(sources, &config).unwrap_err();
        assert_eq!(err.subject(), "bad");
        assert!(err.is_source_local());
    }

    #[test]
    fn best_effort_skips_malformed_source() {
        let config = AggregationConfig::new().with_failure_mode(FailureMode::BestEffort);
        let sources = vec![
            ("bad", malformed()),
            ("good", audit_trail(&[("a@x.com", "Tab opened")])),
        ];

        let report = Orchestrator::standard(&config).run(sources).unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.sources_processed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source_id, "bad");
        assert!(report.table.contains("good"));
        assert!(!report.table.contains("bad"));
    }

    #[test]
    fn parallel_matches_sequential() {
        let config = AggregationConfig::new().with_separate_users(true);
        let sources: Vec<Source> = (0..8)
            .map(|i| {
                Source::new(
                    format!("trail-{i}"),
                    audit_trail(&[
                        ("a@x.com", "Copy paste sketch"),
                        ("b@x.com", "Add or modify a sketch"),
                        ("a@x.com", "Delete assembly feature"),
                    ]),
                )
            })
            .collect();

        let orchestrator = Orchestrator::standard(&config);
        let sequential = orchestrator
            .run(sources.iter().map(|s| (s.id.as_str(), &s.rows)))
            .unwrap();
        let parallel = orchestrator.run_parallel(&sources).unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.table.len(), 16);
    }
}
