//! Row aggregation for a single source
//!
//! A [`RowAggregator`] makes one linear pass over a source's rows, discards
//! the header, classifies every data row and accumulates the outcome into the
//! record the partition policy addresses. Each call owns its accumulator.

use crate::config::Partition;
use crate::error::AggregateError;
use crate::row::{is_audit_trail_header, LogRow};
use crate::table::{partition_identity, ResultTable};
use cadtrail_classify::{standard_classifier, ActionClassifier, RuleClassifier};
use std::borrow::Cow;

/// Classifies and counts the rows of one source
#[derive(Debug, Clone)]
pub struct RowAggregator<C> {
    classifier: C,
    partition: Partition,
}

impl RowAggregator<&'static RuleClassifier> {
    /// Aggregator using the built-in rule tables
    #[inline]
    #[must_use]
    pub fn standard(partition: Partition) -> Self {
        Self::new(standard_classifier(), partition)
    }
}

impl<C: ActionClassifier> RowAggregator<C> {
    /// Create aggregator from a classifier and partition policy
    #[inline]
    #[must_use]
    pub fn new(classifier: C, partition: Partition) -> Self {
        Self {
            classifier,
            partition,
        }
    }

    /// Classifier in use
    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Partition policy in use
    #[inline]
    #[must_use]
    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Aggregate one source
    ///
    /// The first row is the header and is never classified. In whole-source
    /// mode the result always holds exactly one record keyed `source_id`,
    /// zeroed when there are no data rows; partitioned modes only hold the
    /// partitions that occur.
    ///
    /// # Errors
    /// [`AggregateError::MalformedRow`] for the first data row with fewer than
    /// six fields. Nothing is returned for the source in that case.
    pub fn aggregate<I, R, S>(&self, source_id: &str, rows: I) -> Result<ResultTable, AggregateError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut table = ResultTable::new();
        if !self.partition.is_partitioned() {
            table.record_mut(source_id);
        }

        let mut rows = rows.into_iter();
        match rows.next() {
            Some(header) if !is_audit_trail_header(header.as_ref()) => {
                tracing::warn!(source = source_id, "unexpected header row, discarding it anyway");
            }
            Some(_) => {}
            None => tracing::debug!(source = source_id, "empty source"),
        }

        let mut data_rows = 0usize;
        for (offset, raw) in rows.enumerate() {
            let position = offset + 1;
            let row = LogRow::from_fields(source_id, position, raw.as_ref())?;
            let action = row.action();
            let classification = self.classifier.classify(action);

            if classification.is_unclassified() {
                tracing::trace!(source = source_id, row = position, action, "unclassified action");
            }

            let key = match self.partition.key(&row) {
                Some(sub_key) => Cow::Owned(partition_identity(source_id, &sub_key)),
                None => Cow::Borrowed(source_id),
            };
            table.record_mut(&key).apply(classification);
            data_rows += 1;
        }

        tracing::info!(
            source = source_id,
            rows = data_rows,
            records = table.len(),
            "aggregated source"
        );
        Ok(table)
    }
}

/// Aggregate one source with the built-in rules
///
/// # Errors
/// See [`RowAggregator::aggregate`].
pub fn aggregate<I, R, S>(
    source_id: &str,
    rows: I,
    partition: Partition,
) -> Result<ResultTable, AggregateError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    RowAggregator::standard(partition).aggregate(source_id, rows)
}
