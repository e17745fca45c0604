//! Result table keyed by source identity

use crate::error::AggregateError;
use crate::record::{AggregationRecord, RECORD_WIDTH};
use cadtrail_classify::{ActionType, DesignSpace};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header of the identity column in exported tables
pub const SOURCE_COLUMN: &str = "File Name";

/// Separator between source and partition key in composite identities
pub const PARTITION_SEPARATOR: char = '/';

/// Composite identity `source/partition`
#[must_use]
pub fn partition_identity(source_id: &str, partition: &str) -> String {
    format!("{source_id}{PARTITION_SEPARATOR}{partition}")
}

/// Export header: identity column followed by the twelve count columns
#[must_use]
pub fn export_header() -> Vec<&'static str> {
    std::iter::once(SOURCE_COLUMN)
        .chain(DesignSpace::ALL.into_iter().map(DesignSpace::label))
        .chain(ActionType::ALL.into_iter().map(ActionType::column))
        .collect()
}

/// Records keyed by unique source identity
///
/// Keeps insertion order; [`ResultTable::sorted`] gives key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    records: IndexMap<String, AggregationRecord>,
}

impl ResultTable {
    /// Create new empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `key`, inserting a zeroed one on first use
    pub fn record_mut(&mut self, key: &str) -> &mut AggregationRecord {
        if !self.records.contains_key(key) {
            tracing::debug!(key, "creating aggregation record");
            self.records.insert(key.to_string(), AggregationRecord::new());
        }
        &mut self.records[key]
    }

    /// Insert a record under a key that must not exist yet
    ///
    /// # Errors
    /// [`AggregateError::DuplicateSourceIdentity`] if `key` is already present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        record: AggregationRecord,
    ) -> Result<(), AggregateError> {
        match self.records.entry(key.into()) {
            Entry::Occupied(entry) => Err(AggregateError::DuplicateSourceIdentity {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    /// Disjoint union with another table
    ///
    /// Nothing is inserted unless every key of `other` is new.
    ///
    /// # Errors
    /// [`AggregateError::DuplicateSourceIdentity`] naming the first colliding key.
    pub fn merge(&mut self, other: ResultTable) -> Result<(), AggregateError> {
        if let Some(key) = other.records.keys().find(|k| self.records.contains_key(*k)) {
            return Err(AggregateError::DuplicateSourceIdentity { key: key.clone() });
        }
        self.records.extend(other.records);
        Ok(())
    }

    /// Record for `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AggregationRecord> {
        self.records.get(key)
    }

    /// Check if `key` is present
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregationRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records in key order
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &AggregationRecord)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Flat export rows in key order
    #[must_use]
    pub fn export_rows(&self) -> Vec<(&str, [i64; RECORD_WIDTH])> {
        self.sorted()
            .into_iter()
            .map(|(key, record)| (key, record.to_row()))
            .collect()
    }

    /// Slot-wise sum of every record
    #[must_use]
    pub fn total(&self) -> AggregationRecord {
        self.records
            .values()
            .fold(AggregationRecord::new(), |mut acc, record| {
                acc += record;
                acc
            })
    }
}

impl IntoIterator for ResultTable {
    type Item = (String, AggregationRecord);
    type IntoIter = indexmap::map::IntoIter<String, AggregationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
