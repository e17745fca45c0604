//! Count vectors and aggregation records

use cadtrail_classify::{
    ActionType, ActionTypeOutcome, Classification, DesignSpace, DesignSpaceOutcome,
    CATEGORY_COUNT,
};
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Index};

/// Number of integer columns in an exported record
pub const RECORD_WIDTH: usize = 2 * CATEGORY_COUNT;

/// Fixed-width per-category counters
///
/// Slots are signed: the dual sketch event decrements 3D features, and a log
/// may contain more sketch edits than feature commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountVector([i64; CATEGORY_COUNT]);

impl CountVector {
    /// Create new zeroed vector
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self([0; CATEGORY_COUNT])
    }

    /// Wrap explicit slot values
    #[inline]
    #[must_use]
    pub const fn from_slots(slots: [i64; CATEGORY_COUNT]) -> Self {
        Self(slots)
    }

    /// Add one to a slot
    #[inline]
    pub fn increment(&mut self, slot: usize) {
        self.0[slot] += 1;
    }

    /// Subtract one from a slot
    #[inline]
    pub fn decrement(&mut self, slot: usize) {
        self.0[slot] -= 1;
    }

    /// Sum over all slots
    #[inline]
    #[must_use]
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }

    /// Slot values in order
    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &[i64; CATEGORY_COUNT] {
        &self.0
    }

    /// Check if every slot is zero
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }
}

impl Index<usize> for CountVector {
    type Output = i64;

    fn index(&self, slot: usize) -> &i64 {
        &self.0[slot]
    }
}

impl AddAssign<&CountVector> for CountVector {
    fn add_assign(&mut self, rhs: &CountVector) {
        for (slot, n) in self.0.iter_mut().zip(rhs.0) {
            *slot += n;
        }
    }
}

/// Design-space and action-type counts for one source identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationRecord {
    /// Slots ordered as [`DesignSpace::ALL`]
    pub design_space: CountVector,

    /// Slots ordered as [`ActionType::ALL`]
    pub action_type: CountVector,
}

impl AggregationRecord {
    /// Create new zeroed record
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            design_space: CountVector::new(),
            action_type: CountVector::new(),
        }
    }

    /// Apply one classified event
    ///
    /// The two taxonomies update independently; `Unclassified` leaves its
    /// vector untouched.
    pub fn apply(&mut self, classification: Classification) {
        match classification.design_space {
            DesignSpaceOutcome::DualSketchFeature => {
                self.design_space.increment(DesignSpace::Sketching.index());
                self.design_space.decrement(DesignSpace::ThreeDFeatures.index());
            }
            DesignSpaceOutcome::Category(category) => {
                self.design_space.increment(category.index());
            }
            DesignSpaceOutcome::Unclassified => {}
        }

        if let ActionTypeOutcome::Category(category) = classification.action_type {
            self.action_type.increment(category.index());
        }
    }

    /// Count for one design-space category
    #[inline]
    #[must_use]
    pub fn design_space_count(&self, category: DesignSpace) -> i64 {
        self.design_space[category.index()]
    }

    /// Count for one action-type category
    #[inline]
    #[must_use]
    pub fn action_type_count(&self, category: ActionType) -> i64 {
        self.action_type[category.index()]
    }

    /// Flat export row: design-space slots followed by action-type slots
    #[must_use]
    pub fn to_row(&self) -> [i64; RECORD_WIDTH] {
        let mut row = [0; RECORD_WIDTH];
        row[..CATEGORY_COUNT].copy_from_slice(self.design_space.slots());
        row[CATEGORY_COUNT..].copy_from_slice(self.action_type.slots());
        row
    }
}

impl AddAssign<&AggregationRecord> for AggregationRecord {
    fn add_assign(&mut self, rhs: &AggregationRecord) {
        self.design_space += &rhs.design_space;
        self.action_type += &rhs.action_type;
    }
}
