//! The two category taxonomies
//!
//! Both taxonomies have exactly six concrete categories. Each category owns a
//! fixed slot in a count vector, so the declaration order here is the export
//! column order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of concrete categories in each taxonomy
pub const CATEGORY_COUNT: usize = 6;

/// Which CAD subsystem an action affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSpace {
    /// 2D sketch work
    Sketching,

    /// Part studio feature commits and deletions
    #[serde(rename = "3d_features")]
    ThreeDFeatures,

    /// Assembly features and instances
    Mating,

    /// Dragging and animating assemblies
    Visualizing,

    /// Tab navigation and management
    Browsing,

    /// Versioning, branching and revision bookkeeping
    OtherOrganizing,
}

impl DesignSpace {
    /// All categories in slot order
    pub const ALL: [DesignSpace; CATEGORY_COUNT] = [
        Self::Sketching,
        Self::ThreeDFeatures,
        Self::Mating,
        Self::Visualizing,
        Self::Browsing,
        Self::OtherOrganizing,
    ];

    /// Slot in a design-space count vector
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category occupying `index`, if any
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column label used in exported tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sketching => "Sketching",
            Self::ThreeDFeatures => "3D Features",
            Self::Mating => "Mating",
            Self::Visualizing => "Visualizing",
            Self::Browsing => "Browsing",
            Self::OtherOrganizing => "Other Organizing",
        }
    }
}

impl fmt::Display for DesignSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which lifecycle phase an action represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Adding features, instances or sketches
    Creating,

    /// Starting an edit or setting values
    Editing,

    /// Removing features or instances
    Deleting,

    /// Cancel and undo/redo
    Revising,

    /// Opening tabs and animating
    Viewing,

    /// Versioning and tab bookkeeping
    Other,
}

impl ActionType {
    /// All categories in slot order
    pub const ALL: [ActionType; CATEGORY_COUNT] = [
        Self::Creating,
        Self::Editing,
        Self::Deleting,
        Self::Revising,
        Self::Viewing,
        Self::Other,
    ];

    /// Slot in an action-type count vector
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category occupying `index`, if any
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column label used in exported tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Creating => "Creating",
            Self::Editing => "Editing",
            Self::Deleting => "Deleting",
            Self::Revising => "Revising",
            Self::Viewing => "Viewing",
            Self::Other => "Other",
        }
    }

    /// Header of this category's column in exported count tables
    ///
    /// Matches [`label`](Self::label) except for [`ActionType::Revising`],
    /// whose column is named `Reversing` in `Counts.csv`.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Revising => "Reversing",
            other => other.label(),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
