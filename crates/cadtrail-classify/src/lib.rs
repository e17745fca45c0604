//! cadtrail action classification
//!
//! Maps a single CAD audit-trail action description to a category in two
//! independent taxonomies.
//!
//! # Core Concepts
//!
//! - [`DesignSpace`]: which CAD subsystem the action touches
//! - [`ActionType`]: which lifecycle phase the action represents
//! - [`RuleTable`]: ordered `(matcher, outcome)` rules, first match wins
//! - [`ActionClassifier`]: the seam between rule sets and the aggregation engine
//! - [`DesignSpaceOutcome::DualSketchFeature`]: the one action counted +1
//!   sketching and -1 3D features
//!
//! # Example
//!
//! ```rust
//! use cadtrail_classify::{classify, ActionType, ActionTypeOutcome, DesignSpace, DesignSpaceOutcome};
//!
//! let c = classify("Tab opened");
//! assert_eq!(c.design_space, DesignSpaceOutcome::Category(DesignSpace::Browsing));
//! assert_eq!(c.action_type, ActionTypeOutcome::Category(ActionType::Viewing));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod classifier;
mod matcher;
mod rules;
mod taxonomy;

pub use classifier::{
    classify, classify_action_type, classify_design_space, standard_classifier, ActionClassifier,
    ActionTypeOutcome, Classification, DesignSpaceOutcome, RuleClassifier,
};
pub use matcher::{Matcher, TAB_MARKER};
pub use rules::{actions, standard_action_type_rules, standard_design_space_rules, Rule, RuleTable};
pub use taxonomy::{ActionType, DesignSpace, CATEGORY_COUNT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
