//! Action classification
//!
//! Provides the [`ActionClassifier`] trait and the table-driven
//! [`RuleClassifier`]. The free functions [`classify_design_space`] and
//! [`classify_action_type`] use the shared standard classifier.

use crate::rules::{standard_action_type_rules, standard_design_space_rules, Rule, RuleTable};
use crate::taxonomy::{ActionType, DesignSpace};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of design-space classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSpaceOutcome {
    /// Counts once toward a concrete category
    Category(DesignSpace),

    /// Sketch edit: +1 sketching and -1 3D features in the same event
    DualSketchFeature,

    /// No rule matched
    Unclassified,
}

impl DesignSpaceOutcome {
    /// Concrete category, if the outcome is one
    #[inline]
    #[must_use]
    pub fn category(self) -> Option<DesignSpace> {
        match self {
            Self::Category(category) => Some(category),
            Self::DualSketchFeature | Self::Unclassified => None,
        }
    }

    /// Check if no rule matched
    #[inline]
    #[must_use]
    pub fn is_unclassified(self) -> bool {
        matches!(self, Self::Unclassified)
    }
}

impl fmt::Display for DesignSpaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::DualSketchFeature => write!(
                f,
                "{} +1 / {} -1",
                DesignSpace::Sketching,
                DesignSpace::ThreeDFeatures
            ),
            Self::Unclassified => f.write_str("Unclassified"),
        }
    }
}

/// Result of action-type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTypeOutcome {
    /// Counts once toward a concrete category
    Category(ActionType),

    /// No rule matched
    Unclassified,
}

impl ActionTypeOutcome {
    /// Concrete category, if the outcome is one
    #[inline]
    #[must_use]
    pub fn category(self) -> Option<ActionType> {
        match self {
            Self::Category(category) => Some(category),
            Self::Unclassified => None,
        }
    }

    /// Check if no rule matched
    #[inline]
    #[must_use]
    pub fn is_unclassified(self) -> bool {
        matches!(self, Self::Unclassified)
    }
}

impl fmt::Display for ActionTypeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Unclassified => f.write_str("Unclassified"),
        }
    }
}

/// Both classifications of one description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Design-space result
    pub design_space: DesignSpaceOutcome,

    /// Action-type result
    pub action_type: ActionTypeOutcome,
}

impl Classification {
    /// Check if neither taxonomy recognised the description
    #[inline]
    #[must_use]
    pub fn is_unclassified(&self) -> bool {
        self.design_space.is_unclassified() && self.action_type.is_unclassified()
    }
}

/// Maps a trimmed description to both taxonomies
///
/// Implementations must be pure: the same description always yields the same
/// outcome, and no call observes another.
pub trait ActionClassifier: Send + Sync + std::fmt::Debug {
    /// Design-space outcome of `description`
    fn classify_design_space(&self, description: &str) -> DesignSpaceOutcome;

    /// Action-type outcome of `description`
    fn classify_action_type(&self, description: &str) -> ActionTypeOutcome;

    /// Both outcomes of `description`
    fn classify(&self, description: &str) -> Classification {
        Classification {
            design_space: self.classify_design_space(description),
            action_type: self.classify_action_type(description),
        }
    }
}

impl<T: ActionClassifier + ?Sized> ActionClassifier for &T {
    fn classify_design_space(&self, description: &str) -> DesignSpaceOutcome {
        (**self).classify_design_space(description)
    }

    fn classify_action_type(&self, description: &str) -> ActionTypeOutcome {
        (**self).classify_action_type(description)
    }
}

/// Classifier backed by two ordered rule tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleClassifier {
    design_space: RuleTable<DesignSpaceOutcome>,
    action_type: RuleTable<ActionTypeOutcome>,
}

impl RuleClassifier {
    /// Create classifier from explicit tables
    #[inline]
    #[must_use]
    pub fn new(
        design_space: RuleTable<DesignSpaceOutcome>,
        action_type: RuleTable<ActionTypeOutcome>,
    ) -> Self {
        Self {
            design_space,
            action_type,
        }
    }

    /// Classifier with the built-in rule tables
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_design_space_rules(), standard_action_type_rules())
    }

    /// Append design-space rules below the existing ones
    #[must_use]
    pub fn with_design_space_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<DesignSpace>>,
    {
        self.design_space
            .extend(rules.into_iter().map(|r| r.map(DesignSpaceOutcome::Category)));
        self
    }

    /// Append action-type rules below the existing ones
    #[must_use]
    pub fn with_action_type_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<ActionType>>,
    {
        self.action_type
            .extend(rules.into_iter().map(|r| r.map(ActionTypeOutcome::Category)));
        self
    }

    /// Design-space table
    #[inline]
    #[must_use]
    pub fn design_space_rules(&self) -> &RuleTable<DesignSpaceOutcome> {
        &self.design_space
    }

    /// Action-type table
    #[inline]
    #[must_use]
    pub fn action_type_rules(&self) -> &RuleTable<ActionTypeOutcome> {
        &self.action_type
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl ActionClassifier for RuleClassifier {
    fn classify_design_space(&self, description: &str) -> DesignSpaceOutcome {
        self.design_space
            .evaluate(description)
            .unwrap_or(DesignSpaceOutcome::Unclassified)
    }

    fn classify_action_type(&self, description: &str) -> ActionTypeOutcome {
        self.action_type
            .evaluate(description)
            .unwrap_or(ActionTypeOutcome::Unclassified)
    }
}

static STANDARD: Lazy<RuleClassifier> = Lazy::new(RuleClassifier::standard);

/// Shared classifier with the built-in rule tables
#[must_use]
pub fn standard_classifier() -> &'static RuleClassifier {
    &STANDARD
}

/// Design-space outcome under the built-in rules
#[must_use]
pub fn classify_design_space(description: &str) -> DesignSpaceOutcome {
    STANDARD.classify_design_space(description)
}

/// Action-type outcome under the built-in rules
#[must_use]
pub fn classify_action_type(description: &str) -> ActionTypeOutcome {
    STANDARD.classify_action_type(description)
}

/// Both outcomes under the built-in rules
#[must_use]
pub fn classify(description: &str) -> Classification {
    STANDARD.classify(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;

    fn ds(category: DesignSpace) -> DesignSpaceOutcome {
        DesignSpaceOutcome::Category(category)
    }

    fn at(category: ActionType) -> ActionTypeOutcome {
        ActionTypeOutcome::Category(category)
    }

    #[test]
    fn dual_sketch_feature() {
        assert_eq!(
            classify_design_space("Add or modify a sketch"),
            DesignSpaceOutcome::DualSketchFeature
        );
        assert_eq!(
            classify_action_type("Add or modify a sketch"),
            ActionTypeOutcome::Unclassified
        );
        assert_eq!(DesignSpaceOutcome::DualSketchFeature.category(), None);
    }

    #[test]
    fn copy_paste_sketch_is_sketching_and_creating() {
        let c = classify("Copy paste sketch");
        assert_eq!(c.design_space, ds(DesignSpace::Sketching));
        assert_eq!(c.action_type, at(ActionType::Creating));
    }

    #[test]
    fn part_studio_features() {
        assert_eq!(
            classify_design_space("Commit add or edit of part studio feature"),
            ds(DesignSpace::ThreeDFeatures)
        );
        assert_eq!(
            classify_action_type("Commit add or edit of part studio feature"),
            ActionTypeOutcome::Unclassified
        );

        let delete = classify("Delete part studio feature");
        assert_eq!(delete.design_space, ds(DesignSpace::ThreeDFeatures));
        assert_eq!(delete.action_type, at(ActionType::Deleting));

        let add = classify("Add part studio feature");
        assert_eq!(add.design_space, DesignSpaceOutcome::Unclassified);
        assert_eq!(add.action_type, at(ActionType::Creating));

        assert_eq!(
            classify_action_type("Start edit of part studio feature"),
            at(ActionType::Editing)
        );
    }

    #[test]
    fn assembly_actions() {
        let add_instance = classify("Add assembly instance");
        assert_eq!(add_instance.design_space, ds(DesignSpace::Mating));
        assert_eq!(add_instance.action_type, at(ActionType::Creating));

        let delete_instance = classify("Delete assembly instance");
        assert_eq!(delete_instance.design_space, ds(DesignSpace::Mating));
        assert_eq!(delete_instance.action_type, at(ActionType::Deleting));

        let set_mate = classify("Set mate values");
        assert_eq!(set_mate.design_space, DesignSpaceOutcome::Unclassified);
        assert_eq!(set_mate.action_type, at(ActionType::Editing));
    }

    #[test]
    fn animate_is_visualizing_and_viewing() {
        let c = classify("Animate action called");
        assert_eq!(c.design_space, ds(DesignSpace::Visualizing));
        assert_eq!(c.action_type, at(ActionType::Viewing));

        let drag = classify("Start assembly drag");
        assert_eq!(drag.design_space, ds(DesignSpace::Visualizing));
        assert_eq!(drag.action_type, ActionTypeOutcome::Unclassified);
    }

    #[test]
    fn tab_events() {
        let opened = classify("Tab opened");
        assert_eq!(opened.design_space, ds(DesignSpace::Browsing));
        assert_eq!(opened.action_type, at(ActionType::Viewing));

        let renamed = classify("Custom Tab renamed");
        assert_eq!(renamed.design_space, ds(DesignSpace::Browsing));
        assert_eq!(renamed.action_type, at(ActionType::Other));

        for verb in ["created", "deleted"] {
            let c = classify(&format!("Part Studio Tab {verb}"));
            assert_eq!(c.design_space, ds(DesignSpace::Browsing));
            assert_eq!(c.action_type, at(ActionType::Other));
        }

        assert!(classify("Tab closed").is_unclassified());
    }

    #[test]
    fn revising_and_versioning() {
        let undo = classify("Undo Redo Operation");
        assert_eq!(undo.design_space, ds(DesignSpace::OtherOrganizing));
        assert_eq!(undo.action_type, at(ActionType::Revising));

        let version = classify("Create version");
        assert_eq!(version.design_space, ds(DesignSpace::OtherOrganizing));
        assert_eq!(version.action_type, at(ActionType::Other));
    }

    #[test]
    fn unrecognised_descriptions() {
        for d in ["", "Close document", "Open document", "  Tab opened  "] {
            let c = classify(d);
            if d.contains("Tab") {
                // untrimmed input still contains the marker and verb
                assert!(!c.is_unclassified());
            } else {
                assert!(c.is_unclassified(), "{d:?} should be unclassified");
            }
        }
    }

    #[test]
    fn extra_rules_rank_below_builtins() {
        let classifier = RuleClassifier::standard()
            .with_design_space_rules([
                Rule::new(Matcher::exact("Set mate values"), DesignSpace::Mating),
                Rule::new(Matcher::exact("Copy paste sketch"), DesignSpace::Mating),
            ])
            .with_action_type_rules([Rule::new(
                Matcher::exact("Commit add or edit of part studio feature"),
                ActionType::Editing,
            )]);

        assert_eq!(
            classifier.classify_design_space("Set mate values"),
            ds(DesignSpace::Mating)
        );
        assert_eq!(
            classifier.classify_design_space("Copy paste sketch"),
            ds(DesignSpace::Sketching)
        );
        assert_eq!(
            classifier.classify_action_type("Commit add or edit of part studio feature"),
            at(ActionType::Editing)
        );
        assert_eq!(classifier.design_space_rules().len(), 9);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(ds(DesignSpace::Mating).to_string(), "Mating");
        assert_eq!(
            DesignSpaceOutcome::DualSketchFeature.to_string(),
            "Sketching +1 / 3D Features -1"
        );
        assert_eq!(ActionTypeOutcome::Unclassified.to_string(), "Unclassified");
    }

    #[test]
    fn shared_classifier_is_standard() {
        assert_eq!(standard_classifier(), &RuleClassifier::standard());
        assert_eq!(RuleClassifier::default(), RuleClassifier::standard());
    }
}
