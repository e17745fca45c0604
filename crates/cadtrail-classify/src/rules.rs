//! Ordered rule tables
//!
//! Each taxonomy is an ordered list of `(matcher, outcome)` rules evaluated
//! top to bottom; the first matching rule decides. Several rule sets overlap
//! (e.g. "Animate action called" is both a visualizing action and a viewing
//! action, and tab events are split by verb), so order is part of the
//! contract.

use crate::classifier::{ActionTypeOutcome, DesignSpaceOutcome};
use crate::matcher::Matcher;
use crate::taxonomy::{ActionType, DesignSpace};
use serde::{Deserialize, Serialize};

/// Action description strings recognised by the standard tables
pub mod actions {
    /// Sketch edit that also triggers a feature commit
    pub const ADD_OR_MODIFY_SKETCH: &str = "Add or modify a sketch";

    /// Sketch duplication
    pub const COPY_PASTE_SKETCH: &str = "Copy paste sketch";

    /// Animation playback
    pub const ANIMATE: &str = "Animate action called";

    /// Part studio feature commits counted as 3D feature work
    pub const FEATURE_COMMITS: [&str; 2] = [
        "Commit add or edit of part studio feature",
        "Delete part studio feature",
    ];

    /// Assembly feature and instance changes
    pub const MATING: [&str; 4] = [
        "Add assembly feature",
        "Delete assembly feature",
        "Add assembly instance",
        "Delete assembly instance",
    ];

    /// Assembly visualization
    pub const VISUALIZING: [&str; 2] = ["Start assembly drag", ANIMATE];

    /// Verbs that make a tab event a browsing action
    pub const TAB_VERBS: [&str; 4] = ["opened", "created", "deleted", "renamed"];

    /// Versioning and revision bookkeeping
    pub const ORGANIZING: [&str; 6] = [
        "Create version",
        "Cancel Operation",
        "Undo Redo Operation",
        "Merge branch",
        "Branch workspace",
        "Update version",
    ];

    /// Actions that create something
    pub const CREATING: [&str; 4] = [
        "Add part studio feature",
        "Add assembly feature",
        "Add assembly instance",
        COPY_PASTE_SKETCH,
    ];

    /// Actions that start or apply an edit
    pub const EDITING: [&str; 3] = [
        "Start edit of part studio feature",
        "Start edit of assembly feature",
        "Set mate values",
    ];

    /// Actions that delete something
    pub const DELETING: [&str; 3] = [
        "Delete part studio feature",
        "Delete assembly feature",
        "Delete assembly instance",
    ];

    /// Actions that revert work
    pub const REVISING: [&str; 2] = ["Cancel Operation", "Undo Redo Operation"];

    /// Versioning actions outside the other lifecycle phases
    pub const VERSIONING: [&str; 4] = [
        "Create version",
        "Merge branch",
        "Branch workspace",
        "Update version",
    ];

    /// Tab verbs counted as viewing
    pub const TAB_VIEW_VERBS: [&str; 1] = ["opened"];

    /// Tab verbs counted as other bookkeeping
    pub const TAB_MANAGEMENT_VERBS: [&str; 3] = ["created", "deleted", "renamed"];
}

/// One `(matcher, outcome)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule<O> {
    /// Predicate over the trimmed description
    pub matcher: Matcher,

    /// Result when the predicate holds
    pub outcome: O,
}

impl<O> Rule<O> {
    /// Create new rule
    #[inline]
    #[must_use]
    pub fn new(matcher: Matcher, outcome: O) -> Self {
        Self { matcher, outcome }
    }

    /// Convert the outcome, keeping the matcher
    #[inline]
    #[must_use]
    pub fn map<P>(self, f: impl FnOnce(O) -> P) -> Rule<P> {
        Rule {
            matcher: self.matcher,
            outcome: f(self.outcome),
        }
    }
}

/// Ordered, first-match-wins rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable<O> {
    rules: Vec<Rule<O>>,
}

impl<O> Default for RuleTable<O> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<O: Copy> RuleTable<O> {
    /// Create new empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority so far
    pub fn push(&mut self, rule: Rule<O>) {
        self.rules.push(rule);
    }

    /// Builder form of [`RuleTable::push`]
    #[inline]
    #[must_use]
    pub fn with_rule(mut self, matcher: Matcher, outcome: O) -> Self {
        self.push(Rule::new(matcher, outcome));
        self
    }

    /// Outcome of the first rule matching `description`
    #[must_use]
    pub fn evaluate(&self, description: &str) -> Option<O> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(description))
            .map(|rule| rule.outcome)
    }

    /// Position of the first rule matching `description`
    #[must_use]
    pub fn position(&self, description: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.matcher.matches(description))
    }

    /// Rules in priority order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[Rule<O>] {
        &self.rules
    }

    /// Number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if table has no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<O: Copy> Extend<Rule<O>> for RuleTable<O> {
    fn extend<I: IntoIterator<Item = Rule<O>>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

/// Built-in design-space rules
#[must_use]
pub fn standard_design_space_rules() -> RuleTable<DesignSpaceOutcome> {
    use actions::*;
    use DesignSpaceOutcome::{Category, DualSketchFeature};

    RuleTable::new()
        .with_rule(Matcher::exact(ADD_OR_MODIFY_SKETCH), DualSketchFeature)
        .with_rule(
            Matcher::exact(COPY_PASTE_SKETCH),
            Category(DesignSpace::Sketching),
        )
        .with_rule(
            Matcher::one_of(FEATURE_COMMITS),
            Category(DesignSpace::ThreeDFeatures),
        )
        .with_rule(Matcher::one_of(MATING), Category(DesignSpace::Mating))
        .with_rule(
            Matcher::one_of(VISUALIZING),
            Category(DesignSpace::Visualizing),
        )
        .with_rule(Matcher::tab_event(TAB_VERBS), Category(DesignSpace::Browsing))
        .with_rule(
            Matcher::one_of(ORGANIZING),
            Category(DesignSpace::OtherOrganizing),
        )
}

/// Built-in action-type rules
#[must_use]
pub fn standard_action_type_rules() -> RuleTable<ActionTypeOutcome> {
    use actions::*;
    use ActionTypeOutcome::Category;

    RuleTable::new()
        .with_rule(Matcher::one_of(CREATING), Category(ActionType::Creating))
        .with_rule(Matcher::one_of(EDITING), Category(ActionType::Editing))
        .with_rule(Matcher::one_of(DELETING), Category(ActionType::Deleting))
        .with_rule(Matcher::one_of(REVISING), Category(ActionType::Revising))
        .with_rule(Matcher::exact(ANIMATE), Category(ActionType::Viewing))
        .with_rule(
            Matcher::tab_event(TAB_VIEW_VERBS),
            Category(ActionType::Viewing),
        )
        .with_rule(Matcher::one_of(VERSIONING), Category(ActionType::Other))
        .with_rule(
            Matcher::tab_event(TAB_MANAGEMENT_VERBS),
            Category(ActionType::Other),
        )
}
