//! CLI configuration
//!
//! An optional TOML file supplies defaults; command-line flags override them.
//!
//! ```toml
//! separate_users = true
//! format = "json"
//!
//! [[extra_rules.design_space]]
//! matcher = { exact = "Insert image" }
//! outcome = "visualizing"
//! ```

use crate::error::CliError;
use crate::export::{ExportFormat, DEFAULT_OUTPUT};
use cadtrail_classify::{ActionType, DesignSpace, Rule, RuleClassifier};
use cadtrail_engine::{AggregationConfig, FailureMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rules appended below the built-in tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtraRules {
    /// Extra design-space rules
    pub design_space: Vec<Rule<DesignSpace>>,
    /// Extra action-type rules
    pub action_type: Vec<Rule<ActionType>>,
}

impl ExtraRules {
    /// Check if no rules are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.design_space.is_empty() && self.action_type.is_empty()
    }
}

/// Settings for the `count` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Partition each source by user
    pub separate_users: bool,
    /// Skip malformed sources instead of aborting
    pub best_effort: bool,
    /// Aggregate sources on the rayon pool
    pub parallel: bool,
    /// Output path, `-` for stdout
    pub output: Option<PathBuf>,
    /// Output encoding
    pub format: Option<ExportFormat>,
    /// User rules
    pub extra_rules: ExtraRules,
}

impl CliConfig {
    /// Load from a TOML file
    ///
    /// # Errors
    /// [`CliError::Io`] if unreadable, [`CliError::Config`] if invalid.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns the TOML error.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Set flags that were given on the command line
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        self.separate_users |= overrides.separate_users;
        self.best_effort |= overrides.best_effort;
        self.parallel |= overrides.parallel;
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
        if let Some(format) = overrides.format {
            self.format = Some(format);
        }
        self
    }

    /// Engine configuration
    #[must_use]
    pub fn aggregation_config(&self) -> AggregationConfig {
        let failure_mode = if self.best_effort {
            FailureMode::BestEffort
        } else {
            FailureMode::FailFast
        };
        AggregationConfig::new()
            .with_separate_users(self.separate_users)
            .with_failure_mode(failure_mode)
    }

    /// Standard classifier extended with the configured rules
    #[must_use]
    pub fn classifier(&self) -> RuleClassifier {
        RuleClassifier::standard()
            .with_design_space_rules(self.extra_rules.design_space.iter().cloned())
            .with_action_type_rules(self.extra_rules.action_type.iter().cloned())
    }

    /// Resolved output path
    #[must_use]
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Resolved output format
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format.unwrap_or_default()
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--separate-users`
    pub separate_users: bool,
    /// `--best-effort`
    pub best_effort: bool,
    /// `--parallel`
    pub parallel: bool,
    /// `--output`
    pub output: Option<PathBuf>,
    /// `--format`
    pub format: Option<ExportFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadtrail_classify::{ActionClassifier, DesignSpaceOutcome};

    #[test]
    fn empty_file_is_default() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.output(), PathBuf::from("Counts.csv"));
        assert_eq!(config.format(), ExportFormat::Csv);
    }

    #[test]
    fn parses_settings_and_rules() {
        let config = CliConfig::parse(
            r#"
            separate_users = true
            best_effort = true
            output = "-"
            format = "json"

            [[extra_rules.design_space]]
            matcher = { exact = "Insert image" }
            outcome = "visualizing"

            [[extra_rules.action_type]]
            matcher = { one_of = ["Close document", "Open document"] }
            outcome = "viewing"
            "#,
        )
        .unwrap();

        assert!(config.separate_users);
        assert_eq!(config.format(), ExportFormat::Json);
        assert_eq!(config.output(), PathBuf::from("-"));
        assert_eq!(config.extra_rules.design_space.len(), 1);

        let engine = config.aggregation_config();
        assert!(engine.partition.is_partitioned());
        assert_eq!(engine.failure_mode, FailureMode::BestEffort);

        let classifier = config.classifier();
        assert_eq!(
            classifier.classify_design_space("Insert image"),
            DesignSpaceOutcome::Category(DesignSpace::Visualizing)
        );
        assert_eq!(
            classifier.classify_action_type("Open document").category(),
            Some(ActionType::Viewing)
        );
    }

    #[test]
    fn extra_rules_never_shadow_built_ins() {
        let config = CliConfig::parse(
            r#"
            [[extra_rules.design_space]]
            matcher = { exact = "Tab opened" }
            outcome = "mating"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.classifier().classify_design_space("Tab opened"),
            DesignSpaceOutcome::Category(DesignSpace::Browsing)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::parse("seperate_users = true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let file = CliConfig {
            format: Some(ExportFormat::Json),
            ..CliConfig::default()
        };
        let overrides = Overrides {
            parallel: true,
            format: Some(ExportFormat::Csv),
            output: Some(PathBuf::from("out.csv")),
            ..Overrides::default()
        };

        let merged = file.with_overrides(&overrides);

        assert!(merged.parallel);
        assert!(!merged.separate_users);
        assert_eq!(merged.format(), ExportFormat::Csv);
        assert_eq!(merged.output(), PathBuf::from("out.csv"));
    }
}
