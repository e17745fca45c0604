//! Command implementations
//!
//! Each command returns data; printing and exit codes belong to `main`.

use crate::config::CliConfig;
use crate::discover::{discover, SourceFile};
use crate::error::CliError;
use crate::reader::load;
use cadtrail_classify::{ActionClassifier, RuleClassifier};
use cadtrail_engine::{Coverage, OrchestrationReport, Orchestrator, Source};
use std::path::{Path, PathBuf};

/// Result of the `count` command
#[derive(Debug)]
pub struct CountRun {
    /// Engine report
    pub report: OrchestrationReport,
    /// Files skipped in best-effort mode because they could not be read
    pub unreadable: Vec<PathBuf>,
}

impl CountRun {
    /// Check if every discovered file was counted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.report.is_complete() && self.unreadable.is_empty()
    }
}

/// Discover, load and aggregate every audit trail under `dir`
///
/// # Errors
/// - [`CliError::NoSources`] if `dir` holds no `*.csv` files.
/// - Read and aggregation errors, unless best-effort mode skips them.
pub fn count(dir: &Path, config: &CliConfig) -> Result<CountRun, CliError> {
    let files = discover(dir)?;
    if files.is_empty() {
        return Err(CliError::NoSources(dir.to_path_buf()));
    }

    let (sources, unreadable) = load_all(&files, config.best_effort)?;

    let classifier = config.classifier();
    let orchestrator = Orchestrator::new(&classifier, &config.aggregation_config());
    let report = if config.parallel {
        orchestrator.run_parallel(&sources)?
    } else {
        orchestrator.run(sources.iter().map(|s| (s.id.as_str(), &s.rows)))?
    };

    Ok(CountRun { report, unreadable })
}

fn load_all(
    files: &[SourceFile],
    best_effort: bool,
) -> Result<(Vec<Source>, Vec<PathBuf>), CliError> {
    let mut sources = Vec::with_capacity(files.len());
    let mut unreadable = Vec::new();
    for file in files {
        match load(file) {
            Ok(source) => sources.push(source),
            Err(error) if best_effort && error.is_source_local() => {
                tracing::warn!(path = %file.path.display(), %error, "skipping unreadable file");
                unreadable.push(file.path.clone());
            }
            Err(error) => return Err(error),
        }
    }
    Ok((sources, unreadable))
}

/// One line per description: description, design space, action type
#[must_use]
pub fn describe<C: ActionClassifier + ?Sized>(classifier: &C, description: &str) -> String {
    let classification = classifier.classify(description.trim());
    format!(
        "{}\t{}\t{}",
        description.trim(),
        classification.design_space,
        classification.action_type
    )
}

/// Tally unclassified descriptions across every audit trail under `dir`
///
/// # Errors
/// Discovery, read, and malformed-row errors.
pub fn coverage(dir: &Path, classifier: &RuleClassifier) -> Result<Coverage, CliError> {
    let files = discover(dir)?;
    if files.is_empty() {
        return Err(CliError::NoSources(dir.to_path_buf()));
    }

    let mut total = Coverage::new();
    for file in &files {
        let source = load(file)?;
        total.merge(Coverage::scan_with(classifier, &source.id, &source.rows)?);
    }
    Ok(total)
}
