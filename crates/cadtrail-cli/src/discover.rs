//! Audit-trail discovery

use crate::error::CliError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of audit-trail exports
pub const AUDIT_TRAIL_EXTENSION: &str = "csv";

/// Audit-trail file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Source identity: the file stem
    pub id: String,
    /// Full path
    pub path: PathBuf,
}

/// Find every `*.csv` file under `root`, sorted by path
///
/// # Errors
/// [`CliError::Walk`] when the directory cannot be traversed.
pub fn discover(root: &Path) -> Result<Vec<SourceFile>, CliError> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(AUDIT_TRAIL_EXTENSION) {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        found.push(SourceFile {
            id: id.to_string(),
            path: path.to_path_buf(),
        });
    }
    found.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!(root = %root.display(), files = found.len(), "discovered audit trails");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_csv_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "").unwrap();
        fs::write(dir.path().join("a.csv"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.csv"), "").unwrap();

        let ids: Vec<_> = discover(dir.path())
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("missing")).is_err());
    }
}
