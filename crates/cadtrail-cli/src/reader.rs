//! CSV loading
//!
//! Rows are read without header handling and with flexible widths, so short
//! rows reach the aggregator and surface as malformed-row errors with their
//! position.

use crate::discover::SourceFile;
use crate::error::CliError;
use cadtrail_engine::Source;
use std::io::Read;
use std::path::Path;

/// Read every record of a CSV stream
///
/// # Errors
/// Returns the parser's error.
pub fn read_rows<R: Read>(reader: R) -> csv::Result<Vec<Vec<String>>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

/// Read one CSV file
///
/// # Errors
/// [`CliError::Io`] if the file cannot be opened, [`CliError::Csv`] if it
/// cannot be parsed.
pub fn read_file(path: &Path) -> Result<Vec<Vec<String>>, CliError> {
    let file = std::fs::File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(std::io::BufReader::new(file)).map_err(|source| CliError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a discovered file as a named source
///
/// # Errors
/// See [`read_file`].
pub fn load(file: &SourceFile) -> Result<Source, CliError> {
    let rows = read_file(&file.path)?;
    tracing::debug!(source = %file.id, rows = rows.len(), "loaded source");
    Ok(Source::new(file.id.clone(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadtrail_test_utils::audit_trail_csv;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_quoted_fields() {
        let text = audit_trail_csv(&[("x@x.com", "Tab \"Main\", renamed")]);
        let rows = read_rows(text.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][5], "Description");
        assert_eq!(rows[1][5], "Tab \"Main\", renamed");
    }

    #[test]
    fn keeps_short_rows() {
        let rows = read_rows("a,b,c,d,e,f\n1,2\n".as_bytes()).unwrap();
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("gone.csv")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
