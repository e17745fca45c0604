//! Result-table export
//!
//! CSV carries one row per source identity under [`export_header`]; JSON
//! carries the same data keyed by category.

use crate::error::CliError;
use cadtrail_classify::{ActionType, DesignSpace};
use cadtrail_engine::{export_header, ResultTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output path meaning standard output
pub const STDOUT_PATH: &str = "-";

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "Counts.csv";

/// Export encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON array of records
    Json,
}

impl ExportFormat {
    /// Format names accepted on the command line
    pub const NAMES: [&'static str; 2] = ["csv", "json"];
}

impl FromStr for ExportFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(CliError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    source: &'a str,
    design_space: IndexMap<DesignSpace, i64>,
    action_type: IndexMap<ActionType, i64>,
}

/// Write `table` as CSV
///
/// # Errors
/// Returns the writer's error.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(export_header())?;
    for (key, row) in table.export_rows() {
        writer.write_record(
            std::iter::once(key.to_string()).chain(row.iter().map(i64::to_string)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `table` as a pretty-printed JSON array
///
/// # Errors
/// Returns the encoder's error.
pub fn write_json<W: Write>(table: &ResultTable, mut writer: W) -> serde_json::Result<()> {
    let records: Vec<_> = table
        .sorted()
        .into_iter()
        .map(|(source, record)| JsonRecord {
            source,
            design_space: DesignSpace::ALL
                .iter()
                .map(|&category| (category, record.design_space_count(category)))
                .collect(),
            action_type: ActionType::ALL
                .iter()
                .map(|&category| (category, record.action_type_count(category)))
                .collect(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)
}

/// Write `table` to `output` (or stdout for `-`) in `format`
///
/// # Errors
/// [`CliError::Io`] when the file cannot be created, otherwise the encoder's error.
pub fn export(table: &ResultTable, format: ExportFormat, output: &Path) -> Result<(), CliError> {
    if output == Path::new(STDOUT_PATH) {
        return write_to(table, format, io::stdout().lock(), output);
    }

    let file = File::create(output).map_err(|source| CliError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    write_to(table, format, BufWriter::new(file), output)?;
    tracing::info!(path = %output.display(), %format, records = table.len(), "wrote counts");
    Ok(())
}

fn write_to<W: Write>(
    table: &ResultTable,
    format: ExportFormat,
    writer: W,
    output: &Path,
) -> Result<(), CliError> {
    match format {
        ExportFormat::Csv => write_csv(table, writer).map_err(|source| CliError::Csv {
            path: PathBuf::from(output),
            source,
        }),
        ExportFormat::Json => write_json(table, writer).map_err(CliError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadtrail_engine::{aggregate, Partition};
    use cadtrail_test_utils::audit_trail;
    use pretty_assertions::assert_eq;

    fn table() -> ResultTable {
        let rows = audit_trail(&[
            ("x@x.com", "Add part studio feature"),
            ("y@y.com", "Add or modify a sketch"),
        ]);
        aggregate("trail", &rows, Partition::ByUser).unwrap()
    }

    #[test]
    fn csv_layout() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File Name,Sketching,3D Features,Mating,Visualizing,Browsing,Other Organizing,\
             Creating,Editing,Deleting,Reversing,Viewing,Other\n\
             trail/x,0,0,0,0,0,0,1,0,0,0,0,0\n\
             trail/y,1,-1,0,0,0,0,0,0,0,0,0,0\n"
        );
    }

    #[test]
    fn json_layout() {
        let mut out = Vec::new();
        write_json(&table(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["source"], "trail/x");
        assert_eq!(value[0]["action_type"]["creating"], 1);
        assert_eq!(value[1]["design_space"]["sketching"], 1);
        assert_eq!(value[1]["design_space"]["3d_features"], -1);
    }

    #[test]
    fn empty_table_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&ResultTable::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
