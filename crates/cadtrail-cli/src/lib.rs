//! cadtrail command-line front end
//!
//! Discovers audit-trail CSV exports, aggregates them with
//! `cadtrail-engine`, and writes the counts as CSV or JSON.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod discover;
pub mod error;
pub mod export;
pub mod logging;
pub mod reader;

pub use commands::{count, coverage, describe, CountRun};
pub use config::{CliConfig, ExtraRules, Overrides};
pub use discover::{discover, SourceFile};
pub use error::CliError;
pub use export::{export, write_csv, write_json, ExportFormat, DEFAULT_OUTPUT, STDOUT_PATH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
