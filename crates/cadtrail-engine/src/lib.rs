//! cadtrail aggregation engine
//!
//! Turns ordered audit-trail rows into per-source (or per-user) category
//! counts.
//!
//! # Core Concepts
//!
//! - [`RowAggregator`]: one linear pass over one source
//! - [`Partition`]: whole source, per user, or a custom sub-key
//! - [`Orchestrator`]: many sources, merged as a disjoint union
//! - [`ResultTable`]: source identity to [`AggregationRecord`]
//! - [`Coverage`]: descriptions that fall through both rule tables
//!
//! # Example
//!
//! ```rust
//! use cadtrail_engine::{aggregate_many, AggregationConfig};
//!
//! let header = vec!["Index", "Event Time", "Document", "Tab", "User", "Description"];
//! let row = vec!["1", "2021-08-21 19:12:19", "Doc", "N/A", "x@x.com", "Tab opened"];
//! let sources = vec![("trail", vec![header, row])];
//!
//! let table = aggregate_many(sources, &AggregationConfig::new())?;
//! assert_eq!(table.get("trail").unwrap().to_row()[4], 1);
//! # Ok::<(), cadtrail_engine::AggregateError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregator;
mod config;
mod coverage;
mod error;
mod orchestrator;
mod record;
mod row;
mod table;

pub use aggregator::{aggregate, RowAggregator};
pub use config::{AggregationConfig, FailureMode, Partition, PartitionFn};
pub use coverage::Coverage;
pub use error::AggregateError;
pub use orchestrator::{aggregate_many, OrchestrationReport, Orchestrator, Source, SourceFailure};
pub use record::{AggregationRecord, CountVector, RECORD_WIDTH};
pub use row::{
    is_audit_trail_header, LogRow, AUDIT_TRAIL_HEADER, DESCRIPTION_FIELD, FIELD_COUNT, USER_FIELD,
};
pub use table::{export_header, partition_identity, ResultTable, PARTITION_SEPARATOR, SOURCE_COLUMN};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
