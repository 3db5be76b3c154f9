//! Dataset storage, table readers and the JSON request/response codec.
//!
//! Uploaded CSV or JSON tables are parsed into [`Table`]s and kept in a
//! [`DatasetStore`] under generated [`DatasetId`]s. Columns come back out as
//! plain `Vec<f64>` sequences for the comparison engine. Cells that are not
//! numbers are kept as NaN, so the engine's validator reports them.

mod coerce;
mod domain;
mod error;
mod reader;
mod request;
mod store;

pub use domain::{Column, DatasetId, DatasetSummary, Table};
pub use error::IoError;
pub use reader::{TableFormat, parse_csv, parse_json, parse_table, read_table};
pub use request::{CompareRequest, ErrorResponse, SeriesData};
pub use store::DatasetStore;
