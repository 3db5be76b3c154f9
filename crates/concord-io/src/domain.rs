//! Domain types for concord-io.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::IoError;

/// Identifier assigned to an uploaded dataset.
///
/// A random (v4) UUID, displayed and serialized in hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(Uuid);

impl DatasetId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DatasetId {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IoError::InvalidDatasetId { raw: s.to_string() })
    }
}

/// A named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub(crate) fn new(name: String, values: Vec<f64>) -> Self {
        Self { name, values }
    }

    /// Column name as it appeared in the file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell values; NaN where the file held no number.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A parsed table: ordered columns sharing one row index.
///
/// `index()[i]` labels row `i` of every column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    pub(crate) fn new(index: Vec<String>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == index.len()));
        Self { index, columns }
    }

    /// Row labels.
    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Columns in file order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in file order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by exact name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }
}

/// Listing entry for one stored dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Original file name of the upload.
    pub name: String,
    /// Column names in file order.
    pub columns: Vec<String>,
}
