//! In-memory dataset store.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{DatasetId, DatasetSummary, Table};
use crate::reader::{parse_table, read_table};
use crate::request::SeriesData;

#[derive(Debug)]
struct StoredDataset {
    name: String,
    table: Arc<Table>,
}

/// Uploaded tables keyed by generated [`DatasetId`].
///
/// Safe to share across threads. Tables are immutable once stored and handed
/// out as `Arc` snapshots, so a reader racing a [`remove`](Self::remove)
/// either sees the whole table or gets [`IoError::NotFound`].
///
/// Parsing happens outside the lock; the write lock is held only to insert or
/// remove a map entry.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<HashMap<DatasetId, StoredDataset>>,
}

impl DatasetStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an upload and store it under a fresh identifier.
    ///
    /// Returns the identifier and the table's column names.
    ///
    /// # Errors
    ///
    /// As [`parse_table`], plus [`IoError::Poisoned`].
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn add(&self, file_name: &str, bytes: &[u8]) -> Result<(DatasetId, Vec<String>), IoError> {
        let table = parse_table(file_name, bytes)?;
        self.insert(file_name.to_string(), table)
    }

    /// Read a file from disk and store it.
    ///
    /// # Errors
    ///
    /// As [`read_table`], plus [`IoError::Poisoned`].
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn add_file(&self, path: &Path) -> Result<(DatasetId, Vec<String>), IoError> {
        let (file_name, table) = read_table(path)?;
        self.insert(file_name, table)
    }

    fn insert(&self, name: String, table: Table) -> Result<(DatasetId, Vec<String>), IoError> {
        let id = DatasetId::generate();
        let columns = table.column_names();
        info!(%id, name = %name, rows = table.n_rows(), columns = columns.len(), "dataset stored");
        self.write()?.insert(
            id,
            StoredDataset {
                name,
                table: Arc::new(table),
            },
        );
        Ok((id, columns))
    }

    /// Name and columns of every stored dataset, ordered by identifier.
    ///
    /// # Errors
    ///
    /// [`IoError::Poisoned`].
    pub fn list(&self) -> Result<BTreeMap<DatasetId, DatasetSummary>, IoError> {
        Ok(self
            .read()?
            .iter()
            .map(|(id, ds)| {
                let summary = DatasetSummary {
                    name: ds.name.clone(),
                    columns: ds.table.column_names(),
                };
                (*id, summary)
            })
            .collect())
    }

    /// Remove a dataset. Returns `false` if it was not stored.
    ///
    /// # Errors
    ///
    /// [`IoError::Poisoned`].
    #[instrument(skip(self))]
    pub fn remove(&self, id: &DatasetId) -> Result<bool, IoError> {
        let removed = self.write()?.remove(id).is_some();
        debug!(removed, "dataset removal");
        Ok(removed)
    }

    /// Snapshot of a stored table.
    ///
    /// # Errors
    ///
    /// [`IoError::NotFound`] or [`IoError::Poisoned`].
    pub fn table(&self, id: &DatasetId) -> Result<Arc<Table>, IoError> {
        self.read()?
            .get(id)
            .map(|ds| Arc::clone(&ds.table))
            .ok_or(IoError::NotFound { id: *id })
    }

    /// Values of one column plus the row labels, for plotting.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::NotFound`] | No dataset with this id |
    /// | [`IoError::ColumnNotFound`] | The dataset has no such column |
    /// | [`IoError::Poisoned`] | Lock poisoned |
    #[instrument(skip(self))]
    pub fn series(&self, id: &DatasetId, column: &str) -> Result<SeriesData, IoError> {
        let table = self.table(id)?;
        let col = table.column(column).ok_or_else(|| IoError::ColumnNotFound {
            id: *id,
            column: column.to_string(),
        })?;
        Ok(SeriesData {
            x: table.index().to_vec(),
            y: col.values().to_vec(),
        })
    }

    /// Values of one column, as input to a comparison.
    ///
    /// # Errors
    ///
    /// Same as [`series`](Self::series).
    pub fn retrieve(&self, id: &DatasetId, column: &str) -> Result<Vec<f64>, IoError> {
        self.series(id, column).map(|s| s.y)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<DatasetId, StoredDataset>>, IoError> {
        self.datasets.read().map_err(|_| IoError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<DatasetId, StoredDataset>>, IoError> {
        self.datasets.write().map_err(|_| IoError::Poisoned)
    }
}
