//! I/O error types for concord-io.

use std::path::PathBuf;

use concord_engine::Status;

use crate::domain::DatasetId;

/// Errors from reading tables, the dataset store and request decoding.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a file name has an extension other than `.csv` or `.json`.
    #[error("unsupported file type: .{extension}")]
    UnsupportedFileType {
        /// Lower-cased extension, empty if there was none.
        extension: String,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("could not parse {file}: CSV error at byte offset {offset}")]
    CsvParse {
        /// Name of the uploaded file.
        file: String,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a JSON upload is not valid JSON.
    #[error("could not parse {file}: invalid JSON")]
    JsonParse {
        /// Name of the uploaded file.
        file: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when the file parses but does not describe a table.
    #[error("could not parse {file}: {reason}")]
    Malformed {
        /// Name of the uploaded file.
        file: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when a string is not a valid dataset identifier.
    #[error("invalid dataset id \"{raw}\"")]
    InvalidDatasetId {
        /// The rejected string.
        raw: String,
    },

    /// Returned when no dataset has the given identifier.
    #[error("dataset {id} not found")]
    NotFound {
        /// The requested identifier.
        id: DatasetId,
    },

    /// Returned when the dataset exists but has no such column.
    #[error("column \"{column}\" not in dataset {id}")]
    ColumnNotFound {
        /// The dataset that was searched.
        id: DatasetId,
        /// The requested column.
        column: String,
    },

    /// Returned when a thread panicked while holding the store lock.
    #[error("dataset store lock poisoned")]
    Poisoned,

    /// Returned when a comparison request body cannot be decoded.
    #[error("invalid comparison request")]
    Request {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl IoError {
    /// Stable classification for error responses.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FileNotFound",
            Self::UnsupportedFileType { .. } => "UnsupportedFileType",
            Self::CsvParse { .. } | Self::JsonParse { .. } | Self::Malformed { .. } => "ParseError",
            Self::InvalidDatasetId { .. } => "InvalidDatasetId",
            Self::NotFound { .. } => "NotFound",
            Self::ColumnNotFound { .. } => "ColumnNotFound",
            Self::Poisoned => "Internal",
            Self::Request { .. } => "InvalidRequest",
        }
    }

    /// Client input, except for a poisoned store lock.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Poisoned => Status::Internal,
            _ => Status::ClientInput,
        }
    }

    pub(crate) fn malformed(file: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}
