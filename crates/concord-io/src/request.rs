//! JSON codec for comparison requests and responses.

use std::io::Read;

use concord_engine::{CompareConfig, CompareError, ComparisonResult, Status};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::IoError;
use crate::coerce::value_to_f64;

/// Body of a comparison request: `{"seriesA": [...], "seriesB": [...]}`.
///
/// A missing or `null` series decodes as empty. Entries that are neither
/// numbers nor numeric strings decode as NaN and are later rejected by the
/// engine as non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompareRequest {
    /// First series.
    #[serde(rename = "seriesA", default, deserialize_with = "lenient_series")]
    pub series_a: Vec<f64>,
    /// Second series.
    #[serde(rename = "seriesB", default, deserialize_with = "lenient_series")]
    pub series_b: Vec<f64>,
}

impl CompareRequest {
    /// Decode a request from JSON bytes.
    ///
    /// # Errors
    ///
    /// [`IoError::Request`] if the body is not a JSON object or a series is
    /// not an array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IoError> {
        serde_json::from_slice(bytes).map_err(|source| IoError::Request { source })
    }

    /// Decode a request from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`from_slice`](Self::from_slice).
    pub fn from_reader(reader: impl Read) -> Result<Self, IoError> {
        serde_json::from_reader(reader).map_err(|source| IoError::Request { source })
    }

    /// Run the comparison this request describes.
    ///
    /// # Errors
    ///
    /// See [`CompareConfig::compare`].
    pub fn compare(&self, config: &CompareConfig) -> Result<ComparisonResult, CompareError> {
        config.compare(&self.series_a, &self.series_b)
    }
}

fn lenient_series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(value_to_f64).collect()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an array of numbers, found {other}"
        ))),
    }
}

/// Failure body: `{"error": <message>, "kind": <kind>, "status": <code>}`.
///
/// Built from a comparison error or from an I/O error met while assembling
/// the comparison (undecodable request, unknown dataset or column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable classification, e.g. `LengthMismatch` or `ColumnNotFound`.
    pub kind: &'static str,
    /// 400 for client input, 500 for internal faults.
    pub status: u16,
}

impl ErrorResponse {
    fn new(message: String, kind: &'static str, status: Status) -> Self {
        let error = match status {
            // Internal faults do not describe engine or store state.
            Status::Internal => "internal error".to_string(),
            Status::ClientInput => message,
        };
        Self {
            error,
            kind,
            status: status.code(),
        }
    }
}

impl From<&CompareError> for ErrorResponse {
    fn from(e: &CompareError) -> Self {
        Self::new(e.to_string(), e.kind().as_str(), e.status())
    }
}

impl From<&IoError> for ErrorResponse {
    fn from(e: &IoError) -> Self {
        let message = match e {
            IoError::Request { source } => format!("{e}: {source}"),
            _ => e.to_string(),
        };
        Self::new(message, e.kind(), e.status())
    }
}

/// One column ready for plotting: row labels `x` and values `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// Row labels.
    pub x: Vec<String>,
    /// Column values; NaN serializes as `null`.
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_engine::{Measure, SeriesLabel};

    #[test]
    fn decodes_wire_names() {
        let req =
            CompareRequest::from_slice(br#"{"seriesA": [1, 2.5], "seriesB": ["3", 4]}"#).unwrap();
        assert_eq!(req.series_a, vec![1.0, 2.5]);
        assert_eq!(req.series_b, vec![3.0, 4.0]);
    }

    #[test]
    fn missing_series_are_empty() {
        let req = CompareRequest::from_slice(br#"{"seriesA": null}"#).unwrap();
        assert_eq!(req, CompareRequest::default());
        let err = req.compare(&CompareConfig::new()).unwrap_err();
        assert_eq!(err, CompareError::EmptySeries { series: SeriesLabel::A });
    }

    #[test]
    fn junk_entries_become_non_numeric_errors() {
        let body = br#"{"seriesA": [1, 2, 3], "seriesB": [1, "x", 3]}"#;
        let req = CompareRequest::from_slice(body).unwrap();
        assert!(req.series_b[1].is_nan());
        let err = req.compare(&CompareConfig::new()).unwrap_err();
        assert_eq!(err, CompareError::NonNumericValue { series: SeriesLabel::B, index: 1 });
    }

    #[test]
    fn non_array_series_is_a_request_error() {
        let err = CompareRequest::from_slice(br#"{"seriesA": 5}"#).unwrap_err();
        assert!(matches!(err, IoError::Request { .. }));
        let err = CompareRequest::from_slice(b"[1, 2]").unwrap_err();
        assert!(matches!(err, IoError::Request { .. }));
    }

    #[test]
    fn client_error_response() {
        let e = CompareError::LengthMismatch { len_a: 2, len_b: 3 };
        let body = serde_json::to_value(ErrorResponse::from(&e)).unwrap();
        assert_eq!(body["kind"], "LengthMismatch");
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], e.to_string());
    }

    #[test]
    fn internal_error_response_hides_detail() {
        let e = CompareError::NonFiniteResult { measure: Measure::Dtw };
        let body = ErrorResponse::from(&e);
        assert_eq!(body.status, 500);
        assert_eq!(body.kind, "Internal");
        assert_eq!(body.error, "internal error");
    }

    #[test]
    fn undecodable_request_is_a_client_error_body() {
        let err = CompareRequest::from_slice(br#"{"seriesA": "1,2,3"}"#).unwrap_err();
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(body["kind"], "InvalidRequest");
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().starts_with("invalid comparison request: "));
    }

    #[test]
    fn poisoned_store_is_internal() {
        let body = ErrorResponse::from(&IoError::Poisoned);
        assert_eq!((body.kind, body.status), ("Internal", 500));
        assert_eq!(body.error, "internal error");
    }

    #[test]
    fn series_data_serializes_nan_as_null() {
        let data = SeriesData {
            x: vec!["0".into(), "1".into()],
            y: vec![1.0, f64::NAN],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["y"][1], Value::Null);
    }
}
