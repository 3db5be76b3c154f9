//! Lenient conversion of cells and JSON values to `f64`.
//!
//! Anything that is not a number, or a string holding one, becomes NaN.

use serde_json::Value;

pub(crate) fn cell_to_f64(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return f64::NAN;
    }
    raw.parse().unwrap_or(f64::NAN)
}

pub(crate) fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => cell_to_f64(s),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_cells_parse() {
        assert_eq!(cell_to_f64(" 1.5 "), 1.5);
        assert_eq!(cell_to_f64("-2e3"), -2000.0);
        assert!(cell_to_f64("").is_nan());
        assert!(cell_to_f64("abc").is_nan());
    }

    #[test]
    fn json_values_coerce() {
        assert_eq!(value_to_f64(&json!(3)), 3.0);
        assert_eq!(value_to_f64(&json!("4.25")), 4.25);
        assert!(value_to_f64(&json!(null)).is_nan());
        assert!(value_to_f64(&json!(true)).is_nan());
        assert!(value_to_f64(&json!([1])).is_nan());
    }
}
