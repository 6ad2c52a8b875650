//! Lenient coercion of JSON values into the scalar types the schema needs.
//!
//! Producers write numeric options as strings (`"0.500000"`), so numbers are
//! accepted either as JSON numbers or as strings that parse as `f64`.

use grapher_common::{GrapherError, Result};
use serde_json::Value;

/// Coerce a required numeric field.
pub fn number(value: &Value, field: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| GrapherError::malformed_field(format!("{field} is out of range"), field)),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            GrapherError::malformed_field(format!("{field} is not a number: {s:?}"), field)
        }),
        Value::Null => Err(GrapherError::malformed_field(
            format!("{field} is required"),
            field,
        )),
        other => Err(GrapherError::malformed_field(
            format!("{field} is not a number: {other}"),
            field,
        )),
    }
}

/// Coerce an optional numeric field; `null` and `""` mean absent.
pub fn optional_number(value: &Value, field: &str) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => number(other, field).map(Some),
    }
}

/// Coerce a non-negative integer field, accepting integral floats and strings.
pub fn count(value: &Value, field: &str) -> Result<usize> {
    let n = number(value, field)?;
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(GrapherError::malformed_field(
            format!("{field} must be a non-negative integer, got {n}"),
            field,
        ));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(n as usize)
}

/// Coerce a text field. Scalars are stringified; `null` becomes empty text.
pub fn text(value: &Value, field: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(GrapherError::malformed_field(
            format!("{field} must be text, got {other}"),
            field,
        )),
    }
}

/// Coerce an optional text field; `null` means absent.
pub fn optional_text(value: &Value, field: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        other => text(other, field).map(Some),
    }
}

/// Coerce one `(x, y)` point given as a two-element list.
pub fn point(value: &Value, field: &str) -> Result<(f64, f64)> {
    match value.as_array().map(Vec::as_slice) {
        Some([x, y, ..]) => Ok((number(x, field)?, number(y, field)?)),
        _ => Err(GrapherError::malformed_field(
            format!("{field} entries must be [x, y] pairs, got {value}"),
            field,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(number(&json!(1.5), "th").unwrap(), 1.5);
        assert_eq!(number(&json!(2), "th").unwrap(), 2.0);
        assert_eq!(number(&json!("0.500000"), "th").unwrap(), 0.5);
        assert_eq!(number(&json!(" -3 "), "th").unwrap(), -3.0);
    }

    #[test]
    fn test_number_rejects_other_values() {
        let err = number(&json!("abc"), "thp").unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(err.field(), Some("thp"));

        assert!(number(&Value::Null, "t0").is_err());
        assert!(number(&json!([1]), "t0").is_err());
        assert!(number(&json!(true), "t0").is_err());
    }

    #[test]
    fn test_optional_number_treats_empty_as_absent() {
        assert_eq!(optional_number(&Value::Null, "ymin").unwrap(), None);
        assert_eq!(optional_number(&json!(""), "ymin").unwrap(), None);
        assert_eq!(optional_number(&json!("0"), "ymin").unwrap(), Some(0.0));
        assert!(optional_number(&json!("low"), "ymin").is_err());
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&json!(5), "num_ticks").unwrap(), 5);
        assert_eq!(count(&json!("7"), "num_ticks").unwrap(), 7);
        assert!(count(&json!(2.5), "num_ticks").is_err());
        assert!(count(&json!(-1), "num_ticks").is_err());
    }

    #[test]
    fn test_text_stringifies_scalars() {
        assert_eq!(text(&json!("$x$"), "xlabel").unwrap(), "$x$");
        assert_eq!(text(&json!(3), "xlabel").unwrap(), "3");
        assert_eq!(text(&Value::Null, "xlabel").unwrap(), "");
        assert!(text(&json!({"a": 1}), "xlabel").is_err());
        assert_eq!(optional_text(&Value::Null, "label").unwrap(), None);
    }

    #[test]
    fn test_point() {
        assert_eq!(point(&json!([1, 2]), "data").unwrap(), (1.0, 2.0));
        assert_eq!(point(&json!(["1.5", 2]), "data").unwrap(), (1.5, 2.0));
        assert!(point(&json!([1]), "data").is_err());
        assert!(point(&json!(1), "data").is_err());
    }
}
