// Permissive field decoding for upstream plan payloads.
// Every helper here turns a shape mismatch into "absent" instead of an error,
// so one odd field never rejects a whole plan.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

// Plain decimals, or thousands grouped with commas. "1.250,00" and "12,50" do not match.
static NUMERIC_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").expect("numeric pattern is valid")
});

// Decode into `T`, or `None` when the value has the wrong shape.
pub fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

// Accepts JSON numbers and numeric strings (`"1,250.50"` included).
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

// Accepts strings, or numbers rendered as text. Blank strings are absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_text(&value))
}

// Non-negative whole number, truncating fractions.
pub fn whole<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_whole(&value))
}

// Like [`whole`] but for counters that default to zero.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_whole(&value).unwrap_or(0))
}

// Decode an array element by element, dropping elements that do not fit `T`.
// Anything other than an array is absent.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if decoded.len() < total {
        warn!(
            dropped = total - decoded.len(),
            kept = decoded.len(),
            "dropping malformed list entries"
        );
    }

    Ok(Some(decoded))
}

pub fn as_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s.trim()),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    if !NUMERIC_TEXT.is_match(s) {
        debug!(value = s, "ignoring string that is not a plain number");
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_whole(value: &Value) -> Option<u32> {
    let n = as_number(value)?;
    (n >= 0.0).then(|| n.trunc().min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "number")]
        amount: Option<f64>,
        #[serde(deserialize_with = "text")]
        label: Option<String>,
        #[serde(deserialize_with = "whole")]
        nights: Option<u32>,
        #[serde(deserialize_with = "list")]
        codes: Option<Vec<String>>,
    }

    #[test_case(json!(1500), Some(1500.0); "plain number")]
    #[test_case(json!("2,400.50"), Some(2400.5); "formatted string")]
    #[test_case(json!(" 1250 "), Some(1250.0); "padded string")]
    #[test_case(json!("-12.5"), Some(-12.5); "negative string")]
    #[test_case(json!("1.250,00"), None; "european grouping")]
    #[test_case(json!("12,50"), None; "decimal comma")]
    #[test_case(json!("1,2,3"), None; "stray commas")]
    #[test_case(json!("1e3"), None; "exponent string")]
    #[test_case(json!("abc"), None; "non numeric string")]
    #[test_case(json!(true), None; "boolean")]
    #[test_case(json!(null), None; "null")]
    fn test_number_field(input: Value, expected: Option<f64>) {
        let fields: Fields = serde_json::from_value(json!({ "amount": input })).unwrap();
        assert_eq!(fields.amount, expected);
    }

    #[test]
    fn test_text_accepts_numbers_and_rejects_blank() {
        let fields: Fields = serde_json::from_value(json!({ "label": 42 })).unwrap();
        assert_eq!(fields.label.as_deref(), Some("42"));

        let fields: Fields = serde_json::from_value(json!({ "label": "   " })).unwrap();
        assert_eq!(fields.label, None);

        let fields: Fields = serde_json::from_value(json!({ "label": { "nested": 1 } })).unwrap();
        assert_eq!(fields.label, None);
    }

    #[test]
    fn test_whole_rejects_negative() {
        let fields: Fields = serde_json::from_value(json!({ "nights": -2 })).unwrap();
        assert_eq!(fields.nights, None);

        let fields: Fields = serde_json::from_value(json!({ "nights": "3" })).unwrap();
        assert_eq!(fields.nights, Some(3));
    }

    #[test]
    fn test_list_drops_bad_entries() {
        let fields: Fields =
            serde_json::from_value(json!({ "codes": ["TG", 7, "FD", null] })).unwrap();
        assert_eq!(
            fields.codes,
            Some(vec!["TG".to_string(), "FD".to_string()])
        );

        let fields: Fields = serde_json::from_value(json!({ "codes": "TG" })).unwrap();
        assert_eq!(fields.codes, None);
    }
}
