//! Lenient field deserializers for upstream payloads.
//!
//! The analytics API is not consistent about numeric encoding: the same field
//! may arrive as `12.5`, `"12.5"` or `null` depending on the symbol. These
//! helpers accept both encodings and still reject anything that is not a
//! number, so a malformed payload fails validation instead of decoding to a
//! silent default.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64<E: Error>(value: &Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(num) => num
            .as_f64()
            .map(Some)
            .ok_or_else(|| E::custom(format!("number out of range: {num}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| E::custom(format!("expected a number, found {s:?}"))),
        other => Err(E::custom(format!("expected a number, found {other}"))),
    }
}

/// Required number, given as a JSON number or a numeric string.
pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value)?.ok_or_else(|| D::Error::custom("expected a number, found null"))
}

/// Optional number; `null`, `""` and a missing key all decode to `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value)
}

/// Whole number; floats are truncated (`"12.0"` and `12.4` both give 12).
pub fn i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    value_to_f64(&value)?
        .map(|f| f.trunc() as i64)
        .ok_or_else(|| D::Error::custom("expected an integer, found null"))
}

fn value_to_label<E: Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(num) => Ok(Some(num.to_string())),
        other => Err(E::custom(format!("expected a string or number, found {other}"))),
    }
}

/// Label that may be sent as a string (`"52"`) or a number (`52`).
pub fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_label(value)?.ok_or_else(|| D::Error::custom("expected a string or number, found null"))
}

/// Optional form of [`label`].
pub fn opt_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_label(value)
}
