//! Deserializers for record fields the console only displays.
//!
//! A value of an unexpected shape becomes `None` (or `false`) instead of
//! failing the whole record. Only the identifier and the label are strict.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `T` from its JSON form or from a string holding it, e.g. `"1200"`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(coerce(Value::deserialize(deserializer)?))
}

/// `true`, `"true"` and `1` are set; anything else is unset.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let set = match Value::deserialize(deserializer)? {
        Value::Bool(value) => value,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_u64() == Some(1),
        _ => false,
    };
    Ok(set)
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = coerce::<DateTime<Utc>>(value.clone()).or_else(|| {
        coerce::<NaiveDate>(value)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    });
    Ok(parsed)
}

/// Bare `YYYY-MM-DD`, or the date part of a full timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = coerce::<NaiveDate>(value.clone())
        .or_else(|| coerce::<DateTime<Utc>>(value).map(|at| at.date_naive()));
    Ok(parsed)
}

fn coerce<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::String(text) => serde_json::from_value(Value::String(text.clone()))
            .ok()
            .or_else(|| serde_json::from_str(text.trim()).ok()),
        other => serde_json::from_value(other).ok(),
    }
}
