//! Decoders for JSON columns that may arrive double-encoded.
//!
//! Stored analyses keep `parameters` and `dominant_frequencies` in JSON columns.
//! Depending on how a row was written, the backend returns either the structured
//! value or a string containing its JSON encoding. Use [`json_or_encoded`] as a
//! `deserialize_with` hook so the rest of the code only ever sees the typed value.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T` from either its JSON form or a string holding that JSON.
///
/// `null` decodes to `T::default()`. Any other shape, including a string that does
/// not parse as `T`, is a decode error.
pub fn json_or_encoded<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(T::default()),
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(|e| {
            D::Error::custom(format!("encoded JSON field does not match expected shape: {e}"))
        }),
        other => serde_json::from_value(other).map_err(D::Error::custom),
    }
}

/// Deserialize `T`, mapping `null` to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
