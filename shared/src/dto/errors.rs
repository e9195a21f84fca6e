//! Field-level validation errors as returned by the backend.
//!
//! The backend reports form errors as an object keyed by field name. Serializer
//! errors carry a list of messages per field (`{"email": ["Enter a valid email."]}`)
//! while some views send a single string (`{"current_password": "Current password is incorrect"}`).
//! [`FieldErrors`] accepts both and normalises to a list per field.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key used by the backend for errors not bound to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary JSON object, keeping only keys whose values look like messages.
    ///
    /// Returns `None` when `value` is not an object or holds no messages.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut errors = FieldErrors::new();
        for (field, messages) in object {
            for message in messages_of(messages) {
                errors.push(field.clone(), message);
            }
        }
        (!errors.is_empty()).then_some(errors)
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// First message for `field`, which is what a form shows under the input.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drop the messages for `field` (the user started editing it).
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Move messages reported under `from` to `to`.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(messages) = self.0.remove(from) {
            self.0.entry(to.to_string()).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first message overall, preferring non-field errors.
    pub fn first_message(&self) -> Option<&str> {
        self.get(NON_FIELD_ERRORS).or_else(|| {
            self.0
                .values()
                .find_map(|messages| messages.first())
                .map(String::as_str)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Object(_) => Ok(FieldErrors::from_value(&value).unwrap_or_default()),
            Value::Null => Ok(FieldErrors::default()),
            other => Err(serde::de::Error::custom(format!(
                "expected an object of field errors, got {other}"
            ))),
        }
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        // Nested serializer errors: flatten to their messages
        Value::Object(map) => map.values().flat_map(messages_of).collect(),
        _ => Vec::new(),
    }
}
