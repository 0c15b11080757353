// src/domain/listing.rs

use serde_json::{Map, Value};

/// Key of the nested object holding the bold "label: value" pairs scraped
/// from a listing page (Property Type, Building Size, Asking Price, ...).
pub const BOLD_MAP_KEY: &str = "KeyBoldMap";

/// One ingested payload, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredListing {
    pub data: Vec<u8>,
}

impl StoredListing {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn decode(&self) -> Result<ListingPayload, TransformError> {
        ListingPayload::from_slice(&self.data)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing or malformed field {0:?}")]
    MissingField(&'static str),
}

/// A decoded listing payload: a JSON object whose shape is only loosely known.
#[derive(Debug, Clone)]
pub struct ListingPayload {
    fields: Map<String, Value>,
}

impl ListingPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TransformError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(TransformError::NotAnObject),
        }
    }

    /// Value of a top-level field, `Null` when absent.
    pub fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The nested bold map. Absent or not an object is an error, never a panic.
    pub fn bold_map(&self) -> Result<&Map<String, Value>, TransformError> {
        self.fields
            .get(BOLD_MAP_KEY)
            .and_then(Value::as_object)
            .ok_or(TransformError::MissingField(BOLD_MAP_KEY))
    }
}
