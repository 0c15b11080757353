// src/domain/transform.rs

use super::listing::{ListingPayload, TransformError};
use serde::Serialize;
use serde_json::Value;

/// Kind of deal advertised by a listing, read off its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transaction {
    Sale,
    Lease,
    Unknown,
}

impl Transaction {
    /// "for-sale" is checked before "for-lease"; the first match wins.
    pub fn classify(url: Option<&str>) -> Self {
        match url {
            Some(url) if url.contains("for-sale") => Transaction::Sale,
            Some(url) if url.contains("for-lease") => Transaction::Lease,
            _ => Transaction::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub default_state: String,
    pub geocode: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_state: "AB".to_string(),
            geocode: false,
        }
    }
}

/// The record shape expected by the downstream ingestion endpoint.
///
/// Passthrough fields keep whatever JSON value the payload carried; a field
/// missing from the payload is sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedListing {
    #[serde(rename = "URL")]
    pub url: Value,
    pub location: Value,
    pub photo: Value,
    pub asset: Value,
    pub size: Value,
    pub price: Value,
    pub latitude: String,
    pub longitude: String,
    pub transaction: Transaction,
    pub lease_rate: Value,
    pub state: String,
}

/// Decode a raw ingest payload and reshape it into a [`NormalizedListing`].
pub fn normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<NormalizedListing, TransformError> {
    let payload = ListingPayload::from_slice(bytes)?;
    let bold = payload.bold_map()?;
    let bold_field = |key: &str| bold.get(key).cloned().unwrap_or(Value::Null);

    let (latitude, longitude) = if options.geocode {
        coordinates(&payload)
    } else {
        (String::new(), String::new())
    };

    Ok(NormalizedListing {
        url: payload.field("URL"),
        location: payload.field("Name"),
        photo: payload.field("Photo"),
        asset: bold_field("Property Type"),
        size: bold_field("Building Size"),
        price: bold_field("Asking Price"),
        latitude,
        longitude,
        transaction: Transaction::classify(payload.str_field("URL")),
        lease_rate: bold_field("Base Rent"),
        state: options.default_state.clone(),
    })
}

/// Coordinates already present on the payload, either as top-level
/// `Latitude`/`Longitude` or as a `Coordinate {lat, lon}` object.
fn coordinates(payload: &ListingPayload) -> (String, String) {
    let nested = payload.get("Coordinate").and_then(Value::as_object);

    let latitude = payload
        .get("Latitude")
        .or_else(|| nested.and_then(|c| c.get("lat")));
    let longitude = payload
        .get("Longitude")
        .or_else(|| nested.and_then(|c| c.get("lon")));

    (coordinate_text(latitude), coordinate_text(longitude))
}

fn coordinate_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
