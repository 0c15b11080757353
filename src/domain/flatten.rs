// src/domain/flatten.rs

use super::listing::{StoredListing, TransformError};
use serde_json::{Map, Value};

const TOP_LEVEL_FIELDS: [&str; 3] = ["URL", "Name", "Photo"];

/// Merge the top-level identity fields with every bold-map entry into one
/// flat object. Bold-map entries are copied last, so they win on collision.
pub fn flatten_listing(listing: &StoredListing) -> Result<Map<String, Value>, TransformError> {
    let payload = listing.decode()?;
    let bold = payload.bold_map()?;

    let mut flat = Map::new();
    for key in TOP_LEVEL_FIELDS {
        flat.insert(key.to_string(), payload.field(key));
    }
    for (key, value) in bold {
        flat.insert(key.clone(), value.clone());
    }

    Ok(flat)
}

/// Flatten every listing in order. One bad entry fails the whole batch.
pub fn flatten_all(listings: &[StoredListing]) -> Result<Vec<Map<String, Value>>, TransformError> {
    listings.iter().map(flatten_listing).collect()
}
