use crate::domain::{flatten_all, StoredListing};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{json_message, pretty_json_response};
use crate::state::AppState;
use astra::Request;
use std::io::Read;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("POST", "/data") => ingest_listing(req, state),
        ("GET", "/get") => list_listings(state),
        _ => Err(ServerError::NotFound),
    }
}

/// Accept a listing payload and queue it for forwarding. The reply never
/// depends on what happens downstream.
fn ingest_listing(mut req: Request, state: &AppState) -> ResultResp {
    let limit = state.max_body_bytes;
    let mut body = Vec::new();

    // One byte past the limit is enough to tell an oversized body apart.
    let reader = req.body_mut().reader();
    if let Err(e) = reader.take((limit as u64).saturating_add(1)).read_to_end(&mut body) {
        tracing::warn!(error = %e, "Failed to read request body");
        return Err(ServerError::BadRequest("Error reading request body".into()));
    }

    if body.len() > limit {
        tracing::warn!(limit, "Request body over size limit");
        return Err(ServerError::PayloadTooLarge);
    }

    if state.store_listings {
        state.store.append(StoredListing::new(body.clone()));
    }

    let bytes = body.len();
    match state.dispatcher.submit(body) {
        Ok(()) => tracing::debug!(bytes, "Listing queued for forwarding"),
        Err(e) => tracing::warn!(bytes, error = %e, "Listing not forwarded"),
    }

    json_message(200, "Data received and stored")
}

fn list_listings(state: &AppState) -> ResultResp {
    let listings = state.store.snapshot();

    let flattened = flatten_all(&listings).map_err(|e| {
        tracing::error!(error = %e, "Stored listing could not be decoded");
        ServerError::Internal("Error unmarshaling data".into())
    })?;

    pretty_json_response(200, &flattened)
}
