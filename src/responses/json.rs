// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use serde_json::json;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

pub fn json_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value)
        .map_err(|e| ServerError::Internal(format!("Failed to encode response: {e}")))?;
    build(status, body)
}

/// Same as [`json_response`] but indented with four spaces, for listings
/// meant to be read by people.
pub fn pretty_json_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let mut body = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| ServerError::Internal(format!("Failed to encode response: {e}")))?;
    build(status, body)
}

/// `{"message": "..."}` with the given status.
pub fn json_message(status: u16, message: &str) -> ResultResp {
    json_response(status, &json!({ "message": message }))
}

fn build(status: u16, body: Vec<u8>) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::Internal("Failed to build response".into()))
}
