//! Reshaping ingested listings and shipping them to the downstream endpoint.
//!
//! - **`forwarder`**: the outbound POST, behind the [`Forwarder`] trait.
//! - **`dispatcher`**: a bounded pool of worker threads that runs
//!   [`process`] for every accepted payload, decoupled from the request that
//!   delivered it.

pub mod dispatcher;
pub mod forwarder;

pub use dispatcher::{Dispatcher, StartError};
pub use forwarder::{ForwardError, Forwarder, HttpForwarder};

use crate::domain::{normalize, NormalizeOptions, TransformError};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Error transforming listing: {0}")]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

/// Normalize one payload and forward it. Returns the downstream status.
pub fn process(
    payload: &[u8],
    options: &NormalizeOptions,
    forwarder: &dyn Forwarder,
) -> Result<u16, RelayError> {
    let record = normalize(payload, options)?;
    let body = serde_json::to_vec(&record).map_err(ForwardError::Serialize)?;
    let status = forwarder.forward(&body)?;
    Ok(status)
}
