// src/state.rs

use crate::config::Config;
use crate::domain::NormalizeOptions;
use crate::relay::{Dispatcher, ForwardError, Forwarder, HttpForwarder, StartError};
use crate::store::ListingStore;
use std::sync::Arc;

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Everything the request handlers share.
pub struct AppState {
    pub store: ListingStore,
    pub dispatcher: Dispatcher,
    /// Append ingested payloads to `store`.
    pub store_listings: bool,
    /// Ingest bodies larger than this are refused.
    pub max_body_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Forwarder(#[from] ForwardError),

    #[error(transparent)]
    Dispatcher(#[from] StartError),
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, store_listings: bool) -> Self {
        Self {
            store: ListingStore::new(),
            dispatcher,
            store_listings,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Wire the HTTP forwarder and worker pool described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let forwarder: Arc<dyn Forwarder> = Arc::new(HttpForwarder::new(
            config.downstream_url.clone(),
            config.forward_timeout(),
        )?);

        let options = NormalizeOptions {
            default_state: config.default_state.clone(),
            geocode: config.geocode,
        };

        let dispatcher = Dispatcher::start(
            config.forward_workers,
            config.forward_queue_capacity,
            options,
            forwarder,
        )?;

        Ok(Self::new(dispatcher, config.store_listings).with_max_body_bytes(config.max_body_bytes))
    }
}
