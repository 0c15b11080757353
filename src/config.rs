//! Process configuration.
//!
//! Everything comes from environment variables, optionally seeded from a
//! `.env` file in the working directory. Unset variables fall back to the
//! defaults below.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DOWNSTREAM_URL: &str = "https://jsonserver-production-0d88.up.railway.app/add";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Listening address (`LISTEN_HOST`)
    #[serde(default = "default_host")]
    pub listen_host: IpAddr,

    /// Endpoint that receives normalized listings
    #[serde(default = "default_downstream_url")]
    pub downstream_url: String,

    /// Value written to the `State` field of every normalized listing
    #[serde(default = "default_state")]
    pub default_state: String,

    /// Fill Latitude/Longitude from coordinates found on the payload
    #[serde(default)]
    pub geocode: bool,

    /// Keep ingested payloads in memory so `GET /get` can return them
    #[serde(default)]
    pub store_listings: bool,

    #[serde(default = "default_forward_workers")]
    pub forward_workers: usize,

    #[serde(default = "default_forward_queue_capacity")]
    pub forward_queue_capacity: usize,

    #[serde(default = "default_forward_timeout_secs")]
    pub forward_timeout_secs: u64,

    #[serde(default = "default_http_workers")]
    pub http_workers: usize,

    /// Largest `POST /data` body accepted
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_downstream_url() -> String {
    DEFAULT_DOWNSTREAM_URL.to_string()
}

fn default_state() -> String {
    "AB".to_string()
}

fn default_forward_workers() -> usize {
    4
}

fn default_forward_queue_capacity() -> usize {
    64
}

fn default_forward_timeout_secs() -> u64 {
    30
}

fn default_http_workers() -> usize {
    8
}

fn default_max_body_bytes() -> usize {
    crate::state::DEFAULT_MAX_BODY_BYTES
}

impl Config {
    /// Load `.env` (if any) then parse and validate the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }

        Self::from_vars(std::env::vars())
    }

    /// Parse configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.downstream_url).map_err(|source| ConfigError::InvalidDownstreamUrl {
            url: self.downstream_url.clone(),
            source,
        })?;

        if self.forward_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        if self.forward_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        if self.forward_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_host, self.port)
    }

    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.forward_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment configuration error: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid DOWNSTREAM_URL {url:?}: {source}")]
    InvalidDownstreamUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("FORWARD_WORKERS must be at least 1")]
    ZeroWorkers,

    #[error("FORWARD_QUEUE_CAPACITY must be at least 1")]
    ZeroQueueCapacity,

    #[error("FORWARD_TIMEOUT_SECS must be at least 1")]
    ZeroTimeout,

    #[error("MAX_BODY_BYTES must be at least 1")]
    ZeroBodyLimit,
}
