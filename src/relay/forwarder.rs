// relay/forwarder.rs

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("Error marshaling transformed data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Error creating client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error sending request: {0}")]
    Send(#[source] reqwest::Error),

    /// No connection could be made to the downstream host.
    #[error("Downstream unavailable: {0}")]
    Unavailable(String),
}

/// Delivers one serialized listing downstream and reports the response status.
pub trait Forwarder: Send + Sync {
    fn forward(&self, body: &[u8]) -> Result<u16, ForwardError>;
}

pub struct HttpForwarder {
    client: Client,
    url: String,
}

impl HttpForwarder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Forwarder for HttpForwarder {
    fn forward(&self, body: &[u8]) -> Result<u16, ForwardError> {
        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(body.to_vec())
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ForwardError::Unavailable(e.to_string())
                } else {
                    ForwardError::Send(e)
                }
            })?;

        // Body is never read; dropping the response releases the connection.
        let status = resp.status().as_u16();
        drop(resp);

        Ok(status)
    }
}
