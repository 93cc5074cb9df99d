//! Blocking (synchronous) HTTP transport
//!
//! Posts one envelope per call to the scripting endpoint and hands back the
//! raw status and body. Status interpretation belongs to the channel.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::types::{Envelope, RawResponse};
use crate::error::{Result, TriliumError};

/// One synchronous request/response exchange
pub trait Transport: Send + Sync {
    fn send(&self, envelope: &Envelope) -> Result<RawResponse>;
}

/// Blocking HTTP transport for the scripting endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for `endpoint`. `timeout_secs = None` blocks until
    /// the server answers.
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| TriliumError::Transport {
            status: None,
            message: format!("Invalid endpoint URL '{}': {}", endpoint, e),
        })?;

        let mut builder = Client::builder();
        builder = match timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.timeout(None),
        };
        let client = builder.build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, envelope: &Envelope) -> Result<RawResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(envelope)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(RawResponse { status, body })
    }
}
