//! HTTP transport abstraction
//!
//! The client never talks to an HTTP library directly. It hands a
//! [`Request`] to a [`Transport`] and gets a [`Response`] back, which keeps
//! status handling testable without a network.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{RestconfError, Result};
use crate::http_types::{Request, Response};

/// Executes one HTTP exchange.
///
/// Implementations return `Err` only when no response was received
/// (connection refused, timeout, TLS failure). Every HTTP status, including
/// 4xx/5xx, is a successful exchange.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request) -> Result<Response>;
}

/// Production transport using a pooled blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport honoring the config's timeout and TLS settings
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| RestconfError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes()?.to_vec();
        debug!(status, bytes = body.len(), "received response");

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
