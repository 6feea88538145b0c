//! Client-side request building
//!
//! Turns a datastore, a resource path and an optional JSON payload into a
//! transport-ready [`Request`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::datastore::Datastore;
use crate::error::{RestconfError, Result};
use crate::http_types::{Method, QueryParams, Request, YANG_DATA_JSON};
use crate::resource_path::ResourcePath;

/// Builds RESTCONF requests for one endpoint
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    /// `{scheme}://{host}:{port}/`
    base_url: Url,
    /// Root path pieces, e.g. ["restconf"]
    root: Vec<String>,
    /// Precomputed `Authorization` header value
    authorization: String,
    timeout: std::time::Duration,
}

impl RequestBuilder {
    /// Create a builder from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let credentials = format!("{}:{}", config.username, config.password);
        let root = config
            .root_path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            base_url: config.base_url()?,
            root,
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
            timeout: config.timeout,
        })
    }

    /// Build the URL for a datastore path
    ///
    /// With `datastore` set to `None` the path is resolved against the
    /// RESTCONF root itself (vendor endpoints such as `tailf/query`).
    pub fn url(
        &self,
        datastore: Option<Datastore>,
        path: &ResourcePath,
        params: &QueryParams,
    ) -> Result<Url> {
        let mut pieces: Vec<String> = self.root.clone();
        if let Some(datastore) = datastore {
            pieces.push(datastore.resource());
        }
        pieces.extend(path.encoded_segments()?);

        let mut url = self.base_url.clone();
        url.set_path(&format!("/{}", pieces.join("/")));

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in params.iter() {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Build a complete request
    pub fn build(
        &self,
        method: Method,
        datastore: Option<Datastore>,
        path: &ResourcePath,
        params: &QueryParams,
        payload: Option<&Value>,
    ) -> Result<Request> {
        let url = self.url(datastore, path, params)?;

        let mut headers = vec![
            ("Accept".to_string(), YANG_DATA_JSON.to_string()),
            ("Authorization".to_string(), self.authorization.clone()),
        ];

        let body = match payload {
            Some(value) => {
                headers.push(("Content-Type".to_string(), YANG_DATA_JSON.to_string()));
                Some(serde_json::to_vec(value).map_err(RestconfError::from)?)
            }
            None => None,
        };

        Ok(Request {
            method,
            url,
            headers,
            body,
            timeout: self.timeout,
        })
    }
}
