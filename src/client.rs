//! RESTCONF client
//!
//! [`RestconfClient`] maps a datastore plus a [`ResourcePath`] onto a single
//! HTTP request. Every call is one blocking request/response; nothing is
//! retried and nothing is cached.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::datastore::Datastore;
use crate::error::{RestconfError, Result};
use crate::http_types::{Method, QueryParams, Response};
use crate::request_builder::RequestBuilder;
use crate::resource_path::ResourcePath;
use crate::response;
use crate::transport::{ReqwestTransport, Transport};

/// YANG library node read by [`RestconfClient::info`]
pub const MODULES_STATE: &str = "ietf-yang-library:modules-state";

/// Wrapper member of a datastore root document (RFC 8040 section 3.3.1)
const DATASTORE_ROOT: &str = "ietf-restconf:data";

/// Blocking client for a RESTCONF server
///
/// # Example
/// ```no_run
/// use nso_restconf::{ClientConfig, Datastore, ResourcePath, RestconfClient};
///
/// let client = RestconfClient::new(ClientConfig::new("10.0.0.1", "admin", "admin"))?;
/// let path = ResourcePath::new().child("tailf-ncs:devices").entry("device", ["ex0"]);
/// let device = client.get(Datastore::Unified, &path)?;
/// # Ok::<(), nso_restconf::RestconfError>(())
/// ```
#[derive(Debug)]
pub struct RestconfClient<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    builder: RequestBuilder,
    transport: T,
}

impl RestconfClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RestconfClient<T> {
    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let builder = RequestBuilder::new(&config)?;
        Ok(Self {
            config,
            builder,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send one request and return the URL it went to with the raw response
    pub(crate) fn execute(
        &self,
        method: Method,
        datastore: Option<Datastore>,
        path: &ResourcePath,
        params: &QueryParams,
        payload: Option<&Value>,
    ) -> Result<(String, Response)> {
        let request = self
            .builder
            .build(method, datastore, path, params, payload)?;
        let url = request.url.to_string();
        debug!(%method, %url, "sending request");

        let response = self.transport.send(&request)?;
        debug!(%method, %url, status = response.status, "request completed");
        Ok((url, response))
    }

    /// Send one request and decode its JSON body
    pub(crate) fn call(
        &self,
        method: Method,
        datastore: Option<Datastore>,
        path: &ResourcePath,
        params: &QueryParams,
        payload: Option<&Value>,
    ) -> Result<Option<Value>> {
        let (url, response) = self.execute(method, datastore, path, params, payload)?;
        response::decode(method, &response, &url)
    }

    /// Read a data resource
    pub fn get(&self, datastore: Datastore, path: &ResourcePath) -> Result<Option<Value>> {
        self.get_with_params(datastore, path, &QueryParams::new())
    }

    pub fn get_with_params(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        self.call(Method::Get, Some(datastore), path, params, None)
    }

    /// Create or replace a data resource
    pub fn put<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
    ) -> Result<Option<Value>> {
        self.put_with_params(datastore, path, payload, &QueryParams::new())
    }

    pub fn put_with_params<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        let payload = serde_json::to_value(payload)?;
        self.call(Method::Put, Some(datastore), path, params, Some(&payload))
    }

    /// Create a child data resource
    pub fn post<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
    ) -> Result<Option<Value>> {
        self.post_with_params(datastore, path, payload, &QueryParams::new())
    }

    pub fn post_with_params<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        let payload = serde_json::to_value(payload)?;
        self.call(Method::Post, Some(datastore), path, params, Some(&payload))
    }

    /// Merge a partial update into a data resource
    pub fn patch<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
    ) -> Result<Option<Value>> {
        self.patch_with_params(datastore, path, payload, &QueryParams::new())
    }

    pub fn patch_with_params<P: Serialize + ?Sized>(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        payload: &P,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        let payload = serde_json::to_value(payload)?;
        self.call(Method::Patch, Some(datastore), path, params, Some(&payload))
    }

    /// Delete a data resource
    pub fn delete(&self, datastore: Datastore, path: &ResourcePath) -> Result<Option<Value>> {
        self.delete_with_params(datastore, path, &QueryParams::new())
    }

    pub fn delete_with_params(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        self.call(Method::Delete, Some(datastore), path, params, None)
    }

    /// Check whether a data resource exists (HEAD)
    ///
    /// A 404 answers `false`; any other failure is returned as an error.
    pub fn exists(&self, datastore: Datastore, path: &ResourcePath) -> Result<bool> {
        self.exists_with_params(datastore, path, &QueryParams::new())
    }

    pub fn exists_with_params(
        &self,
        datastore: Datastore,
        path: &ResourcePath,
        params: &QueryParams,
    ) -> Result<bool> {
        let (url, response) = self.execute(Method::Head, Some(datastore), path, params, None)?;
        match response::check_status(&response, &url) {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Methods the server allows on a resource (OPTIONS)
    pub fn options(&self, datastore: Datastore, path: &ResourcePath) -> Result<Vec<String>> {
        let (url, response) = self.execute(
            Method::Options,
            Some(datastore),
            path,
            &QueryParams::new(),
            None,
        )?;
        response::check_status(&response, &url)?;

        let allow = response
            .header("allow")
            .ok_or_else(|| RestconfError::MalformedResponse {
                message: format!("missing Allow header for {url}"),
                body: String::from_utf8_lossy(&response.body).into_owned(),
            })?;

        Ok(allow
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Server API information from the YANG library
    ///
    /// Issues a single GET of `{root}/data/ietf-yang-library:modules-state`.
    pub fn info(&self) -> Result<Value> {
        let path = ResourcePath::new().child(MODULES_STATE);
        let value = self.get(Datastore::Unified, &path)?;
        response::unwrap_member(require_body(value)?, MODULES_STATE)
    }

    /// Contents of a whole datastore
    pub fn get_datastore(&self, datastore: Datastore) -> Result<Option<Value>> {
        self.get_datastore_with_params(datastore, &QueryParams::new())
    }

    pub fn get_datastore_with_params(
        &self,
        datastore: Datastore,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        let value = self.get_with_params(datastore, &ResourcePath::new(), params)?;
        Ok(value.map(|v| match v {
            Value::Object(mut map) if map.contains_key(DATASTORE_ROOT) => {
                map.remove(DATASTORE_ROOT).unwrap_or_default()
            }
            other => other,
        }))
    }

    /// Invoke an action or RPC and return its output
    ///
    /// The `<module>:output` wrapper is removed when present.
    pub fn call_operation<P: Serialize + ?Sized>(
        &self,
        path: &ResourcePath,
        input: &P,
    ) -> Result<Option<Value>> {
        self.call_operation_with_params(path, input, &QueryParams::new())
    }

    pub fn call_operation_with_params<P: Serialize + ?Sized>(
        &self,
        path: &ResourcePath,
        input: &P,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        let output = self.post_with_params(Datastore::Unified, path, input, params)?;
        Ok(output.map(strip_output_wrapper))
    }
}

/// Require a body where the protocol guarantees one
pub(crate) fn require_body(value: Option<Value>) -> Result<Value> {
    value.ok_or_else(|| RestconfError::MalformedResponse {
        message: "expected a response body".into(),
        body: String::new(),
    })
}

fn strip_output_wrapper(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.len() == 1
                && map
                    .keys()
                    .all(|k| k == "output" || k.ends_with(":output")) =>
        {
            let key = map.keys().next().cloned().unwrap_or_default();
            map.remove(&key).unwrap_or_default()
        }
        other => other,
    }
}
