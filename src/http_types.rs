//! RESTCONF HTTP types and constants
//!
//! Transport-agnostic request/response structures. Any HTTP library can sit
//! behind them through the [`Transport`](crate::transport::Transport) trait.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::datastore::ContentFilter;

/// Media type for RESTCONF JSON payloads (RFC 8040 section 11.3.2)
pub const YANG_DATA_JSON: &str = "application/yang-data+json";

/// Request methods used by RESTCONF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Put,
    Post,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }

    /// Success status the server is expected to answer with
    pub fn expected_status(self) -> &'static [u16] {
        match self {
            Method::Get | Method::Head | Method::Options => &[200],
            Method::Put | Method::Post => &[200, 201, 204],
            Method::Patch | Method::Delete => &[204],
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Query string parameters, kept in insertion order
///
/// NSO understands e.g. `depth`, `fields`, `dry-run`, `with-defaults`,
/// `rollback-comment` and the `commit-queue*` family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier one with the same name
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    /// Add a value-less flag parameter such as `dry-run`
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.with(name, "")
    }

    /// Restrict the request to config or non-config data
    pub fn with_content(mut self, filter: ContentFilter) -> Self {
        if let Some(value) = filter.query_value() {
            self.set("content", value);
        }
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// A RESTCONF request (transport-agnostic)
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Fully built URL including query string
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// JSON-encoded payload
    pub body: Option<Vec<u8>>,
    /// Deadline for the whole exchange
    pub timeout: Duration,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A RESTCONF response (transport-agnostic)
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Raw response body, exactly as received
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
