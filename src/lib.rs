//! nso-restconf - Rust client for the Cisco NSO RESTCONF API
//!
//! This library maps hierarchical datastore paths onto RESTCONF HTTP
//! requests and decodes the JSON answers into [`serde_json::Value`] trees,
//! plus typed errors for every failure class.
//!
//! # Example
//!
//! ```no_run
//! use nso_restconf::{ClientConfig, Datastore, ResourcePath, RestconfClient};
//!
//! // Create a client for the server
//! let config = ClientConfig::new("10.159.91.14", "admin", "admin");
//! let client = RestconfClient::new(config).unwrap();
//!
//! // Read API information
//! let info = client.info().unwrap();
//!
//! // Read a data path
//! let path = ResourcePath::new().child("snmp:snmp").child("agent");
//! let agent = client.get(Datastore::Unified, &path).unwrap();
//! ```

mod client;
pub mod config;
pub mod datastore;
mod error;
pub mod http_types;
pub mod nso;
pub mod request_builder;
pub mod resource_path;
pub mod response;
pub mod transport;

pub use client::{MODULES_STATE, RestconfClient};
pub use config::{ClientConfig, Scheme};
pub use datastore::{ContentFilter, Datastore};
pub use error::{RestconfError, Result};
pub use http_types::QueryParams;
pub use nso::{ApplyRollback, RollbackId};
pub use request_builder::RequestBuilder;
pub use resource_path::{PathSegment, ResourcePath};
pub use transport::{ReqwestTransport, Transport};
