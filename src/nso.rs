//! Cisco NSO vendor extensions
//!
//! Rollback files and the `tailf/query` endpoint. Both are addressed
//! relative to the RESTCONF root rather than to a datastore.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{RestconfClient, require_body};
use crate::error::{RestconfError, Result};
use crate::http_types::{Method, QueryParams};
use crate::resource_path::ResourcePath;
use crate::response::unwrap_member;
use crate::transport::Transport;

const ROLLBACK_FILES: &str = "tailf-rollback:rollback-files";
const ROLLBACK_OUTPUT: &str = "tailf-rollback:output";
const QUERY_RESULT: &str = "tailf-rest-query:query-result";

/// Selects a rollback file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackId {
    /// Rollback index, 0 being the most recent commit
    Id(u64),
    /// Stable number that does not shift with new commits
    FixedNumber(u64),
}

impl RollbackId {
    /// Input arguments selecting this rollback file
    pub fn to_arguments(self) -> Map<String, Value> {
        let (name, number) = match self {
            RollbackId::Id(number) => ("id", number),
            RollbackId::FixedNumber(number) => ("fixed-number", number),
        };
        let mut arguments = Map::new();
        arguments.insert(name.into(), Value::from(number));
        arguments
    }
}

/// Options for applying a rollback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyRollback {
    /// Only undo this rollback's changes instead of everything after it
    pub selective: bool,
    /// Restrict the rollback to a subtree
    pub path: Option<String>,
}

impl ApplyRollback {
    pub fn selective(mut self) -> Self {
        self.selective = true;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl<T: Transport> RestconfClient<T> {
    /// List stored rollback files
    pub fn rollbacks(&self) -> Result<Value> {
        let path = ResourcePath::new().child(ROLLBACK_FILES);
        let value = self.call(Method::Get, None, &path, &QueryParams::new(), None)?;
        let files = unwrap_member(require_body(value)?, ROLLBACK_FILES)?;
        unwrap_member(files, "file")
    }

    /// Fetch the content of one rollback file
    pub fn rollback(&self, id: RollbackId) -> Result<String> {
        let path = ResourcePath::new()
            .child(ROLLBACK_FILES)
            .child("get-rollback-file");
        let input = serde_json::json!({ "input": id.to_arguments() });

        let value = self.call(Method::Post, None, &path, &QueryParams::new(), Some(&input))?;
        let output = unwrap_member(require_body(value)?, ROLLBACK_OUTPUT)?;
        match unwrap_member(output, "content")? {
            Value::String(content) => Ok(content),
            other => Err(RestconfError::MalformedResponse {
                message: "rollback content is not a string".into(),
                body: other.to_string(),
            }),
        }
    }

    /// Apply a rollback file to the running configuration
    pub fn apply_rollback(&self, id: RollbackId, options: &ApplyRollback) -> Result<()> {
        let path = ResourcePath::new()
            .child(ROLLBACK_FILES)
            .child("apply-rollback-file");

        let mut arguments = id.to_arguments();
        if options.selective {
            arguments.insert("selective".into(), Value::Object(Map::new()));
        }
        if let Some(subtree) = &options.path {
            arguments.insert("path".into(), Value::String(subtree.clone()));
        }
        let input = serde_json::json!({ "input": arguments });

        self.call(Method::Post, None, &path, &QueryParams::new(), Some(&input))?;
        Ok(())
    }

    /// Run a `tailf/query` request and return its result
    pub fn query<P: Serialize + ?Sized>(&self, query: &P) -> Result<Value> {
        let path = ResourcePath::new().child("tailf").child("query");
        let query = serde_json::to_value(query)?;

        let value = self.call(Method::Post, None, &path, &QueryParams::new(), Some(&query))?;
        unwrap_member(require_body(value)?, QUERY_RESULT)
    }
}
