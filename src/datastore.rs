//! RESTCONF datastore selection
//!
//! [`Datastore`] picks the resource a request is addressed to: the unified
//! `{root}/data` tree, or one of the NMDA datastores under
//! `{root}/ds/ietf-datastores:<name>` (RFC 8527).

use std::fmt;

/// Datastore a request operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Datastore {
    /// The unified `{root}/data` resource
    #[default]
    Unified,
    Running,
    Candidate,
    Startup,
    Intended,
    Operational,
}

impl Datastore {
    /// NMDA datastore identity name, `None` for the unified resource
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Unified => None,
            Self::Running => Some("running"),
            Self::Candidate => Some("candidate"),
            Self::Startup => Some("startup"),
            Self::Intended => Some("intended"),
            Self::Operational => Some("operational"),
        }
    }

    /// Path segments of this datastore below the RESTCONF root
    pub fn resource(self) -> String {
        match self.name() {
            Some(name) => format!("ds/ietf-datastores:{name}"),
            None => "data".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "data" | "unified" => Some(Self::Unified),
            "running" => Some(Self::Running),
            "candidate" => Some(Self::Candidate),
            "startup" => Some(Self::Startup),
            "intended" => Some(Self::Intended),
            "operational" => Some(Self::Operational),
            _ => None,
        }
    }
}

impl fmt::Display for Datastore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("data"))
    }
}

/// Query parameter `content` values
/// Restricts a request to configuration or state data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFilter {
    /// Both config and non-config nodes (no parameter sent)
    #[default]
    All,
    /// Only configuration data
    Config,
    /// Only operational state
    Nonconfig,
}

impl ContentFilter {
    /// Value for the `content` query parameter, `None` when nothing is sent
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Config => Some("config"),
            Self::Nonconfig => Some("nonconfig"),
        }
    }
}
