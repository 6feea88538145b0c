//! RESTCONF resource paths (RFC 8040 section 3.5.3)
//!
//! A resource path is an ordered list of data node names. A segment that
//! addresses a list entry also carries the entry's key values, rendered as
//! `name=key1,key2`. Names and keys are percent-encoded so a rendered path
//! parses back into exactly the same segments.

use std::fmt::{self, Write};
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{RestconfError, Result};

/// One step of a resource path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Data node name, optionally module-qualified ("tailf-ncs:devices")
    pub name: String,
    /// Key values for list entry selection, in key order
    pub keys: Vec<String>,
}

impl PathSegment {
    /// Create a segment addressing a container or leaf
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Create a segment addressing a list entry
    pub fn with_keys<I, K>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_list_entry(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Render the segment in its canonical encoded form
    pub fn encode(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(RestconfError::InvalidPath(
                "segment name must not be empty".into(),
            ));
        }
        Ok(self.to_string())
    }

    /// Parse one encoded segment, e.g. `device=ce%2F0`
    pub fn parse(segment: &str) -> Result<Self> {
        let (name, keys) = match segment.split_once('=') {
            Some((name, keys)) => (name, Some(keys)),
            None => (segment, None),
        };
        if name.is_empty() {
            return Err(RestconfError::InvalidPath(format!(
                "empty segment name in {segment:?}"
            )));
        }

        let keys = match keys {
            Some(keys) => keys.split(',').map(percent_decode).collect::<Result<_>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            name: percent_decode(name)?,
            keys,
        })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", utf8_percent_encode(&self.name, NAME_ENCODE_SET))?;
        if self.is_list_entry() {
            f.write_char('=')?;
            for (i, key) in self.keys.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write!(f, "{}", utf8_percent_encode(key, KEY_ENCODE_SET))?;
            }
        }
        Ok(())
    }
}

/// Ordered path of segments below a datastore
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    /// The segments of this path
    pub segments: Vec<PathSegment>,
}

impl ResourcePath {
    /// Create an empty path (the datastore itself)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an encoded path like "tailf-ncs:devices/device=ex0/config"
    ///
    /// A single leading or trailing slash is ignored.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Ok(Self::new());
        }

        let segments = trimmed
            .split('/')
            .map(PathSegment::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Append a container/leaf segment
    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::new(name));
        self
    }

    /// Append a list entry segment
    pub fn entry<I, K>(mut self, name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.segments.push(PathSegment::with_keys(name, keys));
        self
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Encoded segments, ready to be appended to a URL path
    pub fn encoded_segments(&self) -> Result<Vec<String>> {
        self.segments.iter().map(PathSegment::encode).collect()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourcePath {
    type Err = RestconfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromIterator<PathSegment> for ResourcePath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Everything outside the RFC 3986 unreserved set
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Node names additionally keep ':' for module prefixes
const NAME_ENCODE_SET: &AsciiSet = &KEY_ENCODE_SET.remove(b':');

fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(RestconfError::InvalidPath(format!(
                "bad percent escape in {input:?}"
            )));
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RestconfError::InvalidPath(format!("non UTF-8 escape in {input:?}")))
}
