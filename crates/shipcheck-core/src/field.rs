//! # Field Paths
//!
//! A `FieldPath` is a dot-separated location inside the shipment state
//! (`shipment.trade_route.etd`). It is the shared vocabulary between rule
//! declarations and the UI layer, which uses it to focus an editor field,
//! so paths are validated at construction and compared exactly.

use serde::{Deserialize, Serialize};

use crate::error::ShipcheckError;

/// A validated dot-separated field path.
///
/// Segments are non-empty and consist of lowercase ASCII letters, digits,
/// and underscores.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Parse and validate a field path.
    ///
    /// # Errors
    ///
    /// Returns [`ShipcheckError::Parse`] if the path is empty, has an empty
    /// segment, or contains characters outside `[a-z0-9_.]`.
    pub fn parse(s: &str) -> Result<Self, ShipcheckError> {
        if s.is_empty() {
            return Err(ShipcheckError::Parse("field path is empty".into()));
        }
        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(ShipcheckError::Parse(format!(
                    "field path {s:?} has an empty segment"
                )));
            }
            if let Some(c) = segment
                .chars()
                .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
            {
                return Err(ShipcheckError::Parse(format!(
                    "field path {s:?} contains invalid character {c:?}"
                )));
            }
        }
        Ok(Self(s.to_string()))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path's segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The top-level section this path lives in (its first segment).
    pub fn section(&self) -> &str {
        self.segments().next().unwrap_or(&self.0)
    }

    /// True if `self` equals `ancestor` or lies beneath it.
    pub fn is_within(&self, ancestor: &FieldPath) -> bool {
        self.0 == ancestor.0
            || (self.0.starts_with(&ancestor.0)
                && self.0.as_bytes().get(ancestor.0.len()) == Some(&b'.'))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ShipcheckError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(p: FieldPath) -> Self {
        p.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
