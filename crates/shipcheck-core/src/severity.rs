//! # Severity
//!
//! The three diagnostic severities. Fixed per rule; a result inherits the
//! severity of the rule that produced it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ShipcheckError;

/// How serious a fired rule is.
///
/// Ordered from most to least serious: `Critical < Warning < Suggestion`
/// under `Ord`, so sorting a list of severities puts blockers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks submission to the risk-scoring service.
    Critical,
    /// Likely data problem; submission possible but discouraged.
    Warning,
    /// Improvement hint.
    Suggestion,
}

impl Severity {
    /// All severities, most serious first.
    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::Warning, Self::Suggestion]
    }

    /// The snake_case identifier, matching serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
        }
    }

    /// True if `self` is at least as serious as `threshold`.
    pub fn meets(self, threshold: Severity) -> bool {
        self <= threshold
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ShipcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "warning" => Ok(Self::Warning),
            "suggestion" => Ok(Self::Suggestion),
            other => Err(ShipcheckError::Parse(format!("unknown severity: {other:?}"))),
        }
    }
}
