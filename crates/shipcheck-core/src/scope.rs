//! # Scope: Section Tags for Rule Grouping
//!
//! Every rule belongs to exactly one scope. Scopes drive section-level UI
//! summaries ("3 problems in Cargo"). Matches on `Scope` are exhaustive so
//! adding a section forces every consumer to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ShipcheckError;

/// Domain tag of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Trade route: mode, endpoints, dates, incoterm.
    Trade,
    /// Cargo and packing: HS code, weights, volume, handling flags.
    Cargo,
    /// Selling party.
    Seller,
    /// Buying party.
    Buyer,
    /// Optional risk-analysis modules.
    Risk,
}

impl Scope {
    /// All scopes in display order.
    pub fn all() -> &'static [Scope] {
        &[Self::Trade, Self::Cargo, Self::Seller, Self::Buyer, Self::Risk]
    }

    /// The snake_case identifier, matching serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Cargo => "cargo",
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::Risk => "risk",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ShipcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade" => Ok(Self::Trade),
            "cargo" => Ok(Self::Cargo),
            "seller" => Ok(Self::Seller),
            "buyer" => Ok(Self::Buyer),
            "risk" => Ok(Self::Risk),
            other => Err(ShipcheckError::Parse(format!("unknown scope: {other:?}"))),
        }
    }
}
