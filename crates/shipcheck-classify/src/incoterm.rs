//! # Incoterms 2020
//!
//! The eleven Incoterms 2020 rules and the two properties the diagnostics
//! rely on: whether a term is restricted to sea and inland waterway
//! transport, and where the seller hands the goods over.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shipcheck_core::ShipcheckError;

/// An Incoterms 2020 rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    Exw,
    Fca,
    Cpt,
    Cip,
    Dap,
    Dpu,
    Ddp,
    Fas,
    Fob,
    Cfr,
    Cif,
}

/// Where the seller's delivery obligation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handover {
    /// At or near the origin (EXW, FCA, FAS, FOB).
    Origin,
    /// Seller pays main carriage but risk passes at origin (CPT, CIP, CFR, CIF).
    MainCarriage,
    /// At the destination (DAP, DPU, DDP).
    Destination,
}

impl Incoterm {
    pub fn all() -> &'static [Incoterm] {
        &[
            Self::Exw,
            Self::Fca,
            Self::Cpt,
            Self::Cip,
            Self::Dap,
            Self::Dpu,
            Self::Ddp,
            Self::Fas,
            Self::Fob,
            Self::Cfr,
            Self::Cif,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exw => "EXW",
            Self::Fca => "FCA",
            Self::Cpt => "CPT",
            Self::Cip => "CIP",
            Self::Dap => "DAP",
            Self::Dpu => "DPU",
            Self::Ddp => "DDP",
            Self::Fas => "FAS",
            Self::Fob => "FOB",
            Self::Cfr => "CFR",
            Self::Cif => "CIF",
        }
    }

    /// FAS, FOB, CFR and CIF apply only to sea and inland waterway transport.
    pub fn is_sea_only(&self) -> bool {
        matches!(self, Self::Fas | Self::Fob | Self::Cfr | Self::Cif)
    }

    pub fn handover(&self) -> Handover {
        match self {
            Self::Exw | Self::Fca | Self::Fas | Self::Fob => Handover::Origin,
            Self::Cpt | Self::Cip | Self::Cfr | Self::Cif => Handover::MainCarriage,
            Self::Dap | Self::Dpu | Self::Ddp => Handover::Destination,
        }
    }
}

impl std::fmt::Display for Incoterm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Incoterm {
    type Err = ShipcheckError;

    /// Case-insensitive. A trailing named place is ignored
    /// (`"FOB Shanghai"` parses as FOB).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == code)
            .ok_or_else(|| ShipcheckError::Parse(format!("unknown incoterm: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all() {
        for t in Incoterm::all() {
            assert_eq!(t.as_str().parse::<Incoterm>().unwrap(), *t);
            assert_eq!(t.as_str().to_lowercase().parse::<Incoterm>().unwrap(), *t);
        }
        assert_eq!(Incoterm::all().len(), 11);
    }

    #[test]
    fn test_parse_with_named_place() {
        assert_eq!("FOB Shanghai".parse::<Incoterm>().unwrap(), Incoterm::Fob);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("DDU".parse::<Incoterm>().is_err());
        assert!("".parse::<Incoterm>().is_err());
    }

    #[test]
    fn test_sea_only() {
        let sea_only: Vec<_> = Incoterm::all().iter().filter(|t| t.is_sea_only()).collect();
        assert_eq!(sea_only.len(), 4);
        assert!(!Incoterm::Fca.is_sea_only());
    }

    #[test]
    fn test_handover() {
        assert_eq!(Incoterm::Exw.handover(), Handover::Origin);
        assert_eq!(Incoterm::Cif.handover(), Handover::MainCarriage);
        assert_eq!(Incoterm::Ddp.handover(), Handover::Destination);
    }
}
