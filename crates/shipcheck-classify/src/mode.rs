//! # Transport Modes
//!
//! Normalizes the free-text mode the editor stores (`"Ocean FCL"`, `"air"`)
//! into a closed set. Unrecognized text maps to `None`, which keeps
//! mode-dependent rules silent.

use serde::{Deserialize, Serialize};

/// A recognized transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Sea,
    Air,
    Road,
    Rail,
}

impl TransportMode {
    /// Parse a mode leniently. `sea`, `ocean`, `fcl`, `lcl`, `maritime`,
    /// `vessel` are all sea; `air`, `airfreight` are air; `road`, `truck`,
    /// `ftl`, `ltl` are road; `rail`, `train` are rail. The first word decides.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let first = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find(|w| !w.is_empty())?;
        match first {
            "sea" | "ocean" | "fcl" | "lcl" | "maritime" | "vessel" => Some(Self::Sea),
            "air" | "airfreight" | "aircargo" => Some(Self::Air),
            "road" | "truck" | "trucking" | "ftl" | "ltl" => Some(Self::Road),
            "rail" | "train" => Some(Self::Rail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::Air => "air",
            Self::Road => "road",
            Self::Rail => "rail",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
