//! # Code Tables
//!
//! The data behind the Port/Region Classifier: airport codes with their
//! countries, seaport UN/LOCODEs, and ISO 3166 alpha-2 country codes with the
//! names users type instead of codes.
//!
//! Tables are plain data, loaded from YAML, so operators can extend them
//! without a rebuild. A built-in set ships inside the crate. Loading
//! normalizes every code to upper case and rejects malformed entries, so a
//! bad table fails at startup instead of quietly skewing the mismatch rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_TABLES: &str = include_str!("../data/code_tables.yaml");

/// Error loading code tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// The YAML document could not be parsed.
    #[error("code table YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An entry is malformed.
    #[error("invalid code table entry in {table}: {reason}")]
    InvalidEntry {
        /// Which table (`airports`, `seaports`, `countries`).
        table: &'static str,
        /// What is wrong with the entry.
        reason: String,
    },
}

/// Location code tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeTables {
    /// IATA airport code → alpha-2 country.
    pub airports: BTreeMap<String, String>,
    /// UN/LOCODEs of seaports.
    pub seaports: BTreeSet<String>,
    /// Alpha-2 country code → accepted names.
    pub countries: BTreeMap<String, Vec<String>>,
}

impl CodeTables {
    /// The tables shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded document is malformed, which the crate's own
    /// tests rule out.
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_yaml_str(BUILTIN_TABLES)
    }

    /// Parse, normalize, and validate tables from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TableError> {
        let raw: CodeTables = serde_yaml::from_str(yaml)?;
        raw.normalized()
    }

    fn normalized(self) -> Result<Self, TableError> {
        let mut countries = BTreeMap::new();
        for (code, names) in self.countries {
            let code = code.trim().to_ascii_uppercase();
            if !is_alpha(&code, 2) {
                return Err(TableError::InvalidEntry {
                    table: "countries",
                    reason: format!("{code:?} is not an alpha-2 country code"),
                });
            }
            let names = names
                .into_iter()
                .map(|n| n.trim().to_uppercase())
                .filter(|n| !n.is_empty())
                .collect();
            countries.insert(code, names);
        }

        let mut airports = BTreeMap::new();
        for (code, country) in self.airports {
            let code = code.trim().to_ascii_uppercase();
            let country = country.trim().to_ascii_uppercase();
            if !is_alpha(&code, 3) {
                return Err(TableError::InvalidEntry {
                    table: "airports",
                    reason: format!("{code:?} is not a three-letter IATA code"),
                });
            }
            if !countries.contains_key(&country) {
                return Err(TableError::InvalidEntry {
                    table: "airports",
                    reason: format!("{code} maps to unlisted country {country:?}"),
                });
            }
            airports.insert(code, country);
        }

        let mut seaports = BTreeSet::new();
        for code in self.seaports {
            let code = code.trim().to_ascii_uppercase();
            if !is_locode_shaped(&code) {
                return Err(TableError::InvalidEntry {
                    table: "seaports",
                    reason: format!("{code:?} is not a five-character UN/LOCODE"),
                });
            }
            seaports.insert(code);
        }

        Ok(Self {
            airports,
            seaports,
            countries,
        })
    }

    /// True if `code` (upper case) is a listed alpha-2 country.
    pub fn is_country(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// The alpha-2 code whose accepted names include `name` (upper case).
    pub fn country_by_name(&self, name: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|(_, names)| names.iter().any(|n| n == name))
            .map(|(code, _)| code.as_str())
    }
}

fn is_alpha(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Two country letters followed by three location characters.
pub(crate) fn is_locode_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[..2].iter().all(u8::is_ascii_uppercase)
        && b[2..].iter().all(|c| c.is_ascii_uppercase() || (b'2'..=b'9').contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_load() {
        let t = CodeTables::builtin().unwrap();
        assert!(t.airports.contains_key("PVG"));
        assert!(t.seaports.contains("CNSHA"));
        assert!(t.is_country("US"));
        assert_eq!(t.airports["LAX"], "US");
    }

    #[test]
    fn test_builtin_seaports_have_known_countries() {
        let t = CodeTables::builtin().unwrap();
        for port in &t.seaports {
            assert!(t.is_country(&port[..2]), "seaport {port} has unlisted country");
        }
    }

    #[test]
    fn test_normalizes_case() {
        let t = CodeTables::from_yaml_str(
            "airports: { pvg: cn }\nseaports: [cnsha]\ncountries: { cn: [china] }\n",
        )
        .unwrap();
        assert_eq!(t.airports["PVG"], "CN");
        assert!(t.seaports.contains("CNSHA"));
        assert_eq!(t.country_by_name("CHINA"), Some("CN"));
    }

    #[test]
    fn test_rejects_malformed_airport() {
        let err = CodeTables::from_yaml_str("airports: { PVGX: CN }\ncountries: { CN: [] }\n")
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidEntry { table: "airports", .. }));
    }

    #[test]
    fn test_rejects_airport_with_unknown_country() {
        let err = CodeTables::from_yaml_str("airports: { PVG: XX }\n").unwrap_err();
        assert!(matches!(err, TableError::InvalidEntry { table: "airports", .. }));
    }

    #[test]
    fn test_rejects_malformed_seaport() {
        let err = CodeTables::from_yaml_str("seaports: [SHANGHAI]\n").unwrap_err();
        assert!(matches!(err, TableError::InvalidEntry { table: "seaports", .. }));
    }

    #[test]
    fn test_rejects_bad_yaml() {
        assert!(matches!(
            CodeTables::from_yaml_str("airports: [unterminated").unwrap_err(),
            TableError::Yaml(_)
        ));
    }

    #[test]
    fn test_empty_document_is_empty_tables() {
        let t = CodeTables::from_yaml_str("{}").unwrap();
        assert!(t.airports.is_empty() && t.seaports.is_empty() && t.countries.is_empty());
    }

    #[test]
    fn test_locode_shape() {
        assert!(is_locode_shaped("CNSHA"));
        assert!(is_locode_shaped("DE2AB"));
        assert!(!is_locode_shaped("CNSH"));
        assert!(!is_locode_shaped("12SHA"));
        assert!(!is_locode_shaped("CNSH1"));
    }
}
