//! # Port/Region Classifier
//!
//! Maps a free-form location code to a facility type and a country.
//!
//! ## Heuristic
//!
//! 1. Upper-case the code and split it into alphanumeric tokens. Adjacent
//!    two- and three-character tokens are also joined (`"CN SHA"` → `CNSHA`).
//! 2. Tokens that are country names (`CHINA`) are ignored.
//! 3. A UN/LOCODE listed in the seaport table marks a seaport.
//! 4. A three-letter code listed in the airport table marks an airport,
//!    unless the code already matched a seaport (`USLAX` is the port of
//!    Los Angeles, not LAX airport). Only the whole code (`PVG`) or a
//!    bracketed code (`Shanghai (PVG)`) counts; ordinary words in free text
//!    (`Puerto del Callao`, `Isle of Man`) never do.
//! 5. Country comes from the airport table, or from the first two letters
//!    of a UN/LOCODE-shaped code when they are a listed country. As with
//!    airports, only the whole code, a bracketed code, or a joined pair
//!    qualifies (`Shanghai Cargo` does not resolve to CA).
//!
//! Anything else is neutral. The classifier never errors and never guesses:
//! a false negative only silences a mismatch warning, while a false positive
//! would raise a spurious one.

use serde::{Deserialize, Serialize};

use crate::tables::{is_locode_shaped, CodeTables};

/// Best-effort classification of a location code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_airport: bool,
    pub is_seaport: bool,
    /// Alpha-2 country, when it can be determined.
    pub country: Option<String>,
}

impl Classification {
    /// The neutral result: nothing known.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True if nothing could be determined.
    pub fn is_unknown(&self) -> bool {
        !self.is_airport && !self.is_seaport && self.country.is_none()
    }
}

/// Classifier over a set of [`CodeTables`].
#[derive(Debug, Clone)]
pub struct PortClassifier {
    tables: CodeTables,
}

impl PortClassifier {
    /// Create a classifier from loaded tables.
    pub fn new(tables: CodeTables) -> Self {
        Self { tables }
    }

    /// The tables this classifier consults.
    pub fn tables(&self) -> &CodeTables {
        &self.tables
    }

    /// Classify a location code. Never fails; unrecognized codes are neutral.
    pub fn classify(&self, code: &str) -> Classification {
        let upper = code.trim().to_uppercase();
        let tokens: Vec<&str> = upper
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .filter(|t| self.tables.country_by_name(t).is_none())
            .collect();
        if tokens.is_empty() {
            return Classification::unknown();
        }

        let whole = match tokens.as_slice() {
            [only] => Some(*only),
            _ => None,
        };
        let joined: Vec<String> = tokens
            .windows(2)
            .filter(|pair| pair[0].len() == 2 && pair[1].len() == 3)
            .map(|pair| format!("{}{}", pair[0], pair[1]))
            .collect();

        let mut result = Classification::unknown();

        if let Some(port) = tokens
            .iter()
            .copied()
            .chain(joined.iter().map(String::as_str))
            .find(|c| self.tables.seaports.contains(*c))
        {
            result.is_seaport = true;
            result.country = Some(port[..2].to_string());
            return result;
        }

        // Free text only yields an airport or country through an explicit code.
        let explicit: Vec<&str> = whole
            .into_iter()
            .chain(bracketed(&upper))
            .chain(joined.iter().map(String::as_str))
            .collect();

        if let Some(country) = explicit
            .iter()
            .filter(|t| t.len() == 3)
            .find_map(|t| self.tables.airports.get(*t))
        {
            result.is_airport = true;
            result.country = Some(country.clone());
            return result;
        }

        result.country = explicit
            .iter()
            .filter(|c| is_locode_shaped(c))
            .map(|c| &c[..2])
            .find(|cc| self.tables.is_country(cc))
            .map(str::to_string);
        result
    }

    /// The country implied by a location code, if any.
    pub fn country_of(&self, code: &str) -> Option<String> {
        self.classify(code).country
    }

    /// Resolve a party's country field (`"CN"`, `"cn"`, `"China"`) to an
    /// alpha-2 code. Unlisted values resolve to `None`.
    pub fn resolve_country(&self, value: &str) -> Option<String> {
        let upper = value.trim().to_uppercase();
        if self.tables.is_country(&upper) {
            return Some(upper);
        }
        self.tables.country_by_name(&upper).map(str::to_string)
    }
}

/// Codes written inside `(...)` or `[...]`.
fn bracketed(upper: &str) -> impl Iterator<Item = &str> {
    upper.split(['(', '[']).skip(1).filter_map(|rest| {
        let end = rest.find([')', ']'])?;
        Some(rest[..end].trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PortClassifier {
        PortClassifier::new(CodeTables::builtin().unwrap())
    }

    #[test]
    fn test_seaport_locode() {
        let c = classifier().classify("CNSHA");
        assert!(c.is_seaport);
        assert!(!c.is_airport);
        assert_eq!(c.country.as_deref(), Some("CN"));
    }

    #[test]
    fn test_spaced_locode() {
        let c = classifier().classify("cn sha");
        assert!(c.is_seaport);
        assert_eq!(c.country.as_deref(), Some("CN"));
    }

    #[test]
    fn test_airport_token() {
        let c = classifier().classify("PVG");
        assert!(c.is_airport);
        assert!(!c.is_seaport);
        assert_eq!(c.country.as_deref(), Some("CN"));
    }

    #[test]
    fn test_bracketed_airport_code() {
        let k = classifier();
        let c = k.classify("Shanghai (PVG)");
        assert!(c.is_airport);
        assert_eq!(c.country.as_deref(), Some("CN"));
        assert!(k.classify("Guangzhou [CAN] cargo terminal").is_airport);
        assert!(k.classify("PVG China").is_airport);
    }

    #[test]
    fn test_words_in_free_text_are_not_airports() {
        let k = classifier();
        for place in ["Puerto del Callao", "Isle of Man", "Vancouver CAN", "Shanghai PVG Cargo"] {
            let c = k.classify(place);
            assert!(!c.is_airport, "{place:?} classified as airport");
            assert_eq!(c.country, None, "{place:?} got a country");
        }
    }

    #[test]
    fn test_seaport_containing_airport_letters_is_seaport() {
        let c = classifier().classify("USLAX");
        assert!(c.is_seaport);
        assert!(!c.is_airport);
    }

    #[test]
    fn test_unlisted_locode_gives_country_only() {
        let c = classifier().classify("DEDUS");
        assert!(!c.is_seaport && !c.is_airport);
        assert_eq!(c.country.as_deref(), Some("DE"));
    }

    #[test]
    fn test_country_name_is_not_a_code() {
        assert!(classifier().classify("CHINA").is_unknown());
    }

    #[test]
    fn test_unknown_codes_are_neutral() {
        let k = classifier();
        for code in ["", "   ", "???", "XX123", "12345", "ZZZ", "not a port"] {
            assert!(k.classify(code).is_unknown(), "{code:?} classified");
        }
    }

    #[test]
    fn test_resolve_country() {
        let k = classifier();
        assert_eq!(k.resolve_country("cn").as_deref(), Some("CN"));
        assert_eq!(k.resolve_country(" China ").as_deref(), Some("CN"));
        assert_eq!(k.resolve_country("United States of America").as_deref(), Some("US"));
        assert_eq!(k.resolve_country("Atlantis"), None);
    }

    #[test]
    fn test_custom_tables() {
        let tables = CodeTables::from_yaml_str(
            "airports: { XYZ: AA }\nseaports: [AAPRT]\ncountries: { AA: [Arcadia] }\n",
        )
        .unwrap();
        let k = PortClassifier::new(tables);
        assert!(k.classify("XYZ").is_airport);
        assert!(k.classify("AAPRT").is_seaport);
        assert!(!k.classify("PVG").is_airport);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Classification is total and never flags both facility types.
            #[test]
            fn classify_never_panics(code in "\\PC{0,24}") {
                let c = classifier().classify(&code);
                prop_assert!(!(c.is_airport && c.is_seaport));
            }

            /// Classification is a pure function of its input.
            #[test]
            fn classify_deterministic(code in "[A-Za-z0-9 -]{0,12}") {
                let k = classifier();
                prop_assert_eq!(k.classify(&code), k.classify(&code));
            }
        }
    }
}
