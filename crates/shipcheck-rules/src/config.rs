//! # Rule Thresholds
//!
//! Numeric bands and keyword lists the built-in rules compare against.
//! Every field has a default, so a partial YAML document only overrides
//! what it names.
//!
//! Loading never trusts the file blindly: [`RuleConfig::validated`] repairs
//! inverted bands, negative tolerances, and non-finite values, logging each
//! repair, so a bad override cannot make a rule fire on every snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shipcheck_classify::TransportMode;

/// Error loading a rule configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rule config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn repaired(self, name: &str, fallback: Band) -> Band {
        if !self.min.is_finite() || !self.max.is_finite() {
            tracing::warn!(band = name, "non-finite band bound, using default");
            return fallback;
        }
        if self.min > self.max {
            tracing::warn!(band = name, min = self.min, max = self.max, "inverted band, swapping bounds");
            return Band::new(self.max, self.min);
        }
        self
    }
}

/// Plausible transit durations in days, per mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitBounds {
    pub sea: Band,
    pub air: Band,
    pub road: Band,
    pub rail: Band,
}

impl Default for TransitBounds {
    fn default() -> Self {
        Self {
            sea: Band::new(3.0, 90.0),
            air: Band::new(0.0, 10.0),
            road: Band::new(0.0, 30.0),
            rail: Band::new(2.0, 45.0),
        }
    }
}

impl TransitBounds {
    pub fn for_mode(&self, mode: TransportMode) -> Band {
        match mode {
            TransportMode::Sea => self.sea,
            TransportMode::Air => self.air,
            TransportMode::Road => self.road,
            TransportMode::Rail => self.rail,
        }
    }
}

/// Thresholds and keyword lists for the built-in catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Plausible gross weight ÷ volume, kg/m³.
    pub density_kg_per_cbm: Band,
    pub transit_days: TransitBounds,
    /// Allowed gap between declared transit time and `eta - etd`, in days.
    pub transit_tolerance_days: f64,
    /// Sea transits longer than this should carry the weather module.
    pub long_sea_transit_days: f64,
    pub phone_min_digits: usize,
    /// HS chapters/headings that normally require a dangerous-goods declaration.
    pub hazardous_hs_prefixes: Vec<String>,
    /// Cargo categories that must not be stacked.
    pub fragile_categories: Vec<String>,
    /// Cargo categories that need temperature-controlled equipment.
    pub temperature_categories: Vec<String>,
    /// Priority values that mean "as fast as possible".
    pub express_priorities: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            density_kg_per_cbm: Band::new(10.0, 800.0),
            transit_days: TransitBounds::default(),
            transit_tolerance_days: 3.0,
            long_sea_transit_days: 30.0,
            phone_min_digits: 7,
            hazardous_hs_prefixes: strings(&[
                "2710", "2711", "2806", "2807", "2808", "2814", "2815", "2844", "36", "3814",
                "850760", "9306",
            ]),
            fragile_categories: strings(&["fragile", "glassware", "ceramics", "artwork"]),
            temperature_categories: strings(&[
                "perishable",
                "frozen",
                "chilled",
                "pharmaceutical",
                "pharmaceuticals",
            ]),
            express_priorities: strings(&["express", "urgent", "critical"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl RuleConfig {
    /// Parse a YAML override document and repair it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let parsed: RuleConfig = serde_yaml::from_str(yaml)?;
        Ok(parsed.validated())
    }

    /// Repair out-of-range values, logging each repair.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let mut density = self.density_kg_per_cbm.repaired("density_kg_per_cbm", defaults.density_kg_per_cbm);
        if density.min < 0.0 {
            tracing::warn!(min = density.min, "negative density floor, clamping to 0");
            density.min = 0.0;
        }
        let transit_days = TransitBounds {
            sea: self.transit_days.sea.repaired("transit_days.sea", defaults.transit_days.sea),
            air: self.transit_days.air.repaired("transit_days.air", defaults.transit_days.air),
            road: self.transit_days.road.repaired("transit_days.road", defaults.transit_days.road),
            rail: self.transit_days.rail.repaired("transit_days.rail", defaults.transit_days.rail),
        };
        let transit_tolerance_days = non_negative(
            "transit_tolerance_days",
            self.transit_tolerance_days,
            defaults.transit_tolerance_days,
        );
        let long_sea_transit_days = non_negative(
            "long_sea_transit_days",
            self.long_sea_transit_days,
            defaults.long_sea_transit_days,
        );
        let phone_min_digits = if self.phone_min_digits == 0 {
            tracing::warn!("phone_min_digits is 0, using default");
            defaults.phone_min_digits
        } else {
            self.phone_min_digits
        };
        Self {
            density_kg_per_cbm: density,
            transit_days,
            transit_tolerance_days,
            long_sea_transit_days,
            phone_min_digits,
            hazardous_hs_prefixes: self.hazardous_hs_prefixes,
            fragile_categories: lowercase(self.fragile_categories),
            temperature_categories: lowercase(self.temperature_categories),
            express_priorities: lowercase(self.express_priorities),
        }
    }

    /// True if `category` (any case) is a fragile category.
    pub fn is_fragile(&self, category: &str) -> bool {
        contains_ignore_case(&self.fragile_categories, category)
    }

    /// True if `category` (any case) needs temperature control.
    pub fn needs_temperature_control(&self, category: &str) -> bool {
        contains_ignore_case(&self.temperature_categories, category)
    }

    /// True if `priority` (any case) is an express priority.
    pub fn is_express(&self, priority: &str) -> bool {
        contains_ignore_case(&self.express_priorities, priority)
    }
}

fn non_negative(name: &str, value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        tracing::warn!(field = name, "non-finite value, using default");
        fallback
    } else if value < 0.0 {
        tracing::warn!(field = name, value, "negative value, using absolute value");
        value.abs()
    } else {
        value
    }
}

fn lowercase(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.trim().to_lowercase()).collect()
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    let value = value.trim();
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}
