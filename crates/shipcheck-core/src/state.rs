//! # Shipment State: Typed Snapshot Schema
//!
//! The read-only snapshot every rule is evaluated against. Each section and
//! each field is optional: the editor layer hands over whatever the user has
//! filled in so far, and an absent value is a normal, expected case rather
//! than an error.
//!
//! Absence is handled once, here, at the type level:
//!
//! - every section defaults to empty, and `null` sections deserialize as empty;
//! - numbers and flags are read leniently (`"12.5"`, `"yes"`), and values that
//!   cannot be read become `None` instead of failing the whole snapshot;
//! - [`present`] treats blank strings as absent.
//!
//! Field paths in [`ShipmentState::FIELD_PATHS`] mirror the JSON shape
//! exactly; the rule catalog rejects any field reference not listed there.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShipcheckError;
use crate::field::FieldPath;

/// Full shipment snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentState {
    /// Route and cargo.
    #[serde(deserialize_with = "lenient::section")]
    pub shipment: Shipment,
    /// Selling party.
    #[serde(deserialize_with = "lenient::section")]
    pub seller: Party,
    /// Buying party.
    #[serde(deserialize_with = "lenient::section")]
    pub buyer: Party,
    /// Optional analysis modules selected by the user.
    #[serde(deserialize_with = "lenient::section")]
    pub risk_modules: RiskModules,
}

/// Route and cargo sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shipment {
    #[serde(deserialize_with = "lenient::section")]
    pub trade_route: TradeRoute,
    #[serde(deserialize_with = "lenient::section")]
    pub cargo_packing: CargoPacking,
}

/// Trade route section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeRoute {
    /// Declared transport mode (`sea`, `ocean`, `air`, `road`, `rail`, ...).
    pub mode: Option<String>,
    /// Origin location code (UN/LOCODE or IATA).
    pub origin: Option<String>,
    /// Destination location code (UN/LOCODE or IATA).
    pub destination: Option<String>,
    /// Estimated time of departure, `YYYY-MM-DD`.
    pub etd: Option<String>,
    /// Estimated time of arrival, `YYYY-MM-DD`.
    pub eta: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub transit_time_days: Option<f64>,
    /// Incoterms 2020 three-letter code.
    pub incoterm: Option<String>,
    pub priority: Option<String>,
    pub service_route: Option<String>,
}

/// Cargo and packing section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoPacking {
    /// Harmonized System classification code.
    pub hs_code: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub gross_weight_kg: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub net_weight_kg: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume_cbm: Option<f64>,
    pub packaging_type: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub package_count: Option<f64>,
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub stackable: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub dangerous_goods: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub temperature_controlled: Option<bool>,
}

/// A trading party (seller or buyer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub company: Option<String>,
    pub contact: Option<String>,
    /// ISO 3166 alpha-2 code or a country name.
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Risk-analysis module selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModules {
    #[serde(deserialize_with = "lenient::flag")]
    pub weather: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub piracy: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub political: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub cargo_theft: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub sanctions: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub hazmat: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub port_congestion: Option<bool>,
}

impl RiskModules {
    /// Number of modules explicitly switched on.
    pub fn selected_count(&self) -> usize {
        [
            self.weather,
            self.piracy,
            self.political,
            self.cargo_theft,
            self.sanctions,
            self.hazmat,
            self.port_congestion,
        ]
        .iter()
        .filter(|m| **m == Some(true))
        .count()
    }
}

impl ShipmentState {
    /// Every addressable location in the snapshot, sections included.
    pub const FIELD_PATHS: &'static [&'static str] = &[
        "shipment",
        "shipment.trade_route",
        "shipment.trade_route.mode",
        "shipment.trade_route.origin",
        "shipment.trade_route.destination",
        "shipment.trade_route.etd",
        "shipment.trade_route.eta",
        "shipment.trade_route.transit_time_days",
        "shipment.trade_route.incoterm",
        "shipment.trade_route.priority",
        "shipment.trade_route.service_route",
        "shipment.cargo_packing",
        "shipment.cargo_packing.hs_code",
        "shipment.cargo_packing.gross_weight_kg",
        "shipment.cargo_packing.net_weight_kg",
        "shipment.cargo_packing.volume_cbm",
        "shipment.cargo_packing.packaging_type",
        "shipment.cargo_packing.package_count",
        "shipment.cargo_packing.category",
        "shipment.cargo_packing.stackable",
        "shipment.cargo_packing.dangerous_goods",
        "shipment.cargo_packing.temperature_controlled",
        "seller",
        "seller.company",
        "seller.contact",
        "seller.country",
        "seller.email",
        "seller.phone",
        "seller.address",
        "buyer",
        "buyer.company",
        "buyer.contact",
        "buyer.country",
        "buyer.email",
        "buyer.phone",
        "buyer.address",
        "risk_modules",
        "risk_modules.weather",
        "risk_modules.piracy",
        "risk_modules.political",
        "risk_modules.cargo_theft",
        "risk_modules.sanctions",
        "risk_modules.hazmat",
        "risk_modules.port_congestion",
    ];

    /// True if `path` names a location in this schema.
    pub fn has_field(path: &FieldPath) -> bool {
        Self::FIELD_PATHS.contains(&path.as_str())
    }

    /// Build a snapshot from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Fails only when the value's overall shape is wrong (for example a
    /// section given as a string). Missing or unreadable leaf values are
    /// absorbed as `None`.
    pub fn from_value(value: Value) -> Result<Self, ShipcheckError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Current value at `path`, or `None` when absent.
    ///
    /// Used to preview the focused field next to a diagnostic.
    pub fn lookup(&self, path: &FieldPath) -> Option<Value> {
        let root = serde_json::to_value(self).ok()?;
        let mut node = &root;
        for segment in path.segments() {
            node = node.get(segment)?;
        }
        match node {
            Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

/// The trimmed contents of an optional text field, or `None` if blank.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Lenient deserializers for values typed in by users.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn section<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }

    pub fn number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        })
    }

    pub fn flag<'de, D>(d: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Some(true),
                "false" | "no" | "n" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}
