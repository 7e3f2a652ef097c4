//! # Built-in Catalog
//!
//! The shipped rule set, registered in a fixed order: trade route, cargo,
//! parties, risk modules. Rules capture the shared [`PortClassifier`] and
//! [`RuleConfig`] at construction; conditions are otherwise pure functions
//! of the snapshot and the evaluation clock.

mod cargo;
mod parties;
mod risk;
mod trade;

use std::sync::Arc;

use chrono::NaiveDate;

use shipcheck_classify::{Incoterm, PortClassifier, TransportMode};
use shipcheck_core::{parse_calendar_date, present, CatalogError, ConditionError, TradeRoute};

use crate::catalog::{CatalogBuilder, RuleCatalog};
use crate::config::RuleConfig;

/// Field paths referenced by the built-in rules.
pub mod paths {
    pub const MODE: &str = "shipment.trade_route.mode";
    pub const ORIGIN: &str = "shipment.trade_route.origin";
    pub const DESTINATION: &str = "shipment.trade_route.destination";
    pub const ETD: &str = "shipment.trade_route.etd";
    pub const ETA: &str = "shipment.trade_route.eta";
    pub const TRANSIT: &str = "shipment.trade_route.transit_time_days";
    pub const INCOTERM: &str = "shipment.trade_route.incoterm";
    pub const PRIORITY: &str = "shipment.trade_route.priority";

    pub const HS_CODE: &str = "shipment.cargo_packing.hs_code";
    pub const GROSS_WEIGHT: &str = "shipment.cargo_packing.gross_weight_kg";
    pub const NET_WEIGHT: &str = "shipment.cargo_packing.net_weight_kg";
    pub const VOLUME: &str = "shipment.cargo_packing.volume_cbm";
    pub const CATEGORY: &str = "shipment.cargo_packing.category";
    pub const STACKABLE: &str = "shipment.cargo_packing.stackable";
    pub const DANGEROUS_GOODS: &str = "shipment.cargo_packing.dangerous_goods";
    pub const TEMPERATURE_CONTROLLED: &str = "shipment.cargo_packing.temperature_controlled";

    pub const RISK_MODULES: &str = "risk_modules";
    pub const RISK_HAZMAT: &str = "risk_modules.hazmat";
    pub const RISK_WEATHER: &str = "risk_modules.weather";
}

/// Shared inputs captured by built-in conditions.
#[derive(Debug, Clone)]
pub(crate) struct Shared {
    pub classifier: Arc<PortClassifier>,
    pub config: Arc<RuleConfig>,
}

/// Register the built-in rules on `builder`, after any rules already there.
pub fn register_builtin(
    builder: &mut CatalogBuilder,
    classifier: PortClassifier,
    config: RuleConfig,
) -> Result<(), CatalogError> {
    let shared = Shared {
        classifier: Arc::new(classifier),
        config: Arc::new(config.validated()),
    };
    builder.register_all(trade::rules(&shared)?)?;
    builder.register_all(cargo::rules(&shared)?)?;
    builder.register_all(parties::rules(&shared)?)?;
    builder.register_all(risk::rules(&shared)?)?;
    Ok(())
}

/// The built-in catalog over the given tables and thresholds.
///
/// # Errors
///
/// A [`CatalogError`] here is a defect in the built-in rule set; callers
/// should treat it as fatal at startup.
pub fn builtin_catalog(classifier: PortClassifier, config: RuleConfig) -> Result<RuleCatalog, CatalogError> {
    let mut builder = CatalogBuilder::new();
    register_builtin(&mut builder, classifier, config)?;
    Ok(builder.build())
}

/// The declared transport mode, if recognizable.
pub(crate) fn mode_of(route: &TradeRoute) -> Option<TransportMode> {
    present(&route.mode).and_then(TransportMode::parse)
}

/// The declared Incoterm, if recognizable.
pub(crate) fn incoterm_of(route: &TradeRoute) -> Option<Incoterm> {
    present(&route.incoterm).and_then(|s| s.parse().ok())
}

/// Parse an optional date field. Absent → `Ok(None)`; unreadable → `Err`.
pub(crate) fn date_field(value: &Option<String>, path: &str) -> Result<Option<NaiveDate>, ConditionError> {
    match present(value) {
        None => Ok(None),
        Some(raw) => parse_calendar_date(raw)
            .map(Some)
            .map_err(|e| ConditionError::invalid_value(path, raw, e.to_string())),
    }
}

/// A strictly positive measurement, or `None`.
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipcheck_classify::CodeTables;
    use shipcheck_core::{Scope, Severity, ShipmentState};

    fn catalog() -> RuleCatalog {
        builtin_catalog(PortClassifier::new(CodeTables::builtin().unwrap()), RuleConfig::default()).unwrap()
    }

    #[test]
    fn test_builtin_catalog_builds() {
        let c = catalog();
        assert!(c.len() >= 30, "only {} rules", c.len());
    }

    #[test]
    fn test_builtin_order_is_grouped_by_scope() {
        let c = catalog();
        let scopes: Vec<Scope> = c.iter().map(|r| r.scope()).collect();
        let first_cargo = scopes.iter().position(|s| *s == Scope::Cargo).unwrap();
        let last_trade = scopes.iter().rposition(|s| *s == Scope::Trade).unwrap();
        let first_risk = scopes.iter().position(|s| *s == Scope::Risk).unwrap();
        assert!(last_trade < first_cargo);
        assert!(scopes[first_risk..].iter().all(|s| *s == Scope::Risk));
    }

    #[test]
    fn test_every_scope_and_severity_represented() {
        let c = catalog();
        for scope in Scope::all() {
            assert!(c.iter().any(|r| r.scope() == *scope), "no rule for {scope}");
        }
        for severity in Severity::all() {
            assert!(c.iter().any(|r| r.severity() == *severity), "no {severity} rule");
        }
    }

    #[test]
    fn test_rule_ids_prefixed_by_scope() {
        for rule in catalog().iter() {
            assert!(
                rule.id().starts_with(&format!("{}.", rule.scope())),
                "{} not prefixed by {}",
                rule.id(),
                rule.scope()
            );
        }
    }

    #[test]
    fn test_all_builtin_paths_are_schema_paths() {
        for p in [
            paths::MODE,
            paths::ORIGIN,
            paths::DESTINATION,
            paths::ETD,
            paths::ETA,
            paths::TRANSIT,
            paths::INCOTERM,
            paths::PRIORITY,
            paths::HS_CODE,
            paths::GROSS_WEIGHT,
            paths::NET_WEIGHT,
            paths::VOLUME,
            paths::CATEGORY,
            paths::STACKABLE,
            paths::DANGEROUS_GOODS,
            paths::TEMPERATURE_CONTROLLED,
            paths::RISK_MODULES,
            paths::RISK_HAZMAT,
            paths::RISK_WEATHER,
        ] {
            assert!(ShipmentState::FIELD_PATHS.contains(&p), "{p}");
        }
    }

    #[test]
    fn test_date_field() {
        assert_eq!(date_field(&None, paths::ETD).unwrap(), None);
        assert_eq!(date_field(&Some(" ".into()), paths::ETD).unwrap(), None);
        assert_eq!(
            date_field(&Some("2024-05-10".into()), paths::ETD).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10)
        );
        let err = date_field(&Some("next week".into()), paths::ETD).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidValue { ref field, .. } if field == paths::ETD));
    }
}
