//! Risk module selection hints.

use shipcheck_classify::TransportMode;
use shipcheck_core::{CatalogError, Scope, Severity};

use super::paths::{DANGEROUS_GOODS, RISK_HAZMAT, RISK_MODULES, RISK_WEATHER, TRANSIT};
use super::{mode_of, Shared};
use crate::rule::RuleDefinition;

pub(super) fn rules(shared: &Shared) -> Result<Vec<RuleDefinition>, CatalogError> {
    let long_sea = shared.config.long_sea_transit_days;

    Ok(vec![
        RuleDefinition::new(
            "risk.modules.none_selected",
            Severity::Suggestion,
            Scope::Risk,
            &[RISK_MODULES],
            "No risk analysis modules are selected.",
            |s, _| Ok(s.risk_modules.selected_count() == 0),
        )?,
        RuleDefinition::new(
            "risk.dangerous_goods.hazmat_module",
            Severity::Suggestion,
            Scope::Risk,
            &[RISK_HAZMAT, DANGEROUS_GOODS],
            "Dangerous goods are declared; consider the hazmat risk module.",
            |s, _| Ok(s.shipment.cargo_packing.dangerous_goods == Some(true) && s.risk_modules.hazmat != Some(true)),
        )?,
        RuleDefinition::new(
            "risk.sea.weather_module",
            Severity::Suggestion,
            Scope::Risk,
            &[RISK_WEATHER, TRANSIT],
            "Long sea transit; consider the weather risk module.",
            move |s, _| {
                let route = &s.shipment.trade_route;
                Ok(mode_of(route) == Some(TransportMode::Sea)
                    && route.transit_time_days.is_some_and(|d| d > long_sea)
                    && s.risk_modules.weather != Some(true))
            },
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::RuleConfig;
    use crate::rule::EvalContext;
    use shipcheck_classify::{CodeTables, PortClassifier};
    use shipcheck_core::ShipmentState;

    fn fires(id: &str, f: impl FnOnce(&mut ShipmentState)) -> bool {
        let shared = Shared {
            classifier: Arc::new(PortClassifier::new(CodeTables::builtin().unwrap())),
            config: Arc::new(RuleConfig::default()),
        };
        let mut state = ShipmentState::default();
        f(&mut state);
        let rules = rules(&shared).unwrap();
        let rule = rules.iter().find(|r| r.id() == id).unwrap();
        rule.check(&state, &EvalContext::now()).unwrap()
    }

    #[test]
    fn test_none_selected() {
        assert!(fires("risk.modules.none_selected", |_| {}));
        assert!(fires("risk.modules.none_selected", |s| s.risk_modules.piracy = Some(false)));
        assert!(!fires("risk.modules.none_selected", |s| s.risk_modules.piracy = Some(true)));
    }

    #[test]
    fn test_hazmat_module() {
        assert!(fires("risk.dangerous_goods.hazmat_module", |s| {
            s.shipment.cargo_packing.dangerous_goods = Some(true)
        }));
        assert!(!fires("risk.dangerous_goods.hazmat_module", |s| {
            s.shipment.cargo_packing.dangerous_goods = Some(true);
            s.risk_modules.hazmat = Some(true);
        }));
    }

    #[test]
    fn test_weather_module_on_long_sea_transit() {
        let long_sea = |s: &mut ShipmentState| {
            s.shipment.trade_route.mode = Some("sea".into());
            s.shipment.trade_route.transit_time_days = Some(35.0);
        };
        assert!(fires("risk.sea.weather_module", long_sea));
        assert!(!fires("risk.sea.weather_module", |s| {
            long_sea(s);
            s.risk_modules.weather = Some(true);
        }));
        assert!(!fires("risk.sea.weather_module", |s| {
            long_sea(s);
            s.shipment.trade_route.transit_time_days = Some(20.0);
        }));
    }
}
