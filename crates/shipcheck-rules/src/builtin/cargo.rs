//! Cargo and packing rules: classification, weights, density, handling
//! requirements implied by the goods.

use std::sync::Arc;

use shipcheck_classify::format::{hs_code_matches_any, is_valid_hs_code};
use shipcheck_core::{present, CatalogError, Scope, Severity};

use super::paths::{
    CATEGORY, DANGEROUS_GOODS, GROSS_WEIGHT, HS_CODE, NET_WEIGHT, STACKABLE, TEMPERATURE_CONTROLLED, VOLUME,
};
use super::{positive, Shared};
use crate::rule::RuleDefinition;

pub(super) fn rules(shared: &Shared) -> Result<Vec<RuleDefinition>, CatalogError> {
    let density = shared.config.density_kg_per_cbm;
    let hazardous = Arc::clone(&shared.config);
    let fragile = Arc::clone(&shared.config);
    let temperature = Arc::clone(&shared.config);

    Ok(vec![
        RuleDefinition::new(
            "cargo.hs_code.required",
            Severity::Critical,
            Scope::Cargo,
            &[HS_CODE, GROSS_WEIGHT, VOLUME],
            "HS code is required once cargo weight or volume is entered.",
            |s, _| {
                let cargo = &s.shipment.cargo_packing;
                let described = positive(cargo.gross_weight_kg).is_some() || positive(cargo.volume_cbm).is_some();
                Ok(described && present(&cargo.hs_code).is_none())
            },
        )?,
        RuleDefinition::new(
            "cargo.hs_code.format",
            Severity::Warning,
            Scope::Cargo,
            &[HS_CODE],
            "HS code should be 6 to 10 digits.",
            |s, _| Ok(present(&s.shipment.cargo_packing.hs_code).is_some_and(|code| !is_valid_hs_code(code))),
        )?,
        RuleDefinition::new(
            "cargo.weight.non_positive",
            Severity::Critical,
            Scope::Cargo,
            &[GROSS_WEIGHT],
            "Gross weight must be greater than zero.",
            |s, _| Ok(s.shipment.cargo_packing.gross_weight_kg.is_some_and(|w| w <= 0.0)),
        )?,
        RuleDefinition::new(
            "cargo.weight.net_exceeds_gross",
            Severity::Critical,
            Scope::Cargo,
            &[NET_WEIGHT, GROSS_WEIGHT],
            "Net weight exceeds gross weight.",
            |s, _| {
                let cargo = &s.shipment.cargo_packing;
                Ok(match (cargo.net_weight_kg, positive(cargo.gross_weight_kg)) {
                    (Some(net), Some(gross)) => net > gross,
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "cargo.density.implausible",
            Severity::Warning,
            Scope::Cargo,
            &[GROSS_WEIGHT, VOLUME],
            "Weight per cubic metre is implausible; check weight and volume units.",
            move |s, _| {
                let cargo = &s.shipment.cargo_packing;
                Ok(match (positive(cargo.gross_weight_kg), positive(cargo.volume_cbm)) {
                    (Some(weight), Some(volume)) => !density.contains(weight / volume),
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "cargo.dangerous_goods.hs_hazard",
            Severity::Warning,
            Scope::Cargo,
            &[DANGEROUS_GOODS, HS_CODE],
            "HS code indicates hazardous goods but dangerous goods is not declared.",
            move |s, _| {
                let cargo = &s.shipment.cargo_packing;
                Ok(cargo.dangerous_goods != Some(true)
                    && present(&cargo.hs_code)
                        .is_some_and(|code| hs_code_matches_any(code, hazardous.hazardous_hs_prefixes.as_slice())))
            },
        )?,
        RuleDefinition::new(
            "cargo.category.fragile_stackable",
            Severity::Warning,
            Scope::Cargo,
            &[STACKABLE, CATEGORY],
            "Fragile cargo is marked as stackable.",
            move |s, _| {
                let cargo = &s.shipment.cargo_packing;
                Ok(cargo.stackable == Some(true) && present(&cargo.category).is_some_and(|c| fragile.is_fragile(c)))
            },
        )?,
        RuleDefinition::new(
            "cargo.category.temperature_control",
            Severity::Warning,
            Scope::Cargo,
            &[TEMPERATURE_CONTROLLED, CATEGORY],
            "This cargo category normally requires temperature-controlled equipment.",
            move |s, _| {
                let cargo = &s.shipment.cargo_packing;
                Ok(cargo.temperature_controlled != Some(true)
                    && present(&cargo.category).is_some_and(|c| temperature.needs_temperature_control(c)))
            },
        )?,
    ])
}
