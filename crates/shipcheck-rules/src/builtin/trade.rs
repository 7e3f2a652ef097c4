//! Trade route rules: required fields, date ordering, mode/location
//! consistency, transit plausibility, commercial terms.

use std::sync::Arc;

use shipcheck_classify::{Classification, TransportMode};
use shipcheck_core::{days_between, present, CatalogError, Scope, Severity};

use super::paths::{DESTINATION, ETA, ETD, INCOTERM, MODE, ORIGIN, PRIORITY, TRANSIT};
use super::{date_field, incoterm_of, mode_of, Shared};
use crate::rule::RuleDefinition;

pub(super) fn rules(shared: &Shared) -> Result<Vec<RuleDefinition>, CatalogError> {
    let classifier = Arc::clone(&shared.classifier);
    let bands = Arc::clone(&shared.config);
    let tolerance = shared.config.transit_tolerance_days;
    let express = Arc::clone(&shared.config);

    Ok(vec![
        RuleDefinition::new(
            "trade.mode.required",
            Severity::Critical,
            Scope::Trade,
            &[MODE],
            "Transport mode is required.",
            |s, _| Ok(present(&s.shipment.trade_route.mode).is_none()),
        )?,
        RuleDefinition::new(
            "trade.origin.required",
            Severity::Critical,
            Scope::Trade,
            &[ORIGIN],
            "Origin location is required.",
            |s, _| Ok(present(&s.shipment.trade_route.origin).is_none()),
        )?,
        RuleDefinition::new(
            "trade.destination.required",
            Severity::Critical,
            Scope::Trade,
            &[DESTINATION],
            "Destination location is required.",
            |s, _| Ok(present(&s.shipment.trade_route.destination).is_none()),
        )?,
        RuleDefinition::new(
            "trade.route.same_endpoints",
            Severity::Critical,
            Scope::Trade,
            &[DESTINATION, ORIGIN],
            "Origin and destination are the same location.",
            |s, _| {
                let route = &s.shipment.trade_route;
                Ok(match (present(&route.origin), present(&route.destination)) {
                    (Some(o), Some(d)) => compact(o) == compact(d),
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "trade.dates.unreadable",
            Severity::Warning,
            Scope::Trade,
            &[ETD, ETA],
            "Departure or arrival date is not a valid YYYY-MM-DD date.",
            |s, _| {
                let route = &s.shipment.trade_route;
                Ok(date_field(&route.etd, ETD).is_err() || date_field(&route.eta, ETA).is_err())
            },
        )?,
        RuleDefinition::new(
            "trade.etd.in_past",
            Severity::Warning,
            Scope::Trade,
            &[ETD],
            "Departure date is in the past.",
            |s, ctx| Ok(date_field(&s.shipment.trade_route.etd, ETD)?.is_some_and(|etd| etd < ctx.today())),
        )?,
        RuleDefinition::new(
            "trade.eta.before_etd",
            Severity::Critical,
            Scope::Trade,
            &[ETA, ETD],
            "Arrival date is before departure date.",
            |s, _| {
                let route = &s.shipment.trade_route;
                Ok(match (date_field(&route.etd, ETD)?, date_field(&route.eta, ETA)?) {
                    (Some(etd), Some(eta)) => eta < etd,
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "trade.mode.location_mismatch",
            Severity::Critical,
            Scope::Trade,
            &[MODE, ORIGIN, DESTINATION],
            "Transport mode does not match the type of origin or destination.",
            move |s, _| {
                let route = &s.shipment.trade_route;
                let endpoints = [present(&route.origin), present(&route.destination)];
                let mismatch = |wrong_kind: fn(&Classification) -> bool| {
                    endpoints
                        .iter()
                        .flatten()
                        .any(|code| wrong_kind(&classifier.classify(code)))
                };
                Ok(match mode_of(route) {
                    Some(TransportMode::Sea) => mismatch(|c| c.is_airport),
                    Some(TransportMode::Air) => mismatch(|c| c.is_seaport),
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "trade.transit.out_of_range",
            Severity::Warning,
            Scope::Trade,
            &[TRANSIT, MODE],
            "Transit time is outside the usual range for this transport mode.",
            move |s, _| {
                let route = &s.shipment.trade_route;
                Ok(match (mode_of(route), route.transit_time_days) {
                    (Some(mode), Some(days)) => !bands.transit_days.for_mode(mode).contains(days),
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "trade.transit.dates_disagree",
            Severity::Suggestion,
            Scope::Trade,
            &[TRANSIT, ETD, ETA],
            "Transit time does not match the gap between departure and arrival.",
            move |s, _| {
                let route = &s.shipment.trade_route;
                let (Some(etd), Some(eta), Some(days)) = (
                    date_field(&route.etd, ETD)?,
                    date_field(&route.eta, ETA)?,
                    route.transit_time_days,
                ) else {
                    return Ok(false);
                };
                if eta < etd {
                    return Ok(false);
                }
                let gap = days_between(etd, eta) as f64;
                Ok((gap - days).abs() > tolerance)
            },
        )?,
        RuleDefinition::new(
            "trade.incoterm.unknown",
            Severity::Warning,
            Scope::Trade,
            &[INCOTERM],
            "Incoterm is not a recognized Incoterms 2020 rule.",
            |s, _| {
                let route = &s.shipment.trade_route;
                Ok(present(&route.incoterm).is_some() && incoterm_of(route).is_none())
            },
        )?,
        RuleDefinition::new(
            "trade.incoterm.sea_only",
            Severity::Suggestion,
            Scope::Trade,
            &[INCOTERM, MODE],
            "This Incoterm is intended for sea and inland waterway transport only.",
            |s, _| {
                let route = &s.shipment.trade_route;
                Ok(match (incoterm_of(route), mode_of(route)) {
                    (Some(term), Some(mode)) => term.is_sea_only() && mode != TransportMode::Sea,
                    _ => false,
                })
            },
        )?,
        RuleDefinition::new(
            "trade.priority.express_by_sea",
            Severity::Suggestion,
            Scope::Trade,
            &[PRIORITY, MODE],
            "Express priority with sea freight; consider air.",
            move |s, _| {
                let route = &s.shipment.trade_route;
                Ok(present(&route.priority).is_some_and(|p| express.is_express(p))
                    && mode_of(route) == Some(TransportMode::Sea))
            },
        )?,
    ])
}

/// Upper-cased with whitespace removed, for endpoint comparison.
fn compact(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase).collect()
}
