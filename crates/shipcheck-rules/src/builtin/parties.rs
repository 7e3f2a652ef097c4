//! Seller and buyer rules.
//!
//! Contact checks are identical for both parties and are generated per
//! [`PartyRole`]. The country checks compare a party against the endpoint it
//! is responsible for under the declared Incoterm: the seller against the
//! origin for origin-handover terms, the buyer against the destination for
//! delivered terms. Without a recognizable Incoterm they stay silent.

use std::sync::Arc;

use shipcheck_classify::format::{is_valid_email, is_valid_phone};
use shipcheck_classify::{Handover, PortClassifier};
use shipcheck_core::{present, CatalogError, ConditionError, Party, Scope, Severity, ShipmentState};

use super::paths::{DESTINATION, INCOTERM, ORIGIN};
use super::{incoterm_of, Shared};
use crate::rule::{EvalContext, RuleDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartyRole {
    Seller,
    Buyer,
}

impl PartyRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Buyer => "buyer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Seller => "Seller",
            Self::Buyer => "Buyer",
        }
    }

    fn scope(self) -> Scope {
        match self {
            Self::Seller => Scope::Seller,
            Self::Buyer => Scope::Buyer,
        }
    }

    fn party(self, state: &ShipmentState) -> &Party {
        match self {
            Self::Seller => &state.seller,
            Self::Buyer => &state.buyer,
        }
    }
}

pub(super) fn rules(shared: &Shared) -> Result<Vec<RuleDefinition>, CatalogError> {
    let mut rules = contact_rules(PartyRole::Seller, shared)?;
    rules.push(RuleDefinition::new(
        "seller.country.origin_mismatch",
        Severity::Warning,
        Scope::Seller,
        &["seller.country", ORIGIN, INCOTERM],
        "Seller country differs from the origin country for a term where the seller hands over at origin.",
        country_mismatch(PartyRole::Seller, Handover::Origin, Arc::clone(&shared.classifier)),
    )?);
    rules.extend(contact_rules(PartyRole::Buyer, shared)?);
    rules.push(RuleDefinition::new(
        "buyer.country.destination_mismatch",
        Severity::Warning,
        Scope::Buyer,
        &["buyer.country", DESTINATION, INCOTERM],
        "Buyer country differs from the destination country for a delivered term.",
        country_mismatch(PartyRole::Buyer, Handover::Destination, Arc::clone(&shared.classifier)),
    )?);
    rules.push(RuleDefinition::new(
        "buyer.company.same_as_seller",
        Severity::Suggestion,
        Scope::Buyer,
        &["buyer.company", "seller.company"],
        "Buyer and seller are the same company.",
        |s, _| {
            Ok(match (present(&s.seller.company), present(&s.buyer.company)) {
                (Some(seller), Some(buyer)) => seller.eq_ignore_ascii_case(buyer),
                _ => false,
            })
        },
    )?);
    Ok(rules)
}

fn contact_rules(role: PartyRole, shared: &Shared) -> Result<Vec<RuleDefinition>, CatalogError> {
    let prefix = role.as_str();
    let min_digits = shared.config.phone_min_digits;
    Ok(vec![
        RuleDefinition::new(
            &format!("{prefix}.company.required"),
            Severity::Critical,
            role.scope(),
            &[format!("{prefix}.company").as_str()],
            &format!("{} company name is required.", role.label()),
            move |s, _| Ok(present(&role.party(s).company).is_none()),
        )?,
        RuleDefinition::new(
            &format!("{prefix}.email.format"),
            Severity::Warning,
            role.scope(),
            &[format!("{prefix}.email").as_str()],
            &format!("{} email address is not valid.", role.label()),
            move |s, _| Ok(present(&role.party(s).email).is_some_and(|e| !is_valid_email(e))),
        )?,
        RuleDefinition::new(
            &format!("{prefix}.phone.format"),
            Severity::Warning,
            role.scope(),
            &[format!("{prefix}.phone").as_str()],
            &format!("{} phone number has fewer than {min_digits} digits.", role.label()),
            move |s, _| Ok(present(&role.party(s).phone).is_some_and(|p| !is_valid_phone(p, min_digits))),
        )?,
    ])
}

fn country_mismatch(
    role: PartyRole,
    handover: Handover,
    classifier: Arc<PortClassifier>,
) -> impl Fn(&ShipmentState, &EvalContext) -> Result<bool, ConditionError> + Send + Sync + 'static {
    move |s, _| {
        let route = &s.shipment.trade_route;
        if incoterm_of(route).map(|t| t.handover()) != Some(handover) {
            return Ok(false);
        }
        let endpoint = match role {
            PartyRole::Seller => &route.origin,
            PartyRole::Buyer => &route.destination,
        };
        let party_country = present(&role.party(s).country).and_then(|c| classifier.resolve_country(c));
        let endpoint_country = present(endpoint).and_then(|code| classifier.country_of(code));
        Ok(match (party_country, endpoint_country) {
            (Some(party), Some(endpoint)) => party != endpoint,
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use shipcheck_classify::CodeTables;

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
    fn test_contact_rules_per_role() {
        assert!(fires("seller.company.required", |_| {}));
        assert!(fires("buyer.company.required", |s| s.seller.company = Some("Acme".into())));
        assert!(!fires("buyer.company.required", |s| s.buyer.company = Some("Globex".into())));

        assert!(fires("seller.email.format", |s| s.seller.email = Some("ops@acme".into())));
        assert!(!fires("seller.email.format", |s| s.seller.email = Some("ops@acme.com".into())));
        assert!(!fires("buyer.email.format", |s| s.seller.email = Some("nope".into())));

        assert!(fires("buyer.phone.format", |s| s.buyer.phone = Some("+1 555".into())));
        assert!(!fires("buyer.phone.format", |s| s.buyer.phone = Some("+1 (555) 010-2030".into())));
    }

    #[test]
    fn test_seller_country_vs_origin() {
        let mismatch = |s: &mut ShipmentState| {
            s.shipment.trade_route.incoterm = Some("FOB".into());
            s.shipment.trade_route.origin = Some("CNSHA".into());
            s.seller.country = Some("Germany".into());
        };
        assert!(fires("seller.country.origin_mismatch", mismatch));
        assert!(!fires("seller.country.origin_mismatch", |s| {
            mismatch(s);
            s.seller.country = Some("cn".into());
        }));
        assert!(!fires("seller.country.origin_mismatch", |s| {
            mismatch(s);
            s.shipment.trade_route.incoterm = Some("CIF".into());
        }));
        assert!(!fires("seller.country.origin_mismatch", |s| {
            mismatch(s);
            s.shipment.trade_route.origin = Some("ZZZZZ".into());
        }));
    }

    #[test]
    fn test_buyer_country_vs_destination() {
        let mismatch = |s: &mut ShipmentState| {
            s.shipment.trade_route.incoterm = Some("DDP".into());
            s.shipment.trade_route.destination = Some("LAX".into());
            s.buyer.country = Some("NL".into());
        };
        assert!(fires("buyer.country.destination_mismatch", mismatch));
        assert!(!fires("buyer.country.destination_mismatch", |s| {
            mismatch(s);
            s.buyer.country = Some("US".into());
        }));
        assert!(!fires("buyer.country.destination_mismatch", |s| {
            mismatch(s);
            s.shipment.trade_route.incoterm = Some("EXW".into());
        }));
    }

    #[test]
    fn test_same_company() {
        assert!(fires("buyer.company.same_as_seller", |s| {
            s.seller.company = Some("Acme Ltd".into());
            s.buyer.company = Some("ACME LTD".into());
        }));
        assert!(!fires("buyer.company.same_as_seller", |s| s.buyer.company = Some("Acme".into())));
    }
}
