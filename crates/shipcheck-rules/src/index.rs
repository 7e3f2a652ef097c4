//! # Result Index
//!
//! Pure filters over an already-computed result list. Each is a single O(n)
//! scan that borrows its input, preserves catalog order, and returns the
//! same output for the same input every time.

use shipcheck_core::{FieldPath, Scope};

use crate::result::RuleResult;

/// Results whose rule has scope `scope`.
pub fn by_scope(results: &[RuleResult], scope: Scope) -> Vec<&RuleResult> {
    results.iter().filter(|r| r.scope() == scope).collect()
}

/// Results whose rule lists `path` among its field references.
///
/// Matching is exact: `"seller"` does not match a rule about `"seller.email"`.
/// Use [`within_field`] for section-level grouping.
pub fn by_field<'a>(results: &'a [RuleResult], path: &str) -> Vec<&'a RuleResult> {
    results.iter().filter(|r| r.rule().references(path)).collect()
}

/// Results with any field reference at or beneath `ancestor`.
///
/// Drives section badges: everything under `shipment.cargo_packing`.
pub fn within_field<'a>(results: &'a [RuleResult], ancestor: &FieldPath) -> Vec<&'a RuleResult> {
    results
        .iter()
        .filter(|r| r.field_refs().iter().any(|f| f.is_within(ancestor)))
        .collect()
}

/// Results whose primary field is exactly `path`.
///
/// The orchestrator uses this to badge the single field a click would focus.
pub fn by_primary_field<'a>(results: &'a [RuleResult], path: &str) -> Vec<&'a RuleResult> {
    results
        .iter()
        .filter(|r| r.primary_field().is_some_and(|f| f.as_str() == path))
        .collect()
}
