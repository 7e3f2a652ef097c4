//! # Evaluator
//!
//! A stateless fold over the catalog: run every condition in catalog order,
//! collect the ones that hold, stamp them with the evaluation clock.
//!
//! ## Failure Boundary
//!
//! Each condition runs inside its own boundary. A condition that returns
//! `Err` or panics is logged at `warn` and treated as not firing; the
//! remaining rules still run. Evaluation therefore never fails and always
//! returns a well-formed [`ResultSet`].
//!
//! ## Concurrency
//!
//! Evaluation reads an immutable snapshot and allocates a fresh result set,
//! so concurrent calls with different snapshots share nothing mutable.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use shipcheck_core::ShipmentState;

use crate::catalog::RuleCatalog;
use crate::result::{ResultSet, RuleResult};
use crate::rule::{EvalContext, RuleDefinition};

impl RuleCatalog {
    /// Evaluate every rule against `state` using the current UTC time.
    pub fn evaluate_all(&self, state: &ShipmentState) -> ResultSet {
        self.evaluate_at(state, &EvalContext::now())
    }

    /// Evaluate every rule against `state` with an explicit clock.
    ///
    /// For a fixed `state` and `ctx` the result is fully deterministic,
    /// `fired_at` stamps included.
    pub fn evaluate_at(&self, state: &ShipmentState, ctx: &EvalContext) -> ResultSet {
        let mut results = ResultSet::new();
        let mut failed = 0usize;
        for rule in self.rules() {
            match run_contained(rule, state, ctx) {
                Some(true) => {
                    tracing::trace!(rule_id = rule.id(), severity = %rule.severity(), "rule fired");
                    results.push(RuleResult::new(Arc::clone(rule), ctx.now));
                }
                Some(false) => {}
                None => failed += 1,
            }
        }
        let counts = results.counts();
        tracing::debug!(
            rules = self.len(),
            failed,
            critical = counts.critical,
            warning = counts.warning,
            suggestion = counts.suggestion,
            "evaluation complete"
        );
        results
    }
}

/// Run one condition. `None` means it failed and was contained.
fn run_contained(rule: &RuleDefinition, state: &ShipmentState, ctx: &EvalContext) -> Option<bool> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(state, ctx))) {
        Ok(Ok(fired)) => Some(fired),
        Ok(Err(error)) => {
            tracing::warn!(rule_id = rule.id(), %error, "rule condition failed; treating as not firing");
            None
        }
        Err(payload) => {
            tracing::warn!(
                rule_id = rule.id(),
                panic = panic_message(payload.as_ref()),
                "rule condition panicked; treating as not firing"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
