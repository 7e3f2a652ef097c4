//! # Rule Definitions
//!
//! A [`RuleDefinition`] is an immutable value: identity, severity, scope,
//! the field paths it is about, a human message, and a [`Condition`] that
//! answers "is the problem present in this snapshot?".
//!
//! Conditions are pure. They read the snapshot and the [`EvalContext`]
//! clock and nothing else; they never mutate state, never perform I/O, and
//! never trigger or disable other rules.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use shipcheck_core::{CatalogError, ConditionError, FieldPath, Scope, Severity, ShipmentState, Timestamp};

/// Inputs to a condition besides the snapshot itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// The evaluation clock. Every result of one evaluation carries it as
    /// `fired_at`, and date rules compare against its calendar day.
    pub now: Timestamp,
}

impl EvalContext {
    /// Context using the current UTC time.
    pub fn now() -> Self {
        Self { now: Timestamp::now() }
    }

    /// Context pinned to a fixed clock.
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// The UTC calendar day of the evaluation.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// A rule's predicate: `Ok(true)` means the problem is present.
///
/// An `Err` means the condition could not reach a verdict. The evaluator
/// logs it and treats the rule as not firing.
pub trait Condition: Send + Sync {
    fn check(&self, state: &ShipmentState, ctx: &EvalContext) -> Result<bool, ConditionError>;
}

impl<F> Condition for F
where
    F: Fn(&ShipmentState, &EvalContext) -> Result<bool, ConditionError> + Send + Sync,
{
    fn check(&self, state: &ShipmentState, ctx: &EvalContext) -> Result<bool, ConditionError> {
        self(state, ctx)
    }
}

/// An immutable diagnostic rule.
#[derive(Serialize)]
pub struct RuleDefinition {
    id: String,
    severity: Severity,
    scope: Scope,
    field_refs: Vec<FieldPath>,
    message: String,
    #[serde(skip)]
    condition: Box<dyn Condition>,
}

impl RuleDefinition {
    /// Define a rule from a closure or function.
    ///
    /// `field_refs` is ordered: the first path is the primary target the UI
    /// focuses when the diagnostic is clicked.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidId`] for an empty id or one containing
    /// whitespace, [`CatalogError::InvalidFieldPath`] for a malformed path.
    /// Emptiness of `field_refs` and schema membership are checked when the
    /// rule is registered.
    pub fn new<F>(
        id: &str,
        severity: Severity,
        scope: Scope,
        field_refs: &[&str],
        message: &str,
        condition: F,
    ) -> Result<Self, CatalogError>
    where
        F: Fn(&ShipmentState, &EvalContext) -> Result<bool, ConditionError> + Send + Sync + 'static,
    {
        Self::with_condition(id, severity, scope, field_refs, message, Box::new(condition))
    }

    /// Define a rule from any [`Condition`] implementation.
    pub fn with_condition(
        id: &str,
        severity: Severity,
        scope: Scope,
        field_refs: &[&str],
        message: &str,
        condition: Box<dyn Condition>,
    ) -> Result<Self, CatalogError> {
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(CatalogError::InvalidId { id: id.to_string() });
        }
        let field_refs = field_refs
            .iter()
            .map(|p| {
                FieldPath::parse(p).map_err(|e| CatalogError::InvalidFieldPath {
                    id: id.to_string(),
                    path: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: id.to_string(),
            severity,
            scope,
            field_refs,
            message: message.to_string(),
            condition,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Field paths this rule is about, primary target first.
    pub fn field_refs(&self) -> &[FieldPath] {
        &self.field_refs
    }

    /// The first field reference, if any. Registered rules always have one.
    pub fn primary_field(&self) -> Option<&FieldPath> {
        self.field_refs.first()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True if `path` is one of this rule's field references.
    pub fn references(&self, path: &str) -> bool {
        self.field_refs.iter().any(|f| f.as_str() == path)
    }

    /// Run the condition. Failures are returned, not contained; containment
    /// is the evaluator's job.
    pub fn check(&self, state: &ShipmentState, ctx: &EvalContext) -> Result<bool, ConditionError> {
        self.condition.check(state, ctx)
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("scope", &self.scope)
            .field("field_refs", &self.field_refs)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
