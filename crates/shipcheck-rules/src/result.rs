//! # Results
//!
//! [`RuleResult`] pairs a fired rule with the evaluation clock.
//! [`ResultSet`] partitions results into severity buckets while keeping an
//! `all` list in catalog order.
//!
//! ## Invariant
//!
//! `critical.len() + warning.len() + suggestion.len() == all.len()`, and
//! every result in `all` appears in exactly the bucket matching its rule's
//! severity. Fields are private and results enter only through
//! [`ResultSet::push`], so the invariant holds by construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use shipcheck_core::{FieldPath, Scope, Severity, Timestamp};

use crate::index;
use crate::rule::RuleDefinition;

/// A rule whose condition held, stamped with the evaluation time.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    #[serde(flatten)]
    rule: Arc<RuleDefinition>,
    fired_at: Timestamp,
}

impl RuleResult {
    pub fn new(rule: Arc<RuleDefinition>, fired_at: Timestamp) -> Self {
        Self { rule, fired_at }
    }

    pub fn rule(&self) -> &RuleDefinition {
        &self.rule
    }

    pub fn id(&self) -> &str {
        self.rule.id()
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    pub fn scope(&self) -> Scope {
        self.rule.scope()
    }

    pub fn field_refs(&self) -> &[FieldPath] {
        self.rule.field_refs()
    }

    /// The field the UI should focus for this diagnostic.
    pub fn primary_field(&self) -> Option<&FieldPath> {
        self.rule.primary_field()
    }

    pub fn message(&self) -> &str {
        self.rule.message()
    }

    pub fn fired_at(&self) -> Timestamp {
        self.fired_at
    }
}

/// Two results are equal when the same rule fired. `fired_at` is ignored, so
/// re-evaluating an unchanged snapshot compares equal whenever it runs.
impl PartialEq for RuleResult {
    fn eq(&self, other: &Self) -> bool {
        self.rule.id() == other.rule.id()
    }
}

impl Eq for RuleResult {}

/// Per-severity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub suggestion: usize,
    pub total: usize,
}

/// Outcome of one evaluation.
///
/// Equality compares bucket membership rule by rule; see [`RuleResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    critical: Vec<RuleResult>,
    warning: Vec<RuleResult>,
    suggestion: Vec<RuleResult>,
    all: Vec<RuleResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result to `all` and to its severity bucket.
    pub(crate) fn push(&mut self, result: RuleResult) {
        match result.severity() {
            Severity::Critical => self.critical.push(result.clone()),
            Severity::Warning => self.warning.push(result.clone()),
            Severity::Suggestion => self.suggestion.push(result.clone()),
        }
        self.all.push(result);
    }

    pub fn critical(&self) -> &[RuleResult] {
        &self.critical
    }

    pub fn warning(&self) -> &[RuleResult] {
        &self.warning
    }

    pub fn suggestion(&self) -> &[RuleResult] {
        &self.suggestion
    }

    /// Every fired result, in catalog order.
    pub fn all(&self) -> &[RuleResult] {
        &self.all
    }

    pub fn bucket(&self, severity: Severity) -> &[RuleResult] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Warning => &self.warning,
            Severity::Suggestion => &self.suggestion,
        }
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// True if any critical rule fired; the orchestrator blocks submission.
    pub fn has_blocking(&self) -> bool {
        !self.critical.is_empty()
    }

    /// True if any result is at least as serious as `threshold`.
    pub fn any_at_least(&self, threshold: Severity) -> bool {
        self.all.iter().any(|r| r.severity().meets(threshold))
    }

    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts {
            critical: self.critical.len(),
            warning: self.warning.len(),
            suggestion: self.suggestion.len(),
            total: self.all.len(),
        }
    }

    /// Number of results per scope. Scopes with no results are omitted.
    pub fn counts_by_scope(&self) -> BTreeMap<Scope, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.all {
            *counts.entry(r.scope()).or_insert(0) += 1;
        }
        counts
    }

    /// Ids of fired rules, in catalog order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.all.iter().map(RuleResult::id).collect()
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.all.iter().any(|r| r.id() == rule_id)
    }

    /// See [`index::by_scope`].
    pub fn by_scope(&self, scope: Scope) -> Vec<&RuleResult> {
        index::by_scope(&self.all, scope)
    }

    /// See [`index::by_field`].
    pub fn by_field(&self, path: &str) -> Vec<&RuleResult> {
        index::by_field(&self.all, path)
    }
}
