//! # Rule Catalog
//!
//! An ordered, immutable collection of [`RuleDefinition`]s.
//!
//! Catalogs are assembled once, at process start, through a
//! [`CatalogBuilder`]. Registration enforces catalog integrity: unique ids,
//! at least one field reference per rule, and field references that name a
//! real location in [`ShipmentState`]. Any violation is a
//! [`CatalogError`]; the process must refuse to start rather than evaluate
//! a malformed catalog.
//!
//! Once built, a [`RuleCatalog`] exposes no mutators. Iteration order is
//! registration order, which consumers rely on for display ordering.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use shipcheck_core::{CatalogError, ShipmentState};

use crate::rule::RuleDefinition;

/// Accumulates rules and checks integrity on every registration.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    rules: Vec<Arc<RuleDefinition>>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`] if the id is already registered.
    /// - [`CatalogError::EmptyFieldRefs`] if the rule names no fields.
    /// - [`CatalogError::UnknownFieldPath`] if a field reference is not in
    ///   [`ShipmentState::FIELD_PATHS`].
    pub fn register(&mut self, rule: RuleDefinition) -> Result<&mut Self, CatalogError> {
        if self.index.contains_key(rule.id()) {
            return Err(CatalogError::DuplicateId {
                id: rule.id().to_string(),
            });
        }
        if rule.field_refs().is_empty() {
            return Err(CatalogError::EmptyFieldRefs {
                id: rule.id().to_string(),
            });
        }
        if let Some(unknown) = rule.field_refs().iter().find(|p| !ShipmentState::has_field(p)) {
            return Err(CatalogError::UnknownFieldPath {
                id: rule.id().to_string(),
                path: unknown.to_string(),
            });
        }
        self.index.insert(rule.id().to_string(), self.rules.len());
        self.rules.push(Arc::new(rule));
        Ok(self)
    }

    /// Register every rule in order, stopping at the first failure.
    pub fn register_all<I>(&mut self, rules: I) -> Result<&mut Self, CatalogError>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Freeze the catalog.
    pub fn build(self) -> RuleCatalog {
        let fingerprint = fingerprint(&self.rules);
        tracing::debug!(rules = self.rules.len(), %fingerprint, "rule catalog built");
        RuleCatalog {
            rules: self.rules,
            index: self.index,
            fingerprint,
        }
    }
}

/// The frozen, ordered rule catalog.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Arc<RuleDefinition>>,
    index: HashMap<String, usize>,
    fingerprint: String,
}

impl RuleCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Rules in registration order.
    pub fn rules(&self) -> &[Arc<RuleDefinition>] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().map(AsRef::as_ref)
    }

    pub fn get(&self, id: &str) -> Option<&RuleDefinition> {
        self.index.get(id).map(|&i| self.rules[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True if any rule lists `path` among its field references.
    pub fn declares_field(&self, path: &str) -> bool {
        self.iter().any(|r| r.references(path))
    }

    /// Lowercase hex SHA-256 over the ordered rule metadata.
    ///
    /// Changes whenever a rule is added, removed, reordered, or has its
    /// severity, scope, field references, or message edited. Conditions are
    /// code and do not contribute.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(rules: &[Arc<RuleDefinition>]) -> String {
    const UNIT: &[u8] = &[0x1f];
    const RECORD: &[u8] = &[0x1e];
    let mut hasher = Sha256::new();
    for rule in rules {
        hasher.update(rule.id().as_bytes());
        hasher.update(UNIT);
        hasher.update(rule.severity().as_str().as_bytes());
        hasher.update(UNIT);
        hasher.update(rule.scope().as_str().as_bytes());
        hasher.update(UNIT);
        for path in rule.field_refs() {
            hasher.update(path.as_str().as_bytes());
            hasher.update(b",");
        }
        hasher.update(UNIT);
        hasher.update(rule.message().as_bytes());
        hasher.update(RECORD);
    }
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}
