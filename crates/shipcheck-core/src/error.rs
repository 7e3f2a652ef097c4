//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout shipcheck. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Catalog-integrity errors are fatal and surface once, at startup.
//! - Condition errors are recoverable: the evaluator contains them at the
//!   per-rule boundary and they never reach the caller of `evaluate_all`.
//! - Parse errors name the offending input and the reason it was rejected.

use thiserror::Error;

/// Top-level error type for shipcheck.
#[derive(Error, Debug)]
pub enum ShipcheckError {
    /// Rule catalog failed an integrity check.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A string could not be parsed into a domain type.
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Integrity violation detected while building a rule catalog.
///
/// Every variant is a configuration defect. A process that hits one of
/// these must refuse to start rather than evaluate a malformed catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two rules were registered under the same id.
    #[error("duplicate rule id {id:?}")]
    DuplicateId {
        /// The id registered twice.
        id: String,
    },

    /// A rule declared no field references.
    #[error("rule {id:?} declares no field references")]
    EmptyFieldRefs {
        /// The offending rule.
        id: String,
    },

    /// A rule id was empty or contained whitespace.
    #[error("invalid rule id {id:?}")]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// A field reference is not a well-formed dot-separated path.
    #[error("rule {id:?} has malformed field path {path:?}: {reason}")]
    InvalidFieldPath {
        /// The offending rule.
        id: String,
        /// The rejected path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// A field reference does not name a location in the shipment schema.
    #[error("rule {id:?} references unknown field path {path:?}")]
    UnknownFieldPath {
        /// The offending rule.
        id: String,
        /// The path with no counterpart in the schema.
        path: String,
    },
}

/// Failure inside a single rule's condition.
///
/// Never propagated past the evaluator; logged and treated as "not firing".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditionError {
    /// A present field holds a value the condition cannot interpret.
    #[error("field {field} has unusable value {value:?}: {reason}")]
    InvalidValue {
        /// Dot-separated path of the field.
        field: String,
        /// The raw value as found in the state.
        value: String,
        /// Why the value could not be used.
        reason: String,
    },

    /// Any other failure raised by a condition.
    #[error("condition failed: {0}")]
    Internal(String),
}

impl ConditionError {
    /// Shorthand for [`ConditionError::InvalidValue`].
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
