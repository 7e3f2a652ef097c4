//! # shipcheck-rules: Shipment Diagnostics Engine
//!
//! Declarative diagnostics over a [`ShipmentState`] snapshot. A
//! [`RuleCatalog`] is an ordered list of [`RuleDefinition`]s; evaluation
//! runs every condition against the snapshot and partitions the rules that
//! fire into a [`ResultSet`] by severity.
//!
//! ## Lifecycle
//!
//! 1. Load [`CodeTables`](shipcheck_classify::CodeTables) and a
//!    [`RuleConfig`] at startup.
//! 2. Build the catalog once with [`builtin_catalog`] (or a
//!    [`CatalogBuilder`] for custom rules). Integrity errors are fatal.
//! 3. Call [`RuleCatalog::evaluate_all`] on every snapshot change. The
//!    catalog is immutable and `Sync`, so one instance serves every caller.
//! 4. Route results with [`index`] filters: by scope for panel badges, by
//!    field for inline markers.
//!
//! ## Crate Policy
//!
//! - No I/O. Conditions never mutate the snapshot.
//! - Evaluation never fails: a condition that errors or panics is logged
//!   and treated as not firing.
//!
//! [`ShipmentState`]: shipcheck_core::ShipmentState

pub mod builtin;
pub mod catalog;
pub mod config;
mod evaluator;
pub mod index;
pub mod result;
pub mod rule;

pub use builtin::{builtin_catalog, register_builtin};
pub use catalog::{CatalogBuilder, RuleCatalog};
pub use config::{Band, ConfigError, RuleConfig, TransitBounds};
pub use result::{ResultSet, RuleResult, SeverityCounts};
pub use rule::{Condition, EvalContext, RuleDefinition};
