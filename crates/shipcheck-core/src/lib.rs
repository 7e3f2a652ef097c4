//! # shipcheck-core: Foundational Types for Shipment Diagnostics
//!
//! Defines the type-system primitives shared by every other shipcheck crate:
//! the typed shipment snapshot, field paths, severities, scopes, timestamps,
//! and the error hierarchy. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Absence is a type-level case.** Every section and field of
//!    [`ShipmentState`] is optional and handled once in the schema, not
//!    re-checked ad hoc inside every rule.
//!
//! 2. **Validated field paths.** [`FieldPath`] rejects malformed paths at
//!    construction, and [`ShipmentState::FIELD_PATHS`] is the single list of
//!    locations the UI layer can focus.
//!
//! 3. **Exhaustive tags.** [`Scope`] and [`Severity`] are closed enums;
//!    adding a variant is a compile error until every consumer handles it.
//!
//! ## Crate Policy
//!
//! - No I/O. No mutation of caller-provided state.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod scope;
pub mod severity;
pub mod state;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{CatalogError, ConditionError, ShipcheckError};
pub use field::FieldPath;
pub use scope::Scope;
pub use severity::Severity;
pub use state::{present, CargoPacking, Party, RiskModules, Shipment, ShipmentState, TradeRoute};
pub use temporal::{days_between, parse_calendar_date, Timestamp};
