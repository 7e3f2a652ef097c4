//! # shipcheck-classify: Location and Format Classification
//!
//! Pure lookup and heuristic helpers the diagnostic rules depend on:
//!
//! - [`PortClassifier`]: location code → seaport / airport / country, backed
//!   by operator-updatable [`CodeTables`].
//! - [`TransportMode`] and [`Incoterm`]: closed sets parsed from free text.
//! - [`format`]: email, phone, and HS code validators.
//!
//! ## Crate Policy
//!
//! - No I/O. Tables are parsed from strings handed in by the caller.
//! - Classification is total: unknown input yields a neutral answer,
//!   never an error.

pub mod format;
pub mod incoterm;
pub mod mode;
pub mod port;
pub mod tables;

pub use incoterm::{Handover, Incoterm};
pub use mode::TransportMode;
pub use port::{Classification, PortClassifier};
pub use tables::{CodeTables, TableError};
