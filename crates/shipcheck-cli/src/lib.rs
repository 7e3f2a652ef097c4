//! # shipcheck-cli: Command-Line Driver
//!
//! Thin harness around the diagnostics engine. It owns all file access:
//! reading snapshots, code tables, and threshold overrides. The library
//! crates stay I/O-free.
//!
//! ## Subcommands
//!
//! - `shipcheck check`: Evaluate a snapshot and print diagnostics.
//! - `shipcheck rules`: List the catalog and its fingerprint.
//! - `shipcheck classify`: Classify location codes.
//!
//! ## Exit Status
//!
//! `0` on success, `2` when `check --fail-on` is met, `1` on any fatal
//! error (unreadable input, malformed tables, catalog integrity failure).

pub mod check;
pub mod classify;
pub mod engine;
pub mod output;
pub mod rules;
