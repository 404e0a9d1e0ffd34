//! # Fundbook Core
//!
//! Core library for Fundbook - a small community-fund ledger with an
//! append-only audit trail.
//!
//! This crate provides the domain logic, file-backed stores, and data models
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: CSV-backed record stores and append-only history logs
//! - **ledger**: The service coordinating stores, logs, and totals
//! - **auth**: Static credential mapping for the login gate
//! - **fs**: Atomic snapshot writes
//!
//! Every mutation follows the same discipline: read the full snapshot,
//! mutate in memory, write the full snapshot. The audit row is written
//! before the record store, so a crash between the two leaves an audited
//! but unapplied change rather than a silent one.

pub mod auth;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod store;

pub use error::{FundError, Result};
pub use ledger::{EditOutcome, LedgerService};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
