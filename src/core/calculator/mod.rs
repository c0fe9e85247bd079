//! Financial reconciliation engine.
//!
//! Everything in here is a pure function of the session rows handed in:
//! no database access, no clock. Every report, dashboard tab and export
//! classifies sessions through [`billing`] so that the pending definition
//! is the same everywhere.

pub mod billing;
pub mod client_summary;
pub mod pending;
pub mod totals;
