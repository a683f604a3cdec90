//! Session-store record types for the AAS navigation gate.
//!
//! This crate contains the serde-serializable types persisted in the
//! browser-session key-value store. These types represent the "storage
//! layer" - the shapes of data as they appear under each store key.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond construction and merge helpers
//! * 1:1 with storage: Match the session-store schema of the extension
//! * Stable: Changes only when the stored shapes change
//!
//! The gate logic built on top of these types lives in `aas-gate`.

pub mod history;
pub mod key;
pub mod state;

pub use history::*;
pub use key::*;
pub use state::*;
