//! Core types and derivations for the epidash regional dashboard.
//!
//! This crate is deliberately free of HTTP, file and async dependencies. It
//! receives already-loaded datasets and returns derived values; loading and
//! rendering belong to the crates that depend on it.

pub mod align;
pub mod dashboard;
pub mod derive;
pub mod error;
pub mod facts;
pub mod leaderboard;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod selection;
pub mod summary;
pub mod vaccination;

pub use error::{Error, Result};
