//! Assigner core library — roster types, reconciliation rules, config store.
//!
//! Public API surface:
//! - [`types`] — [`StudentRecord`], [`SecondaryId`]
//! - [`roster`] — [`Roster`]: dedup filter, record merger, listing, removal
//! - [`config`] — YAML config document load / save / edit
//! - [`error`] — [`RosterError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod roster;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, RosterError};
pub use roster::Roster;
pub use types::{SecondaryId, StudentRecord};
