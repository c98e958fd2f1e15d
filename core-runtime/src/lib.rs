//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the player crates:
//! - Logging and tracing setup ([`logging`])
//! - Validated player configuration ([`config`])
//!
//! ## Overview
//!
//! Hosts call [`logging::init_logging`] once at startup and build a
//! [`config::PlayerConfig`] that the session and bridges read their database
//! layout, upload policy, display strings and element ids from.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ElementIds, PlayerConfig};
pub use error::{Error, Result};
