//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-service`, `core-playback`). Host shells can depend
//! on `retro-player-workspace` and pick `desktop-shims` or `wasm` without
//! wiring each crate individually.

#[cfg(any(feature = "desktop-shims", feature = "wasm"))]
pub use core_playback::{format_time, PlayerStatus};
#[cfg(any(feature = "desktop-shims", feature = "wasm"))]
pub use core_service::{PlayerDependencies, PlayerSession};
