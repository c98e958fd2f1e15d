//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (song store, media
//! element, playable URLs, view) into a [`PlayerSession`]. Desktop builds
//! typically enable the `desktop-shims` feature (which depends on
//! `bridge-desktop`) for an SQLite song store, whereas WebAssembly builds
//! enable the `wasm` feature and get a complete browser player from
//! `bridge-wasm`.

pub mod error;
pub mod session;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub mod desktop;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

pub use error::{CoreError, Result};
pub use session::{PlayerDependencies, PlayerEvent, PlayerSession};

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub use desktop::open_desktop_store;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::{bootstrap_wasm, WebPlayer};
