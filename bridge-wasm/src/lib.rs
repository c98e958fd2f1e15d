//! WebAssembly Bridge Implementations
//!
//! Browser implementations of the bridge traits defined in `bridge-traits`,
//! built on `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It compiles to nothing on native targets.
//!
//! # Implementations
//!
//! - [`IdbSongStore`]: song collection in an IndexedDB object store
//! - [`HtmlAudioMedia`]: the page's `<audio>` element
//! - [`ObjectUrlRegistry`]: `blob:` URLs for song payloads
//! - [`DomPlayerView`]: renders playlist, title, times and transport glyph
//!
//! [`build_wasm_bridges`] resolves the page and opens the store in one step.

#![cfg(target_arch = "wasm32")]

pub mod bootstrap;
pub mod dom;
pub mod error;
pub mod files;
mod idb;
pub mod listener;
pub mod media;
pub mod store;
pub mod urls;

// Re-export commonly used types
pub use bootstrap::{build_wasm_bridges, WasmBridgeSet};
pub use dom::{DomPlayerView, PageElements};
pub use error::{WasmError, WasmResult};
pub use files::read_upload_files;
pub use listener::EventListener;
pub use media::HtmlAudioMedia;
pub use store::IdbSongStore;
pub use urls::ObjectUrlRegistry;

/// Route Rust panics to the browser console.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
