//! # Desktop Bridge Implementations
//!
//! Native implementations of the player's bridge traits for desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `SongStore` using an SQLite database through `sqlx`
//!
//! The browser media element, object URLs and DOM have no desktop
//! counterpart here; native hosts use this crate to exercise the storage and
//! upload pipeline end to end.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{default_database_path, SqliteSongStore};
//! use bridge_traits::SongStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SqliteSongStore::new(default_database_path("retro-mp3-player"))
//!         .await
//!         .expect("open song store");
//!     println!("{} songs", store.count().await.unwrap_or(0));
//! }
//! ```

mod songs;

pub use songs::{default_database_path, SqliteSongStore};
