//! # Library Management Module
//!
//! Owns the player's persisted song collection.
//!
//! ## Overview
//!
//! [`SongLibrary`] sits between the session and a platform
//! [`SongStore`](bridge_traits::SongStore):
//! - Upload policy (only accepted media types are persisted)
//! - Replace-then-reload pipeline used after every upload
//! - Inert operation when the store could not be opened

pub mod error;
pub mod library;

pub use error::{LibraryError, Result};
pub use library::SongLibrary;
