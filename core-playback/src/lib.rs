//! # Playback Module
//!
//! Playlist model, playback state machine and UI projection for the player.
//!
//! ## Overview
//!
//! This module handles:
//! - The session playlist and the lifetime of its playable URLs ([`playlist`])
//! - Transport commands and media lifecycle events ([`controller`])
//! - Rendering titles, times and transport state into the host view ([`render`])
//!
//! Decoding is left to the host media element; this crate only issues
//! commands through [`bridge_traits::MediaElement`].

pub mod controller;
pub mod error;
pub mod playlist;
pub mod render;

pub use controller::{Direction, PlaybackController, PlayerState, PlayerStatus};
pub use error::{PlaybackError, Result};
pub use playlist::{Playlist, PlaylistEntry};
pub use render::{display_title, format_time, Renderer};
