//! # Playback Error Types

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors that can occur during playback operations.
///
/// Invalid requests (out-of-range index, no source assigned) are not errors;
/// they are ignored. Only failures reported by the host bridges surface here.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The host media element or URL factory rejected a command.
    #[error("Host bridge failed: {0}")]
    Bridge(#[from] BridgeError),
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
