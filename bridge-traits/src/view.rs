//! Rendering sink for the player UI.
//!
//! The core computes every visible value (titles, `MM:SS` strings, slider
//! bounds, the current marker) and pushes it through [`PlayerView`]. Hosts
//! only copy values into their widgets; they hold no UI state of their own.

use serde::{Deserialize, Serialize};

/// Glyph shown on the play/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportGlyph {
    /// Paused or stopped: pressing the control starts playback
    Play,
    /// Playing: pressing the control pauses
    Pause,
}

impl TransportGlyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportGlyph::Play => "►",
            TransportGlyph::Pause => "❚❚",
        }
    }
}

impl std::fmt::Display for TransportGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host widgets the renderer writes into.
pub trait PlayerView {
    /// Replace the list contents with one entry per title, in order.
    fn show_playlist(&self, titles: &[String]);

    /// Replace the list contents with a single placeholder entry.
    fn show_placeholder(&self, text: &str);

    /// Mark exactly the entry at `index` as current, or none.
    fn mark_current(&self, index: Option<usize>);

    fn set_transport_glyph(&self, glyph: TransportGlyph);

    fn set_title(&self, title: &str);

    /// Elapsed text and slider position.
    fn set_elapsed(&self, text: &str, position: f64);

    /// Total duration text and slider maximum.
    fn set_duration(&self, text: &str, max: f64);
}
