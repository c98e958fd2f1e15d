//! Playback controller
//!
//! Drives the host media element from user commands and media lifecycle
//! events, keeps the [`PlayerState`] and tells the [`Renderer`] what changed.
//!
//! ## State machine
//!
//! ```text
//!            load_without_playing            toggle
//!   Idle ─────────────────────────► Loaded ─────────► Playing ◄──┐
//!    │                                                   │  ▲    │ select_and_play
//!    └──────────── select_and_play ─────────────────────►│  │    │ advance / ended
//!                                                 toggle ▼  │ toggle
//!                                                      Paused
//! ```
//!
//! `reset` returns to `Idle` from any state. Requests that make no sense in
//! the current state (out-of-range index, toggling without a source) are
//! ignored rather than reported.

use bridge_traits::{MediaElement, TransportGlyph};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{error::Result, playlist::Playlist, render::Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// No source assigned
    #[default]
    Idle,
    /// Source assigned, playback never started
    Loaded,
    Playing,
    Paused,
}

impl PlayerStatus {
    fn glyph(self) -> TransportGlyph {
        match self {
            PlayerStatus::Playing => TransportGlyph::Pause,
            _ => TransportGlyph::Play,
        }
    }
}

/// Step through the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn step(self) -> i64 {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Session-wide player state.
///
/// `current_index` is either `None` or a valid index into the playlist the
/// controller was last driven with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_index: Option<usize>,
    pub status: PlayerStatus,
    pub position_secs: f64,
    /// Known once metadata has loaded for the current source
    pub duration_secs: Option<f64>,
}

pub struct PlaybackController {
    media: Box<dyn MediaElement>,
    renderer: Renderer,
    state: PlayerState,
    /// Set on every source load, cleared by the first metadata event.
    awaiting_metadata: bool,
}

impl PlaybackController {
    pub fn new(media: Box<dyn MediaElement>, renderer: Renderer) -> Self {
        Self {
            media,
            renderer,
            state: PlayerState::default(),
            awaiting_metadata: false,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Start playing the entry at `index`.
    pub fn select_and_play(&mut self, playlist: &Playlist, index: usize) -> Result<()> {
        if !self.load_entry(playlist, index)? {
            return Ok(());
        }

        self.media.play()?;
        self.set_status(PlayerStatus::Playing);
        debug!(index, "Playing track");
        Ok(())
    }

    /// Select the entry at `index` and load its source without starting
    /// playback.
    pub fn load_without_playing(&mut self, playlist: &Playlist, index: usize) -> Result<()> {
        if !self.load_entry(playlist, index)? {
            return Ok(());
        }

        self.set_status(PlayerStatus::Loaded);
        debug!(index, "Track loaded");
        Ok(())
    }

    /// Flip between playing and paused. Ignored while no source is assigned.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.media.source().is_none() {
            trace!("Toggle ignored: no source");
            return Ok(());
        }

        if self.media.is_paused() {
            self.media.play()?;
            self.set_status(PlayerStatus::Playing);
        } else {
            self.media.pause()?;
            self.set_status(PlayerStatus::Paused);
        }
        Ok(())
    }

    /// Move one entry forward or back, wrapping at both ends.
    ///
    /// With no selection, `Next` plays the first entry.
    pub fn advance(&mut self, playlist: &Playlist, direction: Direction) -> Result<()> {
        if playlist.is_empty() {
            return Ok(());
        }

        let len = playlist.len() as i64;
        let current = self.state.current_index.map_or(-1, |i| i as i64);
        let target = (current + direction.step()).rem_euclid(len) as usize;
        self.select_and_play(playlist, target)
    }

    /// First metadata event after a load: the duration is now known.
    pub fn on_metadata_ready(&mut self, duration_secs: f64) {
        if !self.awaiting_metadata {
            trace!("Metadata event ignored: already captured");
            return;
        }
        self.awaiting_metadata = false;

        self.state.duration_secs =
            (duration_secs.is_finite() && duration_secs > 0.0).then_some(duration_secs);
        self.renderer.render_duration(duration_secs);
    }

    /// Periodic position update from the media element.
    pub fn on_time_advanced(&mut self, position_secs: f64) {
        if self.state.duration_secs.is_none() {
            return;
        }

        self.state.position_secs = position_secs;
        self.renderer.render_elapsed(position_secs);
    }

    /// The current track finished: continue with the next one.
    pub fn on_playback_ended(&mut self, playlist: &Playlist) -> Result<()> {
        self.advance(playlist, Direction::Next)
    }

    /// Jump to `seconds` in the current source.
    pub fn seek_to(&mut self, seconds: f64) -> Result<()> {
        if self.media.source().is_none() || !seconds.is_finite() {
            return Ok(());
        }

        self.media.set_current_time(seconds)?;
        self.state.position_secs = seconds;
        Ok(())
    }

    /// Detach the source and return to the "no track" display.
    pub fn reset(&mut self) -> Result<()> {
        self.media.clear_source()?;
        self.state = PlayerState::default();
        self.awaiting_metadata = false;

        self.renderer.render_transport(TransportGlyph::Play);
        self.renderer.render_selection(None);
        self.renderer.render_track(None);
        debug!("Player reset");
        Ok(())
    }

    /// Assign the entry's source and update selection. Returns `false` when
    /// `index` is out of range and nothing changed.
    fn load_entry(&mut self, playlist: &Playlist, index: usize) -> Result<bool> {
        let Some(entry) = playlist.get(index) else {
            debug!(index, len = playlist.len(), "Selection out of range ignored");
            return Ok(false);
        };

        self.media.set_source(entry.url())?;
        self.media.load()?;
        self.awaiting_metadata = true;

        self.state.current_index = Some(index);
        self.state.position_secs = 0.0;
        self.state.duration_secs = None;

        self.renderer.render_selection(Some(index));
        self.renderer.render_track(Some(entry));
        Ok(true)
    }

    fn set_status(&mut self, status: PlayerStatus) {
        self.state.status = status;
        self.renderer.render_transport(status.glyph());
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("awaiting_metadata", &self.awaiting_metadata)
            .finish_non_exhaustive()
    }
}
