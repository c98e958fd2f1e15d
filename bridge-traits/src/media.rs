//! Media element and playable reference bridges.
//!
//! Decoding and output are delegated to the host's media element (an
//! `HTMLAudioElement` in the browser). The core only assigns sources, issues
//! transport commands and reads back position and duration. Playable
//! references are host-resolvable URLs created from a record's bytes; every
//! reference handed out by [`PlayableUrls::create`] must eventually be passed
//! to [`PlayableUrls::revoke`].

use crate::{error::Result, storage::SongRecord};

/// Host media element driven by the playback controller.
///
/// Calls are synchronous because the host element is: commands are queued by
/// the host and their effects arrive later as media events (metadata loaded,
/// time update, ended) that the host forwards to the controller.
pub trait MediaElement {
    /// Assign a playable reference as the current source.
    fn set_source(&self, url: &str) -> Result<()>;

    /// Detach the current source, leaving the element empty.
    fn clear_source(&self) -> Result<()>;

    /// Currently assigned source, `None` when empty.
    fn source(&self) -> Option<String>;

    /// Reload the element so that metadata for the current source is fetched.
    fn load(&self) -> Result<()>;

    /// Request playback start. The host may begin asynchronously.
    fn play(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    fn is_paused(&self) -> bool;

    /// Set the playback position in seconds.
    fn set_current_time(&self, seconds: f64) -> Result<()>;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total duration in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;
}

/// Factory for ephemeral playable references.
///
/// In the browser this is `URL.createObjectURL` / `URL.revokeObjectURL`.
/// References are not freed automatically; leaking one keeps the underlying
/// blob alive for the lifetime of the page.
pub trait PlayableUrls {
    /// Create a reference that lets the media element read `record`.
    fn create(&self, record: &SongRecord) -> Result<String>;

    /// Release a reference previously returned by [`Self::create`].
    fn revoke(&self, url: &str) -> Result<()>;
}
