//! Player session
//!
//! A [`PlayerSession`] owns everything a running player needs: configuration,
//! the song library, the playlist and the playback controller. It replaces
//! page-global state with one value that has an explicit lifecycle:
//! [`PlayerSession::start`] loads the persisted collection and
//! [`PlayerSession::teardown`] releases every playable URL.
//!
//! ## Async pipelines
//!
//! Upload, start and clear touch storage and are async. Each is split into
//! the storage step (a [`SongLibrary`] call, which is cheap to clone) and a
//! synchronous `apply_*` step. Hosts that share the session behind a
//! `RefCell` clone the library, await the storage step without holding a
//! borrow, then borrow once to apply the result. Direct owners can simply
//! await [`PlayerSession::upload`], [`PlayerSession::start`] or
//! [`PlayerSession::clear`].

use std::sync::Arc;

use bridge_traits::{MediaElement, PlayableUrls, PlayerView, SongRecord, SongStore, UploadFile};
use core_library::SongLibrary;
use core_playback::{Direction, PlaybackController, PlayerState, Playlist, Renderer};
use core_runtime::PlayerConfig;
use tracing::{error, info, trace};

use crate::error::Result;

/// Bridge handles a session is assembled from.
pub struct PlayerDependencies {
    /// Opened song store; `None` when storage is unavailable.
    pub store: Option<Arc<dyn SongStore>>,
    pub media: Box<dyn MediaElement>,
    pub urls: Box<dyn PlayableUrls>,
    pub view: Box<dyn PlayerView>,
}

impl PlayerDependencies {
    /// Dependencies without a song store.
    pub fn new(
        media: Box<dyn MediaElement>,
        urls: Box<dyn PlayableUrls>,
        view: Box<dyn PlayerView>,
    ) -> Self {
        Self {
            store: None,
            media,
            urls,
            view,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SongStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach the outcome of opening the platform store.
    ///
    /// A failure is logged and leaves the session without persistence.
    pub fn with_opened_store<E>(mut self, opened: std::result::Result<Arc<dyn SongStore>, E>) -> Self
    where
        E: std::fmt::Display,
    {
        match opened {
            Ok(store) => self.store = Some(store),
            Err(err) => {
                error!(error = %err, "Failed to open song store; persistence disabled");
                self.store = None;
            }
        }
        self
    }
}

/// User commands and media lifecycle events the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// A playlist entry was clicked
    Select(usize),
    TogglePlayPause,
    Next,
    Previous,
    /// The progress slider was moved
    Seek(f64),
    /// Media metadata loaded; duration in seconds
    MetadataLoaded(f64),
    /// Periodic position update in seconds
    TimeUpdate(f64),
    /// The current track finished
    Ended,
}

pub struct PlayerSession {
    config: PlayerConfig,
    library: SongLibrary,
    playlist: Playlist,
    controller: PlaybackController,
}

impl PlayerSession {
    pub fn new(config: PlayerConfig, deps: PlayerDependencies) -> Self {
        let library = match deps.store {
            Some(store) => SongLibrary::new(store, &config),
            None => SongLibrary::detached(&config),
        };
        let renderer = Renderer::new(deps.view, &config);

        Self {
            library,
            playlist: Playlist::new(deps.urls),
            controller: PlaybackController::new(deps.media, renderer),
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Handle to the song library, for running storage steps without
    /// borrowing the session.
    pub fn library(&self) -> SongLibrary {
        self.library.clone()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlayerState {
        self.controller.state()
    }

    /// Load the persisted collection and show it without starting playback.
    pub async fn start(&mut self) -> Result<()> {
        let records = self.library.load_all().await?;
        self.apply_reload(&records, false)
    }

    /// Persist the accepted subset of `files`, reload and autoplay the first
    /// entry. An empty selection does nothing.
    pub async fn upload(&mut self, files: Vec<UploadFile>) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        let records = self.library.replace_and_reload(files).await?;
        self.apply_reload(&records, true)
    }

    /// Delete every persisted song and empty the player.
    pub async fn clear(&mut self) -> Result<()> {
        self.library.clear_all().await?;
        self.apply_cleared()
    }

    /// Rebuild the playlist from freshly loaded records.
    ///
    /// With entries present the first one is selected: played when
    /// `autoplay`, otherwise only loaded.
    pub fn apply_reload(&mut self, records: &[SongRecord], autoplay: bool) -> Result<()> {
        self.controller.reset()?;
        self.playlist.rebuild(records);
        self.controller.renderer().render_playlist(&self.playlist);

        if !self.playlist.is_empty() {
            if autoplay {
                self.controller.select_and_play(&self.playlist, 0)?;
            } else {
                self.controller.load_without_playing(&self.playlist, 0)?;
            }
        }

        info!(entries = self.playlist.len(), autoplay, "Playlist reloaded");
        Ok(())
    }

    /// Empty the playlist after the store has been cleared.
    pub fn apply_cleared(&mut self) -> Result<()> {
        self.controller.reset()?;
        self.playlist.dispose();
        self.controller.renderer().render_playlist(&self.playlist);
        info!("Playlist cleared");
        Ok(())
    }

    /// React to a user command or media event.
    pub fn dispatch(&mut self, event: PlayerEvent) -> Result<()> {
        trace!(?event, "Dispatching player event");

        match event {
            PlayerEvent::Select(index) => self.controller.select_and_play(&self.playlist, index)?,
            PlayerEvent::TogglePlayPause => self.controller.toggle_play_pause()?,
            PlayerEvent::Next => self.controller.advance(&self.playlist, Direction::Next)?,
            PlayerEvent::Previous => self.controller.advance(&self.playlist, Direction::Previous)?,
            PlayerEvent::Seek(seconds) => self.controller.seek_to(seconds)?,
            PlayerEvent::MetadataLoaded(duration) => self.controller.on_metadata_ready(duration),
            PlayerEvent::TimeUpdate(position) => self.controller.on_time_advanced(position),
            PlayerEvent::Ended => self.controller.on_playback_ended(&self.playlist)?,
        }
        Ok(())
    }

    /// Stop playback and release every playable URL.
    pub fn teardown(&mut self) -> Result<()> {
        self.controller.reset()?;
        self.playlist.dispose();
        info!("Player session torn down");
        Ok(())
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("library", &self.library)
            .field("playlist", &self.playlist)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
