//! # Player Configuration Module
//!
//! Provides configuration management for the Retro Player core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PlayerConfig` holding the persisted-state layout (database name, object
//! store name, schema version), the upload policy (accepted media types), the
//! display strings the renderer falls back to, and the host element ids the
//! browser shell binds to.
//!
//! Every field has a default matching the shipped page, so the shortest valid
//! configuration is `PlayerConfig::builder().build()`.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::PlayerConfig;
//!
//! let config = PlayerConfig::builder()
//!     .database_name("my-player")
//!     .placeholder_text("Drop some MP3s here")
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.schema_version, 1);
//! ```
//!
//! ## Error Handling
//!
//! The builder validates every value and returns actionable messages:
//!
//! ```should_panic
//! use core_runtime::config::PlayerConfig;
//!
//! let config = PlayerConfig::builder()
//!     .accepted_media_types(Vec::<String>::new())
//!     .build()
//!     .expect("Should fail - nothing could ever be uploaded");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default IndexedDB database name.
pub const DEFAULT_DATABASE_NAME: &str = "retro-mp3-player";

/// Default object store (table) name.
pub const DEFAULT_STORE_NAME: &str = "songs";

/// The only schema version this build understands. There is no migration
/// path: a version bump requires a fresh store.
pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Upload your MP3 files...";

pub const DEFAULT_NO_TRACK_TITLE: &str = "-- NO TRACK --";

/// Core configuration for the Retro Player.
///
/// Use [`PlayerConfigBuilder`] to construct validated instances, or
/// [`PlayerConfig::from_json`] when the host passes configuration as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Name of the local database holding the song collection
    pub database_name: String,

    /// Name of the record collection inside the database
    pub store_name: String,

    /// Schema version requested when opening the database
    pub schema_version: u32,

    /// On-disk location for the desktop SQLite store.
    ///
    /// `None` lets the desktop bridge choose its platform data directory.
    /// Ignored in the browser.
    pub database_path: Option<PathBuf>,

    /// Media types accepted on upload; everything else is skipped
    pub accepted_media_types: Vec<String>,

    /// Text shown in the list while the playlist is empty
    pub placeholder_text: String,

    /// Title shown while no track is selected
    pub no_track_title: String,

    /// DOM element ids used by the browser shell
    pub elements: ElementIds,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            schema_version: SCHEMA_VERSION,
            database_path: None,
            accepted_media_types: vec![bridge_traits::MP3_MEDIA_TYPE.to_string()],
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            no_track_title: DEFAULT_NO_TRACK_TITLE.to_string(),
            elements: ElementIds::default(),
        }
    }
}

/// Ids of the page elements the browser shell binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub file_input: String,
    pub playlist: String,
    pub audio: String,
    pub track_title: String,
    pub progress_bar: String,
    pub current_time: String,
    pub total_duration: String,
    pub prev_button: String,
    pub play_pause_button: String,
    pub next_button: String,
    pub clear_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            file_input: "file-input".into(),
            playlist: "playlist".into(),
            audio: "audio-player".into(),
            track_title: "track-title".into(),
            progress_bar: "progress-bar".into(),
            current_time: "current-time".into(),
            total_duration: "total-duration".into(),
            prev_button: "prev-button".into(),
            play_pause_button: "play-pause-button".into(),
            next_button: "next-button".into(),
            clear_button: "clear-playlist-button".into(),
        }
    }
}

impl ElementIds {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("file_input", self.file_input.as_str()),
            ("playlist", self.playlist.as_str()),
            ("audio", self.audio.as_str()),
            ("track_title", self.track_title.as_str()),
            ("progress_bar", self.progress_bar.as_str()),
            ("current_time", self.current_time.as_str()),
            ("total_duration", self.total_duration.as_str()),
            ("prev_button", self.prev_button.as_str()),
            ("play_pause_button", self.play_pause_button.as_str()),
            ("next_button", self.next_button.as_str()),
            ("clear_button", self.clear_button.as_str()),
        ]
        .into_iter()
    }
}

impl PlayerConfig {
    /// Creates a new builder for constructing a `PlayerConfig`.
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }

    /// Parse and validate a configuration passed by the host as JSON.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid player config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Database and store names are not blank
    /// - Schema version is the one this build understands
    /// - At least one media type is accepted
    /// - Every element id is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.database_name.trim().is_empty() {
            return Err(Error::Config("Database name cannot be empty".to_string()));
        }

        if self.store_name.trim().is_empty() {
            return Err(Error::Config("Store name cannot be empty".to_string()));
        }

        if self.schema_version != SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Unsupported schema version {} (expected {}). \
                 There is no migration path; use a fresh database name instead.",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        if self.accepted_media_types.is_empty() {
            return Err(Error::Config(
                "At least one accepted media type is required, e.g. \"audio/mpeg\"".to_string(),
            ));
        }

        if let Some(blank) = self
            .accepted_media_types
            .iter()
            .find(|ty| ty.trim().is_empty())
        {
            return Err(Error::Config(format!(
                "Accepted media type cannot be blank (got {:?})",
                blank
            )));
        }

        if let Some((field, _)) = self.elements.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(Error::Config(format!(
                "Element id `{}` cannot be empty",
                field
            )));
        }

        Ok(())
    }
}

/// Builder for [`PlayerConfig`].
#[derive(Debug, Default)]
pub struct PlayerConfigBuilder {
    database_name: Option<String>,
    store_name: Option<String>,
    schema_version: Option<u32>,
    database_path: Option<PathBuf>,
    accepted_media_types: Option<Vec<String>>,
    placeholder_text: Option<String>,
    no_track_title: Option<String>,
    elements: Option<ElementIds>,
}

impl PlayerConfigBuilder {
    /// Sets the local database name.
    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    /// Sets the record collection name.
    pub fn store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = Some(name.into());
        self
    }

    /// Overrides the schema version. Only [`SCHEMA_VERSION`] passes validation.
    pub fn schema_version(mut self, version: u32) -> Self {
        self.schema_version = Some(version);
        self
    }

    /// Sets the desktop SQLite file location.
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Replaces the accepted upload media types.
    pub fn accepted_media_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_media_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = Some(text.into());
        self
    }

    pub fn no_track_title(mut self, text: impl Into<String>) -> Self {
        self.no_track_title = Some(text.into());
        self
    }

    pub fn elements(mut self, elements: ElementIds) -> Self {
        self.elements = Some(elements);
        self
    }

    /// Builds the final `PlayerConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when any value fails [`PlayerConfig::validate`].
    pub fn build(self) -> Result<PlayerConfig> {
        let defaults = PlayerConfig::default();

        let config = PlayerConfig {
            database_name: self.database_name.unwrap_or(defaults.database_name),
            store_name: self.store_name.unwrap_or(defaults.store_name),
            schema_version: self.schema_version.unwrap_or(defaults.schema_version),
            database_path: self.database_path.or(defaults.database_path),
            accepted_media_types: self
                .accepted_media_types
                .unwrap_or(defaults.accepted_media_types),
            placeholder_text: self.placeholder_text.unwrap_or(defaults.placeholder_text),
            no_track_title: self.no_track_title.unwrap_or(defaults.no_track_title),
            elements: self.elements.unwrap_or(defaults.elements),
        };

        config.validate()?;

        Ok(config)
    }
}
