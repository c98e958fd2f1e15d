//! Song library service
//!
//! Wraps the platform song store with the player's upload policy. A library
//! whose store failed to open is *detached*: every operation succeeds without
//! touching storage, so the rest of the player keeps working with an empty
//! collection.

use std::sync::Arc;

use bridge_traits::{SongRecord, SongStore, UploadFile};
use core_runtime::{logging::strip_path, PlayerConfig};
use tracing::{debug, info, instrument, warn};

use crate::error::Result;

#[derive(Clone)]
pub struct SongLibrary {
    store: Option<Arc<dyn SongStore>>,
    accepted_media_types: Vec<String>,
}

impl std::fmt::Debug for SongLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SongLibrary")
            .field("attached", &self.is_attached())
            .field("accepted_media_types", &self.accepted_media_types)
            .finish()
    }
}

impl SongLibrary {
    /// Create a library backed by an opened store.
    pub fn new(store: Arc<dyn SongStore>, config: &PlayerConfig) -> Self {
        Self {
            store: Some(store),
            accepted_media_types: config.accepted_media_types.clone(),
        }
    }

    /// Create a library with no backing store, used when the platform store
    /// could not be opened.
    pub fn detached(config: &PlayerConfig) -> Self {
        Self {
            store: None,
            accepted_media_types: config.accepted_media_types.clone(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }

    /// Whether `file` passes the upload policy.
    pub fn accepts(&self, file: &UploadFile) -> bool {
        file.has_media_type(&self.accepted_media_types)
    }

    /// Replace the persisted collection with the accepted subset of `files`.
    ///
    /// The previous collection is cleared even when nothing in `files` is
    /// accepted. Returns the number of records persisted; `0` when detached.
    #[instrument(skip(self, files), fields(offered = files.len()))]
    pub async fn replace_all(&self, files: Vec<UploadFile>) -> Result<usize> {
        let Some(store) = self.store.as_ref() else {
            warn!("Song store not attached; upload ignored");
            return Ok(0);
        };

        let accepted: Vec<UploadFile> = files
            .into_iter()
            .filter(|file| {
                let keep = self.accepts(file);
                if !keep {
                    debug!(
                        file = %strip_path(&file.name),
                        media_type = %file.media_type,
                        "Skipping unsupported upload"
                    );
                }
                keep
            })
            .collect();

        let persisted = store.replace_all(accepted).await?;
        info!(persisted, "Song collection replaced");
        Ok(persisted)
    }

    /// Load every persisted record in store order.
    pub async fn load_all(&self) -> Result<Vec<SongRecord>> {
        let Some(store) = self.store.as_ref() else {
            return Ok(Vec::new());
        };

        let records = store.load_all().await?;
        debug!(count = records.len(), "Loaded song collection");
        Ok(records)
    }

    /// Delete every persisted record.
    pub async fn clear_all(&self) -> Result<()> {
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };

        store.clear_all().await?;
        info!("Song collection cleared");
        Ok(())
    }

    /// Upload pipeline: replace the collection, then read it back.
    ///
    /// The returned future resolves only after the write has settled and the
    /// reload has completed, so callers can rebuild the playlist from the
    /// result directly.
    pub async fn replace_and_reload(&self, files: Vec<UploadFile>) -> Result<Vec<SongRecord>> {
        self.replace_all(files).await?;
        self.load_all().await
    }
}
