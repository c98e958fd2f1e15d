//! Song Storage Abstractions
//!
//! Provides the platform-agnostic contract for the local song store: a single
//! collection of audio records keyed by a store-assigned, auto-incrementing
//! identifier.
//!
//! - Web: IndexedDB object store (`bridge-wasm`)
//! - Desktop: SQLite table (`bridge-desktop`)

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// MIME type the player accepts for upload.
pub const MP3_MEDIA_TYPE: &str = "audio/mpeg";

/// A file handed to the player by the host upload surface.
///
/// This is the platform-neutral form of a browser `File`: the original file
/// name, the media type declared by the host and the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, including extension
    pub name: String,
    /// Declared media type (e.g. `audio/mpeg`)
    pub media_type: String,
    /// Encoded audio payload
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Returns `true` when the declared media type is one of `accepted`.
    ///
    /// The comparison is exact, mirroring how browsers report `File.type`.
    pub fn has_media_type(&self, accepted: &[String]) -> bool {
        accepted.iter().any(|ty| ty == &self.media_type)
    }

    /// Returns `true` when the file is declared as MP3 audio.
    pub fn is_mp3(&self) -> bool {
        self.media_type == MP3_MEDIA_TYPE
    }
}

/// A persisted song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Store-assigned identifier (unique, auto-incrementing)
    pub id: i64,
    /// Original file name
    pub name: String,
    /// Media type recorded at upload time
    pub media_type: String,
    /// Encoded audio payload
    #[serde(skip)]
    pub data: Bytes,
}

impl SongRecord {
    /// Size of the audio payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Local song store trait
///
/// Implementations own one logical collection of [`SongRecord`]s. All writes
/// must have fully settled (transaction committed) before the returned future
/// resolves, so a caller can chain a reload directly after a write.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::{SongStore, UploadFile};
///
/// async fn reupload(store: &dyn SongStore, files: Vec<UploadFile>) -> Result<()> {
///     store.replace_all(files).await?;
///     let songs = store.load_all().await?;
///     println!("{} songs persisted", songs.len());
///     Ok(())
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait SongStore: PlatformSendSync {
    /// Clear the collection, then insert one record per file.
    ///
    /// Inserts are best-effort: a failing insert is reported through logging
    /// and does not roll back the others. Filtering by media type is the
    /// caller's responsibility.
    ///
    /// # Returns
    ///
    /// The number of records actually persisted.
    async fn replace_all(&self, files: Vec<UploadFile>) -> Result<usize>;

    /// Load every persisted record in store order (ascending id).
    async fn load_all(&self) -> Result<Vec<SongRecord>>;

    /// Delete every record.
    async fn clear_all(&self) -> Result<()>;

    /// Count persisted records
    async fn count(&self) -> Result<usize> {
        Ok(self.load_all().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_file_detects_mp3() {
        let mp3 = UploadFile::new("song.mp3", "audio/mpeg", vec![1u8, 2, 3]);
        let wav = UploadFile::new("song.wav", "audio/wav", vec![1u8]);
        assert!(mp3.is_mp3());
        assert!(!wav.is_mp3());
    }

    #[test]
    fn media_type_match_is_exact() {
        let accepted = vec![MP3_MEDIA_TYPE.to_string()];
        let upper = UploadFile::new("a.mp3", "AUDIO/MPEG", Vec::<u8>::new());
        let empty = UploadFile::new("a.mp3", "", Vec::<u8>::new());
        assert!(!upper.has_media_type(&accepted));
        assert!(!empty.has_media_type(&accepted));
        assert!(UploadFile::new("a.mp3", "audio/mpeg", Vec::<u8>::new()).has_media_type(&accepted));
    }

    #[test]
    fn record_size_reports_payload_length() {
        let record = SongRecord {
            id: 1,
            name: "a.mp3".into(),
            media_type: MP3_MEDIA_TYPE.into(),
            data: Bytes::from_static(b"abcd"),
        };
        assert_eq!(record.size(), 4);
    }
}
