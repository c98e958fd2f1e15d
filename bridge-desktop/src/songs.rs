//! Song storage using SQLite

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{SongRecord, SongStore, UploadFile},
};
use bytes::Bytes;
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions},
    Row,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CREATE_SONGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS songs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        media_type TEXT NOT NULL,
        data BLOB NOT NULL
    )
"#;

/// Default on-disk location for a song database called `name`.
///
/// Resolves to `<data dir>/retro-player/<name>.db`, falling back to
/// `~/.local/share` and finally the working directory.
pub fn default_database_path(name: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("retro-player")
        .join(format!("{}.db", name))
}

/// SQLite-backed song store implementation
///
/// Mirrors the browser's object store: one `songs` table keyed by an
/// `AUTOINCREMENT` id, so ids keep growing across clears exactly like an
/// IndexedDB key generator.
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    /// Open (creating if needed) the song database at `db_path`.
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        // SQLite URLs want forward slashes
        let path_str = db_path.to_string_lossy().replace('\\', "/");
        let db_url = format!("sqlite://{}?mode=rwc", path_str);

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to connect to DB: {}", e)))?;

        let store = Self::with_pool(pool).await?;
        debug!(path = ?db_path, "Initialized song store");
        Ok(store)
    }

    /// Create an in-memory song store (for testing)
    pub async fn in_memory() -> Result<Self> {
        // Every connection to `:memory:` is a separate database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to connect to DB: {}", e)))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(CREATE_SONGS_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to create table: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn replace_all(&self, files: Vec<UploadFile>) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to begin: {}", e)))?;

        sqlx::query("DELETE FROM songs")
            .execute(&mut *tx)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to clear songs: {}", e)))?;

        let mut persisted = 0;
        for file in &files {
            let inserted = sqlx::query("INSERT INTO songs (name, media_type, data) VALUES (?, ?, ?)")
                .bind(&file.name)
                .bind(&file.media_type)
                .bind(file.data.as_ref())
                .execute(&mut *tx)
                .await;

            match inserted {
                Ok(_) => persisted += 1,
                Err(e) => warn!(name = %file.name, error = %e, "Failed to store song"),
            }
        }

        tx.commit()
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to commit: {}", e)))?;

        debug!(persisted, offered = files.len(), "Replaced songs");
        Ok(persisted)
    }

    async fn load_all(&self) -> Result<Vec<SongRecord>> {
        let rows = sqlx::query("SELECT id, name, media_type, data FROM songs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to load songs: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let data: Vec<u8> = row
                    .try_get("data")
                    .map_err(|e| BridgeError::DatabaseError(e.to_string()))?;
                Ok(SongRecord {
                    id: row
                        .try_get("id")
                        .map_err(|e| BridgeError::DatabaseError(e.to_string()))?,
                    name: row
                        .try_get("name")
                        .map_err(|e| BridgeError::DatabaseError(e.to_string()))?,
                    media_type: row
                        .try_get("media_type")
                        .map_err(|e| BridgeError::DatabaseError(e.to_string()))?,
                    data: Bytes::from(data),
                })
            })
            .collect()
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM songs")
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to clear songs: {}", e)))?;

        debug!("Cleared songs");
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BridgeError::DatabaseError(format!("Failed to count songs: {}", e)))?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp3(name: &str, payload: &'static [u8]) -> UploadFile {
        UploadFile::new(name, "audio/mpeg", Bytes::from_static(payload))
    }

    #[tokio::test]
    async fn test_song_store_creation() {
        let store = SqliteSongStore::in_memory().await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_all_round_trips_payloads_in_order() {
        let store = SqliteSongStore::in_memory().await.unwrap();

        let persisted = store
            .replace_all(vec![mp3("b.mp3", b"\xFF\xFB\x01"), mp3("a.mp3", b"\xFF\xFB\x02")])
            .await
            .unwrap();
        assert_eq!(persisted, 2);

        let songs = store.load_all().await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].name, "b.mp3");
        assert_eq!(songs[0].data.as_ref(), b"\xFF\xFB\x01");
        assert_eq!(songs[1].media_type, "audio/mpeg");
        assert!(songs[0].id < songs[1].id);
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_batch() {
        let store = SqliteSongStore::in_memory().await.unwrap();

        store
            .replace_all(vec![mp3("old-1.mp3", b"1"), mp3("old-2.mp3", b"2")])
            .await
            .unwrap();
        let first_ids: Vec<i64> = store.load_all().await.unwrap().iter().map(|s| s.id).collect();

        store.replace_all(vec![mp3("new.mp3", b"3")]).await.unwrap();
        let songs = store.load_all().await.unwrap();

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "new.mp3");
        assert!(first_ids.iter().all(|id| *id < songs[0].id));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let store = SqliteSongStore::in_memory().await.unwrap();
        store.replace_all(vec![mp3("a.mp3", b"1")]).await.unwrap();

        store.clear_all().await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
        store.clear_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_backed_store_persists_across_reopen() {
        let dir = std::env::temp_dir().join(format!("retro-player-test-{}", std::process::id()));
        let path = dir.join("songs.db");

        {
            let store = SqliteSongStore::new(&path).await.unwrap();
            store.replace_all(vec![mp3("keep.mp3", b"k")]).await.unwrap();
        }

        let reopened = SqliteSongStore::new(&path).await.unwrap();
        let songs = reopened.load_all().await.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "keep.mp3");

        drop(reopened);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path("retro-mp3-player");
        assert!(path.ends_with("retro-player/retro-mp3-player.db"));
    }
}
