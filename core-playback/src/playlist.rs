//! Playlist model
//!
//! An in-memory, session-scoped view of the persisted song collection. Each
//! entry owns a playable URL created through the host's [`PlayableUrls`]
//! bridge. Those URLs are only ever released in [`Playlist::dispose`], which
//! runs on every rebuild and when the playlist is dropped.

use bridge_traits::{PlayableUrls, SongRecord};
use tracing::{debug, warn};

use crate::render::display_title;

/// A playable track in the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Record id in the song store
    pub id: i64,
    /// Original file name
    pub name: String,
    /// Display title (`name` without a trailing `.mp3`)
    pub title: String,
    url: String,
}

impl PlaylistEntry {
    /// Playable reference for the media element.
    pub fn url(&self) -> &str {
        &self.url
    }
}

pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    urls: Box<dyn PlayableUrls>,
}

impl Playlist {
    pub fn new(urls: Box<dyn PlayableUrls>) -> Self {
        Self {
            entries: Vec::new(),
            urls,
        }
    }

    /// Replace the entries with one per record, in record order.
    ///
    /// URLs of the previous entries are released first. A record whose URL
    /// cannot be created is left out.
    pub fn rebuild(&mut self, records: &[SongRecord]) {
        self.dispose();

        self.entries = records
            .iter()
            .filter_map(|record| match self.urls.create(record) {
                Ok(url) => Some(PlaylistEntry {
                    id: record.id,
                    name: record.name.clone(),
                    title: display_title(&record.name),
                    url,
                }),
                Err(err) => {
                    warn!(id = record.id, error = %err, "Could not create playable URL");
                    None
                }
            })
            .collect();

        debug!(entries = self.entries.len(), "Playlist rebuilt");
    }

    /// Release every entry's URL and empty the playlist.
    pub fn dispose(&mut self) {
        for entry in self.entries.drain(..) {
            if let Err(err) = self.urls.revoke(&entry.url) {
                warn!(id = entry.id, error = %err, "Could not revoke playable URL");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }
}

impl Drop for Playlist {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playlist")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    #[derive(Default)]
    struct UrlLog {
        live: HashSet<String>,
        created: usize,
        revoked: Vec<String>,
        fail_for: Option<i64>,
    }

    #[derive(Clone, Default)]
    struct FakeUrls(Rc<RefCell<UrlLog>>);

    impl PlayableUrls for FakeUrls {
        fn create(&self, record: &SongRecord) -> BridgeResult<String> {
            let mut log = self.0.borrow_mut();
            if log.fail_for == Some(record.id) {
                return Err(BridgeError::OperationFailed("blob rejected".into()));
            }
            log.created += 1;
            let url = format!("blob:test/{}-{}", record.id, log.created);
            log.live.insert(url.clone());
            Ok(url)
        }

        fn revoke(&self, url: &str) -> BridgeResult<()> {
            let mut log = self.0.borrow_mut();
            assert!(log.live.remove(url), "revoked unknown or already revoked url {url}");
            log.revoked.push(url.to_string());
            Ok(())
        }
    }

    fn record(id: i64, name: &str) -> SongRecord {
        SongRecord {
            id,
            name: name.to_string(),
            media_type: "audio/mpeg".to_string(),
            data: vec![0u8; 4].into(),
        }
    }

    #[test]
    fn test_rebuild_preserves_record_order() {
        let urls = FakeUrls::default();
        let mut playlist = Playlist::new(Box::new(urls.clone()));

        playlist.rebuild(&[record(3, "b.mp3"), record(7, "a.MP3")]);

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.titles(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(playlist.get(1).map(|e| e.id), Some(7));
        assert!(playlist.get(0).unwrap().url().starts_with("blob:test/3"));
        assert!(playlist.get(2).is_none());
    }

    #[test]
    fn test_rebuild_revokes_previous_urls() {
        let urls = FakeUrls::default();
        let mut playlist = Playlist::new(Box::new(urls.clone()));

        playlist.rebuild(&[record(1, "a.mp3"), record(2, "b.mp3")]);
        let first: Vec<String> = playlist.entries().iter().map(|e| e.url().to_string()).collect();
        playlist.rebuild(&[record(3, "c.mp3")]);

        let log = urls.0.borrow();
        assert_eq!(log.revoked, first);
        assert_eq!(log.live.len(), 1);
    }

    #[test]
    fn test_dispose_and_drop_release_everything_once() {
        let urls = FakeUrls::default();
        {
            let mut playlist = Playlist::new(Box::new(urls.clone()));
            playlist.rebuild(&[record(1, "a.mp3"), record(2, "b.mp3")]);
            playlist.dispose();
            assert!(playlist.is_empty());
            playlist.rebuild(&[record(3, "c.mp3")]);
        }

        let log = urls.0.borrow();
        assert_eq!(log.created, 3);
        assert_eq!(log.revoked.len(), 3);
        assert!(log.live.is_empty());
    }

    #[test]
    fn test_failed_url_skips_record() {
        let urls = FakeUrls::default();
        urls.0.borrow_mut().fail_for = Some(2);
        let mut playlist = Playlist::new(Box::new(urls.clone()));

        playlist.rebuild(&[record(1, "a.mp3"), record(2, "b.mp3"), record(3, "c.mp3")]);

        let ids: Vec<i64> = playlist.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
