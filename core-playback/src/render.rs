//! UI rendering
//!
//! The [`Renderer`] is a pure projection of playlist and player state into a
//! [`PlayerView`]. It holds no state of its own beyond the configured display
//! strings; every call overwrites what the view shows.

use bridge_traits::{PlayerView, TransportGlyph};
use core_runtime::PlayerConfig;

use crate::playlist::{Playlist, PlaylistEntry};

const ZERO_TIME: &str = "00:00";

/// Format a position in seconds as `MM:SS`.
///
/// Minutes are zero-padded to two digits and never capped; seconds are
/// floored. Non-finite or negative input renders as `00:00`.
///
/// ```
/// use core_playback::format_time;
///
/// assert_eq!(format_time(125.0), "02:05");
/// assert_eq!(format_time(3600.0), "60:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIME.to_string();
    }

    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Display title for a stored file name: the name with a trailing `.mp3`
/// removed, case-insensitively.
pub fn display_title(name: &str) -> String {
    const SUFFIX: &str = ".mp3";

    let cut = name.len().saturating_sub(SUFFIX.len());
    match name.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(SUFFIX) => name[..cut].to_string(),
        _ => name.to_string(),
    }
}

pub struct Renderer {
    view: Box<dyn PlayerView>,
    placeholder_text: String,
    no_track_title: String,
}

impl Renderer {
    pub fn new(view: Box<dyn PlayerView>, config: &PlayerConfig) -> Self {
        Self {
            view,
            placeholder_text: config.placeholder_text.clone(),
            no_track_title: config.no_track_title.clone(),
        }
    }

    /// Rebuild the list: one entry per track, or the placeholder when empty.
    pub fn render_playlist(&self, playlist: &Playlist) {
        if playlist.is_empty() {
            self.view.show_placeholder(&self.placeholder_text);
        } else {
            self.view.show_playlist(&playlist.titles());
        }
    }

    /// Mark the current entry (or none).
    pub fn render_selection(&self, current: Option<usize>) {
        self.view.mark_current(current);
    }

    /// Show the track title, or the "no track" state with zeroed times.
    pub fn render_track(&self, entry: Option<&PlaylistEntry>) {
        match entry {
            Some(entry) => self.view.set_title(&entry.title),
            None => {
                self.view.set_title(&self.no_track_title);
                self.view.set_elapsed(ZERO_TIME, 0.0);
                self.view.set_duration(ZERO_TIME, 0.0);
            }
        }
    }

    pub fn render_transport(&self, glyph: TransportGlyph) {
        self.view.set_transport_glyph(glyph);
    }

    /// Total duration text and slider maximum.
    pub fn render_duration(&self, seconds: f64) {
        let max = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        self.view.set_duration(&format_time(seconds), max);
    }

    /// Elapsed text and slider position.
    pub fn render_elapsed(&self, seconds: f64) {
        self.view.set_elapsed(&format_time(seconds), seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(125.0), "02:05");
        assert_eq!(format_time(3.0), "00:03");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.999), "00:59");
        assert_eq!(format_time(6000.0), "100:00");
    }

    #[test]
    fn test_format_time_degenerate_input() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
        assert_eq!(format_time(-4.0), "00:00");
    }

    #[test]
    fn test_display_title_strips_mp3_suffix() {
        assert_eq!(display_title("Intro.mp3"), "Intro");
        assert_eq!(display_title("LOUD.MP3"), "LOUD");
        assert_eq!(display_title("mix.Mp3"), "mix");
        assert_eq!(display_title("track.mp3.wav"), "track.mp3.wav");
        assert_eq!(display_title("no-extension"), "no-extension");
        assert_eq!(display_title(".mp3"), "");
        assert_eq!(display_title("mp3"), "mp3");
    }

    #[test]
    fn test_display_title_multibyte_names() {
        assert_eq!(display_title("Canción.mp3"), "Canción");
        assert_eq!(display_title("日本"), "日本");
    }

    #[derive(Default)]
    struct LastWrite {
        placeholder: Option<String>,
        title: Option<String>,
        elapsed: Option<(String, f64)>,
        duration: Option<(String, f64)>,
    }

    #[derive(Clone, Default)]
    struct SpyView(Rc<RefCell<LastWrite>>);

    impl PlayerView for SpyView {
        fn show_playlist(&self, _titles: &[String]) {}
        fn show_placeholder(&self, text: &str) {
            self.0.borrow_mut().placeholder = Some(text.to_string());
        }
        fn mark_current(&self, _index: Option<usize>) {}
        fn set_transport_glyph(&self, _glyph: TransportGlyph) {}
        fn set_title(&self, title: &str) {
            self.0.borrow_mut().title = Some(title.to_string());
        }
        fn set_elapsed(&self, text: &str, position: f64) {
            self.0.borrow_mut().elapsed = Some((text.to_string(), position));
        }
        fn set_duration(&self, text: &str, max: f64) {
            self.0.borrow_mut().duration = Some((text.to_string(), max));
        }
    }

    #[test]
    fn test_no_track_resets_times() {
        let spy = SpyView::default();
        let renderer = Renderer::new(Box::new(spy.clone()), &PlayerConfig::default());

        renderer.render_track(None);

        let last = spy.0.borrow();
        assert_eq!(last.title.as_deref(), Some("-- NO TRACK --"));
        assert_eq!(last.elapsed, Some(("00:00".to_string(), 0.0)));
        assert_eq!(last.duration, Some(("00:00".to_string(), 0.0)));
    }

    #[test]
    fn test_unknown_duration_zeroes_slider() {
        let spy = SpyView::default();
        let renderer = Renderer::new(Box::new(spy.clone()), &PlayerConfig::default());

        renderer.render_duration(f64::INFINITY);
        assert_eq!(spy.0.borrow().duration, Some(("00:00".to_string(), 0.0)));

        renderer.render_duration(185.4);
        assert_eq!(spy.0.borrow().duration, Some(("03:05".to_string(), 185.4)));
    }

    struct NoUrls;

    impl bridge_traits::PlayableUrls for NoUrls {
        fn create(&self, record: &bridge_traits::SongRecord) -> bridge_traits::error::Result<String> {
            Ok(format!("blob:{}", record.id))
        }
        fn revoke(&self, _url: &str) -> bridge_traits::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_playlist_shows_placeholder() {
        let spy = SpyView::default();
        let renderer = Renderer::new(Box::new(spy.clone()), &PlayerConfig::default());

        renderer.render_playlist(&Playlist::new(Box::new(NoUrls)));

        assert_eq!(
            spy.0.borrow().placeholder.as_deref(),
            Some("Upload your MP3 files...")
        );
    }

    #[test]
    fn test_configured_strings_are_used() {
        let spy = SpyView::default();
        let config = PlayerConfig::builder()
            .placeholder_text("Sube tus archivos MP3...")
            .no_track_title("-- NINGUNA CANCIÓN --")
            .build()
            .unwrap();
        let renderer = Renderer::new(Box::new(spy.clone()), &config);

        renderer.render_track(None);
        assert_eq!(spy.0.borrow().title.as_deref(), Some("-- NINGUNA CANCIÓN --"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn format_time_in_browser() {
        assert_eq!(format_time(125.0), "02:05");
        assert_eq!(format_time(f64::NAN), "00:00");
    }
}
