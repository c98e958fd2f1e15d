//! Page elements and the DOM-backed player view.

use bridge_traits::{PlayerView, TransportGlyph};
use core_runtime::ElementIds;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlAudioElement, HtmlElement, HtmlInputElement};

use crate::{
    error::{describe, WasmError, WasmResult},
    media::HtmlAudioMedia,
};

/// Attribute carrying an entry's playlist index on its `<li>`.
const INDEX_ATTRIBUTE: &str = "data-index";

/// Class toggled on the current entry.
const CURRENT_CLASS: &str = "playing";

/// Handles to every element the player binds to.
#[derive(Debug, Clone)]
pub struct PageElements {
    pub document: Document,
    pub file_input: HtmlInputElement,
    pub playlist: HtmlElement,
    pub audio: HtmlAudioElement,
    pub track_title: HtmlElement,
    pub progress_bar: HtmlInputElement,
    pub current_time: HtmlElement,
    pub total_duration: HtmlElement,
    pub prev_button: HtmlElement,
    pub play_pause_button: HtmlElement,
    pub next_button: HtmlElement,
    pub clear_button: HtmlElement,
}

fn lookup<T: JsCast>(document: &Document, id: &str) -> WasmResult<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| WasmError::MissingElement(id.to_string()))
}

impl PageElements {
    /// Resolve every element id in `ids` against `document`.
    pub fn lookup(document: &Document, ids: &ElementIds) -> WasmResult<Self> {
        Ok(Self {
            document: document.clone(),
            file_input: lookup(document, &ids.file_input)?,
            playlist: lookup(document, &ids.playlist)?,
            audio: lookup(document, &ids.audio)?,
            track_title: lookup(document, &ids.track_title)?,
            progress_bar: lookup(document, &ids.progress_bar)?,
            current_time: lookup(document, &ids.current_time)?,
            total_duration: lookup(document, &ids.total_duration)?,
            prev_button: lookup(document, &ids.prev_button)?,
            play_pause_button: lookup(document, &ids.play_pause_button)?,
            next_button: lookup(document, &ids.next_button)?,
            clear_button: lookup(document, &ids.clear_button)?,
        })
    }

    /// Resolve against the current window's document.
    pub fn from_window(ids: &ElementIds) -> WasmResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| WasmError::JavaScript("No document available".to_string()))?;
        Self::lookup(&document, ids)
    }

    pub fn media(&self) -> HtmlAudioMedia {
        HtmlAudioMedia::new(self.audio.clone())
    }

    pub fn view(&self) -> DomPlayerView {
        DomPlayerView {
            document: self.document.clone(),
            playlist: self.playlist.clone(),
            track_title: self.track_title.clone(),
            progress_bar: self.progress_bar.clone(),
            current_time: self.current_time.clone(),
            total_duration: self.total_duration.clone(),
            play_pause_button: self.play_pause_button.clone(),
        }
    }

    /// Current slider position in seconds.
    pub fn progress_value(&self) -> f64 {
        self.progress_bar.value_as_number()
    }

    /// Playlist index of the entry a click landed on, if any.
    pub fn clicked_entry(event: &Event) -> Option<usize> {
        event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(&format!("li[{}]", INDEX_ATTRIBUTE)).ok())
            .flatten()
            .and_then(|item| item.get_attribute(INDEX_ATTRIBUTE))
            .and_then(|index| index.parse().ok())
    }
}

/// [`PlayerView`] that writes straight into the page.
#[derive(Debug, Clone)]
pub struct DomPlayerView {
    document: Document,
    playlist: HtmlElement,
    track_title: HtmlElement,
    progress_bar: HtmlInputElement,
    current_time: HtmlElement,
    total_duration: HtmlElement,
    play_pause_button: HtmlElement,
}

impl DomPlayerView {
    fn append_item(&self, text: &str, index: Option<usize>) -> WasmResult<()> {
        let item = self.document.create_element("li")?;
        item.set_text_content(Some(text));
        match index {
            Some(index) => item.set_attribute(INDEX_ATTRIBUTE, &index.to_string())?,
            None => item.set_class_name("placeholder"),
        }
        self.playlist.append_child(&item)?;
        Ok(())
    }
}

impl PlayerView for DomPlayerView {
    fn show_playlist(&self, titles: &[String]) {
        self.playlist.set_inner_html("");
        for (index, title) in titles.iter().enumerate() {
            if let Err(err) = self.append_item(title, Some(index)) {
                warn!(index, error = %err, "Failed to render playlist entry");
            }
        }
    }

    fn show_placeholder(&self, text: &str) {
        self.playlist.set_inner_html("");
        if let Err(err) = self.append_item(text, None) {
            warn!(error = %err, "Failed to render placeholder");
        }
    }

    fn mark_current(&self, index: Option<usize>) {
        let items = self.playlist.children();
        for position in 0..items.length() {
            let Some(item) = items.item(position) else {
                continue;
            };
            let is_current = index == Some(position as usize);
            if let Err(err) = item
                .class_list()
                .toggle_with_force(CURRENT_CLASS, is_current)
            {
                warn!(position, error = %describe(&err), "Failed to mark playlist entry");
            }
        }
    }

    fn set_transport_glyph(&self, glyph: TransportGlyph) {
        self.play_pause_button.set_text_content(Some(glyph.as_str()));
    }

    fn set_title(&self, title: &str) {
        self.track_title.set_text_content(Some(title));
    }

    fn set_elapsed(&self, text: &str, position: f64) {
        self.current_time.set_text_content(Some(text));
        self.progress_bar.set_value_as_number(position);
    }

    fn set_duration(&self, text: &str, max: f64) {
        self.total_duration.set_text_content(Some(text));
        self.progress_bar.set_max(&max.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture() -> PageElements {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(
            r#"
            <input type="file" id="file-input" multiple>
            <ul id="playlist"></ul>
            <audio id="audio-player"></audio>
            <div id="track-title"></div>
            <input type="range" id="progress-bar" value="0" min="0">
            <span id="current-time"></span>
            <span id="total-duration"></span>
            <button id="prev-button"></button>
            <button id="play-pause-button"></button>
            <button id="next-button"></button>
            <button id="clear-playlist-button"></button>
            "#,
        );
        PageElements::lookup(&document, &ElementIds::default()).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_lookup_reports_missing_element() {
        let page = fixture();
        let ids = ElementIds {
            next_button: "does-not-exist".into(),
            ..ElementIds::default()
        };
        let err = PageElements::lookup(&page.document, &ids).unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[wasm_bindgen_test]
    fn test_playlist_rendering_and_marking() {
        let page = fixture();
        let view = page.view();

        view.show_playlist(&["Intro".to_string(), "Outro".to_string()]);
        view.mark_current(Some(1));

        let items = page.playlist.children();
        assert_eq!(items.length(), 2);
        let second = items.item(1).unwrap();
        assert_eq!(second.text_content().unwrap(), "Outro");
        assert!(second.class_list().contains("playing"));
        assert!(!items.item(0).unwrap().class_list().contains("playing"));

        view.show_placeholder("Upload your MP3 files...");
        let items = page.playlist.children();
        assert_eq!(items.length(), 1);
        assert!(items.item(0).unwrap().class_list().contains("placeholder"));
    }

    #[wasm_bindgen_test]
    fn test_transport_and_times() {
        let page = fixture();
        let view = page.view();

        view.set_transport_glyph(TransportGlyph::Pause);
        view.set_duration("02:05", 125.0);
        view.set_elapsed("01:00", 60.0);

        assert_eq!(page.play_pause_button.text_content().unwrap(), "❚❚");
        assert_eq!(page.total_duration.text_content().unwrap(), "02:05");
        assert_eq!(page.progress_bar.max(), "125");
        assert_eq!(page.progress_value(), 60.0);
    }
}
