//! `HTMLAudioElement` media bridge.

use bridge_traits::{error::Result as BridgeResult, MediaElement};
use tracing::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::error::WasmError;

/// Media element backed by the page's `<audio>` element.
///
/// Cloning shares the same underlying element.
#[derive(Debug, Clone)]
pub struct HtmlAudioMedia {
    element: HtmlAudioElement,
}

impl HtmlAudioMedia {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Raw duration as reported by the element (`NaN` while unknown).
    pub fn raw_duration(&self) -> f64 {
        self.element.duration()
    }
}

impl MediaElement for HtmlAudioMedia {
    fn set_source(&self, url: &str) -> BridgeResult<()> {
        self.element.set_src(url);
        Ok(())
    }

    fn clear_source(&self) -> BridgeResult<()> {
        self.element.pause().map_err(WasmError::media)?;
        self.element
            .remove_attribute("src")
            .map_err(WasmError::media)?;
        // Reloading with no source releases the previous resource.
        self.element.load();
        Ok(())
    }

    fn source(&self) -> Option<String> {
        Some(self.element.src()).filter(|src| !src.is_empty())
    }

    fn load(&self) -> BridgeResult<()> {
        self.element.load();
        Ok(())
    }

    fn play(&self) -> BridgeResult<()> {
        let promise = self.element.play().map_err(WasmError::media)?;
        // Rejections (autoplay policy, source switched mid-start) arrive later.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(error = %crate::error::describe(&err), "Playback start rejected");
            }
        });
        Ok(())
    }

    fn pause(&self) -> BridgeResult<()> {
        self.element.pause().map_err(WasmError::media)?;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn set_current_time(&self, seconds: f64) -> BridgeResult<()> {
        self.element.set_current_time(seconds);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        Some(self.element.duration()).filter(|d| d.is_finite())
    }
}
