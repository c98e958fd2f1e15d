//! Object URL factory.

use bridge_traits::{error::Result as BridgeResult, PlayableUrls, SongRecord};
use js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::error::WasmError;

/// Creates `blob:` URLs for song payloads via `URL.createObjectURL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlRegistry;

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl PlayableUrls for ObjectUrlRegistry {
    fn create(&self, record: &SongRecord) -> BridgeResult<String> {
        let parts = Array::of1(&Uint8Array::from(record.data.as_ref()));

        let options = BlobPropertyBag::new();
        options.set_type(&record.media_type);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(WasmError::from)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(WasmError::from)?;
        Ok(url)
    }

    fn revoke(&self, url: &str) -> BridgeResult<()> {
        Url::revoke_object_url(url).map_err(WasmError::from)?;
        Ok(())
    }
}
