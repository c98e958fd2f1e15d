//! Helpers for constructing the browser bridge set.

use std::sync::Arc;

use bridge_traits::{error::Result as BridgeResult, BridgeError, SongStore};
use core_runtime::PlayerConfig;

use crate::{
    dom::{DomPlayerView, PageElements},
    error::WasmResult,
    media::HtmlAudioMedia,
    store::IdbSongStore,
    urls::ObjectUrlRegistry,
};

/// Bundle of bridge implementations used by the browser player.
pub struct WasmBridgeSet {
    pub page: PageElements,
    /// Outcome of opening IndexedDB. A failure leaves playback usable
    /// without persistence.
    pub store: BridgeResult<Arc<dyn SongStore>>,
    pub media: HtmlAudioMedia,
    pub urls: ObjectUrlRegistry,
    pub view: DomPlayerView,
}

/// Resolve the page elements and open the song store.
///
/// Missing elements are fatal; an unavailable store is not.
pub async fn build_wasm_bridges(config: &PlayerConfig) -> WasmResult<WasmBridgeSet> {
    let page = PageElements::from_window(&config.elements)?;

    let store = IdbSongStore::open(
        &config.database_name,
        &config.store_name,
        config.schema_version,
    )
    .await
    .map(|store| Arc::new(store) as Arc<dyn SongStore>)
    .map_err(BridgeError::from);

    Ok(WasmBridgeSet {
        media: page.media(),
        view: page.view(),
        urls: ObjectUrlRegistry::new(),
        store,
        page,
    })
}
