//! Native bootstrap helpers backed by `bridge-desktop`.

use std::sync::Arc;

use bridge_desktop::{default_database_path, SqliteSongStore};
use bridge_traits::{error::Result as BridgeResult, SongStore};
use core_runtime::PlayerConfig;
use tracing::debug;

/// Open the SQLite song store described by `config`.
///
/// Uses `config.database_path` when set, otherwise the platform data
/// directory. Pass the result to
/// [`PlayerDependencies::with_opened_store`](crate::PlayerDependencies::with_opened_store).
pub async fn open_desktop_store(config: &PlayerConfig) -> BridgeResult<Arc<dyn SongStore>> {
    let path = config
        .database_path
        .clone()
        .unwrap_or_else(|| default_database_path(&config.database_name));
    debug!(path = ?path, "Opening desktop song store");

    let store = SqliteSongStore::new(&path).await?;
    Ok(Arc::new(store))
}
