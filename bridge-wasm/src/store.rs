//! IndexedDB song store
//!
//! # Layout
//!
//! - **Database**: configured name (default `retro-mp3-player`), version 1
//! - **Object store**: configured name (default `songs`), `keyPath: "id"`,
//!   `autoIncrement: true`
//! - **Record**: `{ id, name, media_type, data: Uint8Array }`
//!
//! There are no migrations: the upgrade handler only creates the object
//! store when it is missing.

use std::{cell::Cell, rc::Rc};

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult,
    storage::{SongRecord, SongStore, UploadFile},
};
use bytes::Bytes;
use js_sys::{Array, Object, Reflect, Uint8Array};
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Event, IdbDatabase, IdbObjectStore, IdbObjectStoreParameters, IdbOpenDbRequest,
    IdbTransaction, IdbTransactionMode, IdbVersionChangeEvent,
};

use crate::{
    error::{WasmError, WasmResult},
    idb::{await_request, await_transaction},
};

/// Song store backed by an IndexedDB object store.
pub struct IdbSongStore {
    db: IdbDatabase,
    store_name: String,
}

impl IdbSongStore {
    /// Open (creating on first use) the song database.
    ///
    /// # Errors
    ///
    /// Fails when IndexedDB is unavailable (e.g. private browsing modes that
    /// disable it) or the open request is rejected.
    pub async fn open(database_name: &str, store_name: &str, version: u32) -> WasmResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WasmError::JavaScript("No window object available".to_string()))?;

        let factory = window
            .indexed_db()
            .map_err(WasmError::idb)?
            .ok_or_else(|| WasmError::IndexedDb("IndexedDB not available".to_string()))?;

        let open_request: IdbOpenDbRequest = factory
            .open_with_u32(database_name, version)
            .map_err(WasmError::idb)?;

        let upgrade_store = store_name.to_string();
        let onupgradeneeded = Closure::<dyn FnMut(IdbVersionChangeEvent)>::new(
            move |event: IdbVersionChangeEvent| {
                let Some(db) = event
                    .target()
                    .and_then(|target| target.dyn_into::<IdbOpenDbRequest>().ok())
                    .and_then(|request| request.result().ok())
                    .and_then(|result| result.dyn_into::<IdbDatabase>().ok())
                else {
                    warn!("Upgrade event without a database");
                    return;
                };

                if !db.object_store_names().contains(&upgrade_store) {
                    let options = IdbObjectStoreParameters::new();
                    options.set_key_path(&JsValue::from_str("id"));
                    options.set_auto_increment(true);
                    if let Err(err) =
                        db.create_object_store_with_optional_parameters(&upgrade_store, &options)
                    {
                        warn!(error = %crate::error::describe(&err), "Failed to create object store");
                    }
                }
            },
        );
        open_request.set_onupgradeneeded(Some(onupgradeneeded.as_ref().unchecked_ref()));

        let opened = await_request(&open_request).await;
        open_request.set_onupgradeneeded(None);
        drop(onupgradeneeded);

        let db = opened?
            .dyn_into::<IdbDatabase>()
            .map_err(|_| WasmError::IndexedDb("Open result is not a database".to_string()))?;

        debug!(database = database_name, store = store_name, "Opened song store");

        Ok(Self {
            db,
            store_name: store_name.to_string(),
        })
    }

    fn begin(&self, mode: IdbTransactionMode) -> WasmResult<(IdbTransaction, IdbObjectStore)> {
        let transaction = self
            .db
            .transaction_with_str_and_mode(&self.store_name, mode)
            .map_err(WasmError::idb)?;
        let store = transaction
            .object_store(&self.store_name)
            .map_err(WasmError::idb)?;
        Ok((transaction, store))
    }

    fn to_js_record(file: &UploadFile) -> WasmResult<JsValue> {
        let record = Object::new();
        Reflect::set(&record, &"name".into(), &JsValue::from_str(&file.name))?;
        Reflect::set(
            &record,
            &"media_type".into(),
            &JsValue::from_str(&file.media_type),
        )?;
        Reflect::set(
            &record,
            &"data".into(),
            &Uint8Array::from(file.data.as_ref()).into(),
        )?;
        Ok(record.into())
    }

    fn from_js_record(value: &JsValue) -> WasmResult<SongRecord> {
        let field = |name: &str| Reflect::get(value, &JsValue::from_str(name));

        let id = field("id")?
            .as_f64()
            .ok_or_else(|| WasmError::IndexedDb("Record without numeric id".to_string()))?;
        let name = field("name")?.as_string().unwrap_or_default();
        let media_type = field("media_type")?.as_string().unwrap_or_default();
        let data = field("data")?
            .dyn_into::<Uint8Array>()
            .map(|bytes| Bytes::from(bytes.to_vec()))
            .map_err(|_| WasmError::IndexedDb(format!("Record {} has no audio data", id)))?;

        Ok(SongRecord {
            id: id as i64,
            name,
            media_type,
            data,
        })
    }
}

#[async_trait(?Send)]
impl SongStore for IdbSongStore {
    async fn replace_all(&self, files: Vec<UploadFile>) -> BridgeResult<usize> {
        let (transaction, store) = self.begin(IdbTransactionMode::Readwrite)?;
        let persisted = Rc::new(Cell::new(0usize));

        store.clear().map_err(WasmError::idb)?;

        for file in &files {
            let record = Self::to_js_record(file)?;
            let request = match store.add(&record) {
                Ok(request) => request,
                Err(err) => {
                    warn!(name = %file.name, error = %crate::error::describe(&err), "Failed to queue song");
                    continue;
                }
            };

            let counter = Rc::clone(&persisted);
            let onsuccess = Closure::once_into_js(move || counter.set(counter.get() + 1));
            request.set_onsuccess(Some(onsuccess.unchecked_ref()));

            // A failed add would abort the whole transaction unless handled.
            let name = file.name.clone();
            let onerror = Closure::once_into_js(move |event: Event| {
                event.prevent_default();
                event.stop_propagation();
                warn!(name = %name, "Failed to store song");
            });
            request.set_onerror(Some(onerror.unchecked_ref()));
        }

        await_transaction(&transaction).await?;

        debug!(persisted = persisted.get(), offered = files.len(), "Replaced songs");
        Ok(persisted.get())
    }

    async fn load_all(&self) -> BridgeResult<Vec<SongRecord>> {
        let (_transaction, store) = self.begin(IdbTransactionMode::Readonly)?;
        let request = store.get_all().map_err(WasmError::idb)?;
        let result = await_request(&request).await?;

        let rows: Array = result
            .dyn_into()
            .map_err(|_| WasmError::IndexedDb("getAll did not return an array".to_string()))?;

        let mut records = Vec::with_capacity(rows.length() as usize);
        for row in rows.iter() {
            records.push(Self::from_js_record(&row)?);
        }
        Ok(records)
    }

    async fn clear_all(&self) -> BridgeResult<()> {
        let (transaction, store) = self.begin(IdbTransactionMode::Readwrite)?;
        store.clear().map_err(WasmError::idb)?;
        await_transaction(&transaction).await?;
        debug!("Cleared songs");
        Ok(())
    }

    async fn count(&self) -> BridgeResult<usize> {
        let (_transaction, store) = self.begin(IdbTransactionMode::Readonly)?;
        let request = store.count().map_err(WasmError::idb)?;
        let count = await_request(&request).await?.as_f64().unwrap_or(0.0);
        Ok(count as usize)
    }
}
