//! Promise adapters for IndexedDB's callback API.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, IdbRequest, IdbTransaction};

use crate::error::{WasmError, WasmResult};

/// Wait for `request` to succeed and return its result.
pub(crate) async fn await_request(request: &IdbRequest) -> WasmResult<JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let source = request.clone();
        let onsuccess = Closure::once_into_js(move || {
            let result = source.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        request.set_onsuccess(Some(onsuccess.unchecked_ref()));

        let source = request.clone();
        let onerror = Closure::once_into_js(move || {
            let error = source
                .error()
                .ok()
                .flatten()
                .map(JsValue::from)
                .unwrap_or_else(|| JsValue::from_str("IndexedDB request failed"));
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        request.set_onerror(Some(onerror.unchecked_ref()));
    });

    JsFuture::from(promise).await.map_err(WasmError::idb)
}

/// Wait for `transaction` to commit.
///
/// Request success only means the request was applied inside the
/// transaction; data is durable once `complete` fires.
pub(crate) async fn await_transaction(transaction: &IdbTransaction) -> WasmResult<()> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let oncomplete = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        transaction.set_oncomplete(Some(oncomplete.unchecked_ref()));

        let source = transaction.clone();
        let onabort = Closure::once_into_js(move |_event: Event| {
            let error = source
                .error()
                .map(JsValue::from)
                .unwrap_or_else(|| JsValue::from_str("IndexedDB transaction aborted"));
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        transaction.set_onabort(Some(onabort.unchecked_ref()));
    });

    JsFuture::from(promise).await.map(|_| ()).map_err(WasmError::idb)
}
