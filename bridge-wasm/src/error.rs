//! Error types for WebAssembly bridge implementations

use bridge_traits::error::BridgeError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result type for WebAssembly bridge operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors that can occur in WebAssembly bridge implementations
#[derive(Error, Debug)]
pub enum WasmError {
    /// IndexedDB operation failed
    #[error("IndexedDB error: {0}")]
    IndexedDb(String),

    /// JavaScript error from web-sys
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Media element rejected a command
    #[error("Media element error: {0}")]
    Media(String),

    /// A required page element is missing or has the wrong type
    #[error("Page element `{0}` not found or not of the expected kind")]
    MissingElement(String),
}

impl WasmError {
    /// Convert a thrown JavaScript value into an IndexedDB error.
    pub(crate) fn idb(js_value: JsValue) -> Self {
        WasmError::IndexedDb(describe(&js_value))
    }

    /// Convert a thrown JavaScript value into a media error.
    pub(crate) fn media(js_value: JsValue) -> Self {
        WasmError::Media(describe(&js_value))
    }
}

impl From<WasmError> for BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::IndexedDb(msg) => BridgeError::DatabaseError(msg),
            WasmError::Media(msg) => BridgeError::MediaError(msg),
            WasmError::MissingElement(id) => BridgeError::NotAvailable(id),
            WasmError::JavaScript(msg) => BridgeError::OperationFailed(msg),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(js_value: JsValue) -> Self {
        WasmError::JavaScript(describe(&js_value))
    }
}

/// Best-effort human readable text for a thrown JavaScript value.
pub(crate) fn describe(js_value: &JsValue) -> String {
    if let Some(text) = js_value.as_string() {
        text
    } else if let Some(error) = js_value.dyn_ref::<js_sys::Error>() {
        error.message().into()
    } else if let Some(exception) = js_value.dyn_ref::<web_sys::DomException>() {
        format!("{}: {}", exception.name(), exception.message())
    } else {
        format!("{:?}", js_value)
    }
}
