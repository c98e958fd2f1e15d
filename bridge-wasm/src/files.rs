//! Reading the upload control's selection.

use bridge_traits::UploadFile;
use bytes::Bytes;
use js_sys::Uint8Array;
use tracing::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::error::{describe, WasmResult};

/// Read every file currently selected in `input`, in selection order.
///
/// A file whose contents cannot be read is skipped with a warning.
pub async fn read_upload_files(input: &HtmlInputElement) -> WasmResult<Vec<UploadFile>> {
    let Some(list) = input.files() else {
        return Ok(Vec::new());
    };

    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.item(index) else {
            continue;
        };
        match read_file(&file).await {
            Ok(upload) => files.push(upload),
            Err(err) => warn!(name = %file.name(), error = %err, "Failed to read selected file"),
        }
    }
    Ok(files)
}

async fn read_file(file: &File) -> WasmResult<UploadFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| crate::WasmError::JavaScript(describe(&err)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(UploadFile::new(file.name(), file.type_(), Bytes::from(bytes)))
}
