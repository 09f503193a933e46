//! Browser snapshot transfer: Blob downloads for export, a hidden file input for import.

use platform_host::{SnapshotTransferFuture, SnapshotTransferService};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const SNAPSHOT_MIME_TYPE: &str = "application/json";
/// Delay before the object URL behind a download is released.
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 1_000;

#[derive(Debug, Clone, Copy, Default)]
/// Browser transfer service backed by object URLs and the file picker.
pub struct WebSnapshotTransfer;

impl SnapshotTransferService for WebSnapshotTransfer {
    fn offer_download<'a>(
        &'a self,
        file_name: &'a str,
        contents: &'a str,
    ) -> SnapshotTransferFuture<'a, Result<(), String>> {
        Box::pin(async move { download_text(file_name, contents) })
    }

    fn pick_document<'a>(&'a self) -> SnapshotTransferFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move {
            let Some(file) = pick_file().await? else {
                return Ok(None);
            };
            read_file_as_text(file).await.map(Some)
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported() -> String {
    "session transfer is only available when compiled for wasm32".to_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn download_text(_file_name: &str, _contents: &str) -> Result<(), String> {
    Err(unsupported())
}

#[cfg(target_arch = "wasm32")]
fn download_text(file_name: &str, contents: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document unavailable".to_string())?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(SNAPSHOT_MIME_TYPE);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| format!("failed to build session blob: {err:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("failed to create object url: {err:?}"))?;

    let anchor = document
        .create_element("a")
        .map_err(|err| format!("failed to create download link: {err:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "failed to cast download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.set_hidden(true);

    let body = document
        .body()
        .ok_or_else(|| "document body unavailable".to_string())?;
    body.append_child(&anchor)
        .map_err(|err| format!("failed to attach download link: {err:?}"))?;
    anchor.click();
    anchor.remove();

    let revoke = Closure::once_into_js(move || {
        let _ = web_sys::Url::revoke_object_url(&url);
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            REVOKE_DELAY_MS,
        )
        .map_err(|err| format!("failed to schedule download cleanup: {err:?}"))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(dead_code)]
struct PickedFile;

#[cfg(target_arch = "wasm32")]
type PickedFile = web_sys::File;

#[cfg(not(target_arch = "wasm32"))]
async fn pick_file() -> Result<Option<PickedFile>, String> {
    Err(unsupported())
}

#[cfg(target_arch = "wasm32")]
async fn pick_file() -> Result<Option<PickedFile>, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document unavailable".to_string())?;
    let input = document
        .create_element("input")
        .map_err(|err| format!("failed to create file input: {err:?}"))?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|_| "failed to cast file input".to_string())?;
    input.set_type("file");
    input.set_accept(".json,application/json");
    input.set_hidden(true);

    if let Some(body) = document.body() {
        let _ = body.append_child(&input);
    }

    let (tx, rx) = oneshot::channel::<Option<web_sys::File>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let input_for_change = input.clone();
    let change_sender = sender.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let picked = input_for_change.files().and_then(|files| files.get(0));
        if let Some(tx) = change_sender.borrow_mut().take() {
            let _ = tx.send(picked);
        }
    }));
    let cancel_sender = sender.clone();
    let on_cancel = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        if let Some(tx) = cancel_sender.borrow_mut().take() {
            let _ = tx.send(None);
        }
    }));
    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    let _ = input.add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());
    input.click();

    let picked = rx.await.unwrap_or(None);
    input.set_onchange(None);
    let _ =
        input.remove_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());
    input.remove();
    drop(on_change);
    drop(on_cancel);
    Ok(picked)
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file_as_text(_file: PickedFile) -> Result<String, String> {
    Err(unsupported())
}

#[cfg(target_arch = "wasm32")]
async fn read_file_as_text(file: PickedFile) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read session file: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to read session file".to_string()));
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    reader
        .read_as_text(&file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "session file read was interrupted".to_string());
    reader.set_onload(None);
    reader.set_onerror(None);
    drop(on_load);
    drop(on_error);
    result?
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_builds_report_transfer_as_unsupported() {
        let transfer = WebSnapshotTransfer;
        assert!(block_on(transfer.offer_download("a.json", "{}")).is_err());
        assert!(block_on(transfer.pick_document()).is_err());
    }
}
