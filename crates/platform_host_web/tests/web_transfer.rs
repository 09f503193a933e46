#![cfg(target_arch = "wasm32")]

use std::{cell::RefCell, rc::Rc};

use platform_host::SnapshotTransferService;
use platform_host_web::WebSnapshotTransfer;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn download_link_is_clicked_while_attached_then_removed() {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    let body = document.body().expect("body");

    let clicked = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = clicked.clone();
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let anchor = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlAnchorElement>().ok());
        if let Some(anchor) = anchor {
            ev.prevent_default();
            sink.borrow_mut().push(anchor.download());
        }
    });
    body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .expect("click listener");

    let result = WebSnapshotTransfer
        .offer_download("desktop-session-1.json", "{}")
        .await;

    body.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .expect("remove listener");
    assert_eq!(result, Ok(()));
    // The click only bubbles to <body> when the link is attached to the document.
    assert_eq!(*clicked.borrow(), vec!["desktop-session-1.json".to_string()]);
    assert!(document
        .query_selector("a[download]")
        .expect("query")
        .is_none());
}
