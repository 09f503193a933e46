//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! On native targets every adapter degrades to an explicit "unsupported" error so the runtime
//! can still be compiled and tested off the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod transfer;

use std::rc::Rc;

use platform_host::HostServices;

pub use transfer::WebSnapshotTransfer;

/// Builds the host service bundle used by the browser entry.
pub fn build_host_services() -> HostServices {
    HostServices::new(Rc::new(WebSnapshotTransfer), "browser")
}
