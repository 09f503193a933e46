//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! The runtime only talks to the host through the traits in this crate. Concrete browser
//! adapters live in `platform_host_web`; the in-memory and no-op implementations here back
//! native builds and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod time;
pub mod transfer;

pub use host::HostServices;
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use transfer::{
    snapshot_file_name, MemorySnapshotTransfer, NoopSnapshotTransfer, SnapshotTransferFuture,
    SnapshotTransferService, SNAPSHOT_FILE_PREFIX,
};
