//! Export/import document transport contracts.
//!
//! The runtime serializes and parses session snapshots itself; a transfer service only moves
//! the resulting text between the shell and the user (a download on export, a picked file on
//! import).

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

/// File name prefix for exported session documents.
pub const SNAPSHOT_FILE_PREFIX: &str = "desktop-session";

/// Object-safe boxed future used by [`SnapshotTransferService`] methods.
pub type SnapshotTransferFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that offers exported documents to the user and reads documents back in.
pub trait SnapshotTransferService {
    /// Offers `contents` to the user as a downloadable document named `file_name`.
    fn offer_download<'a>(
        &'a self,
        file_name: &'a str,
        contents: &'a str,
    ) -> SnapshotTransferFuture<'a, Result<(), String>>;

    /// Asks the user for a document and returns its text.
    ///
    /// Returns `Ok(None)` when the user dismissed the picker without choosing anything.
    fn pick_document<'a>(&'a self) -> SnapshotTransferFuture<'a, Result<Option<String>, String>>;
}

/// Returns the export file name for a document created at `unix_ms`.
pub fn snapshot_file_name(unix_ms: u64) -> String {
    format!("{SNAPSHOT_FILE_PREFIX}-{unix_ms}.json")
}

#[derive(Debug, Clone, Copy, Default)]
/// Transfer service for targets without a user-facing file surface.
pub struct NoopSnapshotTransfer;

impl SnapshotTransferService for NoopSnapshotTransfer {
    fn offer_download<'a>(
        &'a self,
        _file_name: &'a str,
        _contents: &'a str,
    ) -> SnapshotTransferFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn pick_document<'a>(&'a self) -> SnapshotTransferFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory transfer service that records downloads and replays queued documents.
pub struct MemorySnapshotTransfer {
    downloads: Rc<RefCell<Vec<(String, String)>>>,
    pending: Rc<RefCell<VecDeque<String>>>,
}

impl MemorySnapshotTransfer {
    /// Queues a document returned by the next [`SnapshotTransferService::pick_document`] call.
    pub fn queue_document(&self, contents: impl Into<String>) {
        self.pending.borrow_mut().push_back(contents.into());
    }

    /// Returns every `(file_name, contents)` pair offered so far.
    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.borrow().clone()
    }
}

impl SnapshotTransferService for MemorySnapshotTransfer {
    fn offer_download<'a>(
        &'a self,
        file_name: &'a str,
        contents: &'a str,
    ) -> SnapshotTransferFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.downloads
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(())
        })
    }

    fn pick_document<'a>(&'a self) -> SnapshotTransferFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.pending.borrow_mut().pop_front()) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn snapshot_file_name_embeds_timestamp() {
        assert_eq!(
            snapshot_file_name(1_700_000_000_123),
            "desktop-session-1700000000123.json"
        );
    }

    #[test]
    fn memory_transfer_records_downloads_and_replays_documents_in_order() {
        let transfer = MemorySnapshotTransfer::default();
        block_on(transfer.offer_download("a.json", "{}")).expect("download");
        transfer.queue_document("first");
        transfer.queue_document("second");

        assert_eq!(
            transfer.downloads(),
            vec![("a.json".to_string(), "{}".to_string())]
        );
        assert_eq!(
            block_on(transfer.pick_document()).unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(
            block_on(transfer.pick_document()).unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(block_on(transfer.pick_document()).unwrap(), None);
    }

    #[test]
    fn noop_transfer_never_yields_a_document() {
        let transfer = NoopSnapshotTransfer;
        assert!(block_on(transfer.offer_download("x.json", "{}")).is_ok());
        assert_eq!(block_on(transfer.pick_document()).unwrap(), None);
    }
}
