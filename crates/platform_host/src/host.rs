//! Host service bundle injected into the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{NoopSnapshotTransfer, SnapshotTransferService};

#[derive(Clone)]
/// Host services available to the desktop runtime.
pub struct HostServices {
    /// Export/import document transport.
    pub transfer: Rc<dyn SnapshotTransferService>,
    /// Stable host identifier for diagnostics (`browser`, `memory`, `noop`).
    pub host_name: &'static str,
}

impl HostServices {
    /// Builds a bundle around a transfer service.
    pub fn new(transfer: Rc<dyn SnapshotTransferService>, host_name: &'static str) -> Self {
        Self {
            transfer,
            host_name,
        }
    }

    /// Bundle whose services do nothing, for native builds.
    pub fn noop() -> Self {
        Self::new(Rc::new(NoopSnapshotTransfer), "noop")
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_name", &self.host_name)
            .finish_non_exhaustive()
    }
}
