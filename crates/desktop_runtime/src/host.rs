//! Host-side execution of runtime effects: session export, import, and user notices.

use leptos::{logging, spawn_local, SignalGetUntracked, SignalSet};
use platform_host::HostServices;

use crate::{
    persistence,
    reducer::{RuntimeEffect, SessionAction},
    runtime_context::DesktopRuntimeContext,
};

pub(crate) fn run_runtime_effect(
    host: HostServices,
    runtime: DesktopRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::ExportSnapshot => export_session(host, runtime),
        RuntimeEffect::PickImportDocument => import_session(host, runtime),
        RuntimeEffect::Notify(message) => runtime.notice.set(Some(message)),
    }
}

fn export_session(host: HostServices, runtime: DesktopRuntimeContext) {
    let session = runtime.state.get_untracked();
    spawn_local(async move {
        match persistence::export_session(host.transfer.as_ref(), &session).await {
            Ok(file_name) => logging::log!("exported session as {file_name}"),
            Err(err) => {
                logging::warn!("session export failed: {err}");
                runtime.dispatch_action(SessionAction::TransferFailed {
                    message: format!("Export failed: {err}"),
                });
            }
        }
    });
}

fn import_session(host: HostServices, runtime: DesktopRuntimeContext) {
    spawn_local(async move {
        match persistence::import_session(host.transfer.as_ref()).await {
            Ok(Some(snapshot)) => {
                logging::log!("importing session with {} windows", snapshot.windows.len());
                runtime.dispatch_action(SessionAction::LoadSnapshot { snapshot });
            }
            Ok(None) => {}
            Err(err) => {
                logging::warn!("session import rejected: {err}");
                runtime.dispatch_action(SessionAction::TransferFailed {
                    message: format!("Import failed: {err}"),
                });
            }
        }
    });
}
