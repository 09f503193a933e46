//! Session snapshot codec and the export/import flows built on the host transfer service.
//!
//! Export serializes the whole session as a camelCase JSON document. Import parses a document,
//! checks the session invariants, and only then hands back a snapshot; nothing is loaded from a
//! document that fails either step.

use std::collections::BTreeSet;

use platform_host::{snapshot_file_name, unix_time_ms_now, SnapshotTransferService};
use thiserror::Error;

use crate::{
    model::{SessionSnapshot, SessionState},
    window_manager::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a session document cannot be exported or imported.
pub enum SnapshotError {
    /// The document is not a session snapshot.
    #[error("not a valid session file: {0}")]
    Malformed(String),
    /// The document parsed but describes an impossible session.
    #[error("inconsistent session file: {0}")]
    Inconsistent(String),
    /// Serializing the current session failed.
    #[error("failed to encode session: {0}")]
    Encode(String),
}

/// Serializes a session snapshot as pretty-printed JSON.
pub fn encode_snapshot(snapshot: &SessionSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshot).map_err(|err| SnapshotError::Encode(err.to_string()))
}

/// Parses and validates a session document.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] when `raw` does not deserialize and
/// [`SnapshotError::Inconsistent`] when it violates a session invariant.
pub fn parse_snapshot(raw: &str) -> Result<SessionSnapshot, SnapshotError> {
    let snapshot: SessionSnapshot =
        serde_json::from_str(raw).map_err(|err| SnapshotError::Malformed(err.to_string()))?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// Checks the invariants every reachable session satisfies.
pub fn validate_snapshot(snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
    if snapshot.desktop_count < 1 {
        return Err(inconsistent("desktopCount must be at least 1"));
    }
    if snapshot.current_desktop >= snapshot.desktop_count {
        return Err(inconsistent(format!(
            "currentDesktop {} is outside {} desktops",
            snapshot.current_desktop, snapshot.desktop_count
        )));
    }

    let mut ids = BTreeSet::new();
    for window in &snapshot.windows {
        if !ids.insert(window.id.as_str()) {
            return Err(inconsistent(format!("duplicate window id `{}`", window.id)));
        }
        if window.desktop_id >= snapshot.desktop_count {
            return Err(inconsistent(format!(
                "window `{}` is on desktop {} of {}",
                window.id, window.desktop_id, snapshot.desktop_count
            )));
        }
        if window.rect.w < MIN_WINDOW_WIDTH || window.rect.h < MIN_WINDOW_HEIGHT {
            return Err(inconsistent(format!(
                "window `{}` is smaller than {MIN_WINDOW_WIDTH}x{MIN_WINDOW_HEIGHT}",
                window.id
            )));
        }
        if window.z_index >= snapshot.next_z_index {
            return Err(inconsistent(format!(
                "window `{}` has zIndex {} but nextZIndex is {}",
                window.id, window.z_index, snapshot.next_z_index
            )));
        }
    }

    Ok(())
}

fn inconsistent(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Inconsistent(reason.into())
}

/// Serializes `state` and offers it to the user as a timestamped download.
///
/// Returns the file name that was offered.
pub async fn export_session(
    transfer: &dyn SnapshotTransferService,
    state: &SessionState,
) -> Result<String, String> {
    let contents = encode_snapshot(&state.snapshot()).map_err(|err| err.to_string())?;
    let file_name = snapshot_file_name(unix_time_ms_now());
    transfer.offer_download(&file_name, &contents).await?;
    Ok(file_name)
}

/// Asks the user for a session document and parses it.
///
/// Returns `Ok(None)` when the user cancelled.
pub async fn import_session(
    transfer: &dyn SnapshotTransferService,
) -> Result<Option<SessionSnapshot>, String> {
    let Some(raw) = transfer.pick_document().await? else {
        return Ok(None);
    };
    parse_snapshot(&raw).map(Some).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use desktop_widget_contract::WidgetTypeId;
    use futures::executor::block_on;
    use platform_host::{MemorySnapshotTransfer, SNAPSHOT_FILE_PREFIX};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{WindowId, WindowRecord, WindowRect};

    fn window(id: &str, desktop_id: u32, z_index: u32) -> WindowRecord {
        WindowRecord {
            id: WindowId(id.to_string()),
            widget_type: WidgetTypeId::trusted("clock"),
            title: "Clock".to_string(),
            rect: WindowRect {
                x: 50,
                y: 50,
                w: 300,
                h: 180,
            },
            z_index,
            desktop_id,
            is_minimized: false,
            is_maximized: false,
            config_values: Default::default(),
        }
    }

    fn snapshot(windows: Vec<WindowRecord>) -> SessionSnapshot {
        SessionSnapshot {
            windows,
            active_window_id: None,
            current_desktop: 0,
            desktop_count: 2,
            next_z_index: 103,
        }
    }

    #[test]
    fn parses_documents_written_by_the_web_shell() {
        let raw = json!({
            "windows": [{
                "id": "win_1700000000000",
                "widgetType": "weather",
                "title": "Weather",
                "x": 10, "y": 20, "w": 320, "h": 200,
                "zIndex": 100,
                "desktopId": 1,
                "isMinimized": true,
                "isMaximized": false,
                "configValues": { "city": "Oslo" }
            }],
            "activeWindowId": "win_1700000000000",
            "currentDesktop": 1,
            "desktopCount": 2,
            "nextZIndex": 101
        })
        .to_string();

        let parsed = parse_snapshot(&raw).expect("valid document");
        assert_eq!(parsed.windows[0].widget_type.as_str(), "weather");
        assert_eq!(parsed.windows[0].config_values.get("city"), Some(&json!("Oslo")));
        assert_eq!(
            parsed.active_window_id,
            Some(WindowId("win_1700000000000".to_string()))
        );
        assert_eq!(parsed.current_desktop, 1);
    }

    #[test]
    fn rejects_unparseable_documents() {
        assert!(matches!(
            parse_snapshot("{ not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            parse_snapshot(r#"{"windows": []}"#),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            parse_snapshot(r#"{"windows": [], "activeWindowId": null, "currentDesktop": -1, "desktopCount": 1, "nextZIndex": 100}"#),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_documents_that_break_session_invariants() {
        let duplicate = snapshot(vec![window("a", 0, 100), window("a", 1, 101)]);
        let off_desktop = snapshot(vec![window("a", 2, 100)]);
        let stale_counter = snapshot(vec![window("a", 0, 103)]);
        let mut tiny = snapshot(vec![window("a", 0, 100)]);
        tiny.windows[0].rect.w = 10;
        let mut no_desktops = snapshot(Vec::new());
        no_desktops.desktop_count = 0;
        let mut lost = snapshot(Vec::new());
        lost.current_desktop = 5;

        for bad in [duplicate, off_desktop, stale_counter, tiny, no_desktops, lost] {
            assert!(matches!(
                validate_snapshot(&bad),
                Err(SnapshotError::Inconsistent(_))
            ));
        }
        assert_eq!(validate_snapshot(&snapshot(vec![window("a", 1, 102)])), Ok(()));
    }

    #[test]
    fn export_offers_timestamped_document_that_reimports() {
        let transfer = MemorySnapshotTransfer::default();
        let mut state = SessionState::from_snapshot(snapshot(vec![window("win_9", 1, 102)]));
        state.active_window_id = Some(WindowId("win_9".to_string()));

        let file_name = block_on(export_session(&transfer, &state)).expect("export");
        assert!(file_name.starts_with(&format!("{SNAPSHOT_FILE_PREFIX}-")));
        assert!(file_name.ends_with(".json"));

        let downloads = transfer.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].0, file_name);

        transfer.queue_document(downloads[0].1.clone());
        let imported = block_on(import_session(&transfer))
            .expect("import")
            .expect("document picked");
        assert_eq!(SessionState::from_snapshot(imported), state);
    }

    #[test]
    fn cancelled_import_yields_nothing_and_bad_import_reports_reason() {
        let transfer = MemorySnapshotTransfer::default();
        assert_eq!(block_on(import_session(&transfer)), Ok(None));

        transfer.queue_document("[]".to_string());
        let err = block_on(import_session(&transfer)).expect_err("array is not a session");
        assert!(err.starts_with("not a valid session file"));
    }
}
