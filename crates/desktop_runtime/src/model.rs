//! Session data model: windows, desktops, snapshots, and transient pointer gestures.

use desktop_widget_contract::{ConfigValues, WidgetTypeId};
use serde::{Deserialize, Serialize};

/// First z-index handed out in a fresh session; values below are reserved for shell chrome.
pub const Z_INDEX_BASELINE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque window identifier, `win_<n>` for runtime-generated windows.
pub struct WindowId(pub String);

impl WindowId {
    /// Builds the id for sequence value `seq`.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("win_{seq}"))
    }

    /// Returns the numeric suffix of a runtime-generated id.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("win_")?.parse().ok()
    }

    /// Returns the string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window geometry in canvas units.
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    /// Moves the rectangle by `(dx, dy)`, saturating at the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Applies every field present in `patch`.
    pub fn patched(self, patch: GeometryPatch) -> Self {
        Self {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            w: patch.w.unwrap_or(self.w),
            h: patch.h.unwrap_or(self.h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Partial geometry update; absent fields keep their current value.
pub struct GeometryPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl GeometryPatch {
    /// Patch moving the window to `(x, y)`.
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch resizing the window to `w` x `h`.
    pub fn size(w: i32, h: i32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One open window in the session.
pub struct WindowRecord {
    pub id: WindowId,
    /// Registry key of the hosted widget. May name a type missing from the registry after an
    /// import.
    pub widget_type: WidgetTypeId,
    pub title: String,
    /// Stored geometry. Maximize never overwrites it.
    #[serde(flatten)]
    pub rect: WindowRect,
    pub z_index: u32,
    pub desktop_id: u32,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub config_values: ConfigValues,
}

#[derive(Debug, Clone, PartialEq)]
/// Complete session state owned by the desktop runtime.
pub struct SessionState {
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    pub current_desktop: u32,
    pub desktop_count: u32,
    pub next_z_index: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            current_desktop: 0,
            desktop_count: 1,
            next_z_index: Z_INDEX_BASELINE,
        }
    }
}

impl SessionState {
    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn window_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == window_id)
    }

    /// Windows assigned to the desktop currently shown, in creation order.
    pub fn windows_on_current_desktop(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows
            .iter()
            .filter(move |w| w.desktop_id == self.current_desktop)
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active_window_id.as_ref() == Some(window_id)
    }

    /// Captures the full session for export.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            windows: self.windows.clone(),
            active_window_id: self.active_window_id.clone(),
            current_desktop: self.current_desktop,
            desktop_count: self.desktop_count,
            next_z_index: self.next_z_index,
        }
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            windows: snapshot.windows,
            active_window_id: snapshot.active_window_id,
            current_desktop: snapshot.current_desktop,
            desktop_count: snapshot.desktop_count,
            next_z_index: snapshot.next_z_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Serialized session document exchanged through export/import.
pub struct SessionSnapshot {
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    pub current_desktop: u32,
    pub desktop_count: u32,
    pub next_z_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Pointer gesture in progress on a window frame.
pub enum PointerGesture {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Transient UI interaction state. Never part of a snapshot.
pub struct InteractionState {
    pub gesture: PointerGesture,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn window_record_serializes_with_flat_camel_case_geometry() {
        let record = WindowRecord {
            id: WindowId::from_sequence(7),
            widget_type: WidgetTypeId::trusted("clock"),
            title: "Clock".to_string(),
            rect: WindowRect {
                x: 50,
                y: 60,
                w: 300,
                h: 180,
            },
            z_index: 101,
            desktop_id: 1,
            is_minimized: false,
            is_maximized: true,
            config_values: json!({ "format24": true }).as_object().cloned().unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "win_7",
                "widgetType": "clock",
                "title": "Clock",
                "x": 50,
                "y": 60,
                "w": 300,
                "h": 180,
                "zIndex": 101,
                "desktopId": 1,
                "isMinimized": false,
                "isMaximized": true,
                "configValues": { "format24": true }
            })
        );
    }

    #[test]
    fn window_id_sequence_only_parses_generated_ids() {
        assert_eq!(WindowId::from_sequence(42).sequence(), Some(42));
        assert_eq!(WindowId("legacy".to_string()).sequence(), None);
        assert_eq!(WindowId("win_abc".to_string()).sequence(), None);
    }

    #[test]
    fn fresh_session_has_one_desktop_and_baseline_z_index() {
        let state = SessionState::default();
        assert_eq!(state.desktop_count, 1);
        assert_eq!(state.current_desktop, 0);
        assert_eq!(state.next_z_index, Z_INDEX_BASELINE);
        assert_eq!(state.active_window_id, None);
    }
}
