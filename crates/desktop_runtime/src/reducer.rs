//! Reducer actions, side-effect intents, and transition logic for the session state manager.

use desktop_widget_contract::{ConfigValues, WidgetTypeId};
use thiserror::Error;

use crate::{
    model::{
        DragSession, GeometryPatch, InteractionState, PointerGesture, PointerPosition,
        ResizeSession, SessionSnapshot, SessionState, WindowId, WindowRecord,
    },
    widgets::WidgetRegistry,
    window_manager::{cascade_rect, clamp_geometry, next_window_id, raise_window, remove_last_desktop},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_session`] to mutate [`SessionState`].
pub enum SessionAction {
    /// Open a new window of a registered widget type on the current desktop.
    OpenWindow {
        /// Registry key of the widget to host.
        widget_type: WidgetTypeId,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Make a window active and raise it to the top.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Flip a window's minimized flag.
    ToggleMinimize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Flip a window's maximized flag and focus it.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Shallow-merge configuration values into a window.
    Reconfigure {
        /// Window to reconfigure.
        window_id: WindowId,
        /// Keys to overwrite; other keys are kept.
        partial: ConfigValues,
    },
    /// Update any subset of a window's geometry.
    UpdateGeometry {
        /// Window to move or resize.
        window_id: WindowId,
        /// Fields to overwrite.
        patch: GeometryPatch,
    },
    /// Show another desktop.
    SwitchDesktop {
        /// Zero-based desktop index.
        desktop_id: u32,
    },
    /// Append an empty desktop.
    AddDesktop,
    /// Remove the last desktop, migrating its windows onto the new last desktop.
    RemoveDesktop,
    /// Replace the whole session with a snapshot.
    LoadSnapshot {
        /// Snapshot to restore.
        snapshot: SessionSnapshot,
    },
    /// Request an export of the current session.
    ExportSession,
    /// Request an import through the host file picker.
    ImportSession,
    /// Surface a failed export or import to the user.
    TransferFailed {
        /// Human-readable failure.
        message: String,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Begin resizing a window from its bottom-right handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End whichever gesture is active.
    EndGesture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_session`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Serialize the current session and hand it to the host as a download.
    ExportSnapshot,
    /// Ask the host for a session document and load it.
    PickImportDocument,
    /// Show a user-visible notice.
    Notify(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions whose preconditions fail.
pub enum ReducerError {
    /// `OpenWindow` named a widget type that is not registered.
    #[error("unknown widget type `{0}`")]
    UnknownWidget(String),
}

/// Applies a [`SessionAction`] to the session state and collects resulting side effects.
///
/// Per-window actions referencing a missing window are no-ops. Geometry is clamped to the
/// minimum window size instead of being rejected.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownWidget`] when `OpenWindow` names a widget type missing from
/// `registry`. State is untouched in that case.
pub fn reduce_session(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    registry: &WidgetRegistry,
    action: SessionAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        SessionAction::OpenWindow { widget_type } => {
            let definition = registry
                .get(&widget_type)
                .ok_or_else(|| ReducerError::UnknownWidget(widget_type.to_string()))?;
            let registration = &definition.registration;
            let window_id = next_window_id(state);
            let record = WindowRecord {
                id: window_id.clone(),
                widget_type,
                title: registration.display_name.clone(),
                rect: cascade_rect(state, registration.default_size),
                z_index: 0,
                desktop_id: state.current_desktop,
                is_minimized: false,
                is_maximized: false,
                config_values: registration.default_config.clone(),
            };
            state.windows.push(record);
            raise_window(state, &window_id);
        }
        SessionAction::CloseWindow { window_id } => {
            state.windows.retain(|w| w.id != window_id);
            if state.is_active(&window_id) {
                state.active_window_id = None;
            }
        }
        SessionAction::FocusWindow { window_id } => {
            raise_window(state, &window_id);
        }
        SessionAction::ToggleMinimize { window_id } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.is_minimized = !window.is_minimized;
            }
        }
        SessionAction::ToggleMaximize { window_id } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.is_maximized = !window.is_maximized;
                raise_window(state, &window_id);
            }
        }
        SessionAction::Reconfigure { window_id, partial } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.config_values.extend(partial);
            }
        }
        SessionAction::UpdateGeometry { window_id, patch } => {
            apply_geometry(state, &window_id, patch);
        }
        SessionAction::SwitchDesktop { desktop_id } => {
            if desktop_id < state.desktop_count {
                state.current_desktop = desktop_id;
            }
        }
        SessionAction::AddDesktop => {
            state.desktop_count = state.desktop_count.saturating_add(1);
        }
        SessionAction::RemoveDesktop => {
            remove_last_desktop(state);
        }
        SessionAction::LoadSnapshot { snapshot } => {
            *state = SessionState::from_snapshot(snapshot);
            interaction.gesture = PointerGesture::Idle;
        }
        SessionAction::ExportSession => {
            effects.push(RuntimeEffect::ExportSnapshot);
        }
        SessionAction::ImportSession => {
            effects.push(RuntimeEffect::PickImportDocument);
        }
        SessionAction::TransferFailed { message } => {
            effects.push(RuntimeEffect::Notify(message));
        }
        SessionAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.window(&window_id) else {
                return Ok(effects);
            };
            if window.is_maximized {
                return Ok(effects);
            }
            let rect_start = window.rect;
            if !state.is_active(&window_id) {
                raise_window(state, &window_id);
            }
            interaction.gesture = PointerGesture::Dragging(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        SessionAction::UpdateMove { pointer } => {
            if let PointerGesture::Dragging(session) = &interaction.gesture {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                let moved = session.rect_start.offset(dx, dy);
                apply_geometry(
                    state,
                    &session.window_id,
                    GeometryPatch::position(moved.x, moved.y),
                );
            }
        }
        SessionAction::BeginResize { window_id, pointer } => {
            let Some(window) = state.window(&window_id) else {
                return Ok(effects);
            };
            if window.is_maximized {
                return Ok(effects);
            }
            interaction.gesture = PointerGesture::Resizing(ResizeSession {
                window_id,
                pointer_start: pointer,
                rect_start: window.rect,
            });
        }
        SessionAction::UpdateResize { pointer } => {
            if let PointerGesture::Resizing(session) = &interaction.gesture {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                apply_geometry(
                    state,
                    &session.window_id,
                    GeometryPatch::size(
                        session.rect_start.w.saturating_add(dx),
                        session.rect_start.h.saturating_add(dy),
                    ),
                );
            }
        }
        SessionAction::EndGesture => {
            interaction.gesture = PointerGesture::Idle;
        }
    }

    Ok(effects)
}

fn apply_geometry(state: &mut SessionState, window_id: &WindowId, patch: GeometryPatch) {
    if let Some(window) = state.window_mut(window_id) {
        window.rect = clamp_geometry(window.rect.patched(patch));
    }
}
