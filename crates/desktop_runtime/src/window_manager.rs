//! Shared window-manager transition helpers used by the session reducer.

use desktop_widget_contract::WidgetSize;
use platform_host::next_monotonic_timestamp_ms;

use crate::model::{SessionState, WindowId, WindowRect, Z_INDEX_BASELINE};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 200;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 150;
/// Position of the first window opened on an empty desktop.
pub const CASCADE_ORIGIN: i32 = 50;
/// Offset between consecutive windows opened on the same desktop.
pub const CASCADE_STEP: i32 = 40;
/// Vertical space kept free for the taskbar below maximized windows.
pub const TASKBAR_RESERVE_PX: i32 = 80;

/// Clamps a rectangle to the minimum window size.
pub fn clamp_geometry(rect: WindowRect) -> WindowRect {
    rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

/// Returns the cascaded placement for a new window of `size` on the current desktop.
pub fn cascade_rect(state: &SessionState, size: WidgetSize) -> WindowRect {
    let open_here = i32::try_from(state.windows_on_current_desktop().count()).unwrap_or(i32::MAX);
    let offset = CASCADE_STEP
        .saturating_mul(open_here)
        .saturating_add(CASCADE_ORIGIN);
    clamp_geometry(WindowRect {
        x: offset,
        y: offset,
        w: size.w,
        h: size.h,
    })
}

/// Allocates a window id that is unused in `state` and never issued before in this process.
pub fn next_window_id(state: &SessionState) -> WindowId {
    let highest_existing = state.windows.iter().filter_map(|w| w.id.sequence()).max();
    let mut seq = next_monotonic_timestamp_ms();
    if let Some(highest) = highest_existing {
        seq = seq.max(highest.saturating_add(1));
    }
    let mut id = WindowId::from_sequence(seq);
    while state.window(&id).is_some() {
        seq = seq.saturating_add(1);
        id = WindowId::from_sequence(seq);
    }
    id
}

/// Makes `window_id` active and raises it above every previously assigned z-index.
///
/// When the counter has no headroom left, existing z-indices are first renumbered by stacking
/// rank from [`Z_INDEX_BASELINE`]. Returns `false` without touching state when the window does
/// not exist.
pub fn raise_window(state: &mut SessionState, window_id: &WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    if state.next_z_index == u32::MAX {
        compact_z_order(state);
    }
    let z_index = state.next_z_index;
    if let Some(window) = state.window_mut(window_id) {
        window.z_index = z_index;
    }
    state.next_z_index = z_index.saturating_add(1);
    state.active_window_id = Some(window_id.clone());
    true
}

/// Renumbers z-indices to `Z_INDEX_BASELINE + rank`, keeping the relative stacking order.
pub fn compact_z_order(state: &mut SessionState) {
    let mut order: Vec<usize> = (0..state.windows.len()).collect();
    order.sort_by_key(|&index| state.windows[index].z_index);
    let mut next = Z_INDEX_BASELINE;
    for index in order {
        state.windows[index].z_index = next;
        next = next.saturating_add(1);
    }
    state.next_z_index = next;
}

/// Removes the highest-numbered desktop, moving its windows onto the new last desktop.
///
/// Returns `false` when only one desktop remains.
pub fn remove_last_desktop(state: &mut SessionState) -> bool {
    if state.desktop_count <= 1 {
        return false;
    }
    let last_remaining = state.desktop_count - 2;
    for window in &mut state.windows {
        if window.desktop_id > last_remaining {
            window.desktop_id = last_remaining;
        }
    }
    state.desktop_count -= 1;
    state.current_desktop = state.current_desktop.min(last_remaining);
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRecord;

    #[test]
    fn generated_ids_skip_past_existing_sequences() {
        let mut state = SessionState::default();
        let far_future = u64::MAX / 2;
        state.windows.push(WindowRecord {
            id: WindowId::from_sequence(far_future),
            widget_type: desktop_widget_contract::WidgetTypeId::trusted("clock"),
            title: "Clock".to_string(),
            rect: WindowRect {
                x: 0,
                y: 0,
                w: 300,
                h: 180,
            },
            z_index: 100,
            desktop_id: 0,
            is_minimized: false,
            is_maximized: false,
            config_values: Default::default(),
        });

        assert_eq!(next_window_id(&state).sequence(), Some(far_future + 1));
    }

    #[test]
    fn cascade_respects_minimum_size() {
        let state = SessionState::default();
        assert_eq!(
            cascade_rect(&state, WidgetSize { w: 10, h: 10 }),
            WindowRect {
                x: CASCADE_ORIGIN,
                y: CASCADE_ORIGIN,
                w: MIN_WINDOW_WIDTH,
                h: MIN_WINDOW_HEIGHT,
            }
        );
    }

    fn record(seq: u64, z_index: u32) -> WindowRecord {
        WindowRecord {
            id: WindowId::from_sequence(seq),
            widget_type: desktop_widget_contract::WidgetTypeId::trusted("clock"),
            title: "Clock".to_string(),
            rect: WindowRect {
                x: 0,
                y: 0,
                w: 300,
                h: 180,
            },
            z_index,
            desktop_id: 0,
            is_minimized: false,
            is_maximized: false,
            config_values: Default::default(),
        }
    }

    #[test]
    fn exhausted_counter_renumbers_by_stacking_rank() {
        let mut state = SessionState {
            windows: vec![record(1, u32::MAX - 1), record(2, u32::MAX - 2), record(3, 7)],
            next_z_index: u32::MAX,
            ..SessionState::default()
        };
        let first = WindowId::from_sequence(1);
        let second = WindowId::from_sequence(2);

        assert!(raise_window(&mut state, &second));
        let z_of = |state: &SessionState, seq| {
            state.window(&WindowId::from_sequence(seq)).map(|w| w.z_index)
        };
        assert_eq!(z_of(&state, 3), Some(Z_INDEX_BASELINE));
        assert_eq!(z_of(&state, 1), Some(Z_INDEX_BASELINE + 2));
        assert_eq!(z_of(&state, 2), Some(Z_INDEX_BASELINE + 3));
        assert_eq!(state.next_z_index, Z_INDEX_BASELINE + 4);

        assert!(raise_window(&mut state, &first));
        assert!(z_of(&state, 1) > z_of(&state, 2));
        assert!(state.windows.iter().all(|w| w.z_index < state.next_z_index));
    }

    #[test]
    fn cascade_steps_once_per_window_on_current_desktop() {
        let state = SessionState {
            windows: (0..3).map(|seq| record(seq, 100 + seq as u32)).collect(),
            next_z_index: 103,
            ..SessionState::default()
        };
        let rect = cascade_rect(&state, WidgetSize { w: 300, h: 180 });
        assert_eq!(rect.x, CASCADE_ORIGIN + 3 * CASCADE_STEP);
    }

    #[test]
    fn raising_missing_window_leaves_counter_alone() {
        let mut state = SessionState::default();
        assert!(!raise_window(&mut state, &WindowId::from_sequence(1)));
        assert_eq!(state.next_z_index, Z_INDEX_BASELINE);
    }
}
