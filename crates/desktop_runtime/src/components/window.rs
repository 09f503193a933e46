use super::*;
use crate::{
    model::WindowRecord,
    widgets::{render_window_contents, widget_icon},
    window_manager::TASKBAR_RESERVE_PX,
};
use desktop_widget_contract::{ConfigEditorContext, ConfigValues};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Focus request for a pointer press anywhere inside a frame, `None` when the window is already
/// active or gone.
pub(crate) fn frame_press_focus(
    state: &SessionState,
    window_id: &WindowId,
) -> Option<SessionAction> {
    (state.window(window_id).is_some() && !state.is_active(window_id)).then(|| {
        SessionAction::FocusWindow {
            window_id: window_id.clone(),
        }
    })
}

/// Inline placement for a frame. Maximized frames fill the canvas above the taskbar reserve and
/// ignore the stored geometry.
pub(crate) fn frame_style(win: &WindowRecord) -> String {
    if win.is_maximized {
        format!(
            "left:0;top:0;right:0;bottom:{TASKBAR_RESERVE_PX}px;z-index:{};",
            win.z_index
        )
    } else {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
            win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
        )
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.registry();
    let id = store_value(window_id);

    let window = Signal::derive(move || {
        runtime
            .state
            .with(|state| id.with_value(|id| state.window(id).cloned()))
    });
    let is_active = Signal::derive(move || {
        runtime
            .state
            .with(|state| id.with_value(|id| state.is_active(id)))
    });
    let is_minimized = create_memo(move |_| window.get().map(|w| w.is_minimized).unwrap_or(true));
    let staged_config = create_rw_signal(None::<ConfigValues>);

    let focus_if_inactive = move || {
        let action = runtime
            .state
            .with_untracked(|state| id.with_value(|id| frame_press_focus(state, id)));
        if let Some(action) = action {
            runtime.dispatch_action(action);
        }
    };
    let focus = move |_: web_sys::PointerEvent| focus_if_inactive();
    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(SessionAction::ToggleMinimize {
            window_id: id.get_value(),
        });
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(SessionAction::ToggleMaximize {
            window_id: id.get_value(),
        });
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(SessionAction::CloseWindow {
            window_id: id.get_value(),
        });
    };
    let open_settings = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        staged_config.set(window.get_untracked().map(|w| w.config_values));
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(SessionAction::BeginMove {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let begin_resize = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(SessionAction::BeginResize {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let title_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(SessionAction::ToggleMaximize {
            window_id: id.get_value(),
        });
    };
    // Control presses must not start a drag on the title bar, so they focus directly.
    let control_press = move |ev: web_sys::PointerEvent| {
        ev.stop_propagation();
        focus_if_inactive();
    };

    let has_config_editor = window
        .get_untracked()
        .and_then(|w| registry.get(&w.widget_type))
        .map(|def| def.module.has_config_editor())
        .unwrap_or(false);
    let icon = window
        .get_untracked()
        .map(|w| widget_icon(registry, &w.widget_type))
        .unwrap_or_default();
    let config_values = create_memo(move |_| window.get().map(|w| w.config_values));

    view! {
        <Show when=move || !is_minimized.get() fallback=|| ()>
            <section
                class=move || {
                    let win = window.get();
                    format!(
                        "desktop-window{}{}",
                        if is_active.get() { " focused" } else { "" },
                        if win.map(|w| w.is_maximized).unwrap_or(false) { " maximized" } else { "" },
                    )
                }
                style=move || window.get().map(|w| frame_style(&w)).unwrap_or_default()
                on:pointerdown=focus
                role="dialog"
                aria-label=move || window.get().map(|w| w.title).unwrap_or_default()
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move
                    on:dblclick=title_double_click
                >
                    <div class="titlebar-title">
                        <span class="titlebar-app-icon" aria-hidden="true">{icon.clone()}</span>
                        <span>{move || window.get().map(|w| w.title).unwrap_or_default()}</span>
                    </div>
                    <div class="titlebar-controls no-drag" on:pointerdown=control_press>
                        {has_config_editor
                            .then(|| {
                                view! {
                                    <button aria-label="Window settings" on:click=open_settings>
                                        "⚙"
                                    </button>
                                }
                            })}
                        <button aria-label="Minimize window" on:click=minimize>
                            "—"
                        </button>
                        <button
                            aria-label=move || {
                                if window.get().map(|w| w.is_maximized).unwrap_or(false) {
                                    "Restore window"
                                } else {
                                    "Maximize window"
                                }
                            }
                            on:click=toggle_maximize
                        >
                            "□"
                        </button>
                        <button class="close" aria-label="Close window" on:click=close>
                            "✕"
                        </button>
                    </div>
                </header>
                <div class="window-body">
                    {move || {
                        config_values
                            .get()
                            .and_then(|_| window.get_untracked())
                            .map(|win| render_window_contents(registry, &win))
                    }}
                </div>
                <Show
                    when=move || !window.get().map(|w| w.is_maximized).unwrap_or(true)
                    fallback=|| ()
                >
                    <div
                        class="window-resize-handle edge-se"
                        aria-hidden="true"
                        on:pointerdown=begin_resize
                    />
                </Show>
            </section>
        </Show>
        <WindowSettingsDialog window=window staged_config=staged_config />
    }
}

#[component]
fn WindowSettingsDialog(
    window: Signal<Option<WindowRecord>>,
    staged_config: RwSignal<Option<ConfigValues>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.registry();
    let on_change = Callback::new(move |next: ConfigValues| staged_config.set(Some(next)));

    let apply = move |_| {
        if let (Some(win), Some(staged)) = (window.get_untracked(), staged_config.get_untracked())
        {
            runtime.dispatch_action(SessionAction::Reconfigure {
                window_id: win.id,
                partial: staged,
            });
        }
        staged_config.set(None);
    };
    let cancel = move |_| staged_config.set(None);

    view! {
        <Show when=move || staged_config.get().is_some() fallback=|| ()>
            <div class="window-settings-backdrop">
                <div
                    class="window-settings-dialog"
                    role="dialog"
                    aria-modal="true"
                    aria-label="Window settings"
                >
                    <h2>
                        {move || {
                            window
                                .get()
                                .map(|w| format!("{} Settings", w.title))
                                .unwrap_or_default()
                        }}
                    </h2>
                    <div class="window-settings-body">
                        {move || {
                            let staged = staged_config.get()?;
                            let win = window.get_untracked()?;
                            registry.get(&win.widget_type)?.module.config_editor(
                                ConfigEditorContext {
                                    config: staged,
                                    on_change,
                                },
                            )
                        }}
                    </div>
                    <div class="window-settings-actions">
                        <button type="button" on:click=cancel>
                            "Cancel"
                        </button>
                        <button type="button" class="primary" on:click=apply>
                            "Apply"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use desktop_widget_contract::WidgetTypeId;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{InteractionState, PointerGesture, PointerPosition, WindowRect},
        reducer::reduce_session,
        widgets::WidgetRegistry,
    };

    fn record(is_maximized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId::from_sequence(1),
            widget_type: WidgetTypeId::trusted("clock"),
            title: "Clock".to_string(),
            rect: WindowRect {
                x: 50,
                y: 90,
                w: 300,
                h: 180,
            },
            z_index: 104,
            desktop_id: 0,
            is_minimized: false,
            is_maximized,
            config_values: Default::default(),
        }
    }

    #[test]
    fn frame_uses_stored_geometry_when_restored() {
        assert_eq!(
            frame_style(&record(false)),
            "left:50px;top:90px;width:300px;height:180px;z-index:104;"
        );
    }

    #[test]
    fn maximized_frame_fills_canvas_above_taskbar() {
        assert_eq!(
            frame_style(&record(true)),
            "left:0;top:0;right:0;bottom:80px;z-index:104;"
        );
    }

    #[test]
    fn pressing_title_bar_of_inactive_maximized_window_raises_it() {
        let mut state = SessionState::default();
        let mut interaction = InteractionState::default();
        let registry = WidgetRegistry::builtin();
        let mut apply = |state: &mut SessionState, action| {
            reduce_session(state, &mut interaction, registry, action).expect("reduce");
        };
        for widget in ["browser", "notepad"] {
            apply(
                &mut state,
                SessionAction::OpenWindow {
                    widget_type: WidgetTypeId::trusted(widget),
                },
            );
        }
        let maximized = state.windows[0].id.clone();
        let other = state.windows[1].id.clone();
        apply(
            &mut state,
            SessionAction::ToggleMaximize {
                window_id: maximized.clone(),
            },
        );
        apply(
            &mut state,
            SessionAction::FocusWindow {
                window_id: other.clone(),
            },
        );

        // Title-bar press: the move gesture is refused, then the frame handler runs.
        apply(
            &mut state,
            SessionAction::BeginMove {
                window_id: maximized.clone(),
                pointer: PointerPosition::default(),
            },
        );
        assert!(!state.is_active(&maximized));
        let focus = frame_press_focus(&state, &maximized).expect("inactive window gets focused");
        apply(&mut state, focus);

        assert!(state.is_active(&maximized));
        let z_of = |id: &WindowId| state.window(id).map(|w| w.z_index);
        assert!(z_of(&maximized) > z_of(&other));
        assert_eq!(frame_press_focus(&state, &maximized), None);
        assert_eq!(frame_press_focus(&state, &WindowId("gone".to_string())), None);
        assert_eq!(interaction.gesture, PointerGesture::Idle);
    }
}
