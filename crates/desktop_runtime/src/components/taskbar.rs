use super::*;
use crate::{model::WindowRecord, widgets::widget_icon};

/// Actions for a click on a running-window entry: restore first when minimized, then focus.
pub(crate) fn taskbar_activation_actions(
    state: &SessionState,
    window_id: &WindowId,
) -> Vec<SessionAction> {
    let Some(win) = state.window(window_id) else {
        return Vec::new();
    };
    let mut actions = Vec::with_capacity(2);
    if win.is_minimized {
        actions.push(SessionAction::ToggleMinimize {
            window_id: window_id.clone(),
        });
    }
    actions.push(SessionAction::FocusWindow {
        window_id: window_id.clone(),
    });
    actions
}

fn taskbar_entry_is_active(state: &SessionState, win: &WindowRecord) -> bool {
    state.is_active(&win.id) && !win.is_minimized
}

fn taskbar_window_aria_label(win: &WindowRecord) -> String {
    if win.is_minimized {
        format!("{} (minimized)", win.title)
    } else {
        win.title.clone()
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let registry = runtime.registry();
    let launcher_open = create_rw_signal(false);
    let session_menu_open = create_rw_signal(false);

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() != "Escape" {
            return;
        }
        if launcher_open.get_untracked() || session_menu_open.get_untracked() {
            ev.prevent_default();
            launcher_open.set(false);
            session_menu_open.set(false);
        }
    });
    on_cleanup(move || escape_listener.remove());

    let launcher_items = registry
        .iter()
        .map(|def| {
            let widget_type = def.id().clone();
            let icon = def.registration.icon.clone();
            let name = def.registration.display_name.clone();
            view! {
                <li role="none">
                    <button
                        type="button"
                        role="menuitem"
                        on:click=move |_| {
                            launcher_open.set(false);
                            runtime.dispatch_action(SessionAction::OpenWindow {
                                widget_type: widget_type.clone(),
                            });
                        }
                    >
                        <span class="launcher-icon" aria-hidden="true">{icon}</span>
                        <span>{name}</span>
                    </button>
                </li>
            }
        })
        .collect_view();

    let desktop_buttons = move || {
        let session = state.get();
        (0..session.desktop_count)
            .map(|desktop_id| {
                let selected = desktop_id == session.current_desktop;
                view! {
                    <button
                        type="button"
                        class=if selected { "desktop-switch selected" } else { "desktop-switch" }
                        aria-pressed=selected.to_string()
                        aria-label=format!("Desktop {}", desktop_label(desktop_id))
                        on:click=move |_| {
                            runtime.dispatch_action(SessionAction::SwitchDesktop { desktop_id })
                        }
                    >
                        {desktop_label(desktop_id)}
                    </button>
                }
            })
            .collect_view()
    };

    let running_entries = move || {
        let session = state.get();
        let entries: Vec<_> = session.windows_on_current_desktop().cloned().collect();
        if entries.is_empty() {
            return view! { <span class="taskbar-empty">"Empty"</span> }.into_view();
        }
        entries
            .into_iter()
            .map(|win| {
                let active = taskbar_entry_is_active(&session, &win);
                let class = match (active, win.is_minimized) {
                    (true, _) => "taskbar-window active",
                    (false, true) => "taskbar-window minimized",
                    (false, false) => "taskbar-window",
                };
                let window_id = win.id.clone();
                view! {
                    <button
                        type="button"
                        class=class
                        title=win.title.clone()
                        aria-label=taskbar_window_aria_label(&win)
                        aria-pressed=active.to_string()
                        on:click=move |_| {
                            let actions = runtime
                                .state
                                .with_untracked(|session| taskbar_activation_actions(session, &window_id));
                            for action in actions {
                                runtime.dispatch_action(action);
                            }
                        }
                    >
                        {widget_icon(registry, &win.widget_type)}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <div class="taskbar-launcher">
                <button
                    type="button"
                    class=move || if launcher_open.get() { "launcher-button open" } else { "launcher-button" }
                    aria-haspopup="menu"
                    aria-expanded=move || launcher_open.get().to_string()
                    aria-label="Add widget"
                    on:click=move |_| {
                        session_menu_open.set(false);
                        launcher_open.update(|open| *open = !*open);
                    }
                >
                    "+"
                </button>
                <Show when=move || launcher_open.get() fallback=|| ()>
                    <div class="taskbar-menu" role="menu" aria-label="Widgets">
                        <p class="taskbar-menu-caption">
                            {move || format!("Add to Desktop {}", desktop_label(state.get().current_desktop))}
                        </p>
                        <ul role="none">{launcher_items.clone()}</ul>
                    </div>
                </Show>
            </div>

            <div class="desktop-switcher" role="group" aria-label="Desktops">
                <button
                    type="button"
                    aria-label="Remove last desktop"
                    disabled=move || state.get().desktop_count <= 1
                    on:click=move |_| runtime.dispatch_action(SessionAction::RemoveDesktop)
                >
                    "−"
                </button>
                {desktop_buttons}
                <button
                    type="button"
                    aria-label="Add desktop"
                    on:click=move |_| runtime.dispatch_action(SessionAction::AddDesktop)
                >
                    "+"
                </button>
            </div>

            <div class="taskbar-divider" aria-hidden="true"></div>

            <div class="taskbar-running" role="group" aria-label="Open windows">
                {running_entries}
            </div>

            <div class="taskbar-session">
                <button
                    type="button"
                    aria-haspopup="menu"
                    aria-expanded=move || session_menu_open.get().to_string()
                    aria-label="Session"
                    on:click=move |_| {
                        launcher_open.set(false);
                        session_menu_open.update(|open| *open = !*open);
                    }
                >
                    "⋯"
                </button>
                <Show when=move || session_menu_open.get() fallback=|| ()>
                    <div class="taskbar-menu" role="menu" aria-label="Session">
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| {
                                session_menu_open.set(false);
                                runtime.dispatch_action(SessionAction::ExportSession);
                            }
                        >
                            "Export session"
                        </button>
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| {
                                session_menu_open.set(false);
                                runtime.dispatch_action(SessionAction::ImportSession);
                            }
                        >
                            "Import session"
                        </button>
                    </div>
                </Show>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use desktop_widget_contract::WidgetTypeId;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::InteractionState, reducer::reduce_session, widgets::WidgetRegistry};

    fn open_two() -> (SessionState, WindowId, WindowId) {
        let mut state = SessionState::default();
        let mut interaction = InteractionState::default();
        for widget in ["clock", "notepad"] {
            reduce_session(
                &mut state,
                &mut interaction,
                WidgetRegistry::builtin(),
                SessionAction::OpenWindow {
                    widget_type: WidgetTypeId::trusted(widget),
                },
            )
            .expect("open");
        }
        let first = state.windows[0].id.clone();
        let second = state.windows[1].id.clone();
        (state, first, second)
    }

    #[test]
    fn clicking_minimized_entry_restores_then_focuses() {
        let (mut state, first, _) = open_two();
        state.window_mut(&first).unwrap().is_minimized = true;

        let actions = taskbar_activation_actions(&state, &first);
        assert_eq!(
            actions,
            vec![
                SessionAction::ToggleMinimize {
                    window_id: first.clone()
                },
                SessionAction::FocusWindow {
                    window_id: first.clone()
                },
            ]
        );

        let mut interaction = InteractionState::default();
        for action in actions {
            reduce_session(&mut state, &mut interaction, WidgetRegistry::builtin(), action)
                .expect("reduce");
        }
        let win = state.window(&first).unwrap();
        assert!(!win.is_minimized);
        assert!(taskbar_entry_is_active(&state, win));
    }

    #[test]
    fn clicking_visible_entry_only_focuses() {
        let (state, first, second) = open_two();
        assert_eq!(
            taskbar_activation_actions(&state, &first),
            vec![SessionAction::FocusWindow { window_id: first }]
        );
        assert!(taskbar_activation_actions(&state, &WindowId("gone".to_string())).is_empty());
        assert!(taskbar_entry_is_active(&state, state.window(&second).unwrap()));
    }

    #[test]
    fn minimized_active_window_is_not_highlighted() {
        let (mut state, _, second) = open_two();
        state.window_mut(&second).unwrap().is_minimized = true;
        let win = state.window(&second).unwrap();
        assert!(!taskbar_entry_is_active(&state, win));
        assert_eq!(taskbar_window_aria_label(win), "Notes (minimized)");
    }
}
