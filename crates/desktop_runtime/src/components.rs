//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod window;

use leptos::*;

use self::{taskbar::Taskbar, window::DesktopWindow};

use crate::{
    model::{PointerGesture, PointerPosition, SessionState, WindowId},
    reducer::SessionAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// 1-based desktop number shown in the watermark and the switcher.
pub(crate) fn desktop_label(desktop_id: u32) -> String {
    (desktop_id + 1).to_string()
}

fn current_desktop_window_ids(state: &SessionState) -> Vec<WindowId> {
    state
        .windows_on_current_desktop()
        .map(|w| w.id.clone())
        .collect()
}

#[component]
/// Renders the full desktop shell UI: windows of the current desktop, watermark, notices, and
/// the taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let notice = runtime.notice;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        match runtime.interaction.get_untracked().gesture {
            PointerGesture::Dragging(_) => {
                runtime.dispatch_action(SessionAction::UpdateMove { pointer })
            }
            PointerGesture::Resizing(_) => {
                runtime.dispatch_action(SessionAction::UpdateResize { pointer })
            }
            PointerGesture::Idle => {}
        }
    };
    let on_pointer_end = move |_: web_sys::PointerEvent| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-canvas">
                <div class="desktop-watermark" aria-hidden="true">
                    {move || desktop_label(state.get().current_desktop)}
                </div>
                <For
                    each=move || state.with(current_desktop_window_ids)
                    key=|window_id| window_id.0.clone()
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>

            <Show when=move || notice.get().is_some() fallback=|| ()>
                <div class="desktop-notice" role="alert">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                    <button
                        type="button"
                        aria-label="Dismiss notice"
                        on:click=move |_| notice.set(None)
                    >
                        "✕"
                    </button>
                </div>
            </Show>

            <Taskbar />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    if runtime.interaction.get_untracked().gesture != PointerGesture::Idle {
        runtime.dispatch_action(SessionAction::EndGesture);
    }
}

#[cfg(test)]
mod tests {
    use desktop_widget_contract::WidgetTypeId;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::InteractionState,
        reducer::reduce_session,
        widgets::WidgetRegistry,
    };

    #[test]
    fn canvas_lists_only_windows_of_the_current_desktop() {
        let mut state = SessionState::default();
        let mut interaction = InteractionState::default();
        let registry = WidgetRegistry::builtin();
        let mut apply = |state: &mut SessionState, action| {
            reduce_session(state, &mut interaction, registry, action).expect("reduce");
        };

        apply(
            &mut state,
            SessionAction::OpenWindow {
                widget_type: WidgetTypeId::trusted("clock"),
            },
        );
        apply(&mut state, SessionAction::AddDesktop);
        apply(&mut state, SessionAction::SwitchDesktop { desktop_id: 1 });
        apply(
            &mut state,
            SessionAction::OpenWindow {
                widget_type: WidgetTypeId::trusted("stats"),
            },
        );

        let visible = current_desktop_window_ids(&state);
        assert_eq!(visible, vec![state.windows[1].id.clone()]);
        assert_eq!(desktop_label(state.current_desktop), "2");
    }
}
