//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container and the runtime effect queue. UI
//! composition stays in [`crate::components`].

use leptos::*;
use platform_host::HostServices;

use crate::{
    effect_executor,
    model::{InteractionState, SessionState},
    reducer::{reduce_session, RuntimeEffect, SessionAction},
    widgets::WidgetRegistry,
};

#[derive(Clone, Copy)]
/// Leptos context for reading session state and dispatching [`SessionAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle used to execute runtime side effects.
    pub host: StoredValue<HostServices>,
    /// Reactive session state signal.
    pub state: RwSignal<SessionState>,
    /// Reactive pointer gesture state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Latest user-visible notice, cleared when dismissed.
    pub notice: RwSignal<Option<String>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<SessionAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: SessionAction) {
        self.dispatch.call(action);
    }

    /// Widget registry backing this runtime.
    pub fn registry(&self) -> &'static WidgetRegistry {
        WidgetRegistry::builtin()
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(host_services);
    let state = create_rw_signal(SessionState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let notice = create_rw_signal(None::<String>);

    let dispatch = Callback::new(move |action: SessionAction| {
        let mut session = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_session = session.clone();
        let previous_ui = ui.clone();

        match reduce_session(&mut session, &mut ui, WidgetRegistry::builtin(), action) {
            Ok(new_effects) => {
                if session != previous_session {
                    state.set(session);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("session reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        notice,
        dispatch,
    };

    provide_context(runtime);
    logging::log!("desktop runtime started on {} host", host.get_value().host_name);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
