//! Widget registry: manifest metadata joined with each widget crate's render module.

use std::sync::OnceLock;

use desktop_widget_contract::{WidgetModule, WidgetRegistration, WidgetRenderContext, WidgetTypeId};
use leptos::*;

use crate::model::WindowRecord;

include!(concat!(env!("OUT_DIR"), "/widget_catalog_generated.rs"));

#[derive(Debug, Clone)]
/// Registered widget type: manifest metadata plus render capabilities.
pub struct WidgetDefinition {
    pub registration: WidgetRegistration,
    pub module: WidgetModule,
}

impl WidgetDefinition {
    pub fn id(&self) -> &WidgetTypeId {
        &self.registration.widget_id
    }
}

#[derive(Debug, Clone, Default)]
/// Immutable lookup from widget type id to [`WidgetDefinition`].
pub struct WidgetRegistry {
    definitions: Vec<WidgetDefinition>,
}

impl WidgetRegistry {
    pub fn new(definitions: Vec<WidgetDefinition>) -> Self {
        Self { definitions }
    }

    /// Registry of the widgets compiled into this build, in launcher order.
    pub fn builtin() -> &'static WidgetRegistry {
        static REGISTRY: OnceLock<WidgetRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let registrations: Vec<WidgetRegistration> =
                serde_json::from_str(WIDGET_MANIFEST_CATALOG_JSON)
                    .expect("generated widget catalog should parse");
            let definitions = registrations
                .into_iter()
                .filter_map(|registration| {
                    let Some(module) = builtin_module(registration.widget_id.as_str()) else {
                        logging::warn!("no widget module for manifest `{}`", registration.widget_id);
                        return None;
                    };
                    Some(WidgetDefinition {
                        registration,
                        module,
                    })
                })
                .collect();
            WidgetRegistry::new(definitions)
        })
    }

    pub fn get(&self, widget_type: &WidgetTypeId) -> Option<&WidgetDefinition> {
        self.definitions.iter().find(|def| def.id() == widget_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.definitions.iter()
    }
}

fn builtin_module(widget_id: &str) -> Option<WidgetModule> {
    match widget_id {
        "clock" => Some(desktop_widget_clock::widget_module()),
        "notepad" => Some(desktop_widget_notepad::widget_module()),
        "browser" => Some(desktop_widget_browser::widget_module()),
        "stats" => Some(desktop_widget_stats::widget_module()),
        _ => None,
    }
}

/// Returns the glyph shown for a window's widget type, or a neutral one for unknown types.
pub fn widget_icon(registry: &WidgetRegistry, widget_type: &WidgetTypeId) -> String {
    registry
        .get(widget_type)
        .map(|def| def.registration.icon.clone())
        .unwrap_or_else(|| "❔".to_string())
}

/// Renders a window's widget body, falling back to a placeholder for unregistered types.
pub fn render_window_contents(registry: &WidgetRegistry, window: &WindowRecord) -> View {
    match registry.get(&window.widget_type) {
        Some(def) => def.module.render(WidgetRenderContext {
            window_id: window.id.to_string(),
            config: window.config_values.clone(),
        }),
        None => render_unknown_widget(&window.widget_type),
    }
}

fn render_unknown_widget(widget_type: &WidgetTypeId) -> View {
    view! {
        <div class="widget-unknown" role="status">
            <p>{format!("Unknown widget type: {widget_type}")}</p>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_registry_loads_all_manifests_in_launcher_order() {
        let ids: Vec<&str> = WidgetRegistry::builtin()
            .iter()
            .map(|def| def.id().as_str())
            .collect();
        assert_eq!(ids, vec!["clock", "notepad", "browser", "stats"]);
    }

    #[test]
    fn manifest_defaults_reach_the_registry() {
        let registry = WidgetRegistry::builtin();
        let clock = registry
            .get(&WidgetTypeId::trusted("clock"))
            .expect("clock registered");
        assert_eq!(clock.registration.display_name, "Clock");
        assert_eq!(clock.registration.default_size.w, 300);
        assert_eq!(clock.registration.default_size.h, 180);
        assert_eq!(
            clock.registration.default_config.get("showSeconds"),
            Some(&serde_json::Value::Bool(true))
        );
        assert!(clock.module.has_config_editor());
    }

    #[test]
    fn unknown_types_get_a_neutral_icon() {
        let registry = WidgetRegistry::builtin();
        assert_eq!(
            widget_icon(registry, &WidgetTypeId::trusted("weather")),
            "❔"
        );
        assert_eq!(widget_icon(registry, &WidgetTypeId::trusted("stats")), "📊");
    }
}
