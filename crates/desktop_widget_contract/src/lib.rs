//! Shared contract types between the desktop session runtime and pluggable widgets.
//!
//! A widget is a leaf component keyed by a [`WidgetTypeId`]. The runtime owns all window and
//! session state; widgets only receive the window's current configuration values and, when they
//! ship a config editor, a callback used to stage a full replacement configuration.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, View};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque option-name to value mapping owned by a window.
pub type ConfigValues = Map<String, Value>;

/// Identifier of a widget type in the runtime registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetTypeId(String);

impl WidgetTypeId {
    /// Returns a widget id when `raw` is a short lowercase token (`a-z`, `0-9`, `-`).
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_widget_type_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid widget type id `{raw}`; expected a lowercase token"
            ))
        }
    }

    /// Creates an id without validation.
    ///
    /// Used for ids read back from imported snapshots, which may reference widget types that are
    /// not registered in the running build.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WidgetTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_widget_type_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 32 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Default window size declared by a widget.
pub struct WidgetSize {
    /// Width in canvas units.
    pub w: i32,
    /// Height in canvas units.
    pub h: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Manifest-backed registration metadata for a widget type.
pub struct WidgetRegistration {
    /// Registry key.
    pub widget_id: WidgetTypeId,
    /// Human-readable name, used as the initial window title.
    pub display_name: String,
    /// Short glyph rendered in the launcher, taskbar, and title bar.
    pub icon: String,
    /// Size given to newly opened windows.
    pub default_size: WidgetSize,
    /// Configuration copied into every newly opened window.
    pub default_config: ConfigValues,
}

#[derive(Debug, Clone, PartialEq)]
/// Inputs handed to a widget's render function.
pub struct WidgetRenderContext {
    /// Window id rendering this widget, for DOM ids and labels.
    pub window_id: String,
    /// Current configuration values of the window.
    pub config: ConfigValues,
}

#[derive(Clone)]
/// Inputs handed to a widget's config editor.
pub struct ConfigEditorContext {
    /// Staged configuration being edited.
    pub config: ConfigValues,
    /// Replaces the staged configuration with a full new object.
    pub on_change: Callback<ConfigValues>,
}

impl ConfigEditorContext {
    /// Stages `config` with `key` replaced by `value`.
    pub fn stage(&self, key: &str, value: Value) {
        let mut next = self.config.clone();
        next.insert(key.to_string(), value);
        self.on_change.call(next);
    }
}

/// Widget render function signature.
pub type WidgetRenderFn = fn(WidgetRenderContext) -> View;
/// Widget config-editor function signature.
pub type ConfigEditorFn = fn(ConfigEditorContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Render capabilities of a widget type, dispatched by the runtime registry.
pub struct WidgetModule {
    render_fn: WidgetRenderFn,
    config_editor_fn: Option<ConfigEditorFn>,
}

impl WidgetModule {
    /// Creates a module from a render function.
    pub const fn new(render_fn: WidgetRenderFn) -> Self {
        Self {
            render_fn,
            config_editor_fn: None,
        }
    }

    /// Attaches a config editor to the module.
    pub const fn with_config_editor(mut self, config_editor_fn: ConfigEditorFn) -> Self {
        self.config_editor_fn = Some(config_editor_fn);
        self
    }

    /// Whether the widget ships a config editor.
    pub const fn has_config_editor(&self) -> bool {
        self.config_editor_fn.is_some()
    }

    /// Renders the widget body.
    pub fn render(self, context: WidgetRenderContext) -> View {
        (self.render_fn)(context)
    }

    /// Renders the config editor, if any.
    pub fn config_editor(self, context: ConfigEditorContext) -> Option<View> {
        self.config_editor_fn.map(|editor| editor(context))
    }
}

/// Reads a typed option from `config`, returning `None` when missing or of the wrong shape.
pub fn config_field<T: DeserializeOwned>(config: &ConfigValues, key: &str) -> Option<T> {
    config
        .get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Reads a typed option from `config`, falling back to `default`.
pub fn config_field_or<T: DeserializeOwned>(config: &ConfigValues, key: &str, default: T) -> T {
    config_field(config, key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn widget_type_id_requires_lowercase_token() {
        assert!(WidgetTypeId::new("clock").is_ok());
        assert!(WidgetTypeId::new("stats-2").is_ok());
        assert!(WidgetTypeId::new("").is_err());
        assert!(WidgetTypeId::new("Clock").is_err());
        assert!(WidgetTypeId::new("9lives").is_err());
        assert!(WidgetTypeId::new("notes-").is_err());
        assert!(WidgetTypeId::new("web.frame").is_err());
    }

    #[test]
    fn widget_type_id_serializes_as_plain_string() {
        let id = WidgetTypeId::trusted("notepad");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("notepad"));
        let back: WidgetTypeId = serde_json::from_value(json!("Legacy Widget")).unwrap();
        assert_eq!(back.as_str(), "Legacy Widget");
    }

    #[test]
    fn config_field_falls_back_on_missing_or_mistyped_values() {
        let config = json!({ "fontSize": 18, "text": 4 })
            .as_object()
            .cloned()
            .unwrap();

        assert_eq!(config_field::<u32>(&config, "fontSize"), Some(18));
        assert_eq!(config_field::<String>(&config, "text"), None);
        assert_eq!(
            config_field_or(&config, "backgroundColor", "#ffffff".to_string()),
            "#ffffff"
        );
    }
}
