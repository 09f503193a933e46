//! Notes widget: a sticky-note text area.
//!
//! Typing in the note edits private widget state only. The saved text, background, and font
//! size live in the window configuration and survive export/import; the config editor is the
//! way to commit note text into the session.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_widget_contract::{
    config_field_or, ConfigEditorContext, ConfigValues, WidgetModule, WidgetRenderContext,
};
use leptos::*;
use serde_json::Value;

/// Background colors offered by the config editor.
pub const BACKGROUND_PRESETS: [&str; 5] = ["#fff9c4", "#bbdefb", "#c8e6c9", "#f8bbd0", "#ffffff"];
/// Smallest selectable font size in px.
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest selectable font size in px.
pub const MAX_FONT_SIZE: u32 = 32;
const FONT_SIZE_STEP: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed view of a notes window's configuration values.
pub struct NoteConfig {
    /// CSS background color of the note.
    pub background_color: String,
    /// Font size in px, within [`MIN_FONT_SIZE`]..=[`MAX_FONT_SIZE`].
    pub font_size: u32,
    /// Saved note text used to seed the editor.
    pub text: String,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            background_color: "#fff9c4".to_string(),
            font_size: 16,
            text: String::new(),
        }
    }
}

impl NoteConfig {
    /// Reads the note options, falling back per field and clamping the font size.
    pub fn from_values(config: &ConfigValues) -> Self {
        let defaults = Self::default();
        Self {
            background_color: config_field_or(
                config,
                "backgroundColor",
                defaults.background_color,
            ),
            font_size: config_field_or(config, "fontSize", defaults.font_size)
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            text: config_field_or(config, "text", defaults.text),
        }
    }
}

/// Parses a font-size slider value, snapping to the slider step inside the allowed range.
pub fn parse_font_size(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<u32>().ok()?;
    let clamped = value.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    Some(clamped - (clamped - MIN_FONT_SIZE) % FONT_SIZE_STEP)
}

#[component]
/// Notes window contents.
pub fn NoteWidget(
    /// Current window configuration values.
    config: ConfigValues,
) -> impl IntoView {
    let config = NoteConfig::from_values(&config);
    let content = create_rw_signal(config.text.clone());
    let style = format!(
        "background:{};font-size:{}px;",
        config.background_color, config.font_size
    );

    view! {
        <textarea
            class="widget-notes"
            style=style
            placeholder="Type your notes here..."
            prop:value=move || content.get()
            on:input=move |ev| content.set(event_target_value(&ev))
        />
    }
}

#[component]
/// Notes settings form operating on the staged configuration.
pub fn NoteConfigEditor(
    /// Staged configuration and change callback.
    context: ConfigEditorContext,
) -> impl IntoView {
    let config = NoteConfig::from_values(&context.config);
    let swatches = BACKGROUND_PRESETS
        .iter()
        .map(|color| {
            let context = context.clone();
            let selected = config.background_color == *color;
            view! {
                <button
                    type="button"
                    class=if selected { "color-swatch selected" } else { "color-swatch" }
                    style=format!("background:{color};")
                    aria-label=format!("Background {color}")
                    aria-pressed=selected.to_string()
                    on:click=move |_| {
                        context.stage("backgroundColor", Value::String(color.to_string()))
                    }
                />
            }
        })
        .collect_view();
    let on_font_size = {
        let context = context.clone();
        move |ev: ev::Event| {
            if let Some(size) = parse_font_size(&event_target_value(&ev)) {
                context.stage("fontSize", Value::from(size));
            }
        }
    };
    let on_text = {
        let context = context.clone();
        move |ev: ev::Event| context.stage("text", Value::String(event_target_value(&ev)))
    };

    view! {
        <div class="widget-config widget-config-notes">
            <span class="widget-config-caption">"Background"</span>
            <div class="color-swatches">{swatches}</div>
            <label>
                {format!("Font Size: {}px", config.font_size)}
                <input
                    type="range"
                    min=MIN_FONT_SIZE
                    max=MAX_FONT_SIZE
                    step=FONT_SIZE_STEP
                    value=config.font_size
                    on:change=on_font_size
                />
            </label>
            <label>
                "Saved Text"
                <textarea rows="4" prop:value=config.text on:change=on_text />
            </label>
        </div>
    }
}

fn render(context: WidgetRenderContext) -> View {
    view! { <NoteWidget config=context.config /> }.into_view()
}

fn render_config_editor(context: ConfigEditorContext) -> View {
    view! { <NoteConfigEditor context=context /> }.into_view()
}

/// Render capabilities registered for the `notepad` widget type.
pub fn widget_module() -> WidgetModule {
    WidgetModule::new(render).with_config_editor(render_config_editor)
}
