//! Stats widget: a static load chart drawn as bars or columns.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_widget_contract::{
    config_field, ConfigEditorContext, ConfigValues, WidgetModule, WidgetRenderContext,
};
use leptos::*;
use serde_json::Value;

/// Sample load values drawn by the chart, in percent.
pub const SAMPLE_LOAD: [u32; 7] = [40, 70, 35, 60, 90, 50, 80];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Chart style selected by the `type` option.
pub enum ChartKind {
    /// Blue bars.
    #[default]
    Bar,
    /// Purple columns.
    Column,
}

impl ChartKind {
    /// Every selectable style, in menu order.
    pub const ALL: [Self; 2] = [Self::Bar, Self::Column];

    /// Reads the `type` option, treating unknown values as [`ChartKind::Bar`].
    pub fn from_values(config: &ConfigValues) -> Self {
        match config_field::<String>(config, "type").as_deref() {
            Some("column") => Self::Column,
            _ => Self::Bar,
        }
    }

    /// Value stored in the `type` option.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Column => "column",
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bar => "Blue Bars",
            Self::Column => "Purple Columns",
        }
    }

    /// Fill color of each bar.
    pub const fn fill(self) -> &'static str {
        match self {
            Self::Bar => "#2196f3",
            Self::Column => "#ab47bc",
        }
    }
}

#[component]
/// Stats window contents.
pub fn ChartWidget(
    /// Current window configuration values.
    config: ConfigValues,
) -> impl IntoView {
    let kind = ChartKind::from_values(&config);
    let bars = SAMPLE_LOAD
        .iter()
        .map(|load| {
            view! {
                <div
                    class="widget-stats-bar"
                    style=format!("height:{load}%;background:{};", kind.fill())
                />
            }
        })
        .collect_view();

    view! {
        <div class="widget-stats">
            <h3>"System Load"</h3>
            <div class="widget-stats-bars">{bars}</div>
            <code>"NODE: ALPHA-01"</code>
        </div>
    }
}

#[component]
/// Stats settings form operating on the staged configuration.
pub fn ChartConfigEditor(
    /// Staged configuration and change callback.
    context: ConfigEditorContext,
) -> impl IntoView {
    let selected = ChartKind::from_values(&context.config);
    let options = ChartKind::ALL
        .iter()
        .map(|kind| {
            view! {
                <option value=kind.token() selected=*kind == selected>
                    {kind.label()}
                </option>
            }
        })
        .collect_view();
    let on_kind = move |ev: ev::Event| context.stage("type", Value::String(event_target_value(&ev)));

    view! {
        <div class="widget-config widget-config-stats">
            <label>
                "Chart Type"
                <select on:change=on_kind>{options}</select>
            </label>
        </div>
    }
}

fn render(context: WidgetRenderContext) -> View {
    view! { <ChartWidget config=context.config /> }.into_view()
}

fn render_config_editor(context: ConfigEditorContext) -> View {
    view! { <ChartConfigEditor context=context /> }.into_view()
}

/// Render capabilities registered for the `stats` widget type.
pub fn widget_module() -> WidgetModule {
    WidgetModule::new(render).with_config_editor(render_config_editor)
}
