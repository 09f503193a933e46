//! Clock widget: a ticking time readout with 12/24-hour, seconds, and color options.
//!
//! The tick is private widget state. Only the options in [`ClockConfig`] round-trip through the
//! window's configuration values.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use desktop_widget_contract::{
    config_field_or, ConfigEditorContext, ConfigValues, WidgetModule, WidgetRenderContext,
};
use leptos::*;
use serde_json::Value;

/// Text colors offered by the config editor.
pub const COLOR_PRESETS: [&str; 5] = ["#333333", "#1976d2", "#e91e63", "#2e7d32", "#ff9800"];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed view of a clock window's configuration values.
pub struct ClockConfig {
    /// Render hours 00-23 instead of 12-hour with an AM/PM suffix.
    pub format24: bool,
    /// Append `:ss` to the readout.
    pub show_seconds: bool,
    /// CSS color of the readout.
    pub color: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format24: false,
            show_seconds: true,
            color: "#1976d2".to_string(),
        }
    }
}

impl ClockConfig {
    /// Reads the clock options, falling back per field on missing or mistyped values.
    pub fn from_values(config: &ConfigValues) -> Self {
        let defaults = Self::default();
        Self {
            format24: config_field_or(config, "format24", defaults.format24),
            show_seconds: config_field_or(config, "showSeconds", defaults.show_seconds),
            color: config_field_or(config, "color", defaults.color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Local wall-clock reading.
pub struct ClockReading {
    /// Day of week, `0` = Sunday.
    pub weekday: u32,
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Hour, `0..=23`.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
    /// Second.
    pub second: u32,
}

impl ClockReading {
    /// Reads the local time from the browser clock.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                weekday: date.get_day(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
                second: date.get_seconds(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                weekday: 4,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
            }
        }
    }
}

/// Formats the time readout, e.g. `01:05:09 PM` or `13:05`.
pub fn format_clock_time(reading: ClockReading, config: &ClockConfig) -> String {
    let (hour, suffix) = if config.format24 {
        (reading.hour, "")
    } else {
        let hour = match reading.hour % 12 {
            0 => 12,
            hour => hour,
        };
        (hour, if reading.hour >= 12 { " PM" } else { " AM" })
    };
    let seconds = if config.show_seconds {
        format!(":{:02}", reading.second)
    } else {
        String::new()
    };
    format!("{hour:02}:{:02}{seconds}{suffix}", reading.minute)
}

/// Formats the date line, e.g. `Monday, March 3`.
pub fn format_clock_date(reading: ClockReading) -> String {
    let weekday = WEEKDAYS
        .get(reading.weekday as usize)
        .copied()
        .unwrap_or_default();
    let month = MONTHS
        .get(reading.month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    format!("{weekday}, {month} {}", reading.day)
}

#[component]
/// Clock window contents.
pub fn ClockWidget(
    /// Current window configuration values.
    config: ConfigValues,
) -> impl IntoView {
    let config = ClockConfig::from_values(&config);
    let now = create_rw_signal(ClockReading::now());
    if let Ok(interval) =
        set_interval_with_handle(move || now.set(ClockReading::now()), Duration::from_secs(1))
    {
        on_cleanup(move || interval.clear());
    }
    let style = format!("color:{};", config.color);

    view! {
        <div class="widget-clock" style=style>
            <div class="widget-clock-time">{move || format_clock_time(now.get(), &config)}</div>
            <div class="widget-clock-date">{move || format_clock_date(now.get())}</div>
        </div>
    }
}

#[component]
/// Clock settings form operating on the staged configuration.
pub fn ClockConfigEditor(
    /// Staged configuration and change callback.
    context: ConfigEditorContext,
) -> impl IntoView {
    let config = ClockConfig::from_values(&context.config);
    let on_format24 = {
        let context = context.clone();
        move |ev: ev::Event| context.stage("format24", Value::Bool(event_target_checked(&ev)))
    };
    let on_seconds = {
        let context = context.clone();
        move |ev: ev::Event| context.stage("showSeconds", Value::Bool(event_target_checked(&ev)))
    };
    let swatches = COLOR_PRESETS
        .iter()
        .map(|color| {
            let context = context.clone();
            let selected = config.color == *color;
            view! {
                <button
                    type="button"
                    class=if selected { "color-swatch selected" } else { "color-swatch" }
                    style=format!("background:{color};")
                    aria-label=format!("Text color {color}")
                    aria-pressed=selected.to_string()
                    on:click=move |_| context.stage("color", Value::String(color.to_string()))
                />
            }
        })
        .collect_view();

    view! {
        <div class="widget-config widget-config-clock">
            <label>
                <input type="checkbox" checked=config.format24 on:change=on_format24 />
                "24 Hour Format"
            </label>
            <label>
                <input type="checkbox" checked=config.show_seconds on:change=on_seconds />
                "Show Seconds"
            </label>
            <span class="widget-config-caption">"Text Color"</span>
            <div class="color-swatches">{swatches}</div>
        </div>
    }
}

fn render(context: WidgetRenderContext) -> View {
    view! { <ClockWidget config=context.config /> }.into_view()
}

fn render_config_editor(context: ConfigEditorContext) -> View {
    view! { <ClockConfigEditor context=context /> }.into_view()
}

/// Render capabilities registered for the `clock` widget type.
pub fn widget_module() -> WidgetModule {
    WidgetModule::new(render).with_config_editor(render_config_editor)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn reading(hour: u32, minute: u32, second: u32) -> ClockReading {
        ClockReading {
            weekday: 1,
            month: 3,
            day: 3,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn twelve_hour_readout_wraps_midnight_and_noon() {
        let config = ClockConfig::default();
        assert_eq!(format_clock_time(reading(0, 7, 2), &config), "12:07:02 AM");
        assert_eq!(format_clock_time(reading(12, 0, 0), &config), "12:00:00 PM");
        assert_eq!(format_clock_time(reading(13, 5, 9), &config), "01:05:09 PM");
    }

    #[test]
    fn twenty_four_hour_readout_can_hide_seconds() {
        let config = ClockConfig {
            format24: true,
            show_seconds: false,
            ..ClockConfig::default()
        };
        assert_eq!(format_clock_time(reading(13, 5, 9), &config), "13:05");
    }

    #[test]
    fn date_line_names_weekday_and_month() {
        assert_eq!(format_clock_date(reading(9, 0, 0)), "Monday, March 3");
    }

    #[test]
    fn config_falls_back_per_field() {
        let values = json!({ "format24": true, "showSeconds": "yes" })
            .as_object()
            .cloned()
            .unwrap();
        let config = ClockConfig::from_values(&values);
        assert!(config.format24);
        assert!(config.show_seconds);
        assert_eq!(config.color, "#1976d2");
    }
}
