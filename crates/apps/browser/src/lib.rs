//! Web frame widget: an address bar over a sandboxed iframe.
//!
//! Navigation inside the frame is private widget state; only the configured start URL is part
//! of the window configuration.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_widget_contract::{
    config_field, ConfigEditorContext, ConfigValues, WidgetModule, WidgetRenderContext,
};
use leptos::*;
use serde_json::Value;

/// Start page used when a window has no usable `url` option.
pub const DEFAULT_URL: &str = "https://www.wikipedia.org";

/// Schemes the frame may navigate to, besides `about:blank`.
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Returns the scheme of `url` when it starts with one.
///
/// `host:port` forms such as `localhost:8080` are not schemes.
fn explicit_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once(':')?;
    let mut chars = scheme.chars();
    let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let port_follows = rest.starts_with(|c: char| c.is_ascii_digit());
    (well_formed && !port_follows).then_some(scheme)
}

/// Returns `raw` as a navigable URL, adding `https://` when no scheme is present.
///
/// Returns `None` for blank input and for schemes other than `http`, `https`, and
/// `about:blank`.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match explicit_scheme(trimmed) {
        None => Some(format!("https://{trimmed}")),
        Some(scheme) if ALLOWED_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) => {
            Some(trimmed.to_string())
        }
        Some(_) if trimmed.eq_ignore_ascii_case("about:blank") => Some("about:blank".to_string()),
        Some(_) => None,
    }
}

/// Reads the configured start URL.
pub fn start_url(config: &ConfigValues) -> String {
    config_field::<String>(config, "url")
        .and_then(|url| normalize_url(&url))
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

#[component]
/// Web frame window contents.
pub fn BrowserWidget(
    /// Current window configuration values.
    config: ConfigValues,
) -> impl IntoView {
    let initial = start_url(&config);
    let current_url = create_rw_signal(initial.clone());
    let input_url = create_rw_signal(initial);

    let go = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(url) = normalize_url(&input_url.get_untracked()) {
            input_url.set(url.clone());
            current_url.set(url);
        }
    };

    view! {
        <div class="widget-browser">
            <form class="widget-browser-bar no-drag" on:submit=go>
                <input
                    type="text"
                    placeholder="Enter URL"
                    prop:value=move || input_url.get()
                    on:input=move |ev| input_url.set(event_target_value(&ev))
                />
                <button type="submit" aria-label="Go">"↗"</button>
            </form>
            <iframe
                class="widget-browser-frame"
                src=move || current_url.get()
                title="browser"
                sandbox="allow-scripts allow-same-origin"
            />
        </div>
    }
}

#[component]
/// Web frame settings form operating on the staged configuration.
pub fn BrowserConfigEditor(
    /// Staged configuration and change callback.
    context: ConfigEditorContext,
) -> impl IntoView {
    let url = config_field::<String>(&context.config, "url").unwrap_or_default();
    let on_url = move |ev: ev::Event| context.stage("url", Value::String(event_target_value(&ev)));

    view! {
        <div class="widget-config widget-config-browser">
            <label>
                "Default URL"
                <input type="text" prop:value=url on:change=on_url />
            </label>
            <small>"Sets the starting URL for this window"</small>
        </div>
    }
}

fn render(context: WidgetRenderContext) -> View {
    view! { <BrowserWidget config=context.config /> }.into_view()
}

fn render_config_editor(context: ConfigEditorContext) -> View {
    view! { <BrowserConfigEditor context=context /> }.into_view()
}

/// Render capabilities registered for the `browser` widget type.
pub fn widget_module() -> WidgetModule {
    WidgetModule::new(render).with_config_editor(render_config_editor)
}
