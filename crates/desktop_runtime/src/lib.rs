//! Desktop session runtime: window/desktop state manager, widget registry, snapshot codec, and
//! the Leptos shell that renders it.

pub mod components;
mod effect_executor;
mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod widgets;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use persistence::{encode_snapshot, parse_snapshot, SnapshotError};
pub use reducer::{reduce_session, ReducerError, RuntimeEffect, SessionAction};
pub use widgets::{WidgetDefinition, WidgetRegistry};
