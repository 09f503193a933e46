use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const WIDGET_CRATE_DIRS: [&str; 4] = ["clock", "notepad", "browser", "stats"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefaultSize {
    w: i32,
    h: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WidgetManifest {
    #[serde(skip_serializing)]
    schema_version: u32,
    widget_id: String,
    display_name: String,
    icon: String,
    default_size: DefaultSize,
    #[serde(default)]
    default_config: serde_json::Map<String, serde_json::Value>,
}

fn widget_manifest_paths(root: &Path) -> Vec<PathBuf> {
    WIDGET_CRATE_DIRS
        .iter()
        .map(|name| {
            root.join("..")
                .join("apps")
                .join(name)
                .join("widget.manifest.toml")
        })
        .collect()
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<WidgetManifest>::new();
    let mut seen = BTreeSet::new();

    for path in widget_manifest_paths(&crate_root) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: WidgetManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        if manifest.schema_version != 1 {
            panic!(
                "manifest schema mismatch in {}: expected 1 found {}",
                path.display(),
                manifest.schema_version
            );
        }
        if manifest.default_size.w < 200 || manifest.default_size.h < 150 {
            panic!(
                "default size in {} is below the 200x150 window floor",
                path.display()
            );
        }
        if !seen.insert(manifest.widget_id.clone()) {
            panic!(
                "duplicate widget id `{}` in {}",
                manifest.widget_id,
                path.display()
            );
        }
        manifests.push(manifest);
    }

    let json = serde_json::to_string_pretty(&manifests).expect("serialize widget catalog");
    let generated = format!(
        "/// Build-time generated widget manifest catalog JSON.\n\
pub const WIDGET_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("widget_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
