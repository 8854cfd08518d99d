//! Web app manifest.
//!
//! The manifest is pure data derived from the [`BuildConfig`]: no I/O happens
//! here. Field order in the struct is the field order in the JSON.
//!
//! ```json
//! {
//!     "name": "My Game",
//!     "short_name": "mg",
//!     "start_url": "index.html",
//!     "display": "standalone",
//!     "theme_color": "white",
//!     "background_color": "white",
//!     "lang": "en-US",
//!     "icons": [
//!         { "src": "images/mg-icon-32.png", "sizes": "32x32", "type": "image/png" },
//!         ...
//!     ]
//! }
//! ```

use crate::config::BuildConfig;
use crate::imaging::IconFormat;
use crate::naming;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: String,
    pub theme_color: String,
    pub background_color: String,
    pub lang: String,
    pub icons: Vec<IconDescriptor>,
}

/// One entry of the manifest `icons` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconDescriptor {
    /// Relative path, e.g. `images/mg-icon-144.png`.
    pub src: String,
    /// `"{S}x{S}"`.
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl IconDescriptor {
    pub fn new(short_name: &str, size: u32) -> Self {
        Self {
            src: naming::icon_path(short_name, size),
            sizes: format!("{size}x{size}"),
            mime_type: IconFormat::Png.mime_type().to_string(),
        }
    }
}

/// Build the manifest for `config`, starting the app at `start_url`.
///
/// Icons follow the configured size list, which is kept ascending.
pub fn build_manifest(config: &BuildConfig, start_url: &str) -> Manifest {
    Manifest {
        name: config.name.clone(),
        short_name: config.short_name.clone(),
        start_url: start_url.to_string(),
        display: config.manifest.display.clone(),
        theme_color: config.manifest.theme_color.clone(),
        background_color: config.manifest.background_color.clone(),
        lang: config.manifest.lang.clone(),
        icons: config
            .icon_sizes
            .iter()
            .map(|&size| IconDescriptor::new(&config.short_name, size))
            .collect(),
    }
}

impl Manifest {
    /// Pretty JSON with 4-space indentation, fields in declaration order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// `data:` URL carrying the pretty JSON, for `<link rel="manifest">`.
    ///
    /// `%` and `#` are escaped; anything else is left readable.
    pub fn to_data_uri(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/manifest+json,{}",
            json.replace('%', "%25").replace('#', "%23")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BuildConfig {
        let mut config = BuildConfig::new("My Game", "export.html", "export.js");
        config.short_name = "mg".to_string();
        config
    }

    #[test]
    fn manifest_has_names_and_start_url() {
        let manifest = build_manifest(&config(), "index.html");
        assert_eq!(manifest.name, "My Game");
        assert_eq!(manifest.short_name, "mg");
        assert_eq!(manifest.start_url, "index.html");
        assert_eq!(manifest.display, "standalone");
        assert_eq!(manifest.lang, "en-US");
    }

    #[test]
    fn manifest_has_one_icon_per_size_ascending() {
        let manifest = build_manifest(&config(), "index.html");
        let sizes: Vec<&str> = manifest.icons.iter().map(|i| i.sizes.as_str()).collect();
        assert_eq!(
            sizes,
            [
                "32x32", "128x128", "144x144", "152x152", "167x167", "180x180", "192x192",
                "256x256", "512x512"
            ]
        );
        assert!(manifest.icons.iter().all(|i| i.mime_type == "image/png"));
        assert_eq!(manifest.icons[0].src, "images/mg-icon-32.png");
    }

    #[test]
    fn manifest_uses_configured_sizes() {
        let mut config = config();
        config.icon_sizes = vec![48, 96];
        let manifest = build_manifest(&config, "app.html");
        assert_eq!(manifest.icons.len(), 2);
        assert_eq!(manifest.icons[1].src, "images/mg-icon-96.png");
        assert_eq!(manifest.start_url, "app.html");
    }

    #[test]
    fn json_preserves_field_order() {
        let json = build_manifest(&config(), "index.html").to_json().unwrap();
        let keys = [
            "\"name\"",
            "\"short_name\"",
            "\"start_url\"",
            "\"display\"",
            "\"theme_color\"",
            "\"background_color\"",
            "\"lang\"",
            "\"icons\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn json_is_pretty_with_four_spaces() {
        let json = build_manifest(&config(), "index.html").to_json().unwrap();
        assert!(json.starts_with("{\n    \"name\": \"My Game\","));
        assert!(json.contains("\"type\": \"image/png\""));
    }

    #[test]
    fn json_parses_back() {
        let json = build_manifest(&config(), "index.html").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["short_name"], "mg");
        assert_eq!(value["icons"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn data_uri_escapes_hash() {
        let mut config = config();
        config.manifest.theme_color = "#1d2b53".to_string();
        let uri = build_manifest(&config, "index.html").to_data_uri().unwrap();
        assert!(uri.starts_with("data:application/manifest+json,{"));
        assert!(uri.contains("%231d2b53"));
        assert!(!uri.contains('#'));
    }

    #[test]
    fn build_is_deterministic() {
        let a = build_manifest(&config(), "index.html").to_json().unwrap();
        let b = build_manifest(&config(), "index.html").to_json().unwrap();
        assert_eq!(a, b);
    }
}
