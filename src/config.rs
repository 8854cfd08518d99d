//! Build configuration.
//!
//! A run is described by a single [`BuildConfig`], created once from the CLI
//! and never mutated afterwards. Everything that is not a per-run input (icon
//! sizes, colors, display mode, fallback text) lives in [`Settings`], which has
//! documented stock defaults and can be overridden by an optional TOML file:
//!
//! ```toml
//! # All keys are optional - defaults shown below
//!
//! [icons]
//! sizes = [32, 128, 144, 152, 167, 180, 192, 256, 512]
//! favicon = "png"              # "png" → favicon-32.png, "ico" → favicon.ico
//!
//! [manifest]
//! inline = false               # embed the manifest as a data URI in the HTML
//! display = "standalone"
//! theme_color = "white"
//! background_color = "white"
//! lang = "en-US"
//!
//! [html]
//! tile_color = "#FFFFFF"
//! status_bar_style = "black"
//! noscript_text = "This will be much more fun with JavaScript enabled."
//! ```
//!
//! Unknown keys are rejected to catch typos early. CLI flags win over the
//! file, and the file wins over the stock defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Icon sizes generated when nothing else is configured.
pub const DEFAULT_ICON_SIZES: [u32; 9] = [32, 128, 144, 152, 167, 180, 192, 256, 512];

/// Icons are rendered from a 1024px wide intermediate, so nothing larger makes sense.
pub const MAX_ICON_SIZE: u32 = 1024;

/// Output directory used when `--build` is not given.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// How the classic favicon is written next to the HTML.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FaviconStyle {
    /// `favicon-32.png`, linked as `image/png`.
    #[default]
    Png,
    /// `favicon.ico`, linked as `image/x-icon`.
    Ico,
}

/// Tunables loaded from the optional settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub icons: IconSettings,
    pub manifest: ManifestSettings,
    pub html: HtmlSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSettings {
    /// Square pixel sizes to generate under `images/`.
    pub sizes: Vec<u32>,
    pub favicon: FaviconStyle,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_ICON_SIZES.to_vec(),
            favicon: FaviconStyle::Png,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSettings {
    /// Embed the manifest as a data URI instead of writing `<short>.manifest`.
    pub inline: bool,
    pub display: String,
    pub theme_color: String,
    pub background_color: String,
    pub lang: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            inline: false,
            display: "standalone".to_string(),
            theme_color: "white".to_string(),
            background_color: "white".to_string(),
            lang: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlSettings {
    /// `msapplication-TileColor`.
    pub tile_color: String,
    /// `apple-mobile-web-app-status-bar-style`.
    pub status_bar_style: String,
    /// Body of the `<noscript>` fallback.
    pub noscript_text: String,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            tile_color: "#FFFFFF".to_string(),
            status_bar_style: "black".to_string(),
            noscript_text: "This will be much more fun with JavaScript enabled.".to_string(),
        }
    }
}

impl Settings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sizes(&self.icons.sizes)
    }
}

fn validate_sizes(sizes: &[u32]) -> Result<(), ConfigError> {
    if sizes.is_empty() {
        return Err(ConfigError::Validation(
            "icons.sizes must not be empty".into(),
        ));
    }
    if let Some(bad) = sizes.iter().find(|&&s| s == 0 || s > MAX_ICON_SIZE) {
        return Err(ConfigError::Validation(format!(
            "icon size {bad} is outside 1..={MAX_ICON_SIZE}"
        )));
    }
    Ok(())
}

/// Sort ascending and drop duplicates, so every size maps to exactly one file.
pub fn normalize_sizes(sizes: &[u32]) -> Vec<u32> {
    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Load and validate a settings file.
///
/// Missing keys fall back to the stock defaults; unknown keys are an error.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Everything one build needs to know.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Full project name: manifest `name` and the service worker cache name.
    pub name: String,
    /// Short name: manifest `short_name` and the stem of every generated filename.
    pub short_name: String,
    pub html: PathBuf,
    pub js: PathBuf,
    /// Source image for the icons; the built-in placeholder is used when absent.
    pub icon: Option<PathBuf>,
    pub build_dir: PathBuf,
    pub favicon: FaviconStyle,
    /// Also keep the untouched export as `original.html`.
    pub copy_original: bool,
    /// Page served as `index.html` in front of the game (which moves to `app.html`).
    pub index: Option<PathBuf>,
    /// Ascending, de-duplicated.
    pub icon_sizes: Vec<u32>,
    pub manifest: ManifestSettings,
    pub page: HtmlSettings,
}

impl BuildConfig {
    /// A config with stock settings; `short_name` defaults to `name`.
    pub fn new(name: impl Into<String>, html: impl Into<PathBuf>, js: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            name,
            html: html.into(),
            js: js.into(),
            icon: None,
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            favicon: FaviconStyle::default(),
            copy_original: false,
            index: None,
            icon_sizes: DEFAULT_ICON_SIZES.to_vec(),
            manifest: ManifestSettings::default(),
            page: HtmlSettings::default(),
        }
    }

    /// Take sizes, favicon style, manifest mode and colors from `settings`.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.icon_sizes = normalize_sizes(&settings.icons.sizes);
        self.favicon = settings.icons.favicon;
        self.manifest = settings.manifest;
        self.page = settings.html;
        self
    }

    /// `original.html` is written when asked for, and always in index mode:
    /// once `app.html` is the entry point nothing else links the original.
    pub fn copies_original(&self) -> bool {
        self.copy_original || self.index.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("project name must not be empty".into()));
        }
        if self.short_name.trim().is_empty() {
            return Err(ConfigError::Validation("short name must not be empty".into()));
        }
        if self.short_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "short name {:?} is used in filenames and must not contain path separators",
                self.short_name
            )));
        }
        validate_sizes(&self.icon_sizes)?;
        if self.icon_sizes != normalize_sizes(&self.icon_sizes) {
            return Err(ConfigError::Validation(
                "icon sizes must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings_match_stock_values() {
        let settings = Settings::default();
        assert_eq!(settings.icons.sizes, DEFAULT_ICON_SIZES.to_vec());
        assert_eq!(settings.icons.favicon, FaviconStyle::Png);
        assert!(!settings.manifest.inline);
        assert_eq!(settings.manifest.display, "standalone");
        assert_eq!(settings.manifest.theme_color, "white");
        assert_eq!(settings.manifest.lang, "en-US");
        assert_eq!(settings.html.tile_color, "#FFFFFF");
    }

    #[test]
    fn parse_partial_settings() {
        let toml = r##"
[manifest]
theme_color = "#1d2b53"
"##;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.manifest.theme_color, "#1d2b53");
        // Defaults preserved
        assert_eq!(settings.manifest.background_color, "white");
        assert_eq!(settings.icons.sizes, DEFAULT_ICON_SIZES.to_vec());
    }

    #[test]
    fn parse_favicon_style() {
        let settings: Settings = toml::from_str("[icons]\nfavicon = \"ico\"\n").unwrap();
        assert_eq!(settings.icons.favicon, FaviconStyle::Ico);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<Settings, _> = toml::from_str("[icons]\nsize = [32]\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<Settings, _> = toml::from_str("[colors]\nbg = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_empty_sizes() {
        let mut settings = Settings::default();
        settings.icons.sizes.clear();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_and_oversized() {
        let mut settings = Settings::default();
        settings.icons.sizes = vec![0, 32];
        assert!(settings.validate().is_err());
        settings.icons.sizes = vec![32, MAX_ICON_SIZE + 1];
        assert!(settings.validate().is_err());
        settings.icons.sizes = vec![32, MAX_ICON_SIZE];
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn normalize_sizes_sorts_and_dedups() {
        assert_eq!(normalize_sizes(&[512, 32, 192, 32]), vec![32, 192, 512]);
    }

    #[test]
    fn load_settings_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pwap8.toml");
        fs::write(&path, "[icons]\nsizes = [64, 16]\n\n[manifest]\ninline = true\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.icons.sizes, vec![64, 16]);
        assert!(settings.manifest.inline);
    }

    #[test]
    fn load_settings_missing_file_names_path() {
        let err = load_settings(Path::new("/nonexistent/pwap8.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pwap8.toml"));
    }

    #[test]
    fn load_settings_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pwap8.toml");
        fs::write(&path, "[icons\n").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn load_settings_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pwap8.toml");
        fs::write(&path, "[icons]\nsizes = []\n").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn short_name_defaults_to_name() {
        let config = BuildConfig::new("My Game", "export.html", "export.js");
        assert_eq!(config.short_name, "My Game");
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_settings_normalizes_sizes() {
        let mut settings = Settings::default();
        settings.icons.sizes = vec![256, 64, 64];
        settings.icons.favicon = FaviconStyle::Ico;
        settings.manifest.inline = true;

        let config = BuildConfig::new("g", "a.html", "a.js").with_settings(settings);
        assert_eq!(config.icon_sizes, vec![64, 256]);
        assert_eq!(config.favicon, FaviconStyle::Ico);
        assert!(config.manifest.inline);
    }

    #[test]
    fn index_mode_forces_original_copy() {
        let mut config = BuildConfig::new("g", "a.html", "a.js");
        assert!(!config.copies_original());
        config.index = Some(PathBuf::from("cookie.html"));
        assert!(config.copies_original());
    }

    #[test]
    fn validate_rejects_separator_in_short_name() {
        let mut config = BuildConfig::new("g", "a.html", "a.js");
        config.short_name = "../evil".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unsorted_sizes() {
        let mut config = BuildConfig::new("g", "a.html", "a.js");
        config.icon_sizes = vec![128, 32];
        assert!(config.validate().is_err());
    }
}
