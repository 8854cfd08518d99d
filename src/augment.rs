//! PWA markup for the exported page.
//!
//! Augmentation is purely additive: elements are appended to the end of
//! `<head>` and `<body>`, nothing from the export is removed or rewritten.
//!
//! `<head>` gains, in order:
//!
//! | Element | Value |
//! |---|---|
//! | comment | marks the file as generated |
//! | `meta theme-color` | manifest theme color |
//! | `meta apple-mobile-web-app-capable` | `yes` |
//! | `meta apple-mobile-web-app-status-bar-style` | configured style |
//! | `meta apple-mobile-web-app-title` | the page `<title>`, empty if there is none |
//! | `meta msapplication-TileImage` | icon nearest 144px |
//! | `meta msapplication-TileColor` | configured color |
//! | `link apple-touch-icon` | icon nearest 167px |
//! | `link icon` | `favicon-32.png` or `favicon.ico` |
//! | `link manifest` | `<short>.manifest`, or a `data:` URI when inlined |
//!
//! `<body>` gains a `<noscript>` fallback and a script that registers the
//! service worker once the page has loaded, if the browser supports it.

use crate::config::{BuildConfig, FaviconStyle};
use crate::dom::{Document, Element, Node};
use crate::imaging::{IconFormat, nearest_size};
use crate::manifest::Manifest;
use crate::naming;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AugmentError {
    #[error("document has no <{0}> element")]
    MissingElement(&'static str),
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub const GENERATED_MARKER: &str = " PWA elements added by pwap8 ";

/// Add manifest, icon and service worker references to `doc`.
///
/// `sw_url` is the URL the page registers, relative to the page.
pub fn augment(
    doc: &mut Document,
    manifest: &Manifest,
    sw_url: &str,
    config: &BuildConfig,
) -> Result<(), AugmentError> {
    let head_nodes = head_nodes(doc.title().unwrap_or_default(), manifest, config)?;
    let body_nodes = body_nodes(sw_url, config);

    let head = doc
        .find_mut("head")
        .ok_or(AugmentError::MissingElement("head"))?;
    head.children.extend(head_nodes);

    let body = doc
        .find_mut("body")
        .ok_or(AugmentError::MissingElement("body"))?;
    body.children.extend(body_nodes);
    Ok(())
}

fn meta(name: &str, content: impl Into<String>) -> Node {
    Element::new("meta")
        .with_attr("name", name)
        .with_attr("content", content)
        .into()
}

fn head_nodes(
    title: String,
    manifest: &Manifest,
    config: &BuildConfig,
) -> Result<Vec<Node>, AugmentError> {
    let short = config.short_name.as_str();
    let icon_near = |target| {
        let size = nearest_size(&config.icon_sizes, target).unwrap_or(target);
        naming::icon_path(short, size)
    };

    let (favicon_href, favicon_format) = match config.favicon {
        FaviconStyle::Png => (naming::FAVICON_PNG, IconFormat::Png),
        FaviconStyle::Ico => (naming::FAVICON_ICO, IconFormat::Ico),
    };

    let manifest_href = if config.manifest.inline {
        manifest.to_data_uri()?
    } else {
        naming::manifest_filename(short)
    };

    Ok(vec![
        Node::comment(GENERATED_MARKER),
        meta("theme-color", config.manifest.theme_color.as_str()),
        meta("apple-mobile-web-app-capable", "yes"),
        meta(
            "apple-mobile-web-app-status-bar-style",
            config.page.status_bar_style.as_str(),
        ),
        meta("apple-mobile-web-app-title", title),
        meta("msapplication-TileImage", icon_near(naming::TILE_ICON_SIZE)),
        meta("msapplication-TileColor", config.page.tile_color.as_str()),
        Element::new("link")
            .with_attr("rel", "apple-touch-icon")
            .with_attr("href", icon_near(naming::TOUCH_ICON_SIZE))
            .into(),
        Element::new("link")
            .with_attr("rel", "icon")
            .with_attr("href", favicon_href)
            .with_attr("type", favicon_format.mime_type())
            .into(),
        Element::new("link")
            .with_attr("rel", "manifest")
            .with_attr("href", manifest_href)
            .into(),
    ])
}

fn body_nodes(sw_url: &str, config: &BuildConfig) -> Vec<Node> {
    vec![
        Element::new("noscript")
            .with_text(config.page.noscript_text.as_str())
            .into(),
        Element::new("script")
            .with_attr("type", "text/javascript")
            .with_text(registration_script(sw_url))
            .into(),
    ]
}

fn registration_script(sw_url: &str) -> String {
    format!(
        "window.addEventListener('load', function() {{\n  'use strict';\n  if ('serviceWorker' in navigator) {{\n    navigator.serviceWorker.register('{sw_url}');\n  }}\n}});"
    )
}
