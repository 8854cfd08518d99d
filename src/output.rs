//! CLI output formatting.
//!
//! Output is grouped by artifact kind rather than by pipeline step, so the
//! report reads as an inventory of the build directory.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Project
//!     Name: My Game
//!     Short name: mg
//! Sources
//!     HTML: export.html
//!     JS: export.js
//!     Icon: built-in placeholder
//! Output
//!     Build dir: build
//!     Favicon: png
//!     Manifest: file
//! ```
//!
//! ## Report
//!
//! ```text
//! Manifest
//!     mg.manifest
//! Icons (10)
//!     32x32 images/mg-icon-32.png
//!     ...
//!     32x32 favicon-32.png
//! Service worker
//!     sw.js (14 cached URLs)
//! Pages
//!     index.html (augmented)
//! Assets
//!     export.js
//!
//! ==> Build complete: /abs/path/build
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::{BuildConfig, FaviconStyle};
use crate::imaging::IconFormat;
use crate::pipeline::{BuildReport, ManifestOutput};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Build plan
// ============================================================================

/// Format the inputs of a build before it runs.
pub fn format_build_plan(config: &BuildConfig) -> Vec<String> {
    let i = indent(1);
    let mut lines = vec![
        "Project".to_string(),
        format!("{i}Name: {}", config.name),
        format!("{i}Short name: {}", config.short_name),
        "Sources".to_string(),
        format!("{i}HTML: {}", display_path(&config.html)),
        format!("{i}JS: {}", display_path(&config.js)),
    ];
    match &config.icon {
        Some(icon) => lines.push(format!("{i}Icon: {}", display_path(icon))),
        None => lines.push(format!("{i}Icon: built-in placeholder")),
    }
    if let Some(index) = &config.index {
        lines.push(format!("{i}Index: {}", display_path(index)));
    }

    lines.push("Output".to_string());
    lines.push(format!("{i}Build dir: {}", display_path(&config.build_dir)));
    let favicon = match config.favicon {
        FaviconStyle::Png => "png",
        FaviconStyle::Ico => "ico",
    };
    lines.push(format!("{i}Favicon: {favicon}"));
    let manifest = if config.manifest.inline { "inline" } else { "file" };
    lines.push(format!("{i}Manifest: {manifest}"));
    if config.copies_original() {
        lines.push(format!("{i}Original: kept"));
    }
    lines
}

/// Print the build plan to stdout.
pub fn print_build_plan(config: &BuildConfig) {
    for line in format_build_plan(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build report
// ============================================================================

/// Format what a finished build wrote, ending with the completion marker.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let i = indent(1);
    let mut lines = vec!["Manifest".to_string()];
    match &report.manifest {
        ManifestOutput::File(name) => lines.push(format!("{i}{name}")),
        ManifestOutput::Inline => {
            lines.push(format!("{i}inline data URI in {}", report.entry_file))
        }
    }

    lines.push(format!("Icons ({})", report.icons.len()));
    for icon in &report.icons {
        let format = match icon.format {
            IconFormat::Png => "",
            IconFormat::Ico => " (ico)",
        };
        lines.push(format!(
            "{i}{size}x{size} {}{format}",
            icon.rel_path,
            size = icon.size
        ));
    }

    lines.push("Service worker".to_string());
    let count = report.cached.len();
    let noun = if count == 1 { "URL" } else { "URLs" };
    lines.push(format!(
        "{i}{} ({count} cached {noun})",
        report.service_worker
    ));

    lines.push("Pages".to_string());
    lines.push(format!("{i}{} (augmented)", report.entry_file));
    if let Some(original) = &report.original {
        lines.push(format!("{i}{original} (untouched copy)"));
    }
    if let Some(index) = &report.index_source {
        let name = index
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display_path(index));
        lines.push(format!("{i}{} (copy of {name})", crate::naming::INDEX_HTML));
    }

    lines.push("Assets".to_string());
    lines.push(format!("{i}{}", report.js_file));

    lines.push(String::new());
    lines.push(format!(
        "==> Build complete: {}",
        display_path(&report.build_dir)
    ));
    lines
}

/// Print the build report to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}
