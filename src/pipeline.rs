//! Build orchestration.
//!
//! One linear pass, no step is revisited:
//!
//! ```text
//! resolve sources ─► create dirs ─► original.html ─► manifest ─► icons
//!        ─► service worker ─► augmented HTML ─► JS copy ─► index.html
//! ```
//!
//! Every name that one artifact uses to reference another comes from
//! [`naming`], and the precache list is built from the files this pass
//! actually writes, so manifest, HTML and service worker agree with the disk.
//!
//! The first failure aborts the build and is returned to the caller. Output
//! already written is left in place; a rerun overwrites it.

use crate::augment::{AugmentError, augment};
use crate::config::{BuildConfig, ConfigError, FaviconStyle};
use crate::dom::Document;
use crate::imaging::{IconError, IconFormat, IconSpec, load_source, make_icon, write_icon};
use crate::manifest::build_manifest;
use crate::naming;
use crate::service_worker::{CachedResourceList, build_service_worker};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Favicons are always rendered at this size.
pub const FAVICON_SIZE: u32 = 32;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {what} {}: {source}", .path.display())]
    Read {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{what} {} is not a file", .path.display())]
    NotAFile { what: &'static str, path: PathBuf },
    #[error("JS file {} has the same name as the generated {name}", .path.display())]
    NameClash { path: PathBuf, name: String },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy {what} {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        what: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Icon(#[from] IconError),
    #[error(transparent)]
    Augment(#[from] AugmentError),
}

/// Where the manifest ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutput {
    /// Written next to the HTML under this name.
    File(String),
    /// Embedded in the HTML as a `data:` URI.
    Inline,
}

/// What a build produced. Paths are relative to `build_dir` unless noted.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Absolute.
    pub build_dir: PathBuf,
    /// The augmented game page: `index.html`, or `app.html` in index mode.
    pub entry_file: String,
    pub manifest: ManifestOutput,
    /// Sized icons in ascending order, then the favicon.
    pub icons: Vec<IconSpec>,
    pub service_worker: String,
    pub cached: CachedResourceList,
    pub js_file: String,
    pub original: Option<String>,
    /// Absolute path of the file copied to `index.html`, in index mode.
    pub index_source: Option<PathBuf>,
}

/// Absolute, validated input paths.
#[derive(Debug)]
struct Sources {
    html: PathBuf,
    js: PathBuf,
    js_name: String,
    icon: Option<PathBuf>,
    index: Option<PathBuf>,
    build_dir: PathBuf,
}

/// Every icon the build writes: one per configured size, then the favicon.
pub fn icon_specs(config: &BuildConfig) -> Vec<IconSpec> {
    let mut specs: Vec<IconSpec> = config
        .icon_sizes
        .iter()
        .map(|&size| IconSpec {
            size,
            format: IconFormat::Png,
            rel_path: naming::icon_path(&config.short_name, size),
        })
        .collect();
    let (rel_path, format) = match config.favicon {
        FaviconStyle::Png => (naming::FAVICON_PNG, IconFormat::Png),
        FaviconStyle::Ico => (naming::FAVICON_ICO, IconFormat::Ico),
    };
    specs.push(IconSpec {
        size: FAVICON_SIZE,
        format,
        rel_path: rel_path.to_string(),
    });
    specs
}

/// Names the build writes at the top of the build directory.
///
/// Matched case-insensitively, since the build directory may live on a
/// case-insensitive filesystem.
pub fn reserved_names(config: &BuildConfig) -> Vec<String> {
    let mut names: Vec<String> = [
        naming::INDEX_HTML,
        naming::APP_HTML,
        naming::ORIGINAL_HTML,
        naming::SERVICE_WORKER,
        naming::IMAGES_DIR,
        naming::FAVICON_PNG,
        naming::FAVICON_ICO,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    names.push(naming::manifest_filename(&config.short_name));
    names
}

/// URLs the service worker precaches, in the order the files are created.
///
/// The manifest is listed only when it is written as a file.
pub fn cached_resources(
    entry_file: &str,
    js_file: &str,
    manifest: &ManifestOutput,
    icons: &[IconSpec],
) -> CachedResourceList {
    let mut cached = CachedResourceList::new();
    cached.push(entry_file);
    cached.push(js_file);
    cached.push(naming::SERVICE_WORKER);
    if let ManifestOutput::File(name) = manifest {
        cached.push(name.as_str());
    }
    for icon in icons {
        cached.push(icon.rel_path.as_str());
    }
    cached
}

/// Run the whole build described by `config`.
pub fn build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    config.validate()?;
    let sources = resolve_sources(config)?;
    let build_dir = sources.build_dir.as_path();

    let images_dir = build_dir.join(naming::IMAGES_DIR);
    fs::create_dir_all(&images_dir).map_err(|source| BuildError::CreateDir {
        path: images_dir.clone(),
        source,
    })?;

    let original = if config.copies_original() {
        copy_file(
            "source HTML",
            &sources.html,
            &build_dir.join(naming::ORIGINAL_HTML),
        )?;
        Some(naming::ORIGINAL_HTML.to_string())
    } else {
        None
    };

    let entry_file = naming::entry_filename(sources.index.is_some());

    let manifest = build_manifest(config, entry_file);
    let manifest_output = if config.manifest.inline {
        ManifestOutput::Inline
    } else {
        let name = naming::manifest_filename(&config.short_name);
        let json = manifest.to_json().map_err(|source| BuildError::Serialize {
            what: "manifest",
            source,
        })?;
        write_file(&build_dir.join(&name), &json)?;
        ManifestOutput::File(name)
    };

    let source_image = load_source(sources.icon.as_deref())?;
    let icons = icon_specs(config);
    for spec in &icons {
        let icon = make_icon(&source_image, spec.size);
        write_icon(&icon, &build_dir.join(&spec.rel_path), spec.format)?;
    }

    let cached = cached_resources(entry_file, &sources.js_name, &manifest_output, &icons);
    let sw = build_service_worker(&config.name, &cached).map_err(|source| {
        BuildError::Serialize {
            what: "service worker",
            source,
        }
    })?;
    write_file(&build_dir.join(naming::SERVICE_WORKER), &sw)?;

    let html = fs::read_to_string(&sources.html).map_err(|source| BuildError::Read {
        what: "source HTML",
        path: sources.html.clone(),
        source,
    })?;
    let mut doc = Document::parse(&html);
    augment(
        &mut doc,
        &manifest,
        &format!("./{}", naming::SERVICE_WORKER),
        config,
    )?;
    write_file(&build_dir.join(entry_file), &doc.to_pretty_html())?;

    copy_file("JS", &sources.js, &build_dir.join(&sources.js_name))?;

    if let Some(index) = &sources.index {
        copy_file("index page", index, &build_dir.join(naming::INDEX_HTML))?;
    }

    Ok(BuildReport {
        build_dir: sources.build_dir.clone(),
        entry_file: entry_file.to_string(),
        manifest: manifest_output,
        icons,
        service_worker: naming::SERVICE_WORKER.to_string(),
        cached,
        js_file: sources.js_name.clone(),
        original,
        index_source: sources.index.clone(),
    })
}

fn resolve_sources(config: &BuildConfig) -> Result<Sources, BuildError> {
    let html = require_file("source HTML", &config.html)?;
    let js = require_file("JS", &config.js)?;
    let js_name = js
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| BuildError::NotAFile {
            what: "JS",
            path: js.clone(),
        })?;
    if let Some(name) = reserved_names(config)
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case(&js_name))
    {
        return Err(BuildError::NameClash { path: js, name });
    }
    let icon = config
        .icon
        .as_deref()
        .map(|path| require_file("icon", path))
        .transpose()?;
    let index = config
        .index
        .as_deref()
        .map(|path| require_file("index page", path))
        .transpose()?;
    let build_dir = absolute("build directory", &config.build_dir)?;

    Ok(Sources {
        html,
        js,
        js_name,
        icon,
        index,
        build_dir,
    })
}

fn absolute(what: &'static str, path: &Path) -> Result<PathBuf, BuildError> {
    std::path::absolute(path).map_err(|source| BuildError::Read {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Absolutize `path` and check it is a file we can open.
fn require_file(what: &'static str, path: &Path) -> Result<PathBuf, BuildError> {
    let path = absolute(what, path)?;
    let read_err = |source| BuildError::Read {
        what,
        path: path.clone(),
        source,
    };
    let meta = fs::metadata(&path).map_err(read_err)?;
    if !meta.is_file() {
        return Err(BuildError::NotAFile { what, path });
    }
    fs::File::open(&path).map_err(read_err)?;
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_file(what: &'static str, from: &Path, to: &Path) -> Result<(), BuildError> {
    fs::copy(from, to).map_err(|source| BuildError::Copy {
        what,
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}
