//! Centralized output names.
//!
//! Every file the build writes is referenced from somewhere else: icon paths
//! appear in the manifest, the HTML and the service worker precache list; the
//! manifest and service worker are linked from the HTML. Building all of these
//! names here keeps the cross-references consistent.
//!
//! Relative paths are URL-style (forward slashes) regardless of platform.

/// Service worker script, registered by the page as `./sw.js`.
pub const SERVICE_WORKER: &str = "sw.js";

/// Subdirectory of the build dir holding the sized icons.
pub const IMAGES_DIR: &str = "images";

/// Default entry page.
pub const INDEX_HTML: &str = "index.html";

/// Entry page when a substitute `index.html` is placed in front of the game.
pub const APP_HTML: &str = "app.html";

/// Untouched copy of the exported HTML.
pub const ORIGINAL_HTML: &str = "original.html";

pub const FAVICON_PNG: &str = "favicon-32.png";
pub const FAVICON_ICO: &str = "favicon.ico";

/// Icon size referenced by `msapplication-TileImage`.
pub const TILE_ICON_SIZE: u32 = 144;

/// Icon size referenced by `apple-touch-icon`.
pub const TOUCH_ICON_SIZE: u32 = 167;

/// Filename of one sized icon: `mg-icon-32.png`.
///
/// Encodes both the short name and the size, so no two sizes collide.
pub fn icon_filename(short_name: &str, size: u32) -> String {
    format!("{short_name}-icon-{size}.png")
}

/// Relative path of one sized icon: `images/mg-icon-32.png`.
pub fn icon_path(short_name: &str, size: u32) -> String {
    format!("{IMAGES_DIR}/{}", icon_filename(short_name, size))
}

/// Standalone manifest filename: `mg.manifest`.
pub fn manifest_filename(short_name: &str) -> String {
    format!("{short_name}.manifest")
}

/// Entry filename for the augmented game page.
pub fn entry_filename(has_index_substitute: bool) -> &'static str {
    if has_index_substitute {
        APP_HTML
    } else {
        INDEX_HTML
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_filename_encodes_name_and_size() {
        assert_eq!(icon_filename("mg", 32), "mg-icon-32.png");
        assert_eq!(icon_filename("My Game", 512), "My Game-icon-512.png");
    }

    #[test]
    fn icon_path_is_under_images() {
        assert_eq!(icon_path("mg", 144), "images/mg-icon-144.png");
    }

    #[test]
    fn icon_names_differ_per_size() {
        assert_ne!(icon_path("mg", 128), icon_path("mg", 1280));
    }

    #[test]
    fn manifest_filename_uses_short_name() {
        assert_eq!(manifest_filename("mg"), "mg.manifest");
    }

    #[test]
    fn entry_filename_switches_in_index_mode() {
        assert_eq!(entry_filename(false), "index.html");
        assert_eq!(entry_filename(true), "app.html");
    }
}
