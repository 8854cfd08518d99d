//! Shared test utilities for the pwap8 test suite.
//!
//! Provides a trimmed-down PICO-8 web export and helpers that write it (and
//! small source images) into a temp directory.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = sample_config(tmp.path());
//! let report = build(&config).unwrap();
//! ```

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

// =========================================================================
// Fixture content
// =========================================================================

/// Shape of a PICO-8 HTML export: inline style, canvas, and inline script
/// that loads the cart JS.
pub const SAMPLE_EXPORT_HTML: &str = r##"<html><head>
<title>PICO-8 Cartridge</title>
<meta name="viewport" content="width=device-width, user-scalable=no">
<style type="text/css">
	.pico8_el { float: left; width: 92px; }
	canvas { image-rendering: pixelated; }
</style>
</head>
<body bgcolor="#222">
<div id="p8_container" style="margin:auto; width:512px;">
	<canvas class="emscripten" id="canvas" oncontextmenu="event.preventDefault()"></canvas>
	<pre id="p8_msg">  loading
   cart</pre>
</div>
<script type="text/javascript">
	var pico8_buttons = [0, 0, 0, 0, 0, 0, 0, 0];
	var Module = {};
	Module.canvas = document.getElementById("canvas");
	if (pico8_buttons.length < 8 && Module.canvas) { Module.arguments = []; }
</script>
<script async type="text/javascript" src="export.js"></script>
</body></html>
"##;

pub const SAMPLE_EXPORT_JS: &str = "var _cartdat=[0,1,2,3];\nfunction _p8_boot(){return _cartdat.length;}\n";

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `export.html` and `export.js` into `dir`.
pub fn write_export(dir: &Path) -> (PathBuf, PathBuf) {
    let html = dir.join("export.html");
    let js = dir.join("export.js");
    std::fs::write(&html, SAMPLE_EXPORT_HTML).unwrap();
    std::fs::write(&js, SAMPLE_EXPORT_JS).unwrap();
    (html, js)
}

/// Config for "My Game" / "mg" over a fresh export in `dir`, building into `dir/build`.
pub fn sample_config(dir: &Path) -> BuildConfig {
    let (html, js) = write_export(dir);
    let mut config = BuildConfig::new("My Game", html, js);
    config.short_name = "mg".to_string();
    config.build_dir = dir.join("build");
    config
}

/// Write a solid red `width`×`height` PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([255, 0, 0]))
        .save(path)
        .unwrap();
}
