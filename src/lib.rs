//! # pwap8
//!
//! Turns a PICO-8 web export (one `.html`, one `.js`) into an installable,
//! offline-capable Progressive Web App.
//!
//! # Architecture: One Linear Build
//!
//! A single [`pipeline::build`] call takes a [`config::BuildConfig`] and writes
//! the build directory:
//!
//! ```text
//! export.html ──parse──► dom::Document ──augment──► index.html
//!                                          ▲
//! BuildConfig ──► manifest ──► mg.manifest ┤
//!             ──► icons ────► images/*.png ┤
//!             ──► precache list ──► sw.js ─┘
//! export.js ──────────────────────────────────────► export.js
//! ```
//!
//! Every output references other outputs by name: the manifest lists the
//! icons, the HTML links the manifest, icons and service worker, and the
//! service worker precaches all of them. Those names are produced in one
//! place ([`naming`]) and the precache list is derived from what the build
//! actually writes, so the cross-references cannot drift apart.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `BuildConfig`, the optional TOML settings file, validation |
//! | [`naming`] | Every output filename and relative URL |
//! | [`imaging`] | Icon rendering: placeholder, two-step resize, PNG/ICO encoding |
//! | [`manifest`] | Web app manifest as JSON or `data:` URI |
//! | [`service_worker`] | Precache list and the service worker script |
//! | [`dom`] | Owned HTML tree: parse, query, append, pretty-print |
//! | [`augment`] | Adds PWA meta/link tags and the registration script to a page |
//! | [`pipeline`] | The build itself, returning a [`pipeline::BuildReport`] |
//! | [`output`] | CLI output formatting for the plan and the report |
//!
//! # Design Decisions
//!
//! ## Additive HTML Changes Only
//!
//! PICO-8 exports are hand-tuned pages with inline styles and scripts. The
//! augmenter only appends to `<head>` and `<body>`; nothing in the export is
//! removed or rewritten, and script/style bodies are written back verbatim.
//!
//! ## Pixel Art Stays Sharp
//!
//! PICO-8 carts are 128×128 and label images are often tiny. Sources narrower
//! than 64px are resized with nearest-neighbour so icons keep hard pixel
//! edges; larger sources use a bicubic-class filter.
//!
//! ## Unversioned Cache
//!
//! The service worker caches under the project name. A browser that already
//! installed it keeps serving cached files after a rebuild until the cache is
//! cleared.

pub mod augment;
pub mod config;
pub mod dom;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod service_worker;

#[cfg(test)]
pub(crate) mod test_helpers;
