//! Icon imaging, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode source** | `image::ImageReader` with content sniffing |
//! | **Placeholder** | `base64` → raw 8×8 RGB |
//! | **Resize** | `image::imageops::resize` (Nearest or CatmullRom) |
//! | **Compose** | `image::imageops::replace` onto a transparent canvas |
//! | **Encode** | PNG, or ICO for `favicon.ico` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Formats, filters and the per-icon [`IconSpec`]
//! - **Forge**: Loading, rendering and writing icons

mod calculations;
pub mod forge;
mod params;

pub use calculations::{nearest_size, thumbnail_dimensions};
pub use forge::{IconError, load_source, make_icon, placeholder, write_icon};
pub use params::{IconFormat, IconSpec, Resample};
