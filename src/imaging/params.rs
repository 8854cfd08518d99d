//! Parameter types for icon rendering.
//!
//! These describe *what* to produce; [`forge`](super::forge) does the pixel
//! work and [`calculations`](super::calculations) the dimension math.

use super::calculations::PIXEL_ART_WIDTH;
use image::ImageFormat;
use image::imageops::FilterType;

/// Encoding of a written icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Png,
    Ico,
}

impl IconFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            IconFormat::Png => ImageFormat::Png,
            IconFormat::Ico => ImageFormat::Ico,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            IconFormat::Png => "image/png",
            IconFormat::Ico => "image/x-icon",
        }
    }
}

/// Resampling used for both resize steps of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resample {
    /// Keeps hard pixel edges of tiny pixel-art sources.
    Nearest,
    /// Bicubic-class smoothing for everything else.
    Smooth,
}

impl Resample {
    /// Nearest-neighbour below [`PIXEL_ART_WIDTH`], smooth otherwise.
    pub fn for_source_width(width: u32) -> Self {
        if width < PIXEL_ART_WIDTH {
            Resample::Nearest
        } else {
            Resample::Smooth
        }
    }

    pub fn filter_type(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Smooth => FilterType::CatmullRom,
        }
    }
}

/// One icon to render and where it goes, relative to the build dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub format: IconFormat,
    /// URL-style path, e.g. `images/mg-icon-32.png` or `favicon.ico`.
    pub rel_path: String,
}
