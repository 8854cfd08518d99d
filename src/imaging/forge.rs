//! Icon rendering.
//!
//! Every icon is produced the same way:
//!
//! 1. Pick the resample filter from the source width (nearest-neighbour for
//!    pixel art, bicubic otherwise).
//! 2. Scale the source to a 1024px wide intermediate.
//! 3. Shrink that to fit inside `size`×`size`.
//! 4. Paste it onto a transparent `size`×`size` canvas, centered horizontally
//!    and top-aligned.
//!
//! Without a configured source image, an 8×8 placeholder compiled into the
//! binary is used instead.

use super::calculations::{horizontal_offset, thumbnail_dimensions, upscaled_dimensions};
use super::params::{IconFormat, Resample};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use image::{DynamicImage, ImageError, ImageReader, RgbImage, RgbaImage, imageops};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("failed to load icon source {}: {source}", .path.display())]
    Load { path: PathBuf, source: ImageError },
    #[error("failed to write icon {}: {source}", .path.display())]
    Save { path: PathBuf, source: ImageError },
    #[error("built-in placeholder icon could not be decoded")]
    Placeholder,
}

/// 8×8 RGB placeholder, URL-safe base64.
const PLACEHOLDER_RGB: &str = "Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_AAAAAAAAKa3_Ka3_Ka3_\
Ka3_Ka3_Ka3_AAAAAAAAKa3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_AAAAAAAAKa3_Ka3_Ka3_Ka3_Ka3_Ka3_AAAAAAAAKa3_\
Ka3_AAAAAAAAAAAAAAAAAAAAAAAAKa3_Ka3_AAAAAAAAAAAAAAAAAAAAAAAAKa3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_Ka3_";

const PLACEHOLDER_SIZE: u32 = 8;

/// Decode the built-in placeholder.
pub fn placeholder() -> Result<DynamicImage, IconError> {
    let bytes = URL_SAFE
        .decode(PLACEHOLDER_RGB)
        .map_err(|_| IconError::Placeholder)?;
    RgbImage::from_raw(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, bytes)
        .map(DynamicImage::ImageRgb8)
        .ok_or(IconError::Placeholder)
}

/// Load the configured source image, or the placeholder when there is none.
///
/// The format is sniffed from the content, not the extension.
pub fn load_source(path: Option<&Path>) -> Result<DynamicImage, IconError> {
    let Some(path) = path else {
        return placeholder();
    };
    let load_err = |source| IconError::Load {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(|e| load_err(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)
}

/// Render `source` as a `size`×`size` RGBA icon.
pub fn make_icon(source: &DynamicImage, size: u32) -> RgbaImage {
    let filter = Resample::for_source_width(source.width()).filter_type();

    let (w, h) = upscaled_dimensions((source.width(), source.height()));
    let scaled = imageops::resize(&source.to_rgba8(), w, h, filter);

    let (tw, th) = thumbnail_dimensions((w, h), (size, size));
    let thumb = if (tw, th) == (w, h) {
        scaled
    } else {
        imageops::resize(&scaled, tw, th, filter)
    };

    let mut icon = RgbaImage::new(size, size);
    imageops::replace(&mut icon, &thumb, i64::from(horizontal_offset(size, tw)), 0);
    icon
}

/// Encode `icon` to `path` in the given format.
pub fn write_icon(icon: &RgbaImage, path: &Path, format: IconFormat) -> Result<(), IconError> {
    icon.save_with_format(path, format.image_format())
        .map_err(|source| IconError::Save {
            path: path.to_path_buf(),
            source,
        })
}
