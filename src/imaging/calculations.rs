//! Pure calculation functions for icon dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Width every source is scaled to before it is shrunk to the icon size.
///
/// Going through a fixed large intermediate makes tiny and huge sources
/// shrink the same way.
pub const UPSCALE_WIDTH: u32 = 1024;

/// Tallest intermediate allowed. Very tall sources are scaled to this height
/// instead, so a 1×10000 strip does not become a multi-gigabyte buffer.
pub const MAX_UPSCALE_HEIGHT: u32 = 8 * UPSCALE_WIDTH;

/// Sources narrower than this are treated as pixel art.
pub const PIXEL_ART_WIDTH: u32 = 64;

/// Dimensions after scaling the source so its width becomes [`UPSCALE_WIDTH`].
///
/// Height keeps the aspect ratio, truncated, and never drops below 1. If
/// that height would exceed [`MAX_UPSCALE_HEIGHT`], the source is scaled to
/// that height instead and the width follows the aspect ratio.
pub fn upscaled_dimensions(source: (u32, u32)) -> (u32, u32) {
    let (w, h) = source;
    let scale = UPSCALE_WIDTH as f64 / w as f64;
    let height = h as f64 * scale;
    if height > MAX_UPSCALE_HEIGHT as f64 {
        let width = (w as f64 * MAX_UPSCALE_HEIGHT as f64 / h as f64) as u32;
        return (width.max(1), MAX_UPSCALE_HEIGHT);
    }
    (UPSCALE_WIDTH, (height as u32).max(1))
}

/// Largest size that fits inside `bound` while keeping the aspect ratio.
///
/// Never enlarges: a source that already fits is returned unchanged. The
/// derived edge is rounded to whichever neighbour integer best preserves the
/// source aspect ratio.
///
/// ```
/// # use pwap8::imaging::thumbnail_dimensions;
/// assert_eq!(thumbnail_dimensions((1024, 512), (32, 32)), (32, 16));
/// assert_eq!(thumbnail_dimensions((1024, 2048), (32, 32)), (16, 32));
/// assert_eq!(thumbnail_dimensions((20, 10), (32, 32)), (20, 10));
/// ```
pub fn thumbnail_dimensions(source: (u32, u32), bound: (u32, u32)) -> (u32, u32) {
    let (w, h) = source;
    let (bx, by) = bound;
    if bx >= w && by >= h {
        return source;
    }

    let aspect = w as f64 / h as f64;
    let (bx_f, by_f) = (bx as f64, by as f64);
    if bx_f / by_f >= aspect {
        let x = round_aspect(by_f * aspect, |n| (aspect - n / by_f).abs());
        (x, by)
    } else {
        let y = round_aspect(bx_f / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bx_f / n).abs()
            }
        });
        (bx, y)
    }
}

/// Pick floor or ceil of `value`, whichever scores lower; ties go to floor.
fn round_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let (lo, hi) = (value.floor(), value.ceil());
    let pick = if score(hi) < score(lo) { hi } else { lo };
    (pick as u32).max(1)
}

/// Left offset that centers `width` on a canvas `canvas` pixels wide.
///
/// Icons are centered horizontally only; they stay top-aligned.
pub fn horizontal_offset(canvas: u32, width: u32) -> u32 {
    canvas.saturating_sub(width) / 2
}

/// The configured size closest to `target`, preferring the smaller on a tie.
///
/// Used for the fixed tile and touch icon references so they always name a
/// file that was actually generated.
pub fn nearest_size(sizes: &[u32], target: u32) -> Option<u32> {
    sizes.iter().copied().min_by_key(|s| s.abs_diff(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upscale_square_source() {
        assert_eq!(upscaled_dimensions((8, 8)), (1024, 1024));
    }

    #[test]
    fn upscale_keeps_aspect() {
        assert_eq!(upscaled_dimensions((128, 64)), (1024, 512));
        assert_eq!(upscaled_dimensions((4096, 2048)), (1024, 512));
    }

    #[test]
    fn upscale_truncates_height() {
        // 1024 * 100 / 300 = 341.33
        assert_eq!(upscaled_dimensions((300, 100)), (1024, 341));
    }

    #[test]
    fn upscale_extreme_panorama_keeps_one_row() {
        assert_eq!(upscaled_dimensions((5000, 1)), (1024, 1));
    }

    #[test]
    fn upscale_tall_strip_is_bounded() {
        assert_eq!(upscaled_dimensions((1, 10_000)), (1, MAX_UPSCALE_HEIGHT));
        assert_eq!(upscaled_dimensions((100, 1600)), (512, MAX_UPSCALE_HEIGHT));
        // exactly at the bound stays on the normal path
        assert_eq!(upscaled_dimensions((128, 1024)), (1024, MAX_UPSCALE_HEIGHT));
    }

    #[test]
    fn thumbnail_square_into_square() {
        assert_eq!(thumbnail_dimensions((1024, 1024), (180, 180)), (180, 180));
    }

    #[test]
    fn thumbnail_landscape_limited_by_width() {
        assert_eq!(thumbnail_dimensions((1024, 512), (144, 144)), (144, 72));
    }

    #[test]
    fn thumbnail_portrait_limited_by_height() {
        assert_eq!(thumbnail_dimensions((1024, 2048), (180, 180)), (90, 180));
    }

    #[test]
    fn thumbnail_rounds_to_best_aspect() {
        // 1024x341: 32 / 3.0029 = 10.66 → 11 keeps the ratio closer than 10
        assert_eq!(thumbnail_dimensions((1024, 341), (32, 32)), (32, 11));
    }

    #[test]
    fn thumbnail_never_enlarges() {
        assert_eq!(thumbnail_dimensions((1024, 1024), (1024, 1024)), (1024, 1024));
        assert_eq!(thumbnail_dimensions((100, 50), (512, 512)), (100, 50));
    }

    #[test]
    fn thumbnail_never_collapses_to_zero() {
        assert_eq!(thumbnail_dimensions((1024, 1), (32, 32)), (32, 1));
    }

    #[test]
    fn offset_centers_narrow_images() {
        assert_eq!(horizontal_offset(32, 16), 8);
        assert_eq!(horizontal_offset(167, 84), 41);
        assert_eq!(horizontal_offset(32, 32), 0);
    }

    #[test]
    fn nearest_size_exact_match() {
        assert_eq!(nearest_size(&[32, 144, 167], 144), Some(144));
    }

    #[test]
    fn nearest_size_picks_closest() {
        assert_eq!(nearest_size(&[32, 128, 192], 167), Some(192));
        assert_eq!(nearest_size(&[32, 128, 256], 144), Some(128));
    }

    #[test]
    fn nearest_size_tie_prefers_smaller() {
        assert_eq!(nearest_size(&[140, 148], 144), Some(140));
    }

    #[test]
    fn nearest_size_empty() {
        assert_eq!(nearest_size(&[], 144), None);
    }
}
