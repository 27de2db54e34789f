//! Extraction driver: all level lines of the bilinear interpolant.
//!
//! Overview
//! - Enumerates regional extrema (4-connected plateaus whose exterior
//!   neighbors are all strictly lower or higher) and traces one level
//!   line per plateau boundary component at `level ∓ Δ`.
//! - Collects every dual pixel carrying a bilinear saddle, sorts the
//!   saddles by value and groups those that quantize to the same level;
//!   each group member starts up to two Saddle lines, one per horizontal
//!   edgel of its dual pixel.
//! - Shares one visit array across traces; it is reset after each plateau
//!   and between quantization groups (not within a group, so two saddles
//!   of a group sharing an edgel yield a single line).
//! - Optionally logs every row crossing for hierarchy recovery by
//!   [`crate::tree::build_tree`].
//!
//! Singular levels are quantized to `QLEVEL` steps per gray level, with
//! three bits of headroom below the f32 epsilon for images up to 1024
//! pixels wide; wider images are refused.

mod extrema;
mod saddles;

pub use saddles::Saddle;

use crate::error::Error;
use crate::image::ImageU8;
use crate::types::{LevelLine, LineType, RowIntersections};
use log::debug;

/// Quantization steps of singular levels. Safe up to width < 2^10 pixels:
/// 23 bits of f32 mantissa, minus 8 bits of image depth, minus 6 bits of
/// width headroom.
pub const QLEVEL: i32 = 1 << (23 - 8 - 6);

/// Distance between two consecutive quantized levels.
pub const DELTA_LEVEL: f32 = 1.0 / QLEVEL as f32;

/// Widest image the quantization margin supports.
pub const MAX_WIDTH: usize = 1 << 10;

/// Quantized level of a saddle, clamped strictly between integer levels.
pub(crate) fn quantize_level(v: f32) -> f32 {
    let int_part = v.floor();
    let frac = v - int_part;
    let s = ((frac * QLEVEL as f32).floor() as i32).clamp(2, QLEVEL - 2);
    int_part + s as f32 * DELTA_LEVEL
}

/// Level lines of an image, in extraction order, with the optional
/// row-crossing log used to recover their inclusion tree.
#[derive(Clone, Debug, Default)]
pub struct ExtractionResult {
    pub lines: Vec<LevelLine>,
    pub row_intersections: Option<RowIntersections>,
}

/// Extract all level lines of the bilinear interpolant of `img`.
///
/// `pts_per_pixel` controls the discretization density of hyperbola
/// branches (0 keeps edgel crossings only). When `with_intersections` is
/// set, the result carries a per-row crossing log suitable for
/// [`crate::tree::build_tree`].
///
/// The image must be at least 3×3 and at most [`MAX_WIDTH`] wide. The
/// caller is expected to have seeded the border (see
/// [`crate::image::fill_border_median`]) so that no regional extremum
/// touches it.
pub fn extract_level_lines(
    img: &ImageU8<'_>,
    pts_per_pixel: i32,
    with_intersections: bool,
) -> Result<ExtractionResult, Error> {
    if img.w < 3 || img.h < 3 {
        return Err(Error::InvalidInput("image must be at least 3x3"));
    }
    if pts_per_pixel < 0 {
        return Err(Error::InvalidInput("pts_per_pixel must be non-negative"));
    }
    if img.w > MAX_WIDTH {
        return Err(Error::TooLarge {
            width: img.w,
            limit: MAX_WIDTH,
        });
    }

    let mut lines = Vec::new();
    let mut visit = vec![false; img.w * img.h];
    let mut rows: Option<RowIntersections> = with_intersections.then(|| vec![Vec::new(); img.h]);

    extrema::handle_extrema(img, pts_per_pixel, &mut lines, &mut visit, rows.as_deref_mut());
    let n_extrema = lines.len();
    saddles::handle_saddles(img, pts_per_pixel, &mut lines, &mut visit, rows.as_deref_mut());
    debug!(
        "extracted {} level lines ({} extremal, {} saddle)",
        lines.len(),
        n_extrema,
        lines.len() - n_extrema
    );

    Ok(ExtractionResult {
        lines,
        row_intersections: rows,
    })
}

/// Level of the line surrounding a regional extremum plateau.
#[inline]
pub(crate) fn extremum_level(level: u8, kind: LineType) -> f32 {
    match kind {
        LineType::Max => level as f32 - DELTA_LEVEL,
        _ => level as f32 + DELTA_LEVEL,
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_level_lines, quantize_level, DELTA_LEVEL, QLEVEL};
    use crate::error::Error;
    use crate::image::ImageU8;

    #[test]
    fn quantization_clamps_towards_interior() {
        // Exact integer levels land at 2 steps above the integer.
        assert_eq!(quantize_level(5.0), 5.0 + 2.0 * DELTA_LEVEL);
        // Levels close to the next integer are pulled back.
        let high = quantize_level(4.9999);
        assert_eq!(high, 4.0 + (QLEVEL - 2) as f32 * DELTA_LEVEL);
        // A mid-range saddle value is kept on its quantization step.
        assert_eq!(quantize_level(4.5), 4.5);
    }

    #[test]
    fn quantization_groups_nearby_saddles() {
        let a = 3.0 + 100.4 * DELTA_LEVEL;
        let b = 3.0 + 100.6 * DELTA_LEVEL;
        assert_eq!(quantize_level(a), quantize_level(b));
    }

    #[test]
    fn rejects_small_images() {
        let data = vec![0u8; 4];
        let img = ImageU8 {
            w: 2,
            h: 2,
            stride: 2,
            data: &data,
        };
        assert_eq!(
            extract_level_lines(&img, 0, false).unwrap_err(),
            Error::InvalidInput("image must be at least 3x3")
        );
    }

    #[test]
    fn rejects_negative_density() {
        let data = vec![0u8; 9];
        let img = ImageU8 {
            w: 3,
            h: 3,
            stride: 3,
            data: &data,
        };
        assert!(matches!(
            extract_level_lines(&img, -1, false),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_overwide_images() {
        let w = 1030;
        let data = vec![0u8; w * 3];
        let img = ImageU8 {
            w,
            h: 3,
            stride: w,
            data: &data,
        };
        assert!(matches!(
            extract_level_lines(&img, 0, false),
            Err(Error::TooLarge { width: 1030, .. })
        ));
    }
}
