//! Level-line tracer.
//!
//! Starting from a point on a horizontal edgel, the dual-pixel walker
//! follows the level set through adjacent dual pixels until the line
//! closes on its starting edgel, emitting the sampled polyline and
//! marking visited horizontal edgels in a shared visit array.

mod dual_pixel;

pub use dual_pixel::{Dir, DualPixel};

use crate::image::ImageU8;
use crate::types::LevelLine;
use nalgebra::Point2;

/// Extract the level line passing through starting point `p`.
///
/// `visit` stores the traversed horizontal edgels at the current level;
/// `idx` identifies the line in the optional row-intersection log.
pub(crate) fn trace_line(
    img: &ImageU8<'_>,
    visit: &mut [bool],
    pts_per_pixel: i32,
    mut p: Point2<f32>,
    line: &mut LevelLine,
    idx: usize,
    mut rows: Option<&mut [Vec<(f32, usize)>]>,
) {
    let mut dual = DualPixel::new(&mut p, line.level, img);
    loop {
        line.points.push(p);
        if !dual.mark_visit(visit, rows.as_deref_mut(), idx, p) {
            break;
        }
        dual.follow(&mut p, line.level, pts_per_pixel, &mut line.points);
    }
}
