use super::extremum_level;
use crate::image::ImageU8;
use crate::trace::trace_line;
use crate::types::{LevelLine, LineType};
use nalgebra::Point2;

/// Flood-fill the 4-connected plateau at `(x, y)` and decide whether it
/// is a regional extremum.
///
/// `seen` tags pixels that can no longer seed a plateau; it keeps growing
/// even when the plateau is rejected so each plateau is explored once.
/// Returns false when the plateau touches the image border or has an
/// exterior neighbor on the wrong side of its level.
fn flood_plateau(
    img: &ImageU8<'_>,
    x: usize,
    y: usize,
    is_max: bool,
    seen: &mut [bool],
    stack: &mut Vec<(usize, usize)>,
    plateau: &mut Vec<(usize, usize)>,
) -> bool {
    let (w, h) = (img.w, img.h);
    let level = img.get(x, y);
    seen[y * w + x] = true;
    stack.clear();
    stack.push((x, y));
    let mut success = true;
    while let Some((px, py)) = stack.pop() {
        plateau.push((px, py));
        for (nx, ny) in [(px + 1, py), (px, py + 1), (px - 1, py), (px, py - 1)] {
            let idx = ny * w + nx;
            if img.get(nx, ny) == level {
                if nx == 0 || nx + 1 == w || ny == 0 || ny + 1 == h {
                    success = false;
                } else if !seen[idx] {
                    seen[idx] = true;
                    stack.push((nx, ny));
                }
            } else if is_max != (img.get(nx, ny) < level) {
                success = false;
            }
        }
    }
    success
}

/// Trace the level lines bounding every regional extremum of the image.
///
/// Plateaus with holes bound several level-set components; one line is
/// started per plateau pixel whose right edgel crosses the level and is
/// not yet visited. The visit array is reset after each plateau.
pub(super) fn handle_extrema(
    img: &ImageU8<'_>,
    pts_per_pixel: i32,
    lines: &mut Vec<LevelLine>,
    visit: &mut [bool],
    mut rows: Option<&mut [Vec<(f32, usize)>]>,
) {
    let (w, h) = (img.w, img.h);
    let mut seen = vec![false; w * h];
    let mut stack = Vec::new();
    let mut plateau = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if seen[y * w + x] || img.get(x, y) == img.get(x + 1, y) {
                continue;
            }
            let level = img.get(x, y);
            let is_max = img.get(x + 1, y) < level;
            plateau.clear();
            if !flood_plateau(img, x, y, is_max, &mut seen, &mut stack, &mut plateau) {
                continue;
            }
            let kind = if is_max { LineType::Max } else { LineType::Min };
            let line_level = extremum_level(level, kind);
            for &(px, py) in &plateau {
                if img.get(px + 1, py) != level && !visit[py * w + px] {
                    let mut line = LevelLine::new(line_level, kind);
                    trace_line(
                        img,
                        visit,
                        pts_per_pixel,
                        Point2::new(px as f32, py as f32),
                        &mut line,
                        lines.len(),
                        rows.as_deref_mut(),
                    );
                    lines.push(line);
                }
            }
            visit.fill(false);
        }
    }
}
