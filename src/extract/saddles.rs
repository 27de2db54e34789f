use super::quantize_level;
use crate::geometry::saddle_value;
use crate::image::ImageU8;
use crate::trace::trace_line;
use crate::types::{LevelLine, LineType};
use nalgebra::Point2;

/// A bilinear saddle: the dual pixel's top-left corner and its level.
#[derive(Clone, Copy, Debug)]
pub struct Saddle {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

/// Find all saddle points of the bilinear image, in scan order.
pub fn find_saddles(img: &ImageU8<'_>) -> Vec<Saddle> {
    let mut saddles = Vec::new();
    for y in 0..img.h - 1 {
        for x in 0..img.w - 1 {
            let value = saddle_value(
                img.get(x, y) as f32,
                img.get(x + 1, y) as f32,
                img.get(x, y + 1) as f32,
                img.get(x + 1, y + 1) as f32,
            );
            if let Some(value) = value {
                saddles.push(Saddle { x, y, value });
            }
        }
    }
    saddles
}

/// Trace the saddle-crossing level lines, one quantization group at a
/// time.
///
/// Saddles quantizing to the same level are handled together: each
/// contributes up to two lines (one per horizontal edgel of its dual
/// pixel), and the visit array is reset only between groups, so an edgel
/// shared within a group starts a single line.
pub(super) fn handle_saddles(
    img: &ImageU8<'_>,
    pts_per_pixel: i32,
    lines: &mut Vec<LevelLine>,
    visit: &mut [bool],
    mut rows: Option<&mut [Vec<(f32, usize)>]>,
) {
    let mut saddles = find_saddles(img);
    saddles.sort_by(|a, b| a.value.total_cmp(&b.value));

    let mut i = 0;
    while i < saddles.len() {
        let level = quantize_level(saddles[i].value);
        let mut j = i;
        while j < saddles.len() && quantize_level(saddles[j].value) == level {
            let s = saddles[j];
            for dy in 0..=1usize {
                if !visit[(s.y + dy) * img.w + s.x] {
                    let mut line = LevelLine::new(level, LineType::Saddle);
                    trace_line(
                        img,
                        visit,
                        pts_per_pixel,
                        Point2::new(s.x as f32, (s.y + dy) as f32),
                        &mut line,
                        lines.len(),
                        rows.as_deref_mut(),
                    );
                    lines.push(line);
                }
            }
            j += 1;
        }
        visit.fill(false);
        i = j;
    }
}
