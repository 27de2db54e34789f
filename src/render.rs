//! Rasterization of level lines into an RGB buffer.
//!
//! Lines are drawn segment by segment with an integer Bresenham walk;
//! point coordinates are shifted by half a pixel so that integral
//! positions land on pixel centers, and an integral zoom factor is
//! applied per point before drawing.

use crate::types::{LevelLine, LineType};
use nalgebra::Point2;

/// Interleaved RGB raster (3 bytes per pixel).
pub struct RgbRaster {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl RgbRaster {
    /// A raster filled with `background`.
    pub fn new_filled(w: usize, h: usize, background: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(3 * w * h);
        for _ in 0..w * h {
            data.extend_from_slice(&background);
        }
        Self { w, h, data }
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: [u8; 3]) {
        let i = 3 * (y * self.w + x);
        self.data[i..i + 3].copy_from_slice(&color);
    }
}

/// Display color of a level line, by type: regular black, minima blue,
/// saddles green, maxima red.
pub fn line_color(kind: LineType) -> [u8; 3] {
    match kind {
        LineType::Regular => [0, 0, 0],
        LineType::Min => [0, 0, 255],
        LineType::Saddle => [0, 255, 0],
        LineType::Max => [255, 0, 0],
    }
}

#[inline]
fn clip(v: f32, m: usize) -> i64 {
    if v < 0.0 {
        0
    } else if v >= m as f32 {
        m as i64 - 1
    } else {
        v as i64
    }
}

/// Draw the segment from `p` to `q` (already zoomed and center-shifted).
fn draw_segment(p: Point2<f32>, q: Point2<f32>, color: [u8; 3], out: &mut RgbRaster) {
    let x0 = clip(p.x, out.w);
    let x1 = clip(q.x, out.w);
    let y0 = clip(p.y, out.h);
    let y1 = clip(q.y, out.h);
    if x0 == x1 && y0 == y1 {
        out.put(x0 as usize, y0 as usize, color);
        return;
    }
    let sx: i64 = if x0 < x1 { 1 } else { -1 };
    let sy: i64 = if y0 < y1 { 1 } else { -1 };
    let dx = x1 - x0;
    let dy = y1 - y0;
    let adx = sx * dx;
    let ady = sy * dy;
    let mut x = 0i64;
    let mut y = 0i64;
    if adx >= ady {
        let mut z = -adx / 2;
        while x != dx {
            out.put((x + x0) as usize, (y + y0) as usize, color);
            x += sx;
            z += ady;
            if z > 0 {
                y += sy;
                z -= adx;
            }
        }
    } else {
        let mut z = -ady / 2;
        while y != dy {
            out.put((x + x0) as usize, (y + y0) as usize, color);
            y += sy;
            z += adx;
            if z > 0 {
                x += sx;
                z -= ady;
            }
        }
    }
}

/// Draw a level line into `out` with an integral zoom factor.
pub fn draw_line(line: &LevelLine, color: [u8; 3], out: &mut RgbRaster, zoom: u32) {
    if line.points.is_empty() {
        return;
    }
    let z = zoom as f32;
    let shift = |p: &Point2<f32>| Point2::new(z * p.x + 0.5, z * p.y + 0.5);
    let mut prev = shift(&line.points[0]);
    for p in &line.points[1..] {
        let cur = shift(p);
        draw_segment(prev, cur, color, out);
        prev = cur;
    }
}
