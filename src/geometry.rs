//! Geometry kernel: bilinear saddles and hyperbola branches.
//!
//! Inside a dual pixel (the unit square whose corners are four adjacent
//! pixel centers) the level set of the bilinear interpolant at level `l`
//! has implicit equation
//!
//! ```text
//! D·(x − xs)(y − ys) + N/D = l
//! ```
//!
//! whenever `D != 0`; otherwise it is a straight segment. The center
//! `(xs, ys)` is a saddle point at level `N/D`. The vertex of the branch
//! (the point of maximal curvature) sits at
//! `(xs, ys) + (±√|δ|, ±√|δ|)` with `δ = (D·l − N)/D²`, the signs chosen
//! so the vertex lies in the same quadrant as the entry point.

use nalgebra::Point2;

/// Below this |δ| the branch degenerates into two near-linear segments
/// meeting at the vertex, and interior sampling is skipped.
pub(crate) const FLAT_DELTA: f32 = 1e-2;

/// Saddle level of a 2×2 sample square, if any.
///
/// Corner values are given in row-major order: `a` top-left, `b`
/// top-right, `c` bottom-left, `d` bottom-right. A saddle exists iff `b`
/// and `c` lie strictly outside `[min(a, d), max(a, d)]` on the same
/// side; the denominator is then nonzero.
pub fn saddle_value(a: f32, b: f32, c: f32, d: f32) -> Option<f32> {
    let (lo, hi) = if a <= d { (a, d) } else { (d, a) };
    let sb = if b < lo {
        -1
    } else if b > hi {
        1
    } else {
        0
    };
    let sc = if c < lo {
        -1
    } else if c > hi {
        1
    } else {
        0
    };
    if sb * sc <= 0 {
        return None;
    }
    let v = (a * d - b * c) / (a + d - b - c);
    // Normalize -0.0 so value ordering matches plain float comparison.
    Some(if v == 0.0 { 0.0 } else { v })
}

/// Hyperbola supporting the level set inside one dual pixel.
///
/// Corner levels come direction-ordered as the tracer holds them:
/// `[S, E, N, W]` = top-left, bottom-left, bottom-right, top-right.
/// After construction `denom >= 0`, so `l·denom < num` decides
/// `l < num/denom` without a division.
#[derive(Clone, Debug)]
pub struct Hyperbola {
    num: i32,
    denom: i32,
    saddle: Point2<f32>,
    vertex: Point2<f32>,
    delta: f32,
}

impl Hyperbola {
    /// Build the hyperbola for the dual pixel with top-left corner `pos`,
    /// entered at point `p`, at level `level`.
    ///
    /// The hyperbola can be degenerate (a segment), in which case the
    /// saddle, vertex and `delta` carry no meaning; check [`Self::valid`].
    pub fn new(pos: Point2<f32>, p: Point2<f32>, corners: [u8; 4], level: f32) -> Self {
        let num = corners[0] as i32 * corners[2] as i32 - corners[1] as i32 * corners[3] as i32;
        let denom = (corners[0] as i32 + corners[2] as i32)
            - (corners[1] as i32 + corners[3] as i32);
        if denom == 0 {
            return Self {
                num,
                denom,
                saddle: Point2::origin(),
                vertex: Point2::origin(),
                delta: 0.0,
            };
        }
        let d = 1.0 / denom as f32;
        let saddle = Point2::new(
            pos.x + (corners[0] as i32 - corners[1] as i32) as f32 * d,
            pos.y + (corners[0] as i32 - corners[3] as i32) as f32 * d,
        );
        let delta = (denom as f32 * level - num as f32) * d * d;
        let r = delta.abs().sqrt();
        let vertex = Point2::new(
            saddle.x + sign(p.x - saddle.x) * r,
            saddle.y + sign(p.y - saddle.y) * r,
        );
        let (num, denom) = if denom < 0 { (-num, -denom) } else { (num, denom) };
        Self {
            num,
            denom,
            saddle,
            vertex,
            delta,
        }
    }

    #[inline]
    pub fn valid(&self) -> bool {
        self.denom != 0
    }

    #[inline]
    pub fn num(&self) -> i32 {
        self.num
    }

    #[inline]
    pub fn denom(&self) -> i32 {
        self.denom
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn vertex(&self) -> Point2<f32> {
        self.vertex
    }

    /// Whether the branch vertex lies strictly inside the dual pixel of
    /// top-left corner `pos`.
    pub fn vertex_in_dual_pixel(&self, pos: Point2<f32>) -> bool {
        self.valid()
            && pos.x < self.vertex.x
            && self.vertex.x < pos.x + 1.0
            && pos.y < self.vertex.y
            && self.vertex.y < pos.y + 1.0
    }

    /// Sample the branch from `p1` to `p2` of equation
    /// `(x − xs)(y − ys) = δ`.
    ///
    /// Parameterizes uniformly along the axis of larger extent with
    /// `ceil(extent · pts_per_pixel)` steps; endpoints are excluded (the
    /// caller supplies them).
    pub fn sample(
        &self,
        p1: Point2<f32>,
        p2: Point2<f32>,
        pts_per_pixel: i32,
        line: &mut Vec<Point2<f32>>,
    ) {
        if pts_per_pixel < 2 {
            return;
        }
        let ext = (p2 - p1).abs();
        if ext.x > ext.y {
            let n = (ext.x * pts_per_pixel as f32).ceil() as i32;
            let dx = (p2.x - p1.x) / n as f32;
            let mut p = p1;
            for _ in 1..n {
                p.x += dx;
                p.y = self.saddle.y + self.delta / (p.x - self.saddle.x);
                line.push(p);
            }
        } else {
            let n = (ext.y * pts_per_pixel as f32).ceil() as i32;
            let dy = (p2.y - p1.y) / n as f32;
            let mut p = p1;
            for _ in 1..n {
                p.y += dy;
                p.x = self.saddle.x + self.delta / (p.y - self.saddle.y);
                line.push(p);
            }
        }
    }
}

#[inline]
fn sign(f: f32) -> f32 {
    if f > 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{saddle_value, Hyperbola};
    use nalgebra::Point2;

    #[test]
    fn checkerboard_square_has_centered_saddle() {
        let v = saddle_value(0.0, 9.0, 9.0, 0.0).expect("saddle expected");
        assert_eq!(v, 4.5);
    }

    #[test]
    fn no_saddle_when_antidiagonal_straddles() {
        assert!(saddle_value(1.0, 9.0, 0.5, 2.0).is_none());
        assert!(saddle_value(1.0, 1.5, 9.0, 2.0).is_none());
    }

    #[test]
    fn no_saddle_on_interval_boundary() {
        // b equals max(a, d): not strictly outside.
        assert!(saddle_value(3.0, 8.0, 8.0, 8.0).is_none());
        assert!(saddle_value(5.0, 5.0, 5.0, 9.0).is_none());
    }

    #[test]
    fn saddle_below_diagonal() {
        // b, c both under min(a, d).
        let v = saddle_value(8.0, 2.0, 2.0, 8.0).expect("saddle expected");
        assert_eq!(v, 5.0);
    }

    #[test]
    fn denominator_normalized_positive() {
        // Corners [S, E, N, W] = (TL, BL, BR, TR) = (0, 9, 0, 9): denom
        // starts negative and must be flipped together with num.
        let h = Hyperbola::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.0),
            [0, 9, 0, 9],
            4.5,
        );
        assert!(h.valid());
        assert!(h.denom() > 0);
        // Saddle value num/denom stays 81/18 = 4.5.
        assert_eq!(h.num() as f32 / h.denom() as f32, 4.5);
        assert_eq!(h.saddle, Point2::new(0.5, 0.5));
    }

    /// Branch of `[8, 2, 8, 2]` at level 6: saddle (0.5, 0.5), δ = 1/12,
    /// entering at (1/3, 0) and leaving at (0, 1/3).
    fn branch() -> (Hyperbola, Point2<f32>, Point2<f32>) {
        let p1 = Point2::new(1.0 / 3.0, 0.0);
        let h = Hyperbola::new(Point2::new(0.0, 0.0), p1, [8, 2, 8, 2], 6.0);
        assert!(h.valid());
        (h, p1, Point2::new(0.0, 1.0 / 3.0))
    }

    #[test]
    fn sample_excludes_endpoints_and_stays_on_branch() {
        let (h, p1, p2) = branch();
        let mut pts = Vec::new();
        h.sample(p1, p2, 16, &mut pts);
        assert!(!pts.is_empty());
        for p in &pts {
            assert!((p - p1).norm() > 1e-6 && (p - p2).norm() > 1e-6);
            let implicit = (p.x - 0.5) * (p.y - 0.5);
            assert!(
                (implicit - 1.0 / 12.0).abs() < 1e-5,
                "sample off the hyperbola: {p:?}"
            );
        }
    }

    #[test]
    fn sample_point_count_scales_with_density() {
        let (h, p1, p2) = branch();
        let mut coarse = Vec::new();
        let mut fine = Vec::new();
        h.sample(p1, p2, 4, &mut coarse);
        h.sample(p1, p2, 16, &mut fine);
        // ceil(extent · pts) − 1 interior points, extent = 1/3.
        assert_eq!(coarse.len(), 1);
        assert_eq!(fine.len(), 5);
    }
}
