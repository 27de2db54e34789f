use crate::geometry::{Hyperbola, FLAT_DELTA};
use crate::image::ImageU8;
use nalgebra::{Point2, Vector2};

/// Direction of motion when entering a dual pixel: south means the line
/// enters through the top horizontal edgel moving down, east through the
/// left vertical edgel moving right, and so on.
///
/// The same index addresses the corner array: corner `d` is the endpoint
/// of the entry edgel lying at the right of the incoming direction, and
/// the edgel runs from corner `d` towards corner `d.right()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    S = 0,
    E = 1,
    N = 2,
    W = 3,
}

const DIRS: [Dir; 4] = [Dir::S, Dir::E, Dir::N, Dir::W];

impl Dir {
    #[inline]
    fn from_index(i: usize) -> Dir {
        DIRS[i & 3]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Counter-clockwise turn.
    #[inline]
    fn left(self) -> Dir {
        Self::from_index(self.index() + 1)
    }

    /// Clockwise turn.
    #[inline]
    fn right(self) -> Dir {
        Self::from_index(self.index() + 3)
    }

    #[inline]
    fn opposite(self) -> Dir {
        Self::from_index(self.index() + 2)
    }

    /// Unit displacement of the direction.
    #[inline]
    fn vector(self) -> Vector2<f32> {
        match self {
            Dir::S => Vector2::new(0.0, 1.0),
            Dir::E => Vector2::new(1.0, 0.0),
            Dir::N => Vector2::new(0.0, -1.0),
            Dir::W => Vector2::new(-1.0, 0.0),
        }
    }

    /// Offset of corner `d` from the dual pixel's top-left corner.
    #[inline]
    fn corner_offset(self) -> Vector2<f32> {
        match self {
            Dir::S => Vector2::new(0.0, 0.0),
            Dir::E => Vector2::new(0.0, 1.0),
            Dir::N => Vector2::new(1.0, 1.0),
            Dir::W => Vector2::new(1.0, 0.0),
        }
    }
}

/// Return x for y = v on the line joining (0, v0) and (1, v1).
#[inline]
fn linear(v0: f32, v: f32, v1: f32) -> f32 {
    (v - v0) / (v1 - v0)
}

/// A mobile dual pixel, the square whose vertices are 4 data points.
///
/// This is the main structure to extract a level line, moving from dual
/// pixel to an adjacent one until coming back to the starting point. It
/// stores the levels at its 4 corners indexed by [`Dir`] and the entry
/// direction of the level line.
pub struct DualPixel<'a> {
    img: &'a ImageU8<'a>,
    corners: [u8; 4],
    /// Top-left corner of the dual pixel (integral coordinates).
    pos: Point2<f32>,
    dir: Dir,
}

impl<'a> DualPixel<'a> {
    /// Start a trace at the edgel from `p` to `p + (1, 0)` at `level`.
    ///
    /// The incoming direction is assumed south; when the level ordering
    /// across the edgel is reversed, entry flips to north and the dual
    /// pixel shifts one row up while `p` shifts one column right. On
    /// return `p` holds the interpolated position on the entry edgel.
    pub fn new(p: &mut Point2<f32>, level: f32, img: &'a ImageU8<'a>) -> Self {
        let mut dual = Self {
            img,
            corners: [0; 4],
            pos: *p,
            dir: Dir::S,
        };
        dual.reload_corners();
        if dual.corner(dual.dir) as f32 > level && level > dual.corner(dual.dir.right()) as f32 {
            dual.dir = Dir::N;
            dual.pos.y -= 1.0;
            p.x += 1.0;
            dual.reload_corners();
        }
        let coord = linear(
            dual.corner(dual.dir) as f32,
            level,
            dual.corner(dual.dir.right()) as f32,
        );
        *p += coord * dual.dir.left().vector();
        dual
    }

    #[inline]
    fn corner(&self, d: Dir) -> u8 {
        self.corners[d.index()]
    }

    fn reload_corners(&mut self) {
        let x = self.pos.x as usize;
        let y = self.pos.y as usize;
        self.corners[Dir::S.index()] = self.img.get(x, y);
        self.corners[Dir::E.index()] = self.img.get(x, y + 1);
        self.corners[Dir::N.index()] = self.img.get(x + 1, y + 1);
        self.corners[Dir::W.index()] = self.img.get(x + 1, y);
    }

    /// Move to the next adjacent dual pixel.
    ///
    /// Only the saddle level `snum/sdenom` may be consulted, and most of
    /// the time it is not; passing the pair avoids a division per step.
    /// Returns the subpixel exit point, which is the entry point of the
    /// new dual pixel.
    fn step(&mut self, level: f32, snum: i32, sdenom: i32) -> Point2<f32> {
        let mut left = level > self.corner(self.dir.opposite()) as f32;
        let mut right = level < self.corner(self.dir.left()) as f32;
        if left && right {
            // Both exits open: the branch is disambiguated by which side
            // of the saddle level we are on (sdenom > 0).
            right = level * (sdenom as f32) < snum as f32;
            left = !right;
        }
        if left {
            self.dir = self.dir.left();
        } else if right {
            self.dir = self.dir.right();
        }
        self.pos += self.dir.vector();
        self.reload_corners();

        let coord = linear(
            self.corner(self.dir) as f32,
            level,
            self.corner(self.dir.right()) as f32,
        );
        self.pos + self.dir.corner_offset() + coord * self.dir.left().vector()
    }

    /// Advance one dual pixel, sampling the hyperbola branch between the
    /// entry point `p` and the exit point; `p` is updated to the exit.
    ///
    /// When the branch vertex lies strictly inside the square the
    /// sampling splits there and the vertex itself is emitted. Near the
    /// saddle level only the vertex is emitted; degenerate (straight)
    /// level sets are not sampled at all.
    pub fn follow(
        &mut self,
        p: &mut Point2<f32>,
        level: f32,
        pts_per_pixel: i32,
        line: &mut Vec<Point2<f32>>,
    ) {
        debug_assert!(
            (self.corner(self.dir) as f32) < level
                && level < self.corner(self.dir.right()) as f32
        );
        let hyp = Hyperbola::new(self.pos, *p, self.corners, level);
        let vertex_inside = hyp.vertex_in_dual_pixel(self.pos);
        let entry = *p;
        *p = self.step(level, hyp.num(), hyp.denom());
        if !hyp.valid() || pts_per_pixel <= 0 {
            return;
        }
        if hyp.delta().abs() < FLAT_DELTA {
            if vertex_inside {
                line.push(hyp.vertex());
            }
            return;
        }
        let mut from = entry;
        if vertex_inside {
            hyp.sample(from, hyp.vertex(), pts_per_pixel, line);
            from = hyp.vertex();
            line.push(from);
        }
        hyp.sample(from, *p, pts_per_pixel, line);
    }

    /// Mark the entry edgel as visited; returns false once the edgel had
    /// already been seen, i.e. the line has closed.
    ///
    /// Only vertical motion (S/N entries) crosses horizontal edgels; the
    /// visit cell is indexed by the row and column of the edgel's left
    /// endpoint. While tracing continues, the crossing is appended to the
    /// row-intersection log when one is requested.
    pub fn mark_visit(
        &self,
        visit: &mut [bool],
        rows: Option<&mut [Vec<(f32, usize)>]>,
        idx: usize,
        p: Point2<f32>,
    ) -> bool {
        if !matches!(self.dir, Dir::S | Dir::N) {
            return true;
        }
        let mut i = self.pos.y as usize * self.img.w + self.pos.x as usize;
        if self.dir == Dir::N {
            i += self.img.w;
        }
        let cont = !visit[i];
        visit[i] = true;
        if cont {
            if let Some(rows) = rows {
                rows[p.y as usize].push((p.x, idx));
            }
        }
        cont
    }
}
