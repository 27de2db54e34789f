use nalgebra::Point2;
use serde::Serialize;

/// Classification of a level line by the feature that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Regular,
    Min,
    Saddle,
    Max,
}

/// A closed level line of the bilinear interpolant: a level and a
/// polygonal line. The last point repeats the first.
#[derive(Clone, Debug, Serialize)]
pub struct LevelLine {
    pub level: f32,
    pub kind: LineType,
    pub points: Vec<Point2<f32>>,
}

impl LevelLine {
    pub fn new(level: f32, kind: LineType) -> Self {
        Self {
            level,
            kind,
            points: Vec::new(),
        }
    }
}

/// Per-row crossings `(abscissa, line index)` of the extracted lines.
/// Row `y` lists every point where a line traverses the horizontal data
/// row `y`, in trace order. This is the substrate for tree recovery.
pub type RowIntersections = Vec<Vec<(f32, usize)>>;
