#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod extract;
pub mod image;
pub mod persistence;
pub mod tree;
pub mod types;

// "Expert" modules – still public, but considered unstable internals.
pub mod geometry;
pub mod render;
pub mod trace;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the three core operations and their result types.
pub use crate::error::Error;
pub use crate::extract::{extract_level_lines, ExtractionResult, DELTA_LEVEL};
pub use crate::persistence::persistence;
pub use crate::tree::{build_tree, LLTree};
pub use crate::types::{LevelLine, LineType, RowIntersections};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use bilevel::prelude::*;
///
/// # fn main() -> Result<(), bilevel::Error> {
/// let (w, h) = (32usize, 32usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let extraction = extract_level_lines(&img, 0, true)?;
/// let tree = build_tree(
///     extraction.lines,
///     extraction.row_intersections.unwrap_or_default(),
/// );
/// println!("{} level lines", tree.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageU8};
    pub use crate::{
        build_tree, extract_level_lines, persistence, Error, LLTree, LevelLine, LineType,
    };
}
