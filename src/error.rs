use core::fmt;

/// Errors surfaced by the extraction and persistence engines.
///
/// Decoding failures belong to the I/O helpers, which report them as
/// formatted strings; the core itself only rejects invalid geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Image too small for the requested operation, or a negative
    /// sampling density.
    InvalidInput(&'static str),
    /// Image wider than the saddle-level quantization can safely handle.
    TooLarge { width: usize, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(what) => write!(f, "invalid input: {what}"),
            Self::TooLarge { width, limit } => {
                write!(f, "image width {width} exceeds quantization limit {limit}")
            }
        }
    }
}

impl std::error::Error for Error {}
