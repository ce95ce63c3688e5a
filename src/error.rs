use crate::Interval;

/// Everything that can go wrong when building or driving an image.
///
/// Positioning a random access is deliberately not in here:
/// positions are never validated on the hot path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("shape must have at least one dimension")]
    EmptyShape,
    #[error("extent of dimension {dim} is zero")]
    ZeroExtent { dim: usize },
    #[error("total size of shape {0:?} overflows")]
    SizeOverflow(Vec<usize>),
    #[error("data length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },
    #[error("dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("interval is empty in dimension {dim}: min {min} > max {max}")]
    EmptyInterval { dim: usize, min: isize, max: isize },
    #[error("interval {interval:?} is not contained in the image")]
    OutOfImage { interval: Interval },
    #[error("cannot split into zero parts")]
    ZeroParts,
    #[error("array memory is not contiguous with dimension 0 fastest")]
    NotContiguous,
    #[error("cursor is exhausted")]
    CursorExhausted,
    #[error("invalid transform parameter in dimension {dim}: {reason}")]
    InvalidParameter { dim: usize, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
