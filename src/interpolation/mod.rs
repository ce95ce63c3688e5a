//! Sampling at real-valued coordinates.
//!
//! An interpolator wraps one [crate::RandomAccess] handle of its source
//! and repositions it to read whatever neighbourhood the scheme needs.
//! Each interpolator owns its handle, so independent interpolators over the same source
//! can be used concurrently.
use crate::{RandomAccessible, RealRandomAccess};

mod linear;
pub use linear::{LinearInterpolator, LinearInterpolatorFactory};
mod nearest;
pub use nearest::{NearestNeighborInterpolator, NearestNeighborInterpolatorFactory};

/// Builds interpolators over a source.
///
/// The source is borrowed for the interpolator's lifetime, not copied.
pub trait InterpolatorFactory<S: RandomAccessible> {
    type Interpolator<'a>: RealRandomAccess<Element = S::Element>
    where
        S: 'a;

    fn create<'a>(&self, source: &'a S) -> Self::Interpolator<'a>;
}
