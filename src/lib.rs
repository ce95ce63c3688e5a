//! N-dimensional images over a single flat buffer,
//! with stride-based addressing, positionable random access,
//! restartable cursors and real-coordinate interpolation.
//!
//! ```
//! use array_img::{ArrayImg, Cursor, InterpolatorFactory, LinearInterpolatorFactory, RealRandomAccess};
//!
//! let img = ArrayImg::from_vec(&[3, 2], vec![0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//!
//! let mut cursor = img.cursor();
//! let mut seen = vec![];
//! while let Ok(v) = cursor.next() {
//!     seen.push(*v);
//! }
//! assert_eq!(seen, img.data());
//!
//! let mut interp = LinearInterpolatorFactory.create(&img);
//! interp.set_real_position(&[0.5, 0.0]);
//! assert_eq!(interp.get(), 0.5);
//! ```
use smallvec::SmallVec;

#[cfg(test)]
mod tests;

mod error;
pub use error::{Error, Result};

pub mod indexer;
pub use indexer::StrideIndexer;

mod interval;
pub use interval::{Dimensions, Interval};

mod types;
pub use types::RealType;

mod traits;
pub use traits::{
    Cursor, CursorMut, CursorState, Localizable, Positionable, RandomAccess, RandomAccessMut,
    RandomAccessible, RealRandomAccess,
};

mod img;
pub use img::{
    ArrayCursor, ArrayImg, ArrayImgView, ArrayLocalizingCursor, ArrayRandomAccess,
    ArrayRandomAccessMut, ArrayRandomAccessRef, ArraySlabMut,
};

mod extend;
pub use extend::{Border, Extended, ExtendedAccess, map_index};

pub mod interpolation;
pub use interpolation::{
    InterpolatorFactory, LinearInterpolator, LinearInterpolatorFactory,
    NearestNeighborInterpolator, NearestNeighborInterpolatorFactory,
};

mod transform;
pub use transform::{Identity, ScaleTranslate, Transformation};

mod resample;
pub use resample::{resample, resample_into, resample_parallel};

/// Inline capacity of coordinate buffers;
/// images with more dimensions than this still work but allocate per handle.
pub const COORD_SIZE: usize = 6;

/// A short vector type alias for convenience,
/// which keeps per-handle positions off the heap for typical dimensionalities.
type ShortVec<T> = SmallVec<[T; COORD_SIZE]>;
