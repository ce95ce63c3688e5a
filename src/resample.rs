//! Rendering one image into another through a coordinate transformation.
//!
//! For every position of the target, the transformation gives the real position in the source
//! at which an interpolator is sampled.
use std::thread;

use smallvec::smallvec;

use crate::{
    ArrayImg, CursorMut, Error, InterpolatorFactory, RandomAccessible, RealRandomAccess, Result,
    ShortVec, Transformation,
};

fn check_ndim(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Fill every position the cursor visits, from its start, with the transformed sample.
///
/// The cursor is reset first and is exhausted on success.
pub fn resample_into<C, I, X>(cursor: &mut C, interpolator: &mut I, transform: &X) -> Result<()>
where
    C: CursorMut,
    I: RealRandomAccess<Element = C::Element>,
    X: Transformation + ?Sized,
{
    check_ndim(cursor.ndim(), transform.input_ndim())?;
    check_ndim(interpolator.ndim(), transform.output_ndim())?;

    let mut target: ShortVec<f64> = smallvec![0.0; transform.input_ndim()];
    let mut source: ShortVec<f64> = smallvec![0.0; transform.output_ndim()];

    cursor.reset();
    while cursor.has_next() {
        cursor.fwd()?;
        cursor.localize_real(&mut target);
        transform.transform_into(&target, &mut source);
        interpolator.set_real_position(&source);
        *cursor.get_mut() = interpolator.get();
    }
    Ok(())
}

/// Fill the whole target image.
pub fn resample<T, I, X>(target: &mut ArrayImg<T>, interpolator: &mut I, transform: &X) -> Result<()>
where
    I: RealRandomAccess<Element = T>,
    X: Transformation + ?Sized,
{
    log::trace!(
        "Resampling into {:?} image (identity transform: {})",
        target.extents(),
        transform.is_identity()
    );
    resample_into(&mut target.localizing_cursor_mut(), interpolator, transform)
}

/// As [resample], splitting the target into up to `parts` slabs
/// which are filled on scoped threads, each with its own interpolator.
pub fn resample_parallel<T, S, F, X>(
    target: &mut ArrayImg<T>,
    source: &S,
    factory: &F,
    transform: &X,
    parts: usize,
) -> Result<()>
where
    T: Send,
    S: RandomAccessible<Element = T> + Sync,
    F: InterpolatorFactory<S> + Sync,
    X: Transformation + ?Sized,
{
    let mut slabs = target.slabs_mut(parts)?;
    log::trace!("Resampling {} slabs in parallel", slabs.len());
    thread::scope(|s| {
        let handles: Vec<_> = slabs
            .iter_mut()
            .map(|slab| {
                s.spawn(move || {
                    let mut interpolator = factory.create(source);
                    resample_into(&mut slab.localizing_cursor(), &mut interpolator, transform)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Result<()>>()
    })
}
