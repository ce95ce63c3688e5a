//! Images backed by a single flat buffer.
mod cursor;
pub use cursor::{ArrayCursor, ArrayLocalizingCursor};
mod random_access;
pub use random_access::{ArrayRandomAccess, ArrayRandomAccessMut, ArrayRandomAccessRef};
#[cfg(feature = "image")]
mod idx_image;
#[cfg(feature = "ndarray")]
mod idx_ndarray;

use crate::{
    Dimensions, Error, Interval, RandomAccessible, RealType, Result, indexer::StrideIndexer,
};

/// An n-dimensional image owning one contiguous buffer,
/// laid out with dimension 0 varying fastest.
///
/// The buffer length is fixed at construction; only element values change.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayImg<T> {
    data: Vec<T>,
    indexer: StrideIndexer,
}

impl<T: Clone> ArrayImg<T> {
    /// Create an image with every element a copy of `prototype`.
    pub fn new(extents: &[usize], prototype: T) -> Result<Self> {
        let indexer = StrideIndexer::new(extents)?;
        log::debug!("Creating {extents:?} image of {} elements", indexer.len());
        Ok(Self {
            data: vec![prototype; indexer.len()],
            indexer,
        })
    }
}

impl<T: RealType> ArrayImg<T> {
    pub fn zeros(extents: &[usize]) -> Result<Self> {
        Self::new(extents, T::zero())
    }
}

impl<T> ArrayImg<T> {
    /// Wrap existing data, which must already be in canonical order.
    pub fn from_vec(extents: &[usize], data: Vec<T>) -> Result<Self> {
        let indexer = StrideIndexer::new(extents)?;
        if data.len() != indexer.len() {
            return Err(Error::DataLength {
                expected: indexer.len(),
                actual: data.len(),
            });
        }
        log::debug!("Wrapping {extents:?} image of {} elements", indexer.len());
        Ok(Self { data, indexer })
    }

    /// Create an image by calling `f` with every position, in canonical order.
    pub fn from_fn<F: FnMut(&[isize]) -> T>(extents: &[usize], mut f: F) -> Result<Self> {
        let indexer = StrideIndexer::new(extents)?;
        let mut pos = vec![0; indexer.ndim()];
        let data = (0..indexer.len())
            .map(|idx| {
                indexer.from_flat(idx, &mut pos);
                f(&pos)
            })
            .collect();
        Ok(Self { data, indexer })
    }

    pub fn indexer(&self) -> &StrideIndexer {
        &self.indexer
    }

    pub fn extents(&self) -> &[usize] {
        self.indexer.extents()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Elements in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_view(&self) -> ArrayImgView<'_, T> {
        ArrayImgView {
            data: &self.data,
            indexer: self.indexer.clone(),
        }
    }

    pub fn random_access(&self) -> ArrayRandomAccessRef<'_, T> {
        ArrayRandomAccess::new(&self.data[..], &self.indexer)
    }

    pub fn random_access_mut(&mut self) -> ArrayRandomAccessMut<'_, T> {
        ArrayRandomAccess::new(&mut self.data[..], &self.indexer)
    }

    pub fn cursor(&self) -> ArrayCursor<'_, &[T]> {
        ArrayCursor::new(&self.data[..], &self.indexer)
    }

    pub fn cursor_mut(&mut self) -> ArrayCursor<'_, &mut [T]> {
        ArrayCursor::new(&mut self.data[..], &self.indexer)
    }

    pub fn localizing_cursor(&self) -> ArrayLocalizingCursor<'_, &[T]> {
        ArrayLocalizingCursor::new(&self.data[..], &self.indexer, 0, self.interval())
    }

    pub fn localizing_cursor_mut(&mut self) -> ArrayLocalizingCursor<'_, &mut [T]> {
        let domain = self.interval();
        ArrayLocalizingCursor::new(&mut self.data[..], &self.indexer, 0, domain)
    }

    /// Localizing cursor over a sub-domain, which must lie inside the image.
    pub fn localizing_cursor_in(&self, domain: &Interval) -> Result<ArrayLocalizingCursor<'_, &[T]>> {
        check_domain(&self.indexer, domain)?;
        Ok(ArrayLocalizingCursor::new(
            &self.data[..],
            &self.indexer,
            0,
            domain.clone(),
        ))
    }

    pub fn localizing_cursor_in_mut(
        &mut self,
        domain: &Interval,
    ) -> Result<ArrayLocalizingCursor<'_, &mut [T]>> {
        check_domain(&self.indexer, domain)?;
        Ok(ArrayLocalizingCursor::new(
            &mut self.data[..],
            &self.indexer,
            0,
            domain.clone(),
        ))
    }

    /// Split the image into at most `parts` disjoint slabs along the last dimension.
    ///
    /// Each slab borrows its own contiguous run of the buffer,
    /// so slabs can be written from different threads.
    pub fn slabs_mut(&mut self, parts: usize) -> Result<Vec<ArraySlabMut<'_, T>>> {
        let intervals = self.interval().split(parts)?;
        log::debug!(
            "Splitting {:?} image into {} slabs",
            self.extents(),
            intervals.len()
        );
        let last = self.indexer.ndim() - 1;
        let slab_stride = self.indexer.stride(last);
        let indexer = &self.indexer;

        let mut out = Vec::with_capacity(intervals.len());
        let mut rest = &mut self.data[..];
        for interval in intervals {
            let len = interval.extent(last) * slab_stride as usize;
            let (data, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            out.push(ArraySlabMut {
                data,
                indexer,
                base: interval.min(last) * slab_stride,
                interval,
            });
        }
        Ok(out)
    }
}

fn check_domain(indexer: &StrideIndexer, domain: &Interval) -> Result<()> {
    if domain.ndim() != indexer.ndim() {
        return Err(Error::DimensionMismatch {
            expected: indexer.ndim(),
            actual: domain.ndim(),
        });
    }
    let min_ok = domain.mins().iter().all(|m| *m >= 0);
    let max_ok = domain
        .maxs()
        .iter()
        .zip(indexer.extents().iter())
        .all(|(m, e)| (*m as usize) < *e);
    if !(min_ok && max_ok) {
        return Err(Error::OutOfImage {
            interval: domain.clone(),
        });
    }
    Ok(())
}

impl<T> Dimensions for ArrayImg<T> {
    fn ndim(&self) -> usize {
        self.indexer.ndim()
    }

    fn min(&self, _dim: usize) -> isize {
        0
    }

    fn max(&self, dim: usize) -> isize {
        self.indexer.extents()[dim] as isize - 1
    }

    fn extent(&self, dim: usize) -> usize {
        self.indexer.extents()[dim]
    }

    fn size(&self) -> usize {
        self.indexer.len()
    }
}

impl<T> RandomAccessible for ArrayImg<T> {
    type Element = T;
    type Access<'a>
        = ArrayRandomAccessRef<'a, T>
    where
        Self: 'a;

    fn random_access(&self) -> Self::Access<'_> {
        ArrayImg::random_access(self)
    }
}

/// A read-only image over a borrowed buffer, e.g. one owned by another library.
#[derive(Debug, Clone)]
pub struct ArrayImgView<'a, T> {
    data: &'a [T],
    indexer: StrideIndexer,
}

impl<'a, T> ArrayImgView<'a, T> {
    /// The buffer must be exactly as long as the shape requires, in canonical order.
    pub fn new(extents: &[usize], data: &'a [T]) -> Result<Self> {
        let indexer = StrideIndexer::new(extents)?;
        if data.len() != indexer.len() {
            return Err(Error::DataLength {
                expected: indexer.len(),
                actual: data.len(),
            });
        }
        log::debug!("Viewing {extents:?} buffer of {} elements", indexer.len());
        Ok(Self { data, indexer })
    }

    pub fn indexer(&self) -> &StrideIndexer {
        &self.indexer
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn random_access(&self) -> ArrayRandomAccessRef<'_, T> {
        ArrayRandomAccess::new(self.data, &self.indexer)
    }

    pub fn cursor(&self) -> ArrayCursor<'_, &[T]> {
        ArrayCursor::new(self.data, &self.indexer)
    }

    pub fn localizing_cursor(&self) -> ArrayLocalizingCursor<'_, &[T]> {
        ArrayLocalizingCursor::new(self.data, &self.indexer, 0, self.interval())
    }

    pub fn localizing_cursor_in(&self, domain: &Interval) -> Result<ArrayLocalizingCursor<'_, &[T]>> {
        check_domain(&self.indexer, domain)?;
        Ok(ArrayLocalizingCursor::new(
            self.data,
            &self.indexer,
            0,
            domain.clone(),
        ))
    }

    /// Copy into an owned image.
    pub fn to_img(&self) -> ArrayImg<T>
    where
        T: Clone,
    {
        ArrayImg {
            data: self.data.to_vec(),
            indexer: self.indexer.clone(),
        }
    }
}

impl<T> Dimensions for ArrayImgView<'_, T> {
    fn ndim(&self) -> usize {
        self.indexer.ndim()
    }

    fn min(&self, _dim: usize) -> isize {
        0
    }

    fn max(&self, dim: usize) -> isize {
        self.indexer.extents()[dim] as isize - 1
    }
}

impl<T> RandomAccessible for ArrayImgView<'_, T> {
    type Element = T;
    type Access<'b>
        = ArrayRandomAccessRef<'b, T>
    where
        Self: 'b;

    fn random_access(&self) -> Self::Access<'_> {
        ArrayImgView::random_access(self)
    }
}

/// A mutable slab of an [ArrayImg], covering full extents in all but the last dimension.
///
/// Positions are in the coordinates of the whole image.
#[derive(Debug)]
pub struct ArraySlabMut<'a, T> {
    data: &'a mut [T],
    indexer: &'a StrideIndexer,
    base: isize,
    interval: Interval,
}

impl<T> ArraySlabMut<'_, T> {
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// The slab's elements in canonical order.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }

    pub fn localizing_cursor(&mut self) -> ArrayLocalizingCursor<'_, &mut [T]> {
        ArrayLocalizingCursor::new(
            &mut *self.data,
            self.indexer,
            self.base,
            self.interval.clone(),
        )
    }
}
