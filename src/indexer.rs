//! Mapping between n-dimensional lattice positions and flat buffer offsets.
//!
//! Layout is canonical: dimension 0 varies fastest,
//! so `stride[0] == 1` and `stride[d] == stride[d - 1] * extent[d - 1]`.
use smallvec::ToSmallVec;

use crate::{Error, Result, ShortVec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrideIndexer {
    extents: ShortVec<usize>,
    strides: ShortVec<isize>,
    len: usize,
}

impl StrideIndexer {
    /// Validate the extents and derive strides.
    ///
    /// Fails for rank 0, any zero extent, or a total size
    /// which does not fit in an `isize`.
    pub fn new(extents: &[usize]) -> Result<Self> {
        if extents.is_empty() {
            return Err(Error::EmptyShape);
        }
        let mut strides = ShortVec::with_capacity(extents.len());
        let mut len: usize = 1;
        for (dim, ext) in extents.iter().enumerate() {
            if *ext == 0 {
                return Err(Error::ZeroExtent { dim });
            }
            strides.push(len as isize);
            len = len
                .checked_mul(*ext)
                .filter(|l| *l <= isize::MAX as usize)
                .ok_or_else(|| Error::SizeOverflow(extents.to_vec()))?;
        }
        Ok(Self {
            extents: extents.to_smallvec(),
            strides,
            len,
        })
    }

    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn stride(&self, dim: usize) -> isize {
        self.strides[dim]
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a valid shape holds at least one element.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat offset of `pos`. Not bounds-checked.
    #[inline]
    pub fn to_flat(&self, pos: &[isize]) -> isize {
        pos.iter().zip(self.strides.iter()).map(|(p, s)| p * s).sum()
    }

    /// Flat offset of `pos`, or `None` if it lies outside the shape.
    pub fn to_flat_checked(&self, pos: &[isize]) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.to_flat(pos) as usize)
    }

    /// Write the position of flat offset `index` into `buf`.
    /// Not bounds-checked.
    pub fn from_flat(&self, index: usize, buf: &mut [isize]) {
        let mut rem = index;
        for (b, ext) in buf.iter_mut().zip(self.extents.iter()) {
            *b = (rem % ext) as isize;
            rem /= ext;
        }
    }

    /// Position of flat offset `index` along a single dimension.
    #[inline]
    pub fn from_flat_dim(&self, index: usize, dim: usize) -> isize {
        ((index / self.strides[dim] as usize) % self.extents[dim]) as isize
    }

    pub fn contains(&self, pos: &[isize]) -> bool {
        pos.len() == self.extents.len()
            && pos
                .iter()
                .zip(self.extents.iter())
                .all(|(p, e)| *p >= 0 && (*p as usize) < *e)
    }
}
