use std::ops::{Deref, DerefMut};

use smallvec::smallvec;

use crate::{
    Localizable, Positionable, RandomAccess, RandomAccessMut, ShortVec, indexer::StrideIndexer,
};

/// Random access into a flat buffer with canonical strides.
///
/// `B` is `&[T]` for a read handle, which can be freely copied,
/// or `&mut [T]` for an exclusive write handle.
///
/// The cached flat offset always equals the dot product of the position and the strides;
/// every positioning method updates both in lockstep without allocating.
#[derive(Debug, Clone)]
pub struct ArrayRandomAccess<'a, B> {
    data: B,
    indexer: &'a StrideIndexer,
    position: ShortVec<isize>,
    offset: isize,
}

pub type ArrayRandomAccessRef<'a, T> = ArrayRandomAccess<'a, &'a [T]>;
pub type ArrayRandomAccessMut<'a, T> = ArrayRandomAccess<'a, &'a mut [T]>;

impl<'a, B> ArrayRandomAccess<'a, B> {
    pub(crate) fn new(data: B, indexer: &'a StrideIndexer) -> Self {
        Self {
            data,
            indexer,
            position: smallvec![0; indexer.ndim()],
            offset: 0,
        }
    }

    /// Flat offset of the current position.
    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn indexer(&self) -> &StrideIndexer {
        self.indexer
    }

    /// Step forward in dimension 0, where the stride is always 1.
    #[inline]
    pub fn fwd_dim0(&mut self) {
        self.offset += 1;
        self.position[0] += 1;
    }

    #[inline]
    pub fn bck_dim0(&mut self) {
        self.offset -= 1;
        self.position[0] -= 1;
    }

    #[inline]
    pub fn move_dim0(&mut self, delta: isize) {
        self.offset += delta;
        self.position[0] += delta;
    }
}

impl<B: Clone> ArrayRandomAccess<'_, B> {
    /// An independent handle at the same position.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl<T, B: Deref<Target = [T]>> ArrayRandomAccess<'_, B> {
    /// Element at the current position, or `None` if the position is outside the image.
    pub fn get_checked(&self) -> Option<&T> {
        if self.indexer.contains(&self.position) {
            self.data.get(self.offset as usize)
        } else {
            None
        }
    }
}

impl<B> Localizable for ArrayRandomAccess<'_, B> {
    fn ndim(&self) -> usize {
        self.position.len()
    }

    #[inline]
    fn position(&self, dim: usize) -> isize {
        self.position[dim]
    }

    fn localize(&self, buf: &mut [isize]) {
        buf[..self.position.len()].copy_from_slice(&self.position);
    }
}

impl<B> Positionable for ArrayRandomAccess<'_, B> {
    fn set_position(&mut self, pos: &[isize]) {
        self.position.copy_from_slice(pos);
        self.offset = self.indexer.to_flat(pos);
    }

    #[inline]
    fn set_position_dim(&mut self, value: isize, dim: usize) {
        self.offset += (value - self.position[dim]) * self.indexer.stride(dim);
        self.position[dim] = value;
    }

    #[inline]
    fn move_dim(&mut self, delta: isize, dim: usize) {
        self.offset += delta * self.indexer.stride(dim);
        self.position[dim] += delta;
    }

    #[inline]
    fn fwd(&mut self, dim: usize) {
        self.offset += self.indexer.stride(dim);
        self.position[dim] += 1;
    }

    #[inline]
    fn bck(&mut self, dim: usize) {
        self.offset -= self.indexer.stride(dim);
        self.position[dim] -= 1;
    }
}

impl<T, B: Deref<Target = [T]>> RandomAccess for ArrayRandomAccess<'_, B> {
    type Element = T;

    #[inline]
    fn get(&self) -> &T {
        &self.data[self.offset as usize]
    }
}

impl<T, B: DerefMut<Target = [T]>> RandomAccessMut for ArrayRandomAccess<'_, B> {
    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut self.data[self.offset as usize]
    }
}
