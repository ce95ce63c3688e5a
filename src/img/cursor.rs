use std::ops::{Deref, DerefMut};

use crate::{
    Cursor, CursorMut, CursorState, Dimensions, Error, Interval, Localizable, Result, ShortVec,
    indexer::StrideIndexer,
};

/// Cursor over a whole image which only tracks the flat offset.
///
/// This is the cheapest way to visit every element.
/// Localizing it divides the offset back into a position,
/// so prefer [ArrayLocalizingCursor] when positions are needed for every element.
#[derive(Debug, Clone)]
pub struct ArrayCursor<'a, B> {
    data: B,
    indexer: &'a StrideIndexer,
    // -1 before the first element
    index: isize,
    last: isize,
}

impl<'a, B> ArrayCursor<'a, B> {
    pub(crate) fn new(data: B, indexer: &'a StrideIndexer) -> Self {
        Self {
            data,
            indexer,
            index: -1,
            last: indexer.len() as isize - 1,
        }
    }

    /// Flat offset of the current element.
    pub fn offset(&self) -> isize {
        self.index
    }
}

impl<B> Localizable for ArrayCursor<'_, B> {
    fn ndim(&self) -> usize {
        self.indexer.ndim()
    }

    fn position(&self, dim: usize) -> isize {
        self.indexer.from_flat_dim(self.index as usize, dim)
    }

    fn localize(&self, buf: &mut [isize]) {
        self.indexer.from_flat(self.index as usize, buf);
    }
}

impl<T, B: Deref<Target = [T]>> Cursor for ArrayCursor<'_, B> {
    type Element = T;

    fn state(&self) -> CursorState {
        if self.index < 0 {
            CursorState::BeforeFirst
        } else if self.index >= self.last {
            CursorState::Exhausted
        } else {
            CursorState::InProgress
        }
    }

    #[inline]
    fn has_next(&self) -> bool {
        self.index < self.last
    }

    #[inline]
    fn fwd(&mut self) -> Result<()> {
        if self.index >= self.last {
            return Err(Error::CursorExhausted);
        }
        self.index += 1;
        Ok(())
    }

    fn jump(&mut self, steps: usize) -> Result<()> {
        // never negative: index <= last
        if ((self.last - self.index) as usize) < steps {
            return Err(Error::CursorExhausted);
        }
        self.index += steps as isize;
        Ok(())
    }

    fn reset(&mut self) {
        log::trace!("Resetting flat cursor");
        self.index = -1;
    }

    #[inline]
    fn get(&self) -> &T {
        &self.data[self.index as usize]
    }
}

impl<T, B: DerefMut<Target = [T]>> CursorMut for ArrayCursor<'_, B> {
    #[inline]
    fn get_mut(&mut self) -> &mut T {
        &mut self.data[self.index as usize]
    }
}

/// Cursor over an axis-aligned domain which keeps its position up to date on every step.
///
/// `base` is the flat offset of the first element of `data`,
/// allowing the cursor to walk a slab of a larger image in that image's coordinates.
#[derive(Debug, Clone)]
pub struct ArrayLocalizingCursor<'a, B> {
    data: B,
    indexer: &'a StrideIndexer,
    base: isize,
    domain: Interval,
    position: ShortVec<isize>,
    offset: isize,
    visited: usize,
    size: usize,
}

impl<'a, B> ArrayLocalizingCursor<'a, B> {
    /// `domain` must lie within the part of the image covered by `data`; this is not checked.
    pub(crate) fn new(data: B, indexer: &'a StrideIndexer, base: isize, domain: Interval) -> Self {
        let size = domain.size();
        let mut out = Self {
            data,
            indexer,
            base,
            position: domain.mins().iter().copied().collect(),
            domain,
            offset: 0,
            visited: 0,
            size,
        };
        out.rewind();
        out
    }

    fn rewind(&mut self) {
        self.position.copy_from_slice(self.domain.mins());
        self.position[0] -= 1;
        self.offset = self.indexer.to_flat(&self.position);
        self.visited = 0;
    }

    pub fn domain(&self) -> &Interval {
        &self.domain
    }

    /// Flat offset of the current element in the whole image.
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    fn step(&mut self) {
        self.visited += 1;
        self.position[0] += 1;
        self.offset += 1;
        let last_dim = self.position.len() - 1;
        let mut dim = 0;
        while dim < last_dim && self.position[dim] > self.domain.max(dim) {
            let min = self.domain.min(dim);
            self.offset -= (self.position[dim] - min) * self.indexer.stride(dim);
            self.position[dim] = min;
            dim += 1;
            self.position[dim] += 1;
            self.offset += self.indexer.stride(dim);
        }
    }

    #[inline]
    fn local_index(&self) -> usize {
        (self.offset - self.base) as usize
    }
}

impl<B> Localizable for ArrayLocalizingCursor<'_, B> {
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

impl<T, B: Deref<Target = [T]>> Cursor for ArrayLocalizingCursor<'_, B> {
    type Element = T;

    fn state(&self) -> CursorState {
        if self.visited == 0 {
            CursorState::BeforeFirst
        } else if self.visited == self.size {
            CursorState::Exhausted
        } else {
            CursorState::InProgress
        }
    }

    #[inline]
    fn has_next(&self) -> bool {
        self.visited < self.size
    }

    #[inline]
    fn fwd(&mut self) -> Result<()> {
        if self.visited >= self.size {
            return Err(Error::CursorExhausted);
        }
        self.step();
        Ok(())
    }

    fn jump(&mut self, steps: usize) -> Result<()> {
        if self.size - self.visited < steps {
            return Err(Error::CursorExhausted);
        }
        for _ in 0..steps {
            self.step();
        }
        Ok(())
    }

    fn reset(&mut self) {
        log::trace!("Resetting localizing cursor over {:?}", self.domain);
        self.rewind();
    }

    #[inline]
    fn get(&self) -> &T {
        &self.data[self.local_index()]
    }
}

impl<T, B: DerefMut<Target = [T]>> CursorMut for ArrayLocalizingCursor<'_, B> {
    #[inline]
    fn get_mut(&mut self) -> &mut T {
        let idx = self.local_index();
        &mut self.data[idx]
    }
}
