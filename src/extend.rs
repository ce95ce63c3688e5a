//! Out-of-bounds strategies.
//!
//! Wrapping a bounded source in [Extended] makes every integer position readable,
//! which lets interpolators sample right up to (and past) the image edge.
use smallvec::smallvec;

use crate::{
    Dimensions, Interval, Localizable, Positionable, RandomAccess, RandomAccessible, ShortVec,
};

/// How positions outside the source's interval are answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Border<T> {
    /// Repeat the nearest edge element.
    Clamp,
    /// A fixed value everywhere outside.
    Constant(T),
    /// Mirror about the edge elements without repeating them
    /// (`-1 -> 1`, `len -> len - 2`).
    Mirror,
}

/// Map position `i` into `[min, max]`.
///
/// Returns `None` for positions outside the interval under [Border::Constant].
pub fn map_index<T>(i: isize, min: isize, max: isize, border: &Border<T>) -> Option<isize> {
    if min <= i && i <= max {
        return Some(i);
    }
    match border {
        Border::Constant(_) => None,
        Border::Clamp => Some(i.clamp(min, max)),
        Border::Mirror => {
            let len = max - min + 1;
            if len == 1 {
                return Some(min);
            }
            let period = 2 * len - 2;
            let r = (i - min).rem_euclid(period);
            Some(min + if r < len { r } else { period - r })
        }
    }
}

/// An unbounded view of a bounded source.
pub struct Extended<S: RandomAccessible> {
    source: S,
    interval: Interval,
    border: Border<S::Element>,
}

impl<S: RandomAccessible + Dimensions> Extended<S> {
    pub fn new(source: S, border: Border<S::Element>) -> Self {
        let interval = source.interval();
        Self {
            source,
            interval,
            border,
        }
    }
}

impl<S: RandomAccessible> Extended<S> {
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn border(&self) -> &Border<S::Element> {
        &self.border
    }

    /// Interval of the wrapped source; the extended view itself is unbounded.
    pub fn source_interval(&self) -> &Interval {
        &self.interval
    }
}

impl<S: RandomAccessible> RandomAccessible for Extended<S> {
    type Element = S::Element;
    type Access<'a>
        = ExtendedAccess<'a, S::Access<'a>>
    where
        Self: 'a;

    fn random_access(&self) -> Self::Access<'_> {
        ExtendedAccess::new(self.source.random_access(), &self.interval, &self.border)
    }
}

/// Random access into an [Extended] view.
///
/// Keeps its own (possibly out-of-bounds) position
/// and moves the wrapped handle to the mapped position one dimension at a time.
pub struct ExtendedAccess<'a, A: RandomAccess> {
    inner: A,
    interval: &'a Interval,
    border: &'a Border<A::Element>,
    position: ShortVec<isize>,
    outside: ShortVec<bool>,
    n_outside: usize,
}

impl<'a, A: RandomAccess> ExtendedAccess<'a, A> {
    fn new(inner: A, interval: &'a Interval, border: &'a Border<A::Element>) -> Self {
        let ndim = interval.ndim();
        let mut out = Self {
            inner,
            interval,
            border,
            position: smallvec![0; ndim],
            outside: smallvec![false; ndim],
            n_outside: 0,
        };
        for dim in 0..ndim {
            out.update(0, dim);
        }
        out
    }

    /// Whether the current position lies outside the source.
    pub fn is_outside(&self) -> bool {
        (0..self.position.len())
            .any(|d| self.position[d] < self.interval.min(d) || self.position[d] > self.interval.max(d))
    }

    #[inline]
    fn update(&mut self, value: isize, dim: usize) {
        self.position[dim] = value;
        let out = match map_index(
            value,
            self.interval.min(dim),
            self.interval.max(dim),
            self.border,
        ) {
            Some(mapped) => {
                self.inner.set_position_dim(mapped, dim);
                false
            }
            None => true,
        };
        if out != self.outside[dim] {
            self.outside[dim] = out;
            if out {
                self.n_outside += 1;
            } else {
                self.n_outside -= 1;
            }
        }
    }
}

impl<A: RandomAccess + Clone> Clone for ExtendedAccess<'_, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            interval: self.interval,
            border: self.border,
            position: self.position.clone(),
            outside: self.outside.clone(),
            n_outside: self.n_outside,
        }
    }
}

impl<A: RandomAccess> Localizable for ExtendedAccess<'_, A> {
    fn ndim(&self) -> usize {
        self.position.len()
    }

    fn position(&self, dim: usize) -> isize {
        self.position[dim]
    }
}

impl<A: RandomAccess> Positionable for ExtendedAccess<'_, A> {
    fn set_position(&mut self, pos: &[isize]) {
        for (dim, p) in pos.iter().enumerate() {
            self.update(*p, dim);
        }
    }

    fn set_position_dim(&mut self, value: isize, dim: usize) {
        self.update(value, dim);
    }

    fn move_dim(&mut self, delta: isize, dim: usize) {
        self.update(self.position[dim] + delta, dim);
    }
}

impl<A: RandomAccess> RandomAccess for ExtendedAccess<'_, A> {
    type Element = A::Element;

    #[inline]
    fn get(&self) -> &A::Element {
        match self.border {
            Border::Constant(value) if self.n_outside > 0 => value,
            _ => self.inner.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayImg, tests::counting_img};

    #[test]
    fn clamp_mapping() {
        let b = Border::<u8>::Clamp;
        assert_eq!(map_index(-3, 0, 4, &b), Some(0));
        assert_eq!(map_index(2, 0, 4, &b), Some(2));
        assert_eq!(map_index(99, 0, 4, &b), Some(4));
        assert_eq!(map_index(0, 2, 5, &b), Some(2));
    }

    #[test]
    fn mirror_mapping() {
        let b = Border::<u8>::Mirror;
        for i in -8..=8 {
            assert_eq!(map_index(i, 0, 0, &b), Some(0));
        }
        let expected_len2 = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for (i, expected) in (-4..=4).zip(expected_len2) {
            assert_eq!(map_index(i, 0, 1, &b), Some(expected));
        }
        let cases_len5 = [
            (-7, 1),
            (-5, 3),
            (-4, 4),
            (-1, 1),
            (0, 0),
            (4, 4),
            (5, 3),
            (7, 1),
            (8, 0),
        ];
        for (i, expected) in cases_len5 {
            assert_eq!(map_index(i, 0, 4, &b), Some(expected));
            assert_eq!(map_index(i + 10, 10, 14, &b), Some(expected + 10));
        }
    }

    #[test]
    fn constant_mapping() {
        let b = Border::Constant(7u8);
        assert_eq!(map_index(-1, 0, 4, &b), None);
        assert_eq!(map_index(5, 0, 4, &b), None);
        assert_eq!(map_index(3, 0, 4, &b), Some(3));
    }

    #[test]
    fn constant_border_reads_fill_value() {
        let img = counting_img(&[3, 2]);
        let ext = Extended::new(&img, Border::Constant(-1));
        let mut ra = ext.random_access();
        assert_eq!(*ra.get(), 0);
        ra.set_position(&[-1, 0]);
        assert_eq!(*ra.get(), -1);
        assert!(ra.is_outside());
        ra.set_position_dim(4, 1);
        assert_eq!(*ra.get(), -1);
        // back inside in one dimension only
        ra.set_position_dim(2, 0);
        assert_eq!(*ra.get(), -1);
        ra.move_dim(-3, 1);
        assert_eq!(*ra.get(), 5);
        assert!(!ra.is_outside());
        assert_eq!(ra.position(1), 1);
    }

    #[test]
    fn clamp_and_mirror_read_source() {
        let img = counting_img(&[3, 2]);
        let clamped = Extended::new(&img, Border::Clamp);
        let mut ra = clamped.random_access();
        ra.set_position(&[-5, 9]);
        assert_eq!(*ra.get(), 3);
        ra.fwd(0);
        assert_eq!(ra.position(0), -4);
        assert_eq!(*ra.get(), 3);

        let mirrored = Extended::new(&img, Border::Mirror);
        let mut ra = mirrored.random_access();
        ra.set_position(&[3, -1]);
        // x 3 -> 1, y -1 -> 1
        assert_eq!(*ra.get(), 4);
        let copied = ra.clone();
        ra.bck(0);
        assert_eq!(*copied.get(), 4);
        assert_eq!(*ra.get(), 5);
    }

    #[test]
    fn owned_source() {
        let img = ArrayImg::from_vec(&[2], vec![1.0f64, 2.0]).unwrap();
        let ext = Extended::new(img, Border::Constant(0.0));
        let mut ra = ext.random_access();
        ra.set_position(&[2]);
        assert_eq!(*ra.get(), 0.0);
        assert_eq!(ext.source_interval().max(0), 1);
        assert_eq!(ext.source().len(), 2);
    }
}
