use smallvec::ToSmallVec;

use crate::{Error, Result, ShortVec};

/// Shape introspection for anything with integer bounds.
pub trait Dimensions {
    fn ndim(&self) -> usize;

    /// Smallest valid position in dimension `dim` (inclusive).
    fn min(&self, dim: usize) -> isize;

    /// Largest valid position in dimension `dim` (inclusive).
    fn max(&self, dim: usize) -> isize;

    fn extent(&self, dim: usize) -> usize {
        (self.max(dim) - self.min(dim) + 1) as usize
    }

    /// Number of lattice points inside the bounds.
    fn size(&self) -> usize {
        (0..self.ndim()).map(|d| self.extent(d)).product()
    }

    fn interval(&self) -> Interval {
        Interval {
            min: (0..self.ndim()).map(|d| self.min(d)).collect(),
            max: (0..self.ndim()).map(|d| self.max(d)).collect(),
        }
    }
}

impl<D: Dimensions + ?Sized> Dimensions for &D {
    fn ndim(&self) -> usize {
        (**self).ndim()
    }

    fn min(&self, dim: usize) -> isize {
        (**self).min(dim)
    }

    fn max(&self, dim: usize) -> isize {
        (**self).max(dim)
    }

    fn extent(&self, dim: usize) -> usize {
        (**self).extent(dim)
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

/// An axis-aligned integer box, with inclusive bounds in every dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    min: ShortVec<isize>,
    max: ShortVec<isize>,
}

impl Interval {
    pub fn try_new(min: &[isize], max: &[isize]) -> Result<Self> {
        if min.len() != max.len() {
            return Err(Error::DimensionMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }
        if min.is_empty() {
            return Err(Error::EmptyShape);
        }
        for (dim, (lo, hi)) in min.iter().zip(max.iter()).enumerate() {
            if lo > hi {
                return Err(Error::EmptyInterval {
                    dim,
                    min: *lo,
                    max: *hi,
                });
            }
        }
        Ok(Self {
            min: min.to_smallvec(),
            max: max.to_smallvec(),
        })
    }

    /// The interval `[0, extent)` in every dimension.
    pub fn from_extents(extents: &[usize]) -> Result<Self> {
        if let Some(dim) = extents.iter().position(|e| *e == 0) {
            return Err(Error::ZeroExtent { dim });
        }
        let min: ShortVec<isize> = extents.iter().map(|_| 0).collect();
        let max: ShortVec<isize> = extents.iter().map(|e| *e as isize - 1).collect();
        Self::try_new(&min, &max)
    }

    pub fn mins(&self) -> &[isize] {
        &self.min
    }

    pub fn maxs(&self) -> &[isize] {
        &self.max
    }

    pub fn contains(&self, pos: &[isize]) -> bool {
        pos.len() == self.min.len()
            && pos
                .iter()
                .zip(self.min.iter().zip(self.max.iter()))
                .all(|(p, (lo, hi))| lo <= p && p <= hi)
    }

    pub fn contains_interval(&self, other: &Interval) -> bool {
        other.ndim() == self.ndim() && self.contains(&other.min) && self.contains(&other.max)
    }

    /// Split into at most `parts` disjoint intervals along the last (slowest) dimension.
    ///
    /// With canonical layout each part covers a contiguous run of flat offsets.
    /// Fewer parts are returned if the last dimension is shorter than `parts`.
    pub fn split(&self, parts: usize) -> Result<Vec<Interval>> {
        if parts == 0 {
            return Err(Error::ZeroParts);
        }
        let last = self.ndim() - 1;
        let extent = self.extent(last);
        let parts = parts.min(extent);
        let base = extent / parts;
        let remainder = extent % parts;

        let mut out = Vec::with_capacity(parts);
        let mut start = self.min[last];
        for idx in 0..parts {
            let len = (base + usize::from(idx < remainder)) as isize;
            let mut part = self.clone();
            part.min[last] = start;
            part.max[last] = start + len - 1;
            start += len;
            out.push(part);
        }
        Ok(out)
    }
}

impl Dimensions for Interval {
    fn ndim(&self) -> usize {
        self.min.len()
    }

    fn min(&self, dim: usize) -> isize {
        self.min[dim]
    }

    fn max(&self, dim: usize) -> isize {
        self.max[dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introspection() {
        let iv = Interval::try_new(&[-1, 2], &[3, 2]).unwrap();
        assert_eq!(iv.ndim(), 2);
        assert_eq!(iv.extent(0), 5);
        assert_eq!(iv.extent(1), 1);
        assert_eq!(iv.size(), 5);
        assert_eq!(iv.interval(), iv);
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            Interval::try_new(&[0, 4], &[2, 3]),
            Err(Error::EmptyInterval {
                dim: 1,
                min: 4,
                max: 3
            })
        );
        assert!(Interval::try_new(&[0], &[1, 2]).is_err());
        assert_eq!(Interval::from_extents(&[3, 0]), Err(Error::ZeroExtent { dim: 1 }));
    }

    #[test]
    fn containment() {
        let iv = Interval::from_extents(&[3, 2]).unwrap();
        assert!(iv.contains(&[2, 1]));
        assert!(!iv.contains(&[3, 1]));
        assert!(!iv.contains(&[0, -1]));
        let inner = Interval::try_new(&[1, 0], &[2, 1]).unwrap();
        assert!(iv.contains_interval(&inner));
        assert!(!inner.contains_interval(&iv));
    }

    #[test]
    fn split_covers_without_overlap() {
        let iv = Interval::try_new(&[0, 0, 3], &[4, 1, 12]).unwrap();
        let parts = iv.split(4).unwrap();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.iter().map(|p| p.size()).sum::<usize>(), iv.size());
        let mut expected_min = 3;
        for p in parts.iter() {
            assert_eq!(p.min(2), expected_min);
            assert_eq!(p.mins()[..2], iv.mins()[..2]);
            expected_min = p.max(2) + 1;
        }
        assert_eq!(expected_min, 13);

        assert_eq!(iv.split(100).unwrap().len(), 10);
        assert_eq!(iv.split(0), Err(Error::ZeroParts));
    }
}
