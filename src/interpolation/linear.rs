use smallvec::smallvec;

use crate::{
    RandomAccess, RandomAccessible, RealRandomAccess, RealType, ShortVec,
    interpolation::InterpolatorFactory,
};

/// N-linear interpolation over any random access with real-valued elements.
///
/// The value at `p` is the affine combination of the `2^n` lattice corners around it,
/// each weighted by the product over dimensions of `frac` or `1 - frac`.
/// It is computed as successive pairwise blends along each dimension,
/// stepping the wrapped handle between corners without allocating.
///
/// Corners with zero weight are never read,
/// so sampling exactly on the lattice reads a single element
/// (and sampling on the last lattice point does not touch the one past it).
/// Positions further out than that must be made readable by the source,
/// e.g. with [crate::Extended].
#[derive(Debug, Clone)]
pub struct LinearInterpolator<A> {
    access: A,
    position: ShortVec<f64>,
    fraction: ShortVec<f64>,
}

impl<A: RandomAccess> LinearInterpolator<A>
where
    A::Element: RealType,
{
    /// Wrap a handle; the interpolator starts at the handle's current lattice position.
    pub fn new(access: A) -> Self {
        let position: ShortVec<f64> = (0..access.ndim())
            .map(|d| access.position(d) as f64)
            .collect();
        let fraction = smallvec![0.0; position.len()];
        Self {
            access,
            position,
            fraction,
        }
    }

    /// The interpolated value without converting back to the element type.
    pub fn get_real(&mut self) -> f64 {
        let ndim = self.fraction.len();
        blend(&mut self.access, &self.fraction, ndim)
    }

    pub fn into_inner(self) -> A {
        self.access
    }
}

/// Blend over dimensions `[0, dims)` around the handle's current (base) position.
/// The handle is left where it started.
fn blend<A>(access: &mut A, fraction: &[f64], dims: usize) -> f64
where
    A: RandomAccess,
    A::Element: RealType,
{
    let Some(dim) = dims.checked_sub(1) else {
        return access.get().real();
    };
    let lower = blend(access, fraction, dim);
    let w = fraction[dim];
    if w == 0.0 {
        return lower;
    }
    access.fwd(dim);
    let upper = blend(access, fraction, dim);
    access.bck(dim);
    lower + w * (upper - lower)
}

impl<A: RandomAccess> RealRandomAccess for LinearInterpolator<A>
where
    A::Element: RealType,
{
    type Element = A::Element;

    fn ndim(&self) -> usize {
        self.position.len()
    }

    fn real_position(&self, dim: usize) -> f64 {
        self.position[dim]
    }

    #[inline]
    fn set_real_position_dim(&mut self, value: f64, dim: usize) {
        let mut base = value.floor();
        let mut fraction = value - base;
        // tiny negative values round `value - floor` up to exactly 1
        if fraction >= 1.0 {
            base += 1.0;
            fraction = 0.0;
        }
        self.position[dim] = value;
        self.fraction[dim] = fraction;
        self.access.set_position_dim(base as isize, dim);
    }

    /// On the lattice the element is returned as-is, without a round trip through `f64`.
    fn get(&mut self) -> A::Element {
        if self.fraction.iter().all(|f| *f == 0.0) {
            return *self.access.get();
        }
        A::Element::from_real(self.get_real())
    }
}

/// Creates [LinearInterpolator]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearInterpolatorFactory;

impl<S> InterpolatorFactory<S> for LinearInterpolatorFactory
where
    S: RandomAccessible,
    S::Element: RealType,
{
    type Interpolator<'a>
        = LinearInterpolator<S::Access<'a>>
    where
        S: 'a;

    fn create<'a>(&self, source: &'a S) -> Self::Interpolator<'a> {
        LinearInterpolator::new(source.random_access())
    }
}
