use crate::{
    RandomAccess, RandomAccessible, RealRandomAccess, ShortVec,
    interpolation::InterpolatorFactory,
};

/// Reads the element at the lattice point closest to the real position.
///
/// Halfway cases round up, in every dimension alike,
/// so that `-0.5` and `0.5` snap to `0` and `1` respectively.
#[derive(Debug, Clone)]
pub struct NearestNeighborInterpolator<A> {
    access: A,
    position: ShortVec<f64>,
}

impl<A: RandomAccess> NearestNeighborInterpolator<A> {
    pub fn new(access: A) -> Self {
        let position = (0..access.ndim())
            .map(|d| access.position(d) as f64)
            .collect();
        Self { access, position }
    }

    /// Read the nearest element without cloning it.
    pub fn get_ref(&self) -> &A::Element {
        self.access.get()
    }

    pub fn into_inner(self) -> A {
        self.access
    }
}

fn nearest(value: f64) -> isize {
    // `value + 0.5` would round just-below-half values up
    let base = value.floor();
    if value - base >= 0.5 {
        base as isize + 1
    } else {
        base as isize
    }
}

impl<A> RealRandomAccess for NearestNeighborInterpolator<A>
where
    A: RandomAccess,
    A::Element: Clone,
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
        self.position[dim] = value;
        self.access.set_position_dim(nearest(value), dim);
    }

    fn get(&mut self) -> A::Element {
        self.access.get().clone()
    }
}

/// Creates [NearestNeighborInterpolator]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighborInterpolatorFactory;

impl<S> InterpolatorFactory<S> for NearestNeighborInterpolatorFactory
where
    S: RandomAccessible,
    S::Element: Clone,
{
    type Interpolator<'a>
        = NearestNeighborInterpolator<S::Access<'a>>
    where
        S: 'a;

    fn create<'a>(&self, source: &'a S) -> Self::Interpolator<'a> {
        NearestNeighborInterpolator::new(source.random_access())
    }
}
