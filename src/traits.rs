//! Capability interfaces shared by images, views, cursors and interpolators.
//!
//! None of the positioning methods validate their input:
//! these are called per element in hot loops.
//! Positions outside the underlying data either panic
//! (if they leave the backing buffer) or alias another element.
use crate::Result;

/// Something with an integer position.
pub trait Localizable {
    fn ndim(&self) -> usize;

    fn position(&self, dim: usize) -> isize;

    /// Write the current position into a pre-allocated buffer.
    fn localize(&self, buf: &mut [isize]) {
        for (d, b) in buf.iter_mut().enumerate().take(self.ndim()) {
            *b = self.position(d);
        }
    }

    /// As [Localizable::localize], converting to real coordinates.
    fn localize_real(&self, buf: &mut [f64]) {
        for (d, b) in buf.iter_mut().enumerate().take(self.ndim()) {
            *b = self.position(d) as f64;
        }
    }
}

/// Something whose integer position can be changed.
pub trait Positionable: Localizable {
    /// Absolute positioning in every dimension. O(ndim).
    fn set_position(&mut self, pos: &[isize]);

    /// Absolute positioning in one dimension. O(1).
    fn set_position_dim(&mut self, value: isize, dim: usize);

    /// Relative positioning in one dimension. O(1).
    fn move_dim(&mut self, delta: isize, dim: usize);

    fn fwd(&mut self, dim: usize) {
        self.move_dim(1, dim);
    }

    fn bck(&mut self, dim: usize) {
        self.move_dim(-1, dim);
    }

    /// Relative positioning in every dimension.
    fn move_by(&mut self, delta: &[isize]) {
        for (dim, d) in delta.iter().enumerate() {
            self.move_dim(*d, dim);
        }
    }
}

/// A handle which can be positioned anywhere and read there.
///
/// The returned reference is a live view of the element at the current position;
/// the borrow checker ends it before the handle can move again.
pub trait RandomAccess: Positionable {
    type Element;

    fn get(&self) -> &Self::Element;
}

pub trait RandomAccessMut: RandomAccess {
    fn get_mut(&mut self) -> &mut Self::Element;

    fn set(&mut self, value: Self::Element) {
        *self.get_mut() = value;
    }
}

/// A source of [RandomAccess] handles, e.g. an image or a view over one.
///
/// Handles borrow the source immutably,
/// so any number of them may exist (and be used on different threads) at once.
pub trait RandomAccessible {
    type Element;
    type Access<'a>: RandomAccess<Element = Self::Element>
    where
        Self: 'a;

    /// A fresh handle at the origin.
    fn random_access(&self) -> Self::Access<'_>;
}

impl<S: RandomAccessible + ?Sized> RandomAccessible for &S {
    type Element = S::Element;
    type Access<'a>
        = S::Access<'a>
    where
        Self: 'a;

    fn random_access(&self) -> Self::Access<'_> {
        (**self).random_access()
    }
}

/// Progress of a [Cursor] through its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing has been yielded yet; reading the element is not meaningful.
    BeforeFirst,
    InProgress,
    /// The last position has been yielded; advancing again is an error.
    Exhausted,
}

/// Sequential, restartable iteration over a bounded domain in canonical order
/// (dimension 0 fastest).
pub trait Cursor: Localizable {
    type Element;

    fn state(&self) -> CursorState;

    fn has_next(&self) -> bool {
        self.state() != CursorState::Exhausted
    }

    /// Advance by one position.
    fn fwd(&mut self) -> Result<()>;

    /// Advance by `steps` positions.
    /// Fails without moving if fewer than `steps` positions remain.
    fn jump(&mut self, steps: usize) -> Result<()>;

    /// Return to the state before the first element; the domain is preserved.
    fn reset(&mut self);

    /// Element at the current position.
    ///
    /// Panics or returns an arbitrary element in the [CursorState::BeforeFirst] state.
    fn get(&self) -> &Self::Element;

    /// Advance, then read.
    fn next(&mut self) -> Result<&Self::Element> {
        self.fwd()?;
        Ok(self.get())
    }
}

pub trait CursorMut: Cursor {
    fn get_mut(&mut self) -> &mut Self::Element;

    fn next_mut(&mut self) -> Result<&mut Self::Element> {
        self.fwd()?;
        Ok(self.get_mut())
    }
}

/// A handle which can be positioned at real coordinates and sampled there,
/// typically an interpolator.
pub trait RealRandomAccess {
    type Element;

    fn ndim(&self) -> usize;

    fn real_position(&self, dim: usize) -> f64;

    fn set_real_position(&mut self, pos: &[f64]) {
        for (dim, p) in pos.iter().enumerate() {
            self.set_real_position_dim(*p, dim);
        }
    }

    fn set_real_position_dim(&mut self, value: f64, dim: usize);

    fn move_real_dim(&mut self, delta: f64, dim: usize) {
        let current = self.real_position(dim);
        self.set_real_position_dim(current + delta, dim);
    }

    /// Sample at the current position.
    ///
    /// Takes `&mut self` as the wrapped handle is repositioned to read the neighbourhood.
    fn get(&mut self) -> Self::Element;
}
