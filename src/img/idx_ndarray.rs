use ndarray::{ArrayD, ArrayViewD, IxDyn, ShapeBuilder};

use super::{ArrayImg, ArrayImgView};
use crate::{Error, Result};

impl<T> ArrayImg<T> {
    /// Move the buffer into an ndarray indexed the same way (`arr[[x, y, ..]]`).
    ///
    /// The array is in Fortran order, so no elements are copied.
    pub fn into_ndarray(self) -> Result<ArrayD<T>> {
        let extents = self.extents().to_vec();
        ArrayD::from_shape_vec(IxDyn(&extents).f(), self.data)
            .map_err(|_| Error::SizeOverflow(extents))
    }

    /// Copy any ndarray, of any memory order, with its axes as the image's dimensions.
    pub fn from_ndarray(array: ArrayViewD<'_, T>) -> Result<Self>
    where
        T: Clone,
    {
        let extents = array.shape().to_vec();
        // logical order of the transposed view has axis 0 fastest
        let data = array.t().iter().cloned().collect();
        Self::from_vec(&extents, data)
    }
}

impl<'a, T> ArrayImgView<'a, T> {
    /// Borrow the memory of a Fortran-contiguous ndarray view without copying.
    pub fn from_ndarray(array: ArrayViewD<'a, T>) -> Result<Self> {
        let extents = array.shape().to_vec();
        let data = array
            .reversed_axes()
            .to_slice()
            .ok_or(Error::NotContiguous)?;
        Self::new(&extents, data)
    }
}
