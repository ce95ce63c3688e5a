use image::{ImageBuffer, Pixel, Primitive};

use super::{ArrayImg, ArrayImgView};
use crate::{Error, Result};

/// Image buffers are `[channel, x, y]` images:
/// channels are interleaved within a pixel, and pixels are stored row by row.
impl<'a, T: Primitive> ArrayImgView<'a, T> {
    pub fn from_image<P: Pixel<Subpixel = T>>(image: &'a ImageBuffer<P, Vec<T>>) -> Result<Self> {
        let (w, h) = image.dimensions();
        Self::new(
            &[P::CHANNEL_COUNT as usize, w as usize, h as usize],
            image.as_raw(),
        )
    }
}

impl<T: Primitive> ArrayImg<T> {
    /// Copy an image buffer into a `[channel, x, y]` image.
    pub fn from_image<P: Pixel<Subpixel = T>>(image: &ImageBuffer<P, Vec<T>>) -> Result<Self> {
        Ok(ArrayImgView::from_image(image)?.to_img())
    }

    /// Move a `[channel, x, y]` image into an image buffer without copying.
    pub fn into_image<P: Pixel<Subpixel = T>>(self) -> Result<ImageBuffer<P, Vec<T>>> {
        let extents = self.extents().to_vec();
        if extents.len() != 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                actual: extents.len(),
            });
        }
        let channels = P::CHANNEL_COUNT as usize;
        if extents[0] != channels {
            return Err(Error::DataLength {
                expected: channels,
                actual: extents[0],
            });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(extents[1]), u32::try_from(extents[2])) else {
            return Err(Error::SizeOverflow(extents));
        };
        ImageBuffer::from_raw(w, h, self.data).ok_or(Error::SizeOverflow(extents))
    }
}

#[cfg(test)]
mod tests {
    use image::{Luma, Rgb, RgbImage};

    use super::*;
    use crate::{Positionable, RandomAccess};

    #[test]
    fn view_channels_first() {
        let buf = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8, y as u8, 10 * x as u8 + y as u8]));
        let view = ArrayImgView::from_image(&buf).unwrap();
        assert_eq!(view.indexer().extents(), &[3, 4, 3]);

        let mut ra = view.random_access();
        ra.set_position(&[2, 3, 1]);
        assert_eq!(*ra.get(), 31);
        ra.set_position(&[1, 0, 2]);
        assert_eq!(*ra.get(), 2);
    }

    #[test]
    fn into_buffer() {
        let img = ArrayImg::from_fn(&[1, 5, 2], |p| (p[1] + 5 * p[2]) as u16).unwrap();
        let buf = img.clone().into_image::<Luma<u16>>().unwrap();
        assert_eq!(buf.dimensions(), (5, 2));
        assert_eq!(buf.get_pixel(3, 1).0, [8]);
        assert_eq!(ArrayImg::from_image(&buf).unwrap(), img);

        assert_eq!(
            img.into_image::<Rgb<u16>>().err(),
            Some(Error::DataLength {
                expected: 3,
                actual: 1
            })
        );
    }
}
