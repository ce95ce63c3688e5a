use std::sync::Arc;

use smallvec::ToSmallVec;

use crate::{Error, Result, ShortVec};

/// Maps real coordinates of one space into another,
/// e.g. from a resampling target into its source.
///
/// Implementations do not check the lengths of their inputs,
/// as they are called once per pixel; mismatched buffers may panic.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Transform a single point, writing into a pre-allocated buffer.
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]);

    /// Transform multiple points into pre-allocated buffers.
    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            self.transform_into(pt, buf);
        }
    }

    /// The inverse transformation, if it exists.
    fn invert(&self) -> Option<Arc<dyn Transformation>>;

    /// `true` means coordinates pass through unchanged;
    /// `false` is not definitive.
    fn is_identity(&self) -> bool;

    fn input_ndim(&self) -> usize;

    fn output_ndim(&self) -> usize;
}

/// Passes coordinates through unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Identity(usize);

impl Identity {
    pub fn new(ndim: usize) -> Self {
        Self(ndim)
    }
}

impl Transformation for Identity {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        buf.copy_from_slice(pt);
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(*self))
    }

    fn is_identity(&self) -> bool {
        true
    }

    fn input_ndim(&self) -> usize {
        self.0
    }

    fn output_ndim(&self) -> usize {
        self.0
    }
}

/// Per-dimension `out = scale * in + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTranslate {
    scale: ShortVec<f64>,
    offset: ShortVec<f64>,
}

impl ScaleTranslate {
    /// Scales must be finite, normal and non-zero (negative flips the axis);
    /// offsets must be finite.
    pub fn try_new(scale: &[f64], offset: &[f64]) -> Result<Self> {
        if scale.len() != offset.len() {
            return Err(Error::DimensionMismatch {
                expected: scale.len(),
                actual: offset.len(),
            });
        }
        for (dim, (s, o)) in scale.iter().zip(offset.iter()).enumerate() {
            let reason = if s.is_nan() {
                "scale is NaN"
            } else if s.is_infinite() {
                "scale is infinite"
            } else if *s == 0.0 {
                "scale is zero"
            } else if s.is_subnormal() {
                "scale is subnormal"
            } else if !o.is_finite() {
                "offset is not finite"
            } else {
                continue;
            };
            return Err(Error::InvalidParameter { dim, reason });
        }
        Ok(Self {
            scale: scale.to_smallvec(),
            offset: offset.to_smallvec(),
        })
    }

    /// Scale only, with no offset.
    pub fn from_scale(scale: &[f64]) -> Result<Self> {
        let offset: ShortVec<f64> = scale.iter().map(|_| 0.0).collect();
        Self::try_new(scale, &offset)
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn offset(&self) -> &[f64] {
        &self.offset
    }
}

impl Transformation for ScaleTranslate {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        for (((o, p), s), t) in buf
            .iter_mut()
            .zip(pt.iter())
            .zip(self.scale.iter())
            .zip(self.offset.iter())
        {
            *o = s * p + t;
        }
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        // in = (out - offset) / scale
        Some(Arc::new(ScaleTranslate {
            scale: self.scale.iter().map(|s| 1.0 / s).collect(),
            offset: self
                .scale
                .iter()
                .zip(self.offset.iter())
                .map(|(s, t)| -t / s)
                .collect(),
        }))
    }

    fn is_identity(&self) -> bool {
        self.scale.iter().all(|s| *s == 1.0) && self.offset.iter().all(|t| *t == 0.0)
    }

    fn input_ndim(&self) -> usize {
        self.scale.len()
    }

    fn output_ndim(&self) -> usize {
        self.scale.len()
    }
}
