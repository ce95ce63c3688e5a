//! Numeric element types.

/// The narrow numeric capability an element needs for interpolation and resampling.
///
/// Integer types round to nearest on [RealType::set_real]
/// and saturate at their bounds; NaN becomes zero.
pub trait RealType: Copy + PartialOrd + std::fmt::Debug + Send + Sync + 'static {
    /// A zero-initialised instance of this type.
    fn zero() -> Self;

    fn real(&self) -> f64;

    fn set_real(&mut self, value: f64);

    fn from_real(value: f64) -> Self {
        let mut out = Self::zero();
        out.set_real(value);
        out
    }
}

macro_rules! real_type_float {
    ($($t:ty),*) => {$(
        impl RealType for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn real(&self) -> f64 {
                *self as f64
            }

            #[inline]
            fn set_real(&mut self, value: f64) {
                *self = value as $t;
            }
        }
    )*};
}

macro_rules! real_type_int {
    ($($t:ty),*) => {$(
        impl RealType for $t {
            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn real(&self) -> f64 {
                *self as f64
            }

            #[inline]
            fn set_real(&mut self, value: f64) {
                // float-to-int `as` saturates
                *self = value.round() as $t;
            }
        }
    )*};
}

real_type_float!(f32, f64);
real_type_int!(u8, i8, u16, i16, u32, i32, u64, i64);
