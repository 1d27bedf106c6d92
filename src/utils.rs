use std::fmt::{Debug, Display};

use num::{Float, PrimInt, Signed, traits::FloatConst};

/// Floating-point type the engine is instantiated for.
///
/// Single and double precision share the same code; only the numeric type
/// differs.
pub trait GribFloat:
    Float + FloatConst + Debug + Display + Default + Send + Sync + 'static
{
    fn from_f64_lossy(v: f64) -> Self;

    /// Slack, in grid index units, allowed when testing whether a point lies
    /// on the grid.
    fn index_tolerance() -> Self {
        Self::epsilon().sqrt()
    }
}

macro_rules! add_impl_for_floats {
    ($($ty:ty,)*) => ($(
        impl GribFloat for $ty {
            fn from_f64_lossy(v: f64) -> Self {
                v as $ty
            }
        }
    )*);
}

add_impl_for_floats! {
    f32,
    f64,
}

/// Integer type of the raw template values.
///
/// `i32` accompanies single-precision callers and `i64` double-precision
/// ones.
pub trait TemplateInt: PrimInt + Signed + Debug + Send + Sync {
    fn as_i64(self) -> i64;
}

macro_rules! add_impl_for_ints {
    ($($ty:ty,)*) => ($(
        impl TemplateInt for $ty {
            fn as_i64(self) -> i64 {
                i64::from(self)
            }
        }
    )*);
}

add_impl_for_ints! {
    i32,
    i64,
}

/// Wraps a longitude in degrees into `[0, 360)`.
pub(crate) fn normalize_longitude<F: GribFloat>(lon: F) -> F {
    let full = F::from_f64_lossy(360.);
    let lon = lon % full;
    let lon = if lon < F::zero() { lon + full } else { lon };
    // `-tiny + 360` may round up to exactly 360
    if lon >= full { lon - full } else { lon }
}

/// Wraps an angle difference in degrees into `[-180, 180)`.
pub(crate) fn wrap_degrees<F: GribFloat>(diff: F) -> F {
    let half = F::from_f64_lossy(180.);
    let shifted = normalize_longitude(diff + half);
    shifted - half
}
