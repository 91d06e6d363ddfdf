//! Scalar number traits and small math helpers.
//!
//! [`Scalar`] is the arithmetic surface every vector/matrix element must
//! provide; [`Real`] extends it with the floating-point operations the norms
//! and factorizations need. Custom numeric wrapper types implement both by
//! hand and opt into vector storage with [`array_storage_dims!`].
//!
//! [`array_storage_dims!`]: crate::array_storage_dims

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

/// Element type of vectors and matrices.
///
/// `floor`/`round`/`ceil` are total for integers as well (they are the
/// identity there), which keeps the element-wise operation set uniform across
/// storage kinds.
pub trait Scalar:
    Copy
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    /// Absolute value.
    fn abs(self) -> Self;
    /// Largest integer value not greater than `self`.
    fn floor(self) -> Self;
    /// Nearest integer value.
    fn round(self) -> Self;
    /// Smallest integer value not less than `self`.
    fn ceil(self) -> Self;
    /// `self * b + c`.
    fn mul_add(self, b: Self, c: Self) -> Self;
}

/// Scalar with the floating-point surface required by norms, factorizations
/// and the eigensolver.
pub trait Real: Scalar {
    /// Square root.
    fn sqrt(self) -> Self;
    /// Machine epsilon.
    fn epsilon() -> Self;

    /// Threshold below which a value is treated as zero.
    ///
    /// `sqrt(sqrt(epsilon))`, so near-zero tests stay meaningful after the
    /// squarings that show up in norm and pivot computations.
    #[inline]
    fn tiny() -> Self {
        Self::epsilon().sqrt().sqrt()
    }

    /// Is `self` within [`tiny`](Real::tiny) of zero?
    #[inline]
    fn is_tiny(self) -> bool {
        self.abs() < Self::tiny()
    }
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }
            #[inline]
            fn floor(self) -> Self {
                self.floor()
            }
            #[inline]
            fn round(self) -> Self {
                self.round()
            }
            #[inline]
            fn ceil(self) -> Self {
                self.ceil()
            }
            #[inline]
            fn mul_add(self, b: Self, c: Self) -> Self {
                self * b + c
            }
        }

        impl Real for $t {
            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }
            #[inline]
            fn epsilon() -> Self {
                <$t>::EPSILON
            }
        }
    )*};
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }
            #[inline]
            fn floor(self) -> Self {
                self
            }
            #[inline]
            fn round(self) -> Self {
                self
            }
            #[inline]
            fn ceil(self) -> Self {
                self
            }
            #[inline]
            fn mul_add(self, b: Self, c: Self) -> Self {
                self * b + c
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);
impl_scalar_int!(i32, i64);

/// Sign of the value: `1`, `0` or `-1`.
#[inline]
pub fn sign<T: Scalar>(a: T) -> T {
    if T::zero() < a {
        T::one()
    } else if a < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Smaller of two values.
#[inline]
pub fn min<T: Scalar>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// Larger of two values.
#[inline]
pub fn max<T: Scalar>(a: T, b: T) -> T {
    if a < b {
        b
    } else {
        a
    }
}

/// Division that yields zero for a near-zero divisor.
#[inline]
pub fn safe_divide<T: Real>(a: T, b: T) -> T {
    if b.is_tiny() {
        T::zero()
    } else {
        a / b
    }
}

/// Second power with one multiplication.
#[inline]
pub fn pow2<T: Scalar>(a: T) -> T {
    a * a
}

/// Third power with two multiplications.
#[inline]
pub fn pow3<T: Scalar>(a: T) -> T {
    a * a * a
}

/// Fourth power with two multiplications.
#[inline]
pub fn pow4<T: Scalar>(a: T) -> T {
    let a2 = a * a;
    a2 * a2
}
