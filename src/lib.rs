//! Compile-time-sized, SIMD-accelerated dense linear algebra.
//!
//! `lockstep` is the numerical foundation of a particle-based physics
//! solver: fixed-dimension vectors and square matrices (dimensions known at
//! compile time, typically 1–4), element-wise and algebraic operations over
//! them, and a small set of direct dense solvers used to invert the little
//! systems that arise per particle or per cell.
//!
//! The dimension picks the storage at compile time: `f32`/`f64` vectors pack
//! their elements into the smallest hardware SIMD register family that fits
//! ([`simd::deduced_width`]), while every other scalar type falls back to a
//! plain array with identical observable behavior. There is no runtime
//! branching between the two paths, no heap allocation anywhere, and every
//! value is `Copy` and thread-agnostic.
//!
//! ```
//! use lockstep::linalg::llt;
//! use lockstep::{Mat, Vec};
//!
//! let a = Mat::from_rows([
//!     Vec::from([4.0f64, 2.0]),
//!     Vec::from([2.0, 10.0]),
//! ]);
//! let b = Vec::from([6.0, 12.0]);
//!
//! let chol = llt(&a).unwrap();
//! assert!((a * chol.solve(b)).approx_eq(b));
//! assert_eq!(chol.det(), 36.0);
//! ```
//!
//! Numerical failure is data, not an exception: factorizations return
//! [`linalg::FactorError`] and the eigensolver returns
//! [`linalg::EvdError`], both everyday outcomes of ill-conditioned
//! per-particle systems that the caller decides how to handle.

pub mod linalg;
pub mod mat;
pub mod scalar;
pub mod simd;
pub mod vec;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use mat::{outer, outer_sqr, Mat};
pub use scalar::{Real, Scalar};
pub use vec::{
    concat, cross, head, maximum, minimum, tail, ArrayStorage, Element, MaskStorage, ParseError,
    SimdStorage, Vec, VecMask, VecStorage,
};
