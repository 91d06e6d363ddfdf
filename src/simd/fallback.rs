//! Portable register backend for architectures without a dedicated one.

use super::reg::{ArrayReg, ArrayRegMask};

/// Four `f32` lanes (portable).
pub type F32x4 = ArrayReg<f32, 4>;
/// Mask for [`F32x4`].
pub type M32x4 = ArrayRegMask<4>;
/// Eight `f32` lanes (portable).
pub type F32x8 = ArrayReg<f32, 8>;
/// Mask for [`F32x8`].
pub type M32x8 = ArrayRegMask<8>;
/// Two `f64` lanes (portable).
pub type F64x2 = ArrayReg<f64, 2>;
/// Mask for [`F64x2`].
pub type M64x2 = ArrayRegMask<2>;
/// Four `f64` lanes (portable).
pub type F64x4 = ArrayReg<f64, 4>;
/// Mask for [`F64x4`].
pub type M64x4 = ArrayRegMask<4>;
