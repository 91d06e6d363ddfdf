//! `x86_64` register backend.
//!
//! SSE2 is part of the `x86_64` baseline, so the 128-bit types always wrap
//! hardware registers. The 256-bit types wrap `__m256`/`__m256d` only when
//! AVX is enabled at compile time; otherwise they are pairs of 128-bit
//! registers, which keeps the lane layout and the deduced widths identical.

use core::arch::x86_64::*;
use core::fmt;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

use bytemuck::{Pod, Zeroable};
use equator::assert;

use super::reg::{RegMask, Register};
#[cfg(not(target_feature = "avx"))]
use super::reg::{Doubled, DoubledMask};

/// Four `f32` lanes in one 128-bit register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(pub(crate) __m128);

/// Mask for [`F32x4`].
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct M32x4(pub(crate) __m128);

/// Two `f64` lanes in one 128-bit register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x2(pub(crate) __m128d);

/// Mask for [`F64x2`].
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct M64x2(pub(crate) __m128d);

unsafe impl Zeroable for F32x4 {}
unsafe impl Pod for F32x4 {}
unsafe impl Zeroable for F64x2 {}
unsafe impl Pod for F64x2 {}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lanes = [0.0f32; 4];
        self.store(&mut lanes);
        f.debug_tuple("F32x4").field(&lanes).finish()
    }
}

impl fmt::Debug for F64x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lanes = [0.0f64; 2];
        self.store(&mut lanes);
        f.debug_tuple("F64x2").field(&lanes).finish()
    }
}

impl fmt::Debug for M32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("M32x4").field(&self.bits()).finish()
    }
}

impl fmt::Debug for M64x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("M64x2").field(&self.bits()).finish()
    }
}

impl Add for F32x4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_ps(self.0, rhs.0)) }
    }
}
impl Sub for F32x4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_ps(self.0, rhs.0)) }
    }
}
impl Mul for F32x4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_ps(self.0, rhs.0)) }
    }
}
impl Div for F32x4 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_ps(self.0, rhs.0)) }
    }
}
impl Neg for F32x4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, _mm_set1_ps(-0.0))) }
    }
}

impl Register for F32x4 {
    type Lane = f32;
    type Mask = M32x4;
    const WIDTH: usize = 4;

    #[inline]
    fn splat(value: f32) -> Self {
        unsafe { Self(_mm_set1_ps(value)) }
    }
    #[inline]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= 4);
        unsafe { Self(_mm_loadu_ps(src.as_ptr())) }
    }
    #[inline]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= 4);
        unsafe { _mm_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn simd_eq(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmpeq_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_ne(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmpneq_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_lt(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmplt_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_le(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmple_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_gt(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmpgt_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_ge(self, rhs: Self) -> M32x4 {
        unsafe { M32x4(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_ps(self.0, rhs.0)) }
    }
    #[inline]
    fn abs(self) -> Self {
        unsafe { Self(_mm_andnot_ps(_mm_set1_ps(-0.0), self.0)) }
    }
    #[inline]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm_sqrt_ps(self.0)) }
    }

    #[inline]
    fn filter(mask: M32x4, v: Self) -> Self {
        unsafe { Self(_mm_and_ps(mask.0, v.0)) }
    }
    #[inline]
    fn select(mask: M32x4, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_or_ps(_mm_and_ps(mask.0, a.0), _mm_andnot_ps(mask.0, b.0))) }
    }
}

impl M32x4 {
    #[inline]
    fn bits(self) -> u32 {
        unsafe { _mm_movemask_ps(self.0) as u32 }
    }
}

impl Not for M32x4 {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, _mm_castsi128_ps(_mm_set1_epi32(-1)))) }
    }
}
impl BitAnd for M32x4 {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(self.0, rhs.0)) }
    }
}
impl BitOr for M32x4 {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_ps(self.0, rhs.0)) }
    }
}
impl BitXor for M32x4 {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, rhs.0)) }
    }
}

impl RegMask for M32x4 {
    const WIDTH: usize = 4;

    #[inline]
    fn splat(value: bool) -> Self {
        let bits = if value { -1 } else { 0 };
        unsafe { Self(_mm_castsi128_ps(_mm_set1_epi32(bits))) }
    }
    #[inline]
    fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let lane = |b: bool| if b { -1i32 } else { 0 };
        let (b0, b1) = (lane(f(0)), lane(f(1)));
        let (b2, b3) = (lane(f(2)), lane(f(3)));
        unsafe { Self(_mm_castsi128_ps(_mm_set_epi32(b3, b2, b1, b0))) }
    }
    #[inline]
    fn first_n(n: usize) -> Self {
        let lane = |i: usize| if i < n { -1i32 } else { 0 };
        unsafe { Self(_mm_castsi128_ps(_mm_set_epi32(lane(3), lane(2), lane(1), lane(0)))) }
    }
    #[inline]
    fn test(self, i: usize) -> bool {
        assert!(i < 4);
        self.bits() >> i & 1 != 0
    }
    #[inline]
    fn any(self) -> bool {
        self.bits() != 0
    }
    #[inline]
    fn all(self) -> bool {
        self.bits() == 0b1111
    }
    #[inline]
    fn count(self) -> usize {
        self.bits().count_ones() as usize
    }
    #[inline]
    fn find_true(self) -> isize {
        let bits = self.bits();
        if bits == 0 {
            -1
        } else {
            bits.trailing_zeros() as isize
        }
    }
}

impl Add for F64x2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_pd(self.0, rhs.0)) }
    }
}
impl Sub for F64x2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_pd(self.0, rhs.0)) }
    }
}
impl Mul for F64x2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_pd(self.0, rhs.0)) }
    }
}
impl Div for F64x2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_pd(self.0, rhs.0)) }
    }
}
impl Neg for F64x2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, _mm_set1_pd(-0.0))) }
    }
}

impl Register for F64x2 {
    type Lane = f64;
    type Mask = M64x2;
    const WIDTH: usize = 2;

    #[inline]
    fn splat(value: f64) -> Self {
        unsafe { Self(_mm_set1_pd(value)) }
    }
    #[inline]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= 2);
        unsafe { Self(_mm_loadu_pd(src.as_ptr())) }
    }
    #[inline]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= 2);
        unsafe { _mm_storeu_pd(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn simd_eq(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmpeq_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_ne(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmpneq_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_lt(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmplt_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_le(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmple_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_gt(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmpgt_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn simd_ge(self, rhs: Self) -> M64x2 {
        unsafe { M64x2(_mm_cmpge_pd(self.0, rhs.0)) }
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_pd(self.0, rhs.0)) }
    }
    #[inline]
    fn abs(self) -> Self {
        unsafe { Self(_mm_andnot_pd(_mm_set1_pd(-0.0), self.0)) }
    }
    #[inline]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm_sqrt_pd(self.0)) }
    }

    #[inline]
    fn filter(mask: M64x2, v: Self) -> Self {
        unsafe { Self(_mm_and_pd(mask.0, v.0)) }
    }
    #[inline]
    fn select(mask: M64x2, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_or_pd(_mm_and_pd(mask.0, a.0), _mm_andnot_pd(mask.0, b.0))) }
    }
}

impl M64x2 {
    #[inline]
    fn bits(self) -> u32 {
        unsafe { _mm_movemask_pd(self.0) as u32 }
    }
}

impl Not for M64x2 {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, _mm_castsi128_pd(_mm_set1_epi32(-1)))) }
    }
}
impl BitAnd for M64x2 {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_pd(self.0, rhs.0)) }
    }
}
impl BitOr for M64x2 {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_pd(self.0, rhs.0)) }
    }
}
impl BitXor for M64x2 {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_pd(self.0, rhs.0)) }
    }
}

impl RegMask for M64x2 {
    const WIDTH: usize = 2;

    #[inline]
    fn splat(value: bool) -> Self {
        let bits = if value { -1 } else { 0 };
        unsafe { Self(_mm_castsi128_pd(_mm_set1_epi32(bits))) }
    }
    #[inline]
    fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let lane = |b: bool| if b { -1i64 } else { 0 };
        let (b0, b1) = (lane(f(0)), lane(f(1)));
        unsafe { Self(_mm_castsi128_pd(_mm_set_epi64x(b1, b0))) }
    }
    #[inline]
    fn first_n(n: usize) -> Self {
        let lane = |i: usize| if i < n { -1i64 } else { 0 };
        unsafe { Self(_mm_castsi128_pd(_mm_set_epi64x(lane(1), lane(0)))) }
    }
    #[inline]
    fn test(self, i: usize) -> bool {
        assert!(i < 2);
        self.bits() >> i & 1 != 0
    }
    #[inline]
    fn any(self) -> bool {
        self.bits() != 0
    }
    #[inline]
    fn all(self) -> bool {
        self.bits() == 0b11
    }
    #[inline]
    fn count(self) -> usize {
        self.bits().count_ones() as usize
    }
    #[inline]
    fn find_true(self) -> isize {
        let bits = self.bits();
        if bits == 0 {
            -1
        } else {
            bits.trailing_zeros() as isize
        }
    }
}

/// Eight `f32` lanes in one 256-bit register.
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x8(pub(crate) __m256);

/// Mask for [`F32x8`].
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct M32x8(pub(crate) __m256);

/// Four `f64` lanes in one 256-bit register.
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x4(pub(crate) __m256d);

/// Mask for [`F64x4`].
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct M64x4(pub(crate) __m256d);

/// Eight `f32` lanes as a pair of 128-bit registers.
#[cfg(not(target_feature = "avx"))]
pub type F32x8 = Doubled<F32x4>;
/// Mask for [`F32x8`].
#[cfg(not(target_feature = "avx"))]
pub type M32x8 = DoubledMask<M32x4>;
/// Four `f64` lanes as a pair of 128-bit registers.
#[cfg(not(target_feature = "avx"))]
pub type F64x4 = Doubled<F64x2>;
/// Mask for [`F64x4`].
#[cfg(not(target_feature = "avx"))]
pub type M64x4 = DoubledMask<M64x2>;

#[cfg(target_feature = "avx")]
mod avx {
    use core::arch::x86_64::*;
    use core::fmt;
    use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

    use bytemuck::{Pod, Zeroable};
    use equator::assert;

    use super::super::reg::{RegMask, Register};
    use super::{F32x8, F64x4, M32x8, M64x4};

    unsafe impl Zeroable for F32x8 {}
    unsafe impl Pod for F32x8 {}
    unsafe impl Zeroable for F64x4 {}
    unsafe impl Pod for F64x4 {}

    impl fmt::Debug for F32x8 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut lanes = [0.0f32; 8];
            self.store(&mut lanes);
            f.debug_tuple("F32x8").field(&lanes).finish()
        }
    }

    impl fmt::Debug for F64x4 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut lanes = [0.0f64; 4];
            self.store(&mut lanes);
            f.debug_tuple("F64x4").field(&lanes).finish()
        }
    }

    impl fmt::Debug for M32x8 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_tuple("M32x8").field(&self.bits()).finish()
        }
    }

    impl fmt::Debug for M64x4 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_tuple("M64x4").field(&self.bits()).finish()
        }
    }

    impl Add for F32x8 {
        type Output = Self;
        #[inline]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_add_ps(self.0, rhs.0)) }
        }
    }
    impl Sub for F32x8 {
        type Output = Self;
        #[inline]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_sub_ps(self.0, rhs.0)) }
        }
    }
    impl Mul for F32x8 {
        type Output = Self;
        #[inline]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_mul_ps(self.0, rhs.0)) }
        }
    }
    impl Div for F32x8 {
        type Output = Self;
        #[inline]
        fn div(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_div_ps(self.0, rhs.0)) }
        }
    }
    impl Neg for F32x8 {
        type Output = Self;
        #[inline]
        fn neg(self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, _mm256_set1_ps(-0.0))) }
        }
    }

    impl Register for F32x8 {
        type Lane = f32;
        type Mask = M32x8;
        const WIDTH: usize = 8;

        #[inline]
        fn splat(value: f32) -> Self {
            unsafe { Self(_mm256_set1_ps(value)) }
        }
        #[inline]
        fn load(src: &[f32]) -> Self {
            assert!(src.len() >= 8);
            unsafe { Self(_mm256_loadu_ps(src.as_ptr())) }
        }
        #[inline]
        fn store(self, dst: &mut [f32]) {
            assert!(dst.len() >= 8);
            unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
        }

        #[inline]
        fn simd_eq(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_ne(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_lt(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_le(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_gt(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_ge(self, rhs: Self) -> M32x8 {
            unsafe { M32x8(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
        }

        #[inline]
        fn min(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_min_ps(self.0, rhs.0)) }
        }
        #[inline]
        fn max(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_max_ps(self.0, rhs.0)) }
        }
        #[inline]
        fn abs(self) -> Self {
            unsafe { Self(_mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0)) }
        }
        #[inline]
        fn sqrt(self) -> Self {
            unsafe { Self(_mm256_sqrt_ps(self.0)) }
        }

        #[inline]
        fn filter(mask: M32x8, v: Self) -> Self {
            unsafe { Self(_mm256_and_ps(mask.0, v.0)) }
        }
        #[inline]
        fn select(mask: M32x8, a: Self, b: Self) -> Self {
            unsafe { Self(_mm256_blendv_ps(b.0, a.0, mask.0)) }
        }
    }

    impl M32x8 {
        #[inline]
        fn bits(self) -> u32 {
            unsafe { _mm256_movemask_ps(self.0) as u32 }
        }
    }

    impl Not for M32x8 {
        type Output = Self;
        #[inline]
        fn not(self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, _mm256_castsi256_ps(_mm256_set1_epi32(-1)))) }
        }
    }
    impl BitAnd for M32x8 {
        type Output = Self;
        #[inline]
        fn bitand(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_ps(self.0, rhs.0)) }
        }
    }
    impl BitOr for M32x8 {
        type Output = Self;
        #[inline]
        fn bitor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_or_ps(self.0, rhs.0)) }
        }
    }
    impl BitXor for M32x8 {
        type Output = Self;
        #[inline]
        fn bitxor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_xor_ps(self.0, rhs.0)) }
        }
    }

    impl RegMask for M32x8 {
        const WIDTH: usize = 8;

        #[inline]
        fn splat(value: bool) -> Self {
            let bits = if value { -1 } else { 0 };
            unsafe { Self(_mm256_castsi256_ps(_mm256_set1_epi32(bits))) }
        }
        #[inline]
        fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
            let lane = |b: bool| if b { -1i32 } else { 0 };
            let (b0, b1, b2, b3) = (lane(f(0)), lane(f(1)), lane(f(2)), lane(f(3)));
            let (b4, b5, b6, b7) = (lane(f(4)), lane(f(5)), lane(f(6)), lane(f(7)));
            unsafe { Self(_mm256_castsi256_ps(_mm256_set_epi32(b7, b6, b5, b4, b3, b2, b1, b0))) }
        }
        #[inline]
        fn first_n(n: usize) -> Self {
            let lane = |i: usize| if i < n { -1i32 } else { 0 };
            unsafe {
                Self(_mm256_castsi256_ps(_mm256_set_epi32(
                    lane(7),
                    lane(6),
                    lane(5),
                    lane(4),
                    lane(3),
                    lane(2),
                    lane(1),
                    lane(0),
                )))
            }
        }
        #[inline]
        fn test(self, i: usize) -> bool {
            assert!(i < 8);
            self.bits() >> i & 1 != 0
        }
        #[inline]
        fn any(self) -> bool {
            self.bits() != 0
        }
        #[inline]
        fn all(self) -> bool {
            self.bits() == 0xff
        }
        #[inline]
        fn count(self) -> usize {
            self.bits().count_ones() as usize
        }
        #[inline]
        fn find_true(self) -> isize {
            let bits = self.bits();
            if bits == 0 {
                -1
            } else {
                bits.trailing_zeros() as isize
            }
        }
    }

    impl Add for F64x4 {
        type Output = Self;
        #[inline]
        fn add(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_add_pd(self.0, rhs.0)) }
        }
    }
    impl Sub for F64x4 {
        type Output = Self;
        #[inline]
        fn sub(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_sub_pd(self.0, rhs.0)) }
        }
    }
    impl Mul for F64x4 {
        type Output = Self;
        #[inline]
        fn mul(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_mul_pd(self.0, rhs.0)) }
        }
    }
    impl Div for F64x4 {
        type Output = Self;
        #[inline]
        fn div(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_div_pd(self.0, rhs.0)) }
        }
    }
    impl Neg for F64x4 {
        type Output = Self;
        #[inline]
        fn neg(self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, _mm256_set1_pd(-0.0))) }
        }
    }

    impl Register for F64x4 {
        type Lane = f64;
        type Mask = M64x4;
        const WIDTH: usize = 4;

        #[inline]
        fn splat(value: f64) -> Self {
            unsafe { Self(_mm256_set1_pd(value)) }
        }
        #[inline]
        fn load(src: &[f64]) -> Self {
            assert!(src.len() >= 4);
            unsafe { Self(_mm256_loadu_pd(src.as_ptr())) }
        }
        #[inline]
        fn store(self, dst: &mut [f64]) {
            assert!(dst.len() >= 4);
            unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), self.0) }
        }

        #[inline]
        fn simd_eq(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_EQ_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_ne(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_NEQ_UQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_lt(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_LT_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_le(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_LE_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_gt(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0)) }
        }
        #[inline]
        fn simd_ge(self, rhs: Self) -> M64x4 {
            unsafe { M64x4(_mm256_cmp_pd::<_CMP_GE_OQ>(self.0, rhs.0)) }
        }

        #[inline]
        fn min(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_min_pd(self.0, rhs.0)) }
        }
        #[inline]
        fn max(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_max_pd(self.0, rhs.0)) }
        }
        #[inline]
        fn abs(self) -> Self {
            unsafe { Self(_mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0)) }
        }
        #[inline]
        fn sqrt(self) -> Self {
            unsafe { Self(_mm256_sqrt_pd(self.0)) }
        }

        #[inline]
        fn filter(mask: M64x4, v: Self) -> Self {
            unsafe { Self(_mm256_and_pd(mask.0, v.0)) }
        }
        #[inline]
        fn select(mask: M64x4, a: Self, b: Self) -> Self {
            unsafe { Self(_mm256_blendv_pd(b.0, a.0, mask.0)) }
        }
    }

    impl M64x4 {
        #[inline]
        fn bits(self) -> u32 {
            unsafe { _mm256_movemask_pd(self.0) as u32 }
        }
    }

    impl Not for M64x4 {
        type Output = Self;
        #[inline]
        fn not(self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, _mm256_castsi256_pd(_mm256_set1_epi32(-1)))) }
        }
    }
    impl BitAnd for M64x4 {
        type Output = Self;
        #[inline]
        fn bitand(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_and_pd(self.0, rhs.0)) }
        }
    }
    impl BitOr for M64x4 {
        type Output = Self;
        #[inline]
        fn bitor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_or_pd(self.0, rhs.0)) }
        }
    }
    impl BitXor for M64x4 {
        type Output = Self;
        #[inline]
        fn bitxor(self, rhs: Self) -> Self {
            unsafe { Self(_mm256_xor_pd(self.0, rhs.0)) }
        }
    }

    impl RegMask for M64x4 {
        const WIDTH: usize = 4;

        #[inline]
        fn splat(value: bool) -> Self {
            let bits = if value { -1 } else { 0 };
            unsafe { Self(_mm256_castsi256_pd(_mm256_set1_epi32(bits))) }
        }
        #[inline]
        fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
            let lane = |b: bool| if b { -1i64 } else { 0 };
            let (b0, b1) = (lane(f(0)), lane(f(1)));
            let (b2, b3) = (lane(f(2)), lane(f(3)));
            unsafe { Self(_mm256_castsi256_pd(_mm256_set_epi64x(b3, b2, b1, b0))) }
        }
        #[inline]
        fn first_n(n: usize) -> Self {
            let lane = |i: usize| if i < n { -1i64 } else { 0 };
            unsafe {
                Self(_mm256_castsi256_pd(_mm256_set_epi64x(
                    lane(3),
                    lane(2),
                    lane(1),
                    lane(0),
                )))
            }
        }
        #[inline]
        fn test(self, i: usize) -> bool {
            assert!(i < 4);
            self.bits() >> i & 1 != 0
        }
        #[inline]
        fn any(self) -> bool {
            self.bits() != 0
        }
        #[inline]
        fn all(self) -> bool {
            self.bits() == 0b1111
        }
        #[inline]
        fn count(self) -> usize {
            self.bits().count_ones() as usize
        }
        #[inline]
        fn find_true(self) -> isize {
            let bits = self.bits();
            if bits == 0 {
                -1
            } else {
                bits.trailing_zeros() as isize
            }
        }
    }
}
