//! Cholesky factorization of symmetric positive-definite matrices.

use crate::linalg::triangular::{part_solve_in_place, SolveRhs};
use crate::linalg::FactorError;
use crate::mat::part::{copy_part, DIAG, LOWER, TRANSPOSED};
use crate::mat::Mat;
use crate::scalar::{pow2, Real};
use crate::vec::{Element, Vec};

/// Cholesky factorization `A = L * Lᵀ` of a symmetric positive-definite
/// matrix.
///
/// Half the work of [`lu`](crate::linalg::lu) and numerically the best
/// choice when positive-definiteness is known. A non-positive pivot reports
/// [`FactorError::NotPositiveDefinite`]; a positive but degenerate pivot
/// reports [`FactorError::NearSingular`] — callers can tell "not SPD" apart
/// from "SPD but numerically degenerate".
#[derive(Copy, Clone, Debug)]
pub struct Llt<T: Element<N>, const N: usize> {
    lower: Mat<T, N>,
}

/// Factorizes the symmetric positive-definite `a` as `L * Lᵀ`.
///
/// Only the lower half of `a` (diagonal included) is read.
pub fn llt<T: Real + Element<N>, const N: usize>(a: &Mat<T, N>) -> Result<Llt<T, N>, FactorError> {
    let scale = a.max_abs();
    let mut l = Mat::<T, N>::default();
    for j in 0..N {
        let mut d = a[(j, j)];
        for k in 0..j {
            d = d - pow2(l[(j, k)]);
        }
        if d <= T::zero() {
            return Err(FactorError::NotPositiveDefinite);
        }
        let pivot = d.sqrt();
        if pivot <= T::tiny() * scale {
            return Err(FactorError::NearSingular);
        }
        l[(j, j)] = pivot;
        for i in j + 1..N {
            let mut x = a[(i, j)];
            for k in 0..j {
                x = x - l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = x / pivot;
        }
    }
    Ok(Llt { lower: l })
}

impl<T: Real + Element<N>, const N: usize> Llt<T, N> {
    /// The lower factor `L`.
    #[inline]
    pub fn l(&self) -> Mat<T, N> {
        copy_part::<{ LOWER | DIAG }, T, N>(&self.lower)
    }

    /// Determinant: `prod_diag(L)²`.
    #[inline]
    pub fn det(&self) -> T {
        pow2(self.lower.diag_product())
    }

    fn solve_in_place<R: SolveRhs<T, N>>(&self, rhs: &mut R) {
        // Forward through L, then backward through Lᵀ read in place.
        part_solve_in_place::<{ LOWER | DIAG }, T, N, R>(&self.lower, rhs);
        part_solve_in_place::<{ LOWER | DIAG | TRANSPOSED }, T, N, R>(&self.lower, rhs);
    }

    /// Solves `A * x = b`.
    #[inline]
    pub fn solve(&self, b: Vec<T, N>) -> Vec<T, N> {
        let mut x = b;
        self.solve_in_place(&mut x);
        x
    }

    /// Solves `A * X = B` for all columns of `B` at once.
    #[inline]
    pub fn solve_mat(&self, b: Mat<T, N>) -> Mat<T, N> {
        let mut x = b;
        self.solve_in_place(&mut x);
        x
    }

    /// Inverse matrix, by solving against the identity.
    #[inline]
    pub fn inverse(&self) -> Mat<T, N> {
        self.solve_mat(Mat::identity())
    }
}
