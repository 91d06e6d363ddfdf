//! LDLT factorization of symmetric (possibly indefinite) matrices.

use crate::linalg::triangular::{part_solve_in_place, SolveRhs};
use crate::linalg::FactorError;
use crate::mat::part::{copy_part, LOWER, TRANSPOSED, UNIT};
use crate::mat::Mat;
use crate::scalar::{pow2, Real};
use crate::vec::{Element, Vec};

/// LDLT factorization `A = L * D * Lᵀ` of a symmetric matrix, with `L` unit
/// lower triangular and `D` diagonal.
///
/// Extends the efficiency of [`llt`](crate::linalg::llt) to indefinite
/// symmetric systems: negative entries in `D` are valid outputs, not errors,
/// and the only failure mode is a pivot with too small a magnitude.
#[derive(Copy, Clone, Debug)]
pub struct Ldlt<T: Element<N>, const N: usize> {
    lower: Mat<T, N>,
    diag: Vec<T, N>,
}

/// Factorizes the symmetric `a` as `L * D * Lᵀ`.
///
/// Only the lower half of `a` (diagonal included) is read.
pub fn ldlt<T: Real + Element<N>, const N: usize>(
    a: &Mat<T, N>,
) -> Result<Ldlt<T, N>, FactorError> {
    let scale = a.max_abs();
    let mut l = Mat::<T, N>::identity();
    let mut d = Vec::<T, N>::default();
    for j in 0..N {
        let mut dj = a[(j, j)];
        for k in 0..j {
            dj = dj - pow2(l[(j, k)]) * d[k];
        }
        if dj.abs() <= T::tiny() * scale {
            return Err(FactorError::NearSingular);
        }
        d[j] = dj;
        for i in j + 1..N {
            let mut x = a[(i, j)];
            for k in 0..j {
                x = x - l[(i, k)] * d[k] * l[(j, k)];
            }
            l[(i, j)] = x / dj;
        }
    }
    Ok(Ldlt { lower: l, diag: d })
}

impl<T: Real + Element<N>, const N: usize> Ldlt<T, N> {
    /// The unit lower factor `L`.
    #[inline]
    pub fn l(&self) -> Mat<T, N> {
        copy_part::<{ LOWER | UNIT }, T, N>(&self.lower)
    }

    /// The diagonal of `D`.
    #[inline]
    pub fn d(&self) -> Vec<T, N> {
        self.diag
    }

    /// Determinant: the product of `D`.
    #[inline]
    pub fn det(&self) -> T {
        self.diag.product()
    }

    fn solve_in_place<R: SolveRhs<T, N>>(&self, rhs: &mut R) {
        part_solve_in_place::<{ LOWER | UNIT }, T, N, R>(&self.lower, rhs);
        for i in 0..N {
            rhs.set_row(i, rhs.row(i) / self.diag[i]);
        }
        part_solve_in_place::<{ LOWER | UNIT | TRANSPOSED }, T, N, R>(&self.lower, rhs);
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
