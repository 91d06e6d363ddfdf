//! LU factorization without pivoting.

use crate::linalg::triangular::{part_solve_in_place, SolveRhs};
use crate::linalg::FactorError;
use crate::mat::part::{copy_part, DIAG, LOWER, UNIT, UPPER};
use crate::mat::Mat;
use crate::scalar::Real;
use crate::vec::{Element, Vec};

/// LU factorization of a square matrix.
///
/// Both factors live in one combined matrix: `U` on and above the diagonal,
/// `L` strictly below it with an implicit unit diagonal. No row exchanges
/// are performed, so symmetric-positive systems are better served by
/// [`llt`](crate::linalg::llt); degenerate pivots surface as
/// [`FactorError::NearSingular`] during elimination.
///
/// ```
/// use lockstep::linalg::lu;
/// use lockstep::{Mat, Vec};
///
/// let a = Mat::from_rows([Vec::from([4.0f64, 3.0]), Vec::from([6.0, 3.0])]);
/// let f = lu(&a).unwrap();
/// assert_eq!(f.det(), -6.0);
/// assert!(f.solve(Vec::from([7.0, 9.0])).approx_eq(Vec::from([1.0, 1.0])));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Lu<T: Element<N>, const N: usize> {
    factors: Mat<T, N>,
}

/// Factorizes `a` as `L * U` by Doolittle elimination.
pub fn lu<T: Real + Element<N>, const N: usize>(a: &Mat<T, N>) -> Result<Lu<T, N>, FactorError> {
    let scale = a.max_abs();
    let mut f = Mat::<T, N>::default();
    for i in 0..N {
        for j in 0..i {
            let mut x = a[(i, j)];
            for k in 0..j {
                x = x - f[(i, k)] * f[(k, j)];
            }
            f[(i, j)] = x / f[(j, j)];
        }
        for j in i..N {
            let mut x = a[(i, j)];
            for k in 0..i {
                x = x - f[(i, k)] * f[(k, j)];
            }
            f[(i, j)] = x;
        }
        if f[(i, i)].abs() <= T::tiny() * scale {
            return Err(FactorError::NearSingular);
        }
    }
    Ok(Lu { factors: f })
}

impl<T: Real + Element<N>, const N: usize> Lu<T, N> {
    /// The unit-lower factor `L`.
    #[inline]
    pub fn l(&self) -> Mat<T, N> {
        copy_part::<{ LOWER | UNIT }, T, N>(&self.factors)
    }

    /// The upper factor `U`.
    #[inline]
    pub fn u(&self) -> Mat<T, N> {
        copy_part::<{ UPPER | DIAG }, T, N>(&self.factors)
    }

    /// Determinant: the product of `U`'s diagonal.
    #[inline]
    pub fn det(&self) -> T {
        self.factors.diag_product()
    }

    fn solve_in_place<R: SolveRhs<T, N>>(&self, rhs: &mut R) {
        part_solve_in_place::<{ LOWER | UNIT }, T, N, R>(&self.factors, rhs);
        part_solve_in_place::<{ UPPER | DIAG }, T, N, R>(&self.factors, rhs);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_factors() {
        let a = Mat::from_rows([Vec::from([4.0, 3.0]), Vec::from([6.0, 3.0])]);
        let f = lu(&a).unwrap();
        assert_eq!(
            f.l(),
            Mat::from_rows([Vec::from([1.0, 0.0]), Vec::from([1.5, 1.0])])
        );
        assert_eq!(
            f.u(),
            Mat::from_rows([Vec::from([4.0, 3.0]), Vec::from([0.0, -1.5])])
        );
        assert_eq!(f.det(), -6.0);
        let x = f.solve(Vec::from([7.0, 9.0]));
        assert!(x.approx_eq(Vec::from([1.0, 1.0])));
    }

    #[test]
    fn factors_reconstruct_the_matrix() {
        let a = Mat::from_rows([
            Vec::from([2.0, -1.0, 3.0, 0.5]),
            Vec::from([4.0, 1.0, -2.0, 1.0]),
            Vec::from([-2.0, 5.0, 1.0, 2.0]),
            Vec::from([1.0, 2.0, 2.0, -3.0]),
        ]);
        let f = lu(&a).unwrap();
        assert!((f.l() * f.u()).approx_eq(a));
    }

    #[test]
    fn solve_and_inverse() {
        let a = Mat::from_rows([
            Vec::from([3.0, 1.0, -1.0]),
            Vec::from([1.0, 4.0, 2.0]),
            Vec::from([-1.0, 1.0, 5.0]),
        ]);
        let f = lu(&a).unwrap();
        let b = Vec::from([2.0, -1.0, 4.0]);
        assert!((a * f.solve(b)).approx_eq(b));
        assert!((a * f.inverse()).approx_eq(Mat::identity()));
        assert!((f.inverse() * a).approx_eq(Mat::identity()));
    }

    #[test]
    fn random_roundtrip() {
        for _ in 0..32 {
            // Diagonally dominant, so the unpivoted elimination stays away
            // from degenerate pivots.
            let mut a = Mat::<f64, 4>::from_fn(|_, _| rand::random::<f64>() - 0.5);
            for i in 0..4 {
                a[(i, i)] += 4.0;
            }
            let f = lu(&a).unwrap();
            assert!((f.l() * f.u()).approx_eq(a));
            let b = Vec::from_fn(|_| rand::random::<f64>());
            assert!((a * f.solve(b)).approx_eq(b));
        }
    }

    #[test]
    fn singular_matrix_is_rejected() {
        // Second row is twice the first.
        let a = Mat::from_rows([
            Vec::from([1.0, 2.0, 3.0]),
            Vec::from([2.0, 4.0, 6.0]),
            Vec::from([0.5, 1.0, -1.0]),
        ]);
        assert_eq!(lu(&a).unwrap_err(), FactorError::NearSingular);
        assert_eq!(
            lu(&Mat::<f64, 3>::zero()).unwrap_err(),
            FactorError::NearSingular
        );
    }

    #[test]
    fn near_singular_relative_to_scale() {
        // The same shape at two very different scales must behave alike.
        let base = Mat::from_rows([
            Vec::from([1.0, 1.0]),
            Vec::from([1.0, 1.0 + 1e-13]),
        ]);
        assert_eq!(lu(&base).unwrap_err(), FactorError::NearSingular);
        let scaled = base * 1e12;
        assert_eq!(lu(&scaled).unwrap_err(), FactorError::NearSingular);
        let fine = Mat::from_rows([Vec::from([1.0, 1.0]), Vec::from([1.0, 2.0])]);
        assert!(lu(&(fine * 1e-12)).is_ok());
    }
}
