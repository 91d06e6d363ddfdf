//! Symmetric eigendecomposition by cyclic Jacobi rotations.

use core::fmt;

use crate::mat::Mat;
use crate::scalar::{pow2, Real};
use crate::vec::{Element, Vec};

/// Failure of the eigensolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EvdError {
    /// The rotation budget ran out before the off-diagonal mass dropped
    /// below the tolerance. No partial result is returned.
    NoConvergence,
}

impl fmt::Display for EvdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("eigensolver did not converge within its iteration budget")
    }
}

impl std::error::Error for EvdError {}

/// Plane rotation `[[c, s], [-s, c]]`.
#[derive(Copy, Clone, Debug)]
pub struct JacobiRotation<T> {
    /// Cosine component.
    pub c: T,
    /// Sine component.
    pub s: T,
}

impl<T: Real> JacobiRotation<T> {
    /// Rotation diagonalizing the symmetric 2×2 block `[[x, y], [y, z]]`
    /// under `J * A * Jᵀ`.
    pub fn from_triplet(x: T, y: T, z: T) -> Self {
        let abs_y = y.abs();
        let two_abs_y = abs_y + abs_y;
        if two_abs_y == T::zero() {
            Self {
                c: T::one(),
                s: T::zero(),
            }
        } else {
            let tau = (x - z) / two_abs_y;
            let w = (pow2(tau) + T::one()).sqrt();
            let t = if tau > T::zero() {
                T::one() / (tau + w)
            } else {
                T::one() / (tau - w)
            };
            let n = T::one() / (pow2(t) + T::one()).sqrt();
            let neg_sign_y = if y > T::zero() { -T::one() } else { T::one() };
            Self {
                c: n,
                s: neg_sign_y * t * n,
            }
        }
    }

    /// The inverse rotation.
    #[inline]
    pub fn transpose(self) -> Self {
        Self {
            c: self.c,
            s: -self.s,
        }
    }

    /// Applies `J * M * Jᵀ` in the `(p, q)` plane, accumulating `J * V`.
    fn apply<const N: usize>(self, m: &mut Mat<T, N>, v: &mut Mat<T, N>, p: usize, q: usize)
    where
        T: Element<N>,
    {
        let Self { c, s } = self;
        let (mp, mq) = (m[p], m[q]);
        m[p] = mp * c + mq * s;
        m[q] = mq * c - mp * s;
        for r in 0..N {
            let (mrp, mrq) = (m[(r, p)], m[(r, q)]);
            m[(r, p)] = mrp * c + mrq * s;
            m[(r, q)] = mrq * c - mrp * s;
        }
        let (vp, vq) = (v[p], v[q]);
        v[p] = vp * c + vq * s;
        v[q] = vq * c - vp * s;
    }
}

/// Eigendecomposition of a symmetric matrix: eigenvectors as the rows of
/// [`eigenvectors`](Self::eigenvectors), eigenvalues in matching order, with
/// `V * A ≈ diag(d) * V`.
#[derive(Copy, Clone, Debug)]
pub struct SelfAdjointEvd<T: Element<N>, const N: usize> {
    /// Orthonormal eigenvector rows.
    pub eigenvectors: Mat<T, N>,
    /// Eigenvalues, one per eigenvector row.
    pub eigenvalues: Vec<T, N>,
}

fn off_diag_sq<T: Real + Element<N>, const N: usize>(a: &Mat<T, N>) -> T {
    let mut acc = T::zero();
    for i in 0..N {
        for j in 0..N {
            if i != j {
                acc = acc + pow2(a[(i, j)]);
            }
        }
    }
    acc
}

/// Eigendecomposition of the symmetric `a` with explicit tolerance and
/// rotation budget.
///
/// Cyclic sweeps rotate away each off-diagonal pair in turn until the sum of
/// squares of the off-diagonal entries is at most `eps`. `max_iter` bounds
/// the number of individual rotations; running out of budget without
/// convergence is the only failure mode. A 1×1 input converges in the zeroth
/// iteration with a unit eigenvector.
pub fn jacobi_with<T: Real + Element<N>, const N: usize>(
    a: &Mat<T, N>,
    eps: T,
    max_iter: usize,
) -> Result<SelfAdjointEvd<T, N>, EvdError> {
    let mut a = *a;
    let mut v = Mat::<T, N>::identity();
    let mut rotations = 0usize;
    'sweeps: loop {
        if off_diag_sq(&a) <= eps {
            break;
        }
        if rotations >= max_iter {
            return Err(EvdError::NoConvergence);
        }
        let mut rotated = false;
        for p in 0..N {
            for q in p + 1..N {
                if a[(p, q)] == T::zero() && a[(q, p)] == T::zero() {
                    continue;
                }
                // Re-check convergence before giving up mid-sweep.
                if rotations >= max_iter {
                    continue 'sweeps;
                }
                let rot = JacobiRotation::from_triplet(a[(p, p)], a[(p, q)], a[(q, q)]);
                rot.apply(&mut a, &mut v, p, q);
                rotations += 1;
                rotated = true;
            }
        }
        if !rotated {
            break;
        }
    }
    Ok(SelfAdjointEvd {
        eigenvectors: v,
        eigenvalues: a.diagonal(),
    })
}

/// Eigendecomposition of the symmetric `a` with a scale-relative default
/// tolerance and a rotation budget of `16 * N * N`.
pub fn jacobi<T: Real + Element<N>, const N: usize>(
    a: &Mat<T, N>,
) -> Result<SelfAdjointEvd<T, N>, EvdError> {
    let mut frob2 = T::zero();
    let mut nn = T::zero();
    for i in 0..N {
        for j in 0..N {
            frob2 = frob2 + pow2(a[(i, j)]);
            nn = nn + T::one();
        }
    }
    let eps = nn * nn * pow2(T::epsilon()) * (T::one() + frob2);
    jacobi_with(a, eps, 16 * N * N)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual_is_small<const N: usize>(a: &Mat<f64, N>, evd: &SelfAdjointEvd<f64, N>) -> bool
    where
        f64: Element<N>,
    {
        let lhs = evd.eigenvectors * *a;
        let rhs = Mat::from_diagonal(evd.eigenvalues) * evd.eigenvectors;
        lhs.approx_eq(rhs)
    }

    #[test]
    fn one_by_one_converges_immediately() {
        let a = Mat::from_rows([Vec::from([2.0])]);
        let evd = jacobi(&a).unwrap();
        assert_eq!(evd.eigenvalues, Vec::from([2.0]));
        assert!(evd.eigenvectors[0].norm() > 0.0);
        // Exact: no rotation ever ran.
        assert_eq!(evd.eigenvectors * a, Mat::from_diagonal(evd.eigenvalues) * evd.eigenvectors);
    }

    #[test]
    fn symmetric_indefinite_two_by_two() {
        let a = Mat::from_rows([Vec::from([1.0, -2.0]), Vec::from([-2.0, 1.0])]);
        let evd = jacobi(&a).unwrap();
        let mut d: [f64; 2] = evd.eigenvalues.to_array();
        d.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((d[0] - (-1.0)).abs() < 1e-12);
        assert!((d[1] - 3.0).abs() < 1e-12);
        assert!(evd.eigenvectors[0].norm() > 0.0);
        assert!(evd.eigenvectors[1].norm() > 0.0);
        assert!(residual_is_small(&a, &evd));
    }

    #[test]
    fn three_by_three_diagonalization() {
        let a = Mat::from_rows([
            Vec::from([2.0, 1.0, 0.0]),
            Vec::from([1.0, 3.0, 1.0]),
            Vec::from([0.0, 1.0, 2.0]),
        ]);
        let evd = jacobi(&a).unwrap();
        assert!(residual_is_small(&a, &evd));
        // Eigenvalues of this matrix are 1, 2 and 4.
        let mut d = evd.eigenvalues.to_array();
        d.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((d[0] - 1.0).abs() < 1e-10);
        assert!((d[1] - 2.0).abs() < 1e-10);
        assert!((d[2] - 4.0).abs() < 1e-10);
        // Rows are orthonormal.
        for i in 0..3 {
            assert!((evd.eigenvectors[i].norm() - 1.0).abs() < 1e-10);
        }
        assert!(evd.eigenvectors[0].dot(evd.eigenvectors[1]).abs() < 1e-10);
    }

    #[test]
    fn exhausted_budget_reports_no_convergence() {
        let a = Mat::from_rows([
            Vec::from([4.0, 1.0, 1.0, 1.0]),
            Vec::from([1.0, 5.0, 1.0, 1.0]),
            Vec::from([1.0, 1.0, 6.0, 1.0]),
            Vec::from([1.0, 1.0, 1.0, 7.0]),
        ]);
        assert_eq!(jacobi_with(&a, 1e-16, 3).unwrap_err(), EvdError::NoConvergence);
        // The same matrix converges with a real budget.
        let evd = jacobi(&a).unwrap();
        assert!(residual_is_small(&a, &evd));
    }

    #[test]
    fn already_diagonal_input() {
        let a = Mat::from_diagonal(Vec::from([3.0, -1.0, 0.5]));
        let evd = jacobi_with(&a, 0.0, 0).unwrap();
        assert_eq!(evd.eigenvalues, Vec::from([3.0, -1.0, 0.5]));
        assert_eq!(evd.eigenvectors, Mat::identity());
    }
}
