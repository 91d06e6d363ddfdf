//! Triangular and diagonal substitution against a matrix part.

use core::ops::{Div, Mul, Sub};

use crate::mat::part::{self, part_at, DIAG, LOWER, TRANSPOSED, UNIT, UPPER};
use crate::mat::Mat;
use crate::vec::{Element, Vec};

/// Right-hand side of a part solve: a vector, or a matrix solved column-wise
/// for all columns simultaneously (row operations act on whole rows).
pub trait SolveRhs<T: Element<N>, const N: usize>: Copy {
    /// One row of the right-hand side.
    type Row: Copy
        + Sub<Output = Self::Row>
        + Mul<T, Output = Self::Row>
        + Div<T, Output = Self::Row>;

    /// Row `i`.
    fn row(&self, i: usize) -> Self::Row;
    /// Overwrites row `i`.
    fn set_row(&mut self, i: usize, row: Self::Row);
}

impl<T: Element<N>, const N: usize> SolveRhs<T, N> for Vec<T, N> {
    type Row = T;

    #[inline]
    fn row(&self, i: usize) -> T {
        self[i]
    }
    #[inline]
    fn set_row(&mut self, i: usize, row: T) {
        self[i] = row;
    }
}

impl<T: Element<N>, const N: usize> SolveRhs<T, N> for Mat<T, N> {
    type Row = Vec<T, N>;

    #[inline]
    fn row(&self, i: usize) -> Vec<T, N> {
        self[i]
    }
    #[inline]
    fn set_row(&mut self, i: usize, row: Vec<T, N>) {
        self[i] = row;
    }
}

/// Solves the triangular (or diagonal) system described by `PART` against
/// the relevant entries of `m`, overwriting `rhs` with the solution.
///
/// Lower-like parts substitute forward, upper-like parts backward, with
/// `TRANSPOSED` swapping the direction along with the index roles; `UNIT`
/// skips the diagonal division. Chains of parts (a full LU solve, say) are
/// successive calls in part order. The relevant diagonal entries are assumed
/// non-zero; a violation propagates infinities or NaNs rather than being
/// checked here, since the factorization producing the part is where failure
/// is reported.
pub fn part_solve_in_place<const PART: u32, T, const N: usize, R>(m: &Mat<T, N>, rhs: &mut R)
where
    T: Element<N>,
    R: SolveRhs<T, N>,
{
    const {
        assert!(part::is_valid(PART));
        // Both halves at once is not a triangular system.
        assert!(!(PART & LOWER != 0 && PART & UPPER != 0));
        // Substitution needs a diagonal to pivot on.
        assert!(PART & (DIAG | UNIT) != 0);
    };

    if PART & (LOWER | UPPER) == 0 {
        if PART & UNIT == 0 {
            for i in 0..N {
                rhs.set_row(i, rhs.row(i) / m[(i, i)]);
            }
        }
        return;
    }

    let forward = (PART & LOWER != 0) == (PART & TRANSPOSED == 0);
    if forward {
        for i in 0..N {
            let mut x = rhs.row(i);
            for j in 0..i {
                x = x - rhs.row(j) * part_at::<PART, T, N>(m, i, j);
            }
            if PART & UNIT == 0 {
                x = x / m[(i, i)];
            }
            rhs.set_row(i, x);
        }
    } else {
        for i in (0..N).rev() {
            let mut x = rhs.row(i);
            for j in i + 1..N {
                x = x - rhs.row(j) * part_at::<PART, T, N>(m, i, j);
            }
            if PART & UNIT == 0 {
                x = x / m[(i, i)];
            }
            rhs.set_row(i, x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat::part::copy_part;

    fn fixture() -> Mat<f64, 3> {
        Mat::from_rows([
            Vec::from([4.0, 2.0, -1.0]),
            Vec::from([2.0, 5.0, 3.0]),
            Vec::from([-2.0, 1.0, 8.0]),
        ])
    }

    fn check_part_solve<const PART: u32>(m: &Mat<f64, 3>, x: Vec<f64, 3>) {
        let mut b = copy_part::<PART, _, 3>(m) * x;
        part_solve_in_place::<PART, _, 3, _>(m, &mut b);
        assert!(b.approx_eq(x));
    }

    #[test]
    fn single_part_solves() {
        let m = fixture();
        let x = Vec::from([1.0, -2.0, 3.0]);
        check_part_solve::<{ DIAG }>(&m, x);
        check_part_solve::<{ LOWER | DIAG }>(&m, x);
        check_part_solve::<{ LOWER | UNIT }>(&m, x);
        check_part_solve::<{ UPPER | DIAG }>(&m, x);
        check_part_solve::<{ UPPER | UNIT }>(&m, x);
        check_part_solve::<{ LOWER | DIAG | TRANSPOSED }>(&m, x);
        check_part_solve::<{ LOWER | UNIT | TRANSPOSED }>(&m, x);
        check_part_solve::<{ UPPER | DIAG | TRANSPOSED }>(&m, x);
    }

    #[test]
    fn unit_part_ignores_stored_diagonal() {
        let m = fixture();
        let x = Vec::from([3.0, 1.0, -1.0]);
        let mut b = copy_part::<{ LOWER | UNIT }, _, 3>(&m) * x;
        part_solve_in_place::<{ LOWER | UNIT }, _, 3, _>(&m, &mut b);
        assert!(b.approx_eq(x));
    }

    #[test]
    fn matrix_right_hand_side() {
        let m = fixture();
        let rhs = Mat::from_rows([
            Vec::from([1.0, 0.5, 2.0]),
            Vec::from([0.0, -1.0, 1.0]),
            Vec::from([3.0, 2.0, -2.0]),
        ]);
        let mut x = copy_part::<{ LOWER | DIAG }, _, 3>(&m) * rhs;
        part_solve_in_place::<{ LOWER | DIAG }, _, 3, _>(&m, &mut x);
        assert!(x.approx_eq(rhs));
    }

    #[test]
    fn chained_parts_solve_a_full_system() {
        // One stored matrix acting as both factors: forward through the
        // unit-lower half, then backward through the upper half.
        let f = fixture();
        let full = copy_part::<{ LOWER | UNIT }, _, 3>(&f) * copy_part::<{ UPPER | DIAG }, _, 3>(&f);
        let x = Vec::from([2.0, -1.0, 0.5]);
        let mut b = full * x;
        part_solve_in_place::<{ LOWER | UNIT }, _, 3, _>(&f, &mut b);
        part_solve_in_place::<{ UPPER | DIAG }, _, 3, _>(&f, &mut b);
        assert!(b.approx_eq(x));
    }
}
