//! Compile-time triangular and diagonal part views.
//!
//! A part is a `const` flag combination passed as a generic parameter, so
//! every composite compiles to specialized straight-line code; nothing is
//! interpreted at run time and no triangular copy is materialized unless
//! [`copy_part`] is asked for one.
//!
//! Base flags [`DIAG`], [`LOWER`], [`UPPER`] select which entries belong to
//! the part; [`UNIT`] forces diagonal entries to read as one (and excludes
//! `DIAG`); [`TRANSPOSED`] swaps the row/column roles of both the membership
//! test and the returned entry, modeling "read the transpose" without
//! building it.

use crate::mat::Mat;
use crate::vec::Element;

/// Diagonal entries, as stored.
pub const DIAG: u32 = 1 << 0;
/// Entries strictly below the diagonal.
pub const LOWER: u32 = 1 << 1;
/// Entries strictly above the diagonal.
pub const UPPER: u32 = 1 << 2;
/// Diagonal entries forced to one; incompatible with [`DIAG`].
pub const UNIT: u32 = 1 << 3;
/// Swaps row/column roles of the test and of the returned entry.
pub const TRANSPOSED: u32 = 1 << 4;

const KNOWN: u32 = DIAG | LOWER | UPPER | UNIT | TRANSPOSED;

/// Is `part` a meaningful flag combination?
pub const fn is_valid(part: u32) -> bool {
    part != 0 && part & !KNOWN == 0 && !(part & DIAG != 0 && part & UNIT != 0)
}

/// Logical value of entry `(i, j)` of `m` under the part semantics.
#[inline]
pub fn part_at<const PART: u32, T: Element<N>, const N: usize>(
    m: &Mat<T, N>,
    i: usize,
    j: usize,
) -> T {
    const { assert!(is_valid(PART)) };
    if i == j {
        if PART & UNIT != 0 {
            T::one()
        } else if PART & DIAG != 0 {
            m[(i, i)]
        } else {
            T::zero()
        }
    } else {
        let (r, c) = if PART & TRANSPOSED != 0 { (j, i) } else { (i, j) };
        let included = if r > c {
            PART & LOWER != 0
        } else {
            PART & UPPER != 0
        };
        if included {
            m[(r, c)]
        } else {
            T::zero()
        }
    }
}

/// Materializes the part as a full matrix.
#[inline]
pub fn copy_part<const PART: u32, T: Element<N>, const N: usize>(m: &Mat<T, N>) -> Mat<T, N> {
    Mat::from_fn(|i, j| part_at::<PART, T, N>(m, i, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec;

    fn fixture() -> Mat<f64, 3> {
        Mat::from_rows([
            Vec::from([1.0, 2.0, 3.0]),
            Vec::from([4.0, 5.0, 6.0]),
            Vec::from([7.0, 8.0, 9.0]),
        ])
    }

    #[test]
    fn base_parts() {
        let m = fixture();
        assert_eq!(
            copy_part::<{ DIAG }, _, 3>(&m),
            Mat::from_diagonal(m.diagonal())
        );
        assert_eq!(
            copy_part::<{ LOWER }, _, 3>(&m),
            Mat::from_rows([
                Vec::from([0.0, 0.0, 0.0]),
                Vec::from([4.0, 0.0, 0.0]),
                Vec::from([7.0, 8.0, 0.0]),
            ])
        );
        assert_eq!(
            copy_part::<{ UPPER }, _, 3>(&m),
            Mat::from_rows([
                Vec::from([0.0, 2.0, 3.0]),
                Vec::from([0.0, 0.0, 6.0]),
                Vec::from([0.0, 0.0, 0.0]),
            ])
        );
    }

    #[test]
    fn parts_partition_the_matrix() {
        let m = fixture();
        let sum = copy_part::<{ LOWER }, _, 3>(&m)
            + copy_part::<{ DIAG }, _, 3>(&m)
            + copy_part::<{ UPPER }, _, 3>(&m);
        assert_eq!(sum, m);
        assert_eq!(copy_part::<{ LOWER | DIAG | UPPER }, _, 3>(&m), m);
    }

    #[test]
    fn off_diagonal_composite() {
        // Diagonal forced to zero, both halves taken from the matrix.
        let m = fixture();
        assert_eq!(
            copy_part::<{ LOWER | UPPER }, _, 3>(&m),
            Mat::from_rows([
                Vec::from([0.0, 2.0, 3.0]),
                Vec::from([4.0, 0.0, 6.0]),
                Vec::from([7.0, 8.0, 0.0]),
            ])
        );
    }

    #[test]
    fn unit_diagonal() {
        let m = fixture();
        let l = copy_part::<{ LOWER | UNIT }, _, 3>(&m);
        assert_eq!(l.diagonal(), Vec::splat(1.0));
        assert_eq!(l[(2, 0)], 7.0);
        assert_eq!(l[(0, 2)], 0.0);
    }

    #[test]
    fn transposed_parts() {
        let m = fixture();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(
                    part_at::<{ LOWER | TRANSPOSED }, _, 3>(&m, i, j),
                    part_at::<{ LOWER }, _, 3>(&m, j, i)
                );
            }
        }
        // Reading the transposed lower part is the upper part of the
        // transpose, without materializing it.
        assert_eq!(
            copy_part::<{ LOWER | TRANSPOSED }, _, 3>(&m),
            copy_part::<{ UPPER }, _, 3>(&m.transpose())
        );
        assert_eq!(
            copy_part::<{ LOWER | DIAG | TRANSPOSED }, _, 3>(&m),
            copy_part::<{ UPPER | DIAG }, _, 3>(&m.transpose())
        );
    }

    #[test]
    fn flag_validity() {
        assert!(is_valid(LOWER | DIAG));
        assert!(is_valid(LOWER | UNIT | TRANSPOSED));
        assert!(is_valid(LOWER | UPPER));
        assert!(!is_valid(0));
        assert!(!is_valid(DIAG | UNIT));
        assert!(!is_valid(1 << 7));
    }
}
