//! Property-based tests for the reduction and cofactor engines.

use linal::tensors::Matrix;
use proptest::prelude::*;

// Small integer entries keep every cofactor expansion exact in f64.
fn small_int() -> impl Strategy<Value = f64> {
    (-9i32..=9).prop_map(f64::from)
}

fn matrix(nrows: usize, ncols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(small_int(), nrows * ncols)
        .prop_map(move |data| Matrix::from_linear(data, nrows, ncols).unwrap())
}

fn any_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(r, c)| matrix(r, c))
}

fn square_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=4).prop_flat_map(|n| matrix(n, n))
}

// Strictly diagonally dominant matrices are invertible and never need a row swap.
fn dominant_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=5).prop_flat_map(|n| {
        (
            prop::collection::vec(-3i32..=3, n * n),
            prop::collection::vec(20i32..=30, n),
        )
            .prop_map(move |(off, diag)| {
                let mut m = Matrix::from_linear(off.into_iter().map(f64::from).collect(), n, n).unwrap();
                for (i, d) in diag.into_iter().enumerate() {
                    m[(i, i)] = f64::from(d);
                }
                m
            })
    })
}

fn close(a: &Matrix, b: &Matrix, eps: f64) -> bool {
    a.nrows() == b.nrows()
        && a.ncols() == b.ncols()
        && a.data().iter().zip(b.data()).all(|(x, y)| (x - y).abs() <= eps)
}

proptest! {
    #[test]
    fn transpose_is_an_involution(a in any_matrix()) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn determinant_of_transpose(a in square_matrix()) {
        prop_assert_eq!(a.determinant(), a.transpose().determinant());
    }

    #[test]
    fn add_then_subtract(
        (a, b) in (1usize..=4, 1usize..=4).prop_flat_map(|(r, c)| (matrix(r, c), matrix(r, c)))
    ) {
        prop_assert_eq!(&(&a + &b) - &b, a);
    }

    #[test]
    fn inverse_is_two_sided(a in square_matrix()) {
        prop_assume!(a.is_invertible());

        let inv = a.inverse().unwrap();
        let i = Matrix::identity(a.nrows()).unwrap();
        prop_assert!(close(&(&a * &inv), &i, 1e-9));
        prop_assert!(close(&(&inv * &a), &i, 1e-9));
    }

    #[test]
    fn inverse_methods_agree(a in dominant_matrix()) {
        let by_cofactors = a.inverse().unwrap();
        let by_reduction = a.inverse_by_row_reduction().unwrap();
        prop_assert!(close(&by_cofactors, &by_reduction, 1e-9));
    }

    #[test]
    fn gauss_jordan_on_identity_augmented(a in dominant_matrix()) {
        let n = a.nrows();
        let r = a.augment(&Matrix::identity(n).unwrap()).unwrap().gauss_jordan();
        for (i, row) in r.row_iter().enumerate() {
            for (j, e) in row[..n].iter().enumerate() {
                prop_assert_eq!(*e, if i == j { 1. } else { 0. });
            }
        }
    }

    #[test]
    fn echelon_form_has_leading_ones(a in any_matrix()) {
        let r = a.gaussian_reduction();

        let mut last_lead = None;
        for row in r.row_iter() {
            match row.iter().position(|e| *e != 0.) {
                Some(c) => {
                    prop_assert_eq!(row[c], 1.);
                    prop_assert!(last_lead.map_or(true, |l: Option<usize>| l.map_or(false, |l| c > l)));
                    last_lead = Some(Some(c));
                }
                None => last_lead = Some(None),
            }
        }
    }

    #[test]
    fn rank_is_bounded(a in any_matrix()) {
        prop_assert!(a.rank() <= a.nrows().min(a.ncols()));
        prop_assert_eq!(a.rank(), a.gauss_jordan().rank());
    }
}
