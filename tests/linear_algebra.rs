use std::f64::consts::FRAC_PI_2;

use linal::{
    printer::PrintOptions,
    tensors::{Matrix, MatrixError},
    vector,
};

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_nested_vec(rows).unwrap()
}

#[test]
fn two_by_two_inverse() {
    let a = m(vec![vec![1., 2.], vec![3., 4.]]);

    assert_eq!(a.determinant(), Ok(-2.));
    assert_eq!(a.inverse().unwrap(), m(vec![vec![-2., 1.], vec![1.5, -0.5]]));
    assert_eq!(a.inverse(), a.inverse_by_row_reduction());
}

#[test]
fn identity_product() {
    let i = Matrix::identity(3).unwrap();
    assert_eq!(&i * &i, i);
}

#[test]
fn right_angle() {
    assert_eq!(vector![1, 0, 0].angle(&vector![0, 1, 0]), Ok(FRAC_PI_2));
}

#[test]
fn singular_matrix() {
    let a = m(vec![vec![1., 1.], vec![1., 1.]]);
    assert!(!a.is_invertible());
    assert_eq!(a.inverse(), Err(MatrixError::Singular));
    assert_eq!(a.rank(), 1);
}

#[test]
fn echelon_form() {
    let a = m(vec![vec![2., 1.], vec![1., 1.]]);
    assert_eq!(a.gaussian_reduction(), m(vec![vec![1., 0.5], vec![0., 1.]]));
}

#[test]
fn builder_chain() {
    let mut a = m(vec![vec![0., 2.], vec![3., 1.]]);
    a.swap_row(0, 1)
        .and_then(|a| a.scale_row(1, 0.5))
        .and_then(|a| a.add_rows(1, 0, -1.))
        .unwrap();

    assert_eq!(a, m(vec![vec![3., 0.], vec![0., 1.]]));
    assert_eq!(a.trace(), Ok(4.));
}

#[test]
fn printing() {
    let a = m(vec![vec![-2., 1.], vec![1.5, -0.5]]);
    assert_eq!(a.to_string(), "[-2, 1]\n[1.5, -0.5]");
    assert_eq!(a.format(PrintOptions::nested()), "[[-2, 1], [1.5, -0.5]]");
}

#[test]
fn error_messages() {
    let a = Matrix::zero(2, 3).unwrap();
    assert_eq!(
        a.determinant().unwrap_err().to_string(),
        "The matrix is not square: (2,3)"
    );
    assert_eq!(
        a.checked_mul(&a).unwrap_err().to_string(),
        "The shapes of the matrices are not compatible: (2,3) vs (2,3)"
    );
}
