//! Linal is a small dense linear algebra library.
//!
//! It provides a [Matrix](tensors::matrix::Matrix) of `f64` entries with
//! row operations, Gaussian and Gauss-Jordan reduction, determinants and
//! inverses by cofactor expansion, and the usual arithmetic operators.
//! A [Vector](tensors::vector::Vector) is a matrix with a single row that
//! adds the dot product, norm and angle.
//!
//! For example:
//!
//! ```
//! use linal::tensors::matrix::Matrix;
//!
//! let a = Matrix::from_nested_vec(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
//! assert_eq!(a.determinant(), Ok(-2.));
//!
//! let inv = a.inverse().unwrap();
//! assert_eq!(&a * &inv, Matrix::identity(2).unwrap());
//! println!("{}", inv);
//! ```
//!
//! Determinants and adjoints use cofactor expansion, which takes factorial
//! time. Use [Matrix::inverse_by_row_reduction](tensors::matrix::Matrix::inverse_by_row_reduction)
//! for anything beyond small matrices.
//!
//! The library emits [tracing] events during row reduction and determinant
//! computation; install a subscriber to see them.

pub mod printer;
pub mod tensors;
