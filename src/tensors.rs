//! Dense matrices, vectors and linear algebra.

pub mod cofactor;
pub mod export;
pub mod matrix;
pub mod reduction;
pub mod vector;

pub use matrix::{Matrix, MatrixError};
pub use reduction::{PivotStrategy, ReductionOptions};
pub use vector::Vector;
