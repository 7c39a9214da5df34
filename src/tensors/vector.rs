use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut, Mul, Sub},
};

use super::matrix::{Matrix, MatrixError};
use crate::printer::VectorPrinter;

/// Create a [Vector] from its components.
///
/// ```
/// use linal::vector;
///
/// let v = vector![3, 4];
/// assert_eq!(v.norm(), 5.);
/// ```
#[macro_export]
macro_rules! vector {
    ($($x:expr),+ $(,)?) => {
        $crate::tensors::vector::Vector::new(vec![$(($x) as f64),+])
            .expect("a vector literal has at least one component")
    };
}

/// A row vector, a matrix with exactly one row.
#[derive(Clone, PartialEq, Debug)]
pub struct Vector {
    row: Matrix,
}

impl Vector {
    /// Create a new vector from a non-empty list of scalars.
    pub fn new(data: Vec<f64>) -> Result<Vector, MatrixError> {
        Ok(Vector {
            row: Matrix::from_row(data)?,
        })
    }

    /// Wrap a matrix with a single row.
    pub fn from_matrix(matrix: Matrix) -> Result<Vector, MatrixError> {
        if matrix.nrows != 1 {
            return Err(MatrixError::ShapeMismatch {
                left: (matrix.nrows, matrix.ncols),
                right: (1, matrix.ncols),
            });
        }

        Ok(Vector { row: matrix })
    }

    /// Return the number of components.
    pub fn len(&self) -> usize {
        self.row.ncols
    }

    pub fn components(&self) -> &[f64] {
        &self.row.data
    }

    /// View the vector as a `1 x n` matrix.
    pub fn as_matrix(&self) -> &Matrix {
        &self.row
    }

    /// Convert the vector into a `1 x n` matrix. This operation is very cheap.
    pub fn into_matrix(self) -> Matrix {
        self.row
    }

    /// Take the Euclidean scalar product of two vectors of the same length.
    pub fn checked_dot(&self, rhs: &Vector) -> Result<f64, MatrixError> {
        if self.len() != rhs.len() {
            return Err(MatrixError::ShapeMismatch {
                left: (1, self.len()),
                right: (1, rhs.len()),
            });
        }

        let p = self.row.checked_mul(&rhs.row.transpose())?;
        Ok(p[(0, 0)])
    }

    /// Take the Euclidean scalar product. Panics on a length mismatch.
    pub fn dot(&self, rhs: &Vector) -> f64 {
        match self.checked_dot(rhs) {
            Ok(d) => d,
            Err(e) => panic!("Cannot take the dot product: {}", e),
        }
    }

    pub fn norm_squared(&self) -> f64 {
        self.row.data.iter().map(|x| x * x).sum()
    }

    /// Get the Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scale the vector to unit length.
    pub fn unit(&self) -> Result<Vector, MatrixError> {
        let n = self.norm();
        if n == 0. {
            return Err(MatrixError::ZeroNorm);
        }

        Ok(self * (1. / n))
    }

    /// Compute the angle between two vectors in radians.
    pub fn angle(&self, other: &Vector) -> Result<f64, MatrixError> {
        let n = self.norm() * other.norm();
        if n == 0. {
            return Err(MatrixError::ZeroNorm);
        }

        let cos = self.checked_dot(other)? / n;
        Ok(cos.clamp(-1., 1.).acos())
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = MatrixError;

    fn try_from(data: Vec<f64>) -> Result<Self, Self::Error> {
        Vector::new(data)
    }
}

impl TryFrom<Matrix> for Vector {
    type Error = MatrixError;

    fn try_from(matrix: Matrix) -> Result<Self, Self::Error> {
        Vector::from_matrix(matrix)
    }
}

impl From<Vector> for Matrix {
    fn from(v: Vector) -> Self {
        v.into_matrix()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    /// Get the `i`th entry of the vector.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.row.data[index]
    }
}

impl IndexMut<usize> for Vector {
    /// Get the `i`th entry of the vector.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.row.data[index]
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        VectorPrinter::new(self).fmt(f)
    }
}

impl Mul<&Vector> for &Vector {
    type Output = f64;

    /// Take the dot product of two vectors.
    fn mul(self, rhs: &Vector) -> Self::Output {
        self.dot(rhs)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector {
            row: self.row.mul_scalar(rhs),
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector { row: self.row * rhs }
    }
}

impl Add<&Vector> for &Vector {
    type Output = Vector;

    /// Add two vectors.
    fn add(self, rhs: &Vector) -> Self::Output {
        Vector {
            row: &self.row + &rhs.row,
        }
    }
}

impl Sub<&Vector> for &Vector {
    type Output = Vector;

    /// Subtract two vectors.
    fn sub(self, rhs: &Vector) -> Self::Output {
        Vector {
            row: &self.row - &rhs.row,
        }
    }
}
