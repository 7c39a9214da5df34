//! Determinants, adjoints and inverses by cofactor expansion.
//!
//! Cofactor expansion takes `O(n!)` time, so these routines are only suited
//! for small matrices. Use [Matrix::inverse_by_row_reduction] for larger ones.

use tracing::{instrument, warn};

use super::matrix::{Matrix, MatrixError};

/// Sizes above which cofactor expansion gets a warning.
const EXPANSION_WARN_SIZE: usize = 10;

impl Matrix {
    fn check_square(&self) -> Result<(), MatrixError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Create the matrix with row `row` and column `column` removed.
    pub fn minor(&self, row: usize, column: usize) -> Result<Matrix, MatrixError> {
        self.elem(row, column)?;

        if self.nrows == 1 || self.ncols == 1 {
            return Err(MatrixError::Construction(format!(
                "the minor of a ({},{}) matrix is empty",
                self.nrows, self.ncols
            )));
        }

        Ok(self.minor_unchecked(row, column))
    }

    fn minor_unchecked(&self, row: usize, column: usize) -> Matrix {
        let mut data = Vec::with_capacity((self.nrows - 1) * (self.ncols - 1));
        for (i, r) in self.row_iter().enumerate() {
            if i == row {
                continue;
            }

            data.extend_from_slice(&r[..column]);
            data.extend_from_slice(&r[column + 1..]);
        }

        Matrix {
            data,
            nrows: self.nrows - 1,
            ncols: self.ncols - 1,
        }
    }

    /// Compute the cofactor `(-1)^(i+j) * det(minor(i, j))`.
    pub fn cofactor(&self, i: usize, j: usize) -> Result<f64, MatrixError> {
        self.check_square()?;
        let minor = self.minor(i, j)?;
        Ok(sign(i + j) * minor.expand_determinant())
    }

    /// Compute the determinant of the matrix by cofactor expansion along the first row.
    #[instrument(level = "trace", skip(self), fields(size = self.nrows))]
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.check_square()?;

        if self.nrows > EXPANSION_WARN_SIZE {
            warn!(
                "Cofactor expansion of a {}x{} matrix takes factorial time",
                self.nrows, self.ncols
            );
        }

        Ok(self.expand_determinant())
    }

    /// The matrix must be square.
    fn expand_determinant(&self) -> f64 {
        if self.nrows == 1 {
            return self.data[0];
        }

        let mut det = 0.;
        for j in 0..self.ncols {
            let e = self[(0, j)];
            if e != 0. {
                det += e * sign(j) * self.minor_unchecked(0, j).expand_determinant();
            }
        }
        det
    }

    /// Compute the adjoint (adjugate), the transpose of the matrix of cofactors.
    pub fn adjoint(&self) -> Result<Matrix, MatrixError> {
        self.check_square()?;

        let n = self.nrows;
        if n == 1 {
            return Matrix::identity(1);
        }

        let mut m = Matrix::zero(n, n)?;
        for i in 0..n {
            for j in 0..n {
                m[(j, i)] = sign(i + j) * self.minor_unchecked(i, j).expand_determinant();
            }
        }
        Ok(m)
    }

    /// Return true iff the matrix is square and has a nonzero determinant.
    pub fn is_invertible(&self) -> bool {
        self.is_square() && self.expand_determinant() != 0.
    }

    /// Compute the inverse of a square matrix as `adjoint * (1 / det)`.
    /// Returns `MatrixError::Singular` if the matrix is not invertible.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::Singular);
        }

        let det = self.determinant()?;
        if det == 0. {
            return Err(MatrixError::Singular);
        }

        Ok(self.adjoint()? * (1. / det))
    }

    /// Compute the sum of the entries on the main diagonal.
    pub fn trace(&self) -> Result<f64, MatrixError> {
        self.check_square()?;
        Ok((0..self.nrows).map(|i| self[(i, i)]).sum())
    }
}

#[inline]
fn sign(k: usize) -> f64 {
    if k % 2 == 0 {
        1.
    } else {
        -1.
    }
}
