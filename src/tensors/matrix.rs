use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut, Mul, Neg, Sub},
    slice::Chunks,
};

use crate::printer::{MatrixPrinter, PrintOptions};

/// A dense matrix of `f64` entries, stored in row-major order.
///
/// The shape is fixed at construction: both dimensions are at least one and
/// never change afterwards. Row operations mutate the matrix in place, while
/// every other operation creates a new matrix.
#[derive(Clone, PartialEq, Debug)]
pub struct Matrix {
    pub(crate) data: Vec<f64>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixError {
    /// The operation requires a square matrix.
    NotSquare { nrows: usize, ncols: usize },
    /// The shapes of the operands are not compatible.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A row or column index is out of range.
    IndexOutOfBounds { index: usize, bound: usize },
    /// The matrix has no inverse.
    Singular,
    /// The input does not describe a valid matrix.
    Construction(String),
    /// The vector has norm zero.
    ZeroNorm,
    /// The linear system has no solution.
    Inconsistent,
    /// The linear system has infinitely many solutions.
    Underdetermined { rank: usize },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare { nrows, ncols } => {
                write!(f, "The matrix is not square: ({},{})", nrows, ncols)
            }
            MatrixError::ShapeMismatch { left, right } => write!(
                f,
                "The shapes of the matrices are not compatible: ({},{}) vs ({},{})",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::IndexOutOfBounds { index, bound } => {
                write!(f, "Index {} is out of bounds for dimension {}", index, bound)
            }
            MatrixError::Singular => write!(f, "The matrix is singular"),
            MatrixError::Construction(msg) => write!(f, "Cannot construct matrix: {}", msg),
            MatrixError::ZeroNorm => write!(f, "The vector has zero norm"),
            MatrixError::Inconsistent => write!(f, "The system is inconsistent"),
            MatrixError::Underdetermined { rank } => write!(
                f,
                "The system is underdetermined. The rank of the matrix is {}",
                rank
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

impl Matrix {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn zero(nrows: usize, ncols: usize) -> Result<Matrix, MatrixError> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::Construction(format!(
                "dimensions must be 1 or more, got ({},{})",
                nrows, ncols
            )));
        }

        Ok(Matrix {
            data: vec![0.; nrows * ncols],
            nrows,
            ncols,
        })
    }

    /// Create a new zeroed square matrix.
    pub fn zero_square(size: usize) -> Result<Matrix, MatrixError> {
        Matrix::zero(size, size)
    }

    /// Create a new square matrix with ones on the main diagonal and zeroes elsewhere.
    pub fn identity(size: usize) -> Result<Matrix, MatrixError> {
        let mut m = Matrix::zero(size, size)?;
        for i in 0..size {
            m[(i, i)] = 1.;
        }
        Ok(m)
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(data: Vec<f64>, nrows: usize, ncols: usize) -> Result<Matrix, MatrixError> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::Construction(format!(
                "dimensions must be 1 or more, got ({},{})",
                nrows, ncols
            )));
        }

        if data.len() != nrows * ncols {
            return Err(MatrixError::Construction(format!(
                "data length does not match matrix dimensions: {} vs ({},{})",
                data.len(),
                nrows,
                ncols
            )));
        }

        Ok(Matrix { data, nrows, ncols })
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let ncols = matrix.first().map(|r| r.len()).unwrap_or(0);
        if ncols == 0 {
            return Err(MatrixError::Construction(
                "a matrix needs at least one row and one column".to_string(),
            ));
        }

        let nrows = matrix.len();
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in matrix {
            if row.len() != ncols {
                return Err(MatrixError::Construction(
                    "matrix is not rectangular".to_string(),
                ));
            }

            data.extend(row);
        }

        Ok(Matrix { data, nrows, ncols })
    }

    /// Create a row vector, a `1 x n` matrix.
    pub fn from_row(row: Vec<f64>) -> Result<Matrix, MatrixError> {
        let ncols = row.len();
        Matrix::from_linear(row, 1, ncols)
    }

    /// Create a column vector, an `n x 1` matrix.
    pub fn from_column(column: Vec<f64>) -> Result<Matrix, MatrixError> {
        let nrows = column.len();
        Matrix::from_linear(column, nrows, 1)
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, f64> {
        self.data.chunks(self.ncols)
    }

    /// Return the entries in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn check_row(&self, row: usize) -> Result<(), MatrixError> {
        if row < self.nrows {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfBounds {
                index: row,
                bound: self.nrows,
            })
        }
    }

    #[inline]
    fn check_column(&self, column: usize) -> Result<(), MatrixError> {
        if column < self.ncols {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfBounds {
                index: column,
                bound: self.ncols,
            })
        }
    }

    #[inline]
    fn check_range(start: usize, end: usize, bound: usize) -> Result<(), MatrixError> {
        if start > end {
            Err(MatrixError::IndexOutOfBounds { index: start, bound: end })
        } else if end > bound {
            Err(MatrixError::IndexOutOfBounds { index: end, bound })
        } else {
            Ok(())
        }
    }

    /// Get the entry in row `i` and column `j`.
    pub fn elem(&self, i: usize, j: usize) -> Result<f64, MatrixError> {
        self.check_row(i)?;
        self.check_column(j)?;
        Ok(self[(i, j)])
    }

    /// Get the `row`th row. This is a view into the matrix, not a copy.
    pub fn get_row(&self, row: usize) -> Result<&[f64], MatrixError> {
        self.check_row(row)?;
        Ok(&self.data[row * self.ncols..(row + 1) * self.ncols])
    }

    /// Get a mutable view of the `row`th row.
    pub fn get_row_mut(&mut self, row: usize) -> Result<&mut [f64], MatrixError> {
        self.check_row(row)?;
        Ok(&mut self.data[row * self.ncols..(row + 1) * self.ncols])
    }

    /// Collect the `column`th column into a new vector.
    pub fn get_column(&self, column: usize) -> Result<Vec<f64>, MatrixError> {
        self.check_column(column)?;
        Ok(self.data[column..].iter().step_by(self.ncols).copied().collect())
    }

    /// Get the rows `start..end`.
    pub fn get_rows(&self, start: usize, end: usize) -> Result<Vec<&[f64]>, MatrixError> {
        Matrix::check_range(start, end, self.nrows)?;
        Ok(self.row_iter().skip(start).take(end - start).collect())
    }

    /// Collect the columns `start..end`, each into a new vector.
    pub fn get_columns(&self, start: usize, end: usize) -> Result<Vec<Vec<f64>>, MatrixError> {
        Matrix::check_range(start, end, self.ncols)?;
        (start..end).map(|c| self.get_column(c)).collect()
    }

    /// Swap row `i` and row `j`.
    pub fn swap_row(&mut self, i: usize, j: usize) -> Result<&mut Self, MatrixError> {
        self.check_row(i)?;
        self.check_row(j)?;
        self.swap_row_unchecked(i, j);
        Ok(self)
    }

    #[inline]
    pub(crate) fn swap_row_unchecked(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }

        let (lo, hi) = (i.min(j), i.max(j));
        let (head, tail) = self.data.split_at_mut(hi * self.ncols);
        head[lo * self.ncols..(lo + 1) * self.ncols].swap_with_slice(&mut tail[..self.ncols]);
    }

    /// Multiply each entry of `row` by `k`.
    pub fn scale_row(&mut self, row: usize, k: f64) -> Result<&mut Self, MatrixError> {
        self.check_row(row)?;
        self.scale_row_unchecked(row, k);
        Ok(self)
    }

    #[inline]
    pub(crate) fn scale_row_unchecked(&mut self, row: usize, k: f64) {
        for e in &mut self.data[row * self.ncols..(row + 1) * self.ncols] {
            *e *= k;
        }
    }

    /// Add `k` times the row `source` to the row `dest`.
    pub fn add_rows(&mut self, source: usize, dest: usize, k: f64) -> Result<&mut Self, MatrixError> {
        self.check_row(source)?;
        self.check_row(dest)?;
        self.add_rows_unchecked(source, dest, k);
        Ok(self)
    }

    /// Add the row `source` to the row `dest`.
    pub fn add_row(&mut self, source: usize, dest: usize) -> Result<&mut Self, MatrixError> {
        self.add_rows(source, dest, 1.)
    }

    #[inline]
    pub(crate) fn add_rows_unchecked(&mut self, source: usize, dest: usize, k: f64) {
        for c in 0..self.ncols {
            let s = self.data[source * self.ncols + c];
            self.data[dest * self.ncols + c] += k * s;
        }
    }

    /// Truncate each entry of `row` towards zero.
    pub fn make_row_int(&mut self, row: usize) -> Result<&mut Self, MatrixError> {
        for e in self.get_row_mut(row)? {
            *e = e.trunc();
        }
        Ok(self)
    }

    /// Truncate each entry of the matrix towards zero.
    pub fn make_all_int(&mut self) -> &mut Self {
        for e in &mut self.data {
            *e = e.trunc();
        }
        self
    }

    /// Create a new matrix with the columns of `other` attached to the right of `self`.
    pub fn augment(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.nrows != other.nrows {
            return Err(MatrixError::ShapeMismatch {
                left: (self.nrows, self.ncols),
                right: (other.nrows, other.ncols),
            });
        }

        let mut data = Vec::with_capacity(self.nrows * (self.ncols + other.ncols));
        for (a, b) in self.row_iter().zip(other.row_iter()) {
            data.extend_from_slice(a);
            data.extend_from_slice(b);
        }

        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols + other.ncols,
        })
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                data.push(self[(i, j)]);
            }
        }

        Matrix {
            data,
            nrows: self.ncols,
            ncols: self.nrows,
        }
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: f64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|x| x * e).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|x| f(*x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn check_same_shape(&self, rhs: &Matrix) -> Result<(), MatrixError> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            Err(MatrixError::ShapeMismatch {
                left: (self.nrows, self.ncols),
                right: (rhs.nrows, rhs.ncols),
            })
        } else {
            Ok(())
        }
    }

    /// Add two matrices of the same shape.
    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(rhs)?;
        Ok(Matrix {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Subtract two matrices of the same shape.
    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(rhs)?;
        Ok(Matrix {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Multiply two matrices, requiring the number of columns of `self` to
    /// match the number of rows of `rhs`.
    pub fn checked_mul(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::ShapeMismatch {
                left: (self.nrows, self.ncols),
                right: (rhs.nrows, rhs.ncols),
            });
        }

        let mut data = vec![0.; self.nrows * rhs.ncols];
        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let sum = &mut data[i * rhs.ncols + j];
                for k in 0..self.ncols {
                    *sum += self[(i, k)] * rhs[(k, j)];
                }
            }
        }

        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: rhs.ncols,
        })
    }

    /// Render the matrix with custom print options.
    pub fn format(&self, opts: PrintOptions) -> String {
        MatrixPrinter::new_with_options(self, opts).to_string()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(index.0 < self.nrows && index.1 < self.ncols);
        &self.data[index.0 * self.ncols + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        assert!(index.0 < self.nrows && index.1 < self.ncols);
        &mut self.data[index.0 * self.ncols + index.1]
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    /// Add two matrices.
    fn add(self, rhs: &Matrix) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot add matrices: {}", e),
        }
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Matrix;

    /// Subtract two matrices.
    fn sub(self, rhs: &Matrix) -> Self::Output {
        match self.checked_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot subtract matrices: {}", e),
        }
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    /// Multiply two matrices.
    fn mul(self, rhs: &Matrix) -> Self::Output {
        match self.checked_mul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot multiply matrices: {}", e),
        }
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(mut self, rhs: f64) -> Self::Output {
        for e in &mut self.data {
            *e *= rhs;
        }
        self
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = -*e;
        }

        self
    }
}
