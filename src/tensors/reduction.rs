//! Gaussian and Gauss-Jordan row reduction.
//!
//! The default policy picks the first nonzero entry of a column as the pivot
//! and compares with zero exactly. [ReductionOptions] can switch to partial
//! pivoting on the largest magnitude or treat small entries as zero.

use smallvec::SmallVec;
use tracing::debug;

use super::matrix::{Matrix, MatrixError};

/// How the pivot row is chosen during forward elimination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Use the first row at or below the frontier with a nonzero entry.
    #[default]
    FirstNonZero,
    /// Use the row at or below the frontier with the largest absolute entry.
    MaxMagnitude,
}

/// Options for row reduction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReductionOptions {
    pub pivot: PivotStrategy,
    /// Entries with an absolute value at or below this threshold count as zero.
    pub zero_tolerance: f64,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        ReductionOptions {
            pivot: PivotStrategy::FirstNonZero,
            zero_tolerance: 0.,
        }
    }
}

impl ReductionOptions {
    pub fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }

    #[inline]
    fn is_zero(&self, x: f64) -> bool {
        x.abs() <= self.zero_tolerance
    }
}

/// Positions `(row, column)` of the leading ones of a matrix in echelon form.
type Leads = SmallVec<[(usize, usize); 16]>;

impl Matrix {
    /// Select the pivot row for `column` among the rows `row..nrows`.
    fn find_pivot(&self, row: usize, column: usize, opts: &ReductionOptions) -> Option<usize> {
        let mut candidates = (row..self.nrows).filter(|&r| !opts.is_zero(self[(r, column)]));

        match opts.pivot {
            PivotStrategy::FirstNonZero => candidates.next(),
            PivotStrategy::MaxMagnitude => candidates.fold(None, |best: Option<usize>, r| match best {
                Some(b) if self[(b, column)].abs() >= self[(r, column)].abs() => Some(b),
                _ => Some(r),
            }),
        }
    }

    /// Write the matrix in echelon form, without normalizing the leading entries.
    fn forward_elimination(&mut self, opts: &ReductionOptions) {
        let (mut row, mut column) = (0, 0);

        while row < self.nrows && column < self.ncols {
            let Some(pivot_row) = self.find_pivot(row, column, opts) else {
                debug!("Column {} is zero below row {}: skipping", column, row);
                column += 1;
                continue;
            };

            if pivot_row != row {
                debug!("Swapping pivot row {} into row {}", pivot_row, row);
                self.swap_row_unchecked(pivot_row, row);
            }

            let pivot = self[(row, column)];
            for k in row + 1..self.nrows {
                let e = self[(k, column)];
                if !opts.is_zero(e) {
                    self.add_rows_unchecked(row, k, -e / pivot);
                }
                self[(k, column)] = 0.;
            }

            row += 1;
            column += 1;
        }
    }

    /// Find the first nonzero entry of every row.
    fn leading_entries(&self, opts: &ReductionOptions) -> Leads {
        self.row_iter()
            .enumerate()
            .filter_map(|(r, row)| row.iter().position(|e| !opts.is_zero(*e)).map(|c| (r, c)))
            .collect()
    }

    /// Scale every nonzero row so that its leading entry is exactly one.
    fn normalize_leading_entries(&mut self, opts: &ReductionOptions) {
        for (r, c) in self.leading_entries(opts) {
            let x = self[(r, c)];
            if x != 1. {
                self.scale_row_unchecked(r, 1. / x);
                self[(r, c)] = 1.;
            }
        }
    }

    /// Eliminate the entries above every leading one.
    fn back_substitution(&mut self, leads: &Leads) {
        for &(lead_row, lead_column) in leads.iter().rev() {
            for r in 0..lead_row {
                let e = self[(r, lead_column)];
                if e != 0. {
                    self.add_rows_unchecked(lead_row, r, -e / self[(lead_row, lead_column)]);
                    self[(r, lead_column)] = 0.;
                }
            }
        }
    }

    /// Create a new matrix in row-echelon form where every leading entry is one,
    /// using the default [ReductionOptions].
    pub fn gaussian_reduction(&self) -> Matrix {
        self.gaussian_reduction_with(&ReductionOptions::default())
    }

    /// Create a new matrix in row-echelon form where every leading entry is one.
    pub fn gaussian_reduction_with(&self, opts: &ReductionOptions) -> Matrix {
        let mut m = self.clone();
        m.forward_elimination(opts);
        m.normalize_leading_entries(opts);
        m
    }

    /// Create a new matrix in reduced row-echelon form,
    /// using the default [ReductionOptions].
    pub fn gauss_jordan(&self) -> Matrix {
        self.gauss_jordan_with(&ReductionOptions::default())
    }

    /// Create a new matrix in reduced row-echelon form.
    pub fn gauss_jordan_with(&self, opts: &ReductionOptions) -> Matrix {
        let mut m = self.gaussian_reduction_with(opts);
        let leads = m.leading_entries(opts);
        m.back_substitution(&leads);
        m
    }

    /// Get the rank of the matrix.
    pub fn rank(&self) -> usize {
        self.rank_with(&ReductionOptions::default())
    }

    /// Get the rank of the matrix, using custom reduction options.
    pub fn rank_with(&self, opts: &ReductionOptions) -> usize {
        self.gaussian_reduction_with(opts).leading_entries(opts).len()
    }

    /// Solve `A * x = b` for `x`, where `A` is `self` and `b` is a column vector.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix, MatrixError> {
        if self.nrows != b.nrows || b.ncols != 1 {
            return Err(MatrixError::ShapeMismatch {
                left: (self.nrows, self.ncols),
                right: (b.nrows, b.ncols),
            });
        }

        let nvars = self.ncols;
        let opts = ReductionOptions::default();
        let m = self.augment(b)?.gauss_jordan_with(&opts);
        let leads = m.leading_entries(&opts);

        if leads.iter().any(|&(_, c)| c == nvars) {
            return Err(MatrixError::Inconsistent);
        }

        if leads.len() < nvars {
            return Err(MatrixError::Underdetermined { rank: leads.len() });
        }

        let mut x = vec![0.; nvars];
        for &(r, c) in &leads {
            x[c] = m[(r, nvars)];
        }

        Matrix::from_column(x)
    }

    /// Compute the inverse by reducing the augmented matrix `[A | I]`.
    ///
    /// Unlike [Matrix::inverse], this runs in polynomial time.
    pub fn inverse_by_row_reduction(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }

        let n = self.nrows;
        let m = self.augment(&Matrix::identity(n)?)?.gauss_jordan();

        for r in 0..n {
            for c in 0..n {
                if m[(r, c)] != if r == c { 1. } else { 0. } {
                    return Err(MatrixError::Singular);
                }
            }
        }

        let mut data = Vec::with_capacity(n * n);
        for row in m.row_iter() {
            data.extend_from_slice(&row[n..]);
        }

        Matrix::from_linear(data, n, n)
    }
}

#[cfg(test)]
mod test {
    use crate::tensors::{
        matrix::{Matrix, MatrixError},
        reduction::{PivotStrategy, ReductionOptions},
    };

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_nested_vec(rows).unwrap()
    }

    #[test]
    fn echelon_form() {
        let a = m(vec![vec![2., 1.], vec![1., 1.]]);
        assert_eq!(a.gaussian_reduction(), m(vec![vec![1., 0.5], vec![0., 1.]]));
        assert_eq!(a, m(vec![vec![2., 1.], vec![1., 1.]]));
    }

    #[test]
    fn zero_column_is_skipped() {
        let a = m(vec![
            vec![0., 2., 4.],
            vec![0., 1., 3.],
            vec![0., 0., 5.],
        ]);

        let r = a.gaussian_reduction();
        assert_eq!(
            r,
            m(vec![vec![0., 1., 2.], vec![0., 0., 1.], vec![0., 0., 0.]])
        );
        assert_eq!(a.rank(), 2);
    }

    #[test]
    fn pivot_swap() {
        let a = m(vec![vec![0., 1.], vec![2., 4.]]);
        assert_eq!(a.gaussian_reduction(), m(vec![vec![1., 2.], vec![0., 1.]]));
    }

    #[test]
    fn row_reduce() {
        let a = m(vec![vec![1., 2., 3.], vec![4., 5., 6.], vec![7., 8., 9.]]);

        assert_eq!(a.rank(), 2);
        assert_eq!(
            a.gauss_jordan(),
            m(vec![vec![1., 0., -1.], vec![0., 1., 2.], vec![0., 0., 0.]])
        );
    }

    #[test]
    fn identity_augmented() {
        let a = m(vec![vec![2., 1.], vec![1., 1.]]);
        let r = a.augment(&Matrix::identity(2).unwrap()).unwrap().gauss_jordan();
        assert_eq!(
            r,
            m(vec![vec![1., 0., 1., -1.], vec![0., 1., -1., 2.]])
        );
    }

    #[test]
    fn max_magnitude_pivot() {
        let a = m(vec![vec![1., 2.], vec![4., 2.]]);
        let opts = ReductionOptions::default().with_pivot(PivotStrategy::MaxMagnitude);

        assert_eq!(
            a.gaussian_reduction_with(&opts),
            m(vec![vec![1., 0.5], vec![0., 1.]])
        );
        assert_eq!(a.gauss_jordan_with(&opts), Matrix::identity(2).unwrap());
    }

    #[test]
    fn zero_tolerance() {
        let a = m(vec![vec![1., 1.], vec![1., 1. + 1e-14]]);
        assert_eq!(a.rank(), 2);

        let opts = ReductionOptions::default().with_zero_tolerance(1e-10);
        assert_eq!(a.rank_with(&opts), 1);
    }

    #[test]
    fn solve() {
        let a = m(vec![vec![1., 2., 3.], vec![4., 5., 16.], vec![7., 8., 9.]]);
        let b = Matrix::from_column(vec![1., 2., 3.]).unwrap();

        let x = a.solve(&b).unwrap();
        assert_eq!((x.nrows(), x.ncols()), (3, 1));
        let r = &a * &x;
        for (e, t) in r.data().iter().zip(b.data()) {
            assert!((e - t).abs() < 1e-12);
        }

        let singular = m(vec![vec![1., 1.], vec![1., 1.]]);
        assert_eq!(
            singular.solve(&Matrix::from_column(vec![1., 2.]).unwrap()),
            Err(MatrixError::Inconsistent)
        );
        assert_eq!(
            singular.solve(&Matrix::from_column(vec![1., 1.]).unwrap()),
            Err(MatrixError::Underdetermined { rank: 1 })
        );
        assert!(matches!(
            a.solve(&Matrix::from_column(vec![1., 2.]).unwrap()),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn inverse_by_row_reduction() {
        let a = m(vec![vec![1., 2.], vec![3., 4.]]);
        assert_eq!(
            a.inverse_by_row_reduction().unwrap(),
            m(vec![vec![-2., 1.], vec![1.5, -0.5]])
        );

        assert_eq!(
            m(vec![vec![1., 1.], vec![1., 1.]]).inverse_by_row_reduction(),
            Err(MatrixError::Singular)
        );
        assert!(matches!(
            Matrix::zero(2, 3).unwrap().inverse_by_row_reduction(),
            Err(MatrixError::NotSquare { .. })
        ));
    }
}
