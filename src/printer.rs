use std::fmt::{self, Write};

use crate::tensors::{matrix::Matrix, vector::Vector};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// One bracketed row per line.
    #[default]
    Rows,
    /// The nested array form, on a single line.
    Nested,
}

/// Options that control how matrices and vectors are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PrintOptions {
    pub mode: PrintMode,
    /// The number of digits after the decimal point. When `None`,
    /// the shortest representation that round-trips is used.
    pub precision: Option<usize>,
}

impl PrintOptions {
    pub fn rows() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Rows,
            precision: None,
        }
    }

    pub fn nested() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Nested,
            precision: None,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> PrintOptions {
        self.precision = Some(precision);
        self
    }
}

fn fmt_row(row: &[f64], f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
    f.write_char('[')?;
    for (i, e) in row.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }

        match opts.precision {
            Some(p) => write!(f, "{:.*}", p, e)?,
            None => write!(f, "{}", e)?,
        }
    }
    f.write_char(']')
}

pub struct MatrixPrinter<'a> {
    pub matrix: &'a Matrix,
    pub opts: PrintOptions,
}

impl<'a> MatrixPrinter<'a> {
    pub fn new(matrix: &'a Matrix) -> MatrixPrinter<'a> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(matrix: &'a Matrix, opts: PrintOptions) -> MatrixPrinter<'a> {
        MatrixPrinter { matrix, opts }
    }
}

impl<'a> fmt::Display for MatrixPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.opts.mode {
            PrintMode::Rows => {
                for (i, row) in self.matrix.row_iter().enumerate() {
                    if i > 0 {
                        f.write_char('\n')?;
                    }
                    fmt_row(row, f, &self.opts)?;
                }
                Ok(())
            }
            PrintMode::Nested => {
                f.write_char('[')?;
                for (i, row) in self.matrix.row_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_row(row, f, &self.opts)?;
                }
                f.write_char(']')
            }
        }
    }
}

pub struct VectorPrinter<'a> {
    pub vector: &'a Vector,
    pub opts: PrintOptions,
}

impl<'a> VectorPrinter<'a> {
    pub fn new(vector: &'a Vector) -> VectorPrinter<'a> {
        VectorPrinter {
            vector,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(vector: &'a Vector, opts: PrintOptions) -> VectorPrinter<'a> {
        VectorPrinter { vector, opts }
    }
}

impl<'a> fmt::Display for VectorPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        MatrixPrinter::new_with_options(self.vector.as_matrix(), self.opts).fmt(f)
    }
}
