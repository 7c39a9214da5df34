//! Binary import and export of matrices.
//!
//! The format is a format tag byte, the number of rows and columns as
//! little-endian `u32`, followed by the entries as little-endian `f64` in
//! row-major order.

use std::io::{Error, ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::{matrix::Matrix, vector::Vector};

const DENSE_F64: u8 = 0;

impl Matrix {
    /// Write the matrix to a binary stream.
    pub fn write<W: Write>(&self, mut dest: W) -> Result<(), Error> {
        let (nrows, ncols) = match (u32::try_from(self.nrows), u32::try_from(self.ncols)) {
            (Ok(r), Ok(c)) => (r, c),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "matrix dimensions do not fit in 32 bits",
                ))
            }
        };

        dest.write_u8(DENSE_F64)?;
        dest.write_u32::<LittleEndian>(nrows)?;
        dest.write_u32::<LittleEndian>(ncols)?;
        for e in &self.data {
            dest.write_f64::<LittleEndian>(*e)?;
        }
        Ok(())
    }

    /// Read a matrix from a binary stream created with [Matrix::write].
    pub fn import<R: Read>(mut source: R) -> Result<Matrix, Error> {
        let tag = source.read_u8()?;
        if tag != DENSE_F64 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unknown matrix format tag {}", tag),
            ));
        }

        let nrows = source.read_u32::<LittleEndian>()? as usize;
        let ncols = source.read_u32::<LittleEndian>()? as usize;
        if nrows == 0 || ncols == 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("invalid matrix dimensions ({},{})", nrows, ncols),
            ));
        }

        let len = nrows.checked_mul(ncols).ok_or_else(|| {
            Error::new(ErrorKind::InvalidData, "matrix dimensions overflow")
        })?;

        // grow with the stream so a corrupt header cannot force a huge allocation
        let mut data = Vec::new();
        for _ in 0..len {
            data.push(source.read_f64::<LittleEndian>()?);
        }

        Matrix::from_linear(data, nrows, ncols)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
    }
}

impl Vector {
    /// Write the vector to a binary stream, in the format of a `1 x n` matrix.
    pub fn write<W: Write>(&self, dest: W) -> Result<(), Error> {
        self.as_matrix().write(dest)
    }

    /// Read a vector from a binary stream. The stored matrix must have a single row.
    pub fn import<R: Read>(source: R) -> Result<Vector, Error> {
        Vector::from_matrix(Matrix::import(source)?)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, ErrorKind};

    use crate::tensors::{matrix::Matrix, vector::Vector};

    #[test]
    fn layout() {
        let a = Matrix::from_row(vec![1., -2.]).unwrap();
        let mut buf = vec![];
        a.write(&mut buf).unwrap();

        assert_eq!(buf.len(), 1 + 4 + 4 + 2 * 8);
        assert_eq!(&buf[..9], &[0, 1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(&buf[9..17], &1f64.to_le_bytes());
    }

    #[test]
    fn bad_input() {
        let err = Matrix::import(Cursor::new(vec![7u8, 1, 0, 0, 0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = Matrix::import(Cursor::new(vec![0u8, 0, 0, 0, 0, 1, 0, 0, 0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = Matrix::import(Cursor::new(vec![0u8, 1, 0, 0, 0, 1, 0, 0, 0, 1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let mut buf = vec![];
        Matrix::identity(2).unwrap().write(&mut buf).unwrap();
        let err = Vector::import(Cursor::new(buf)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
