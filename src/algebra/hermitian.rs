//! Real embedding of complex matrices.
//!
//! A complex matrix `M = Re + j·Im` is represented by the doubled real block
//! matrix
//!
//! ```text
//! | Re  -Im |
//! | Im   Re |
//! ```
//!
//! so that a complex system `M x = z` can be handed to a real-only solver as
//! the equivalent system on `[Re(x); Im(x)]` with right-hand side
//! `[Re(z); Im(z)]`.

use super::complex::Complex;
use super::matrix::Matrix;
use crate::error::{PhasorError, Result};

impl Matrix<Complex> {
    /// Real parts of every present entry.
    pub fn real_part(&self) -> Matrix<f64> {
        self.map(Complex::real)
    }

    /// Imaginary parts of every present entry.
    pub fn imaginary_part(&self) -> Matrix<f64> {
        self.map(Complex::imaginary)
    }

    /// Build the doubled real block matrix `[[Re, -Im], [Im, Re]]`.
    pub fn to_real_doubled(&self) -> Matrix<f64> {
        let re = self.real_part();
        let im = self.imaginary_part();
        let blocks = Matrix::from_rows(vec![
            vec![Some(re.clone()), Some(-&im)],
            vec![Some(im), Some(re)],
        ]);
        Matrix::from_blocks(&blocks)
    }

    /// Stack real parts above imaginary parts into one real column.
    pub fn to_column_vector_doubled(&self) -> Result<Matrix<f64>> {
        let columns = self.cols();
        if columns > 1 {
            return Err(PhasorError::NotAColumnVector { columns });
        }
        let blocks = Matrix::from_rows(vec![
            vec![Some(self.real_part())],
            vec![Some(self.imaginary_part())],
        ]);
        Ok(Matrix::from_blocks(&blocks))
    }

    /// Rebuild a complex matrix from its doubled real representation.
    ///
    /// The top-left and bottom-right quadrants must agree, and the
    /// bottom-left quadrant must be the negation of the top-right one. A
    /// cell is absent only if both its real and imaginary cells are absent.
    pub fn from_real_doubled(doubled: &Matrix<f64>) -> Result<Self> {
        let (rows, cols) = doubled.size();
        if rows % 2 != 0 {
            return Err(PhasorError::OddHermitianDimension {
                axis: "rows",
                size: rows,
            });
        }
        if cols % 2 != 0 {
            return Err(PhasorError::OddHermitianDimension {
                axis: "columns",
                size: cols,
            });
        }

        let (half_rows, half_cols) = (rows / 2, cols / 2);
        let mut result = Matrix::absent(half_rows, half_cols);

        for row in 0..half_rows {
            for col in 0..half_cols {
                let re = doubled.get(row, col);
                if re != doubled.get(row + half_rows, col + half_cols) {
                    return Err(PhasorError::quadrant_mismatch(
                        row,
                        col,
                        "top-left and bottom-right real parts differ",
                    ));
                }

                let im = doubled.get(row + half_rows, col);
                let neg_im = doubled.get(row, col + half_cols);
                let opposite = match (im, neg_im) {
                    (Some(a), Some(b)) => *a == -*b,
                    (None, None) => true,
                    _ => false,
                };
                if !opposite {
                    return Err(PhasorError::quadrant_mismatch(
                        row,
                        col,
                        "bottom-left imaginary part is not the negation of top-right",
                    ));
                }

                if re.is_some() || im.is_some() {
                    let value = Complex::new(
                        re.copied().unwrap_or(0.0),
                        im.copied().unwrap_or(0.0),
                    );
                    result.insert(row, col, value);
                }
            }
        }

        Ok(result)
    }
}

/// Pair the two halves of a doubled real vector back into complex values.
pub fn complex_from_doubled(values: &[f64]) -> Result<Vec<Complex>> {
    if values.len() % 2 != 0 {
        return Err(PhasorError::OddHermitianDimension {
            axis: "rows",
            size: values.len(),
        });
    }
    let (re, im) = values.split_at(values.len() / 2);
    Ok(re
        .iter()
        .zip(im)
        .map(|(&re, &im)| Complex::new(re, im))
        .collect())
}
