//! Real linear solver backends.
//!
//! The AC solver reduces every complex system to a real one and hands it to a
//! [`LinearSolver`]. [`DenseLu`] is the built-in backend; any closure with the
//! matching signature can stand in for it.

use crate::algebra::Matrix;
use crate::error::{PhasorError, Result};

/// Solves a real square system `A x = b`.
pub trait LinearSolver {
    /// Solve for `x`. Singular input must fail rather than yield a guess.
    fn solve(&self, matrix: &Matrix<f64>, rhs: &[f64]) -> Result<Vec<f64>>;

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> LinearSolver for F
where
    F: Fn(&Matrix<f64>, &[f64]) -> Result<Vec<f64>>,
{
    fn solve(&self, matrix: &Matrix<f64>, rhs: &[f64]) -> Result<Vec<f64>> {
        self(matrix, rhs)
    }
}

/// Dense LU decomposition with partial pivoting.
#[derive(Debug, Clone)]
pub struct DenseLu {
    /// Pivots with a smaller magnitude are reported as singular
    pub pivot_tolerance: f64,
}

impl Default for DenseLu {
    fn default() -> Self {
        Self::new(1e-15)
    }
}

impl DenseLu {
    pub fn new(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    /// Factor `lu` (row-major, `n` x `n`) in place, returning the row
    /// permutation.
    fn factor(&self, lu: &mut [f64], n: usize) -> Result<Vec<usize>> {
        let mut pivots: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val < self.pivot_tolerance {
                return Err(PhasorError::SingularMatrix { pivot: k });
            }

            if max_row != k {
                pivots.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(pivots)
    }
}

impl LinearSolver for DenseLu {
    fn solve(&self, matrix: &Matrix<f64>, rhs: &[f64]) -> Result<Vec<f64>> {
        let (rows, cols) = matrix.size();
        if rows != cols || rows != rhs.len() {
            return Err(PhasorError::NonSquareSystem {
                rows,
                cols,
                rhs: rhs.len(),
            });
        }

        let n = rows;
        let mut lu = matrix.to_row_major(n, n);
        let pivots = self.factor(&mut lu, n)?;

        // Forward substitution (L * y = Pb)
        let mut x: Vec<f64> = pivots.iter().map(|&p| rhs[p]).collect();
        for i in 0..n {
            for j in 0..i {
                x[i] -= lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= lu[i * n + j] * x[j];
            }
            x[i] /= lu[i * n + i];
        }

        Ok(x)
    }

    fn name(&self) -> &'static str {
        "dense-lu"
    }
}
