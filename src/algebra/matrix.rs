//! Sparse, auto-growing 2-D container.
//!
//! Cells are optional: an absent cell is a valid state, distinct from a zero.
//! The matrix size is derived from its content as
//! `(row count, longest row length)`, and writing past the current bounds
//! grows the content row-major, padding new cells with absence.

use std::fmt;
use std::ops::Neg;

/// A rectangular matrix of optional entries.
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    /// Rows of columns
    content: Vec<Vec<Option<T>>>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Matrix<T> {
    /// Create an empty 0x0 matrix.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Create a `rows` x `cols` matrix with every cell absent.
    pub fn absent(rows: usize, cols: usize) -> Self {
        let content = (0..rows)
            .map(|_| (0..cols).map(|_| None).collect())
            .collect();
        Self { content }
    }

    /// Create a matrix from (possibly ragged) rows.
    pub fn from_rows(rows: Vec<Vec<Option<T>>>) -> Self {
        Self { content: rows }
    }

    /// Derived size as `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.content.len()
    }

    /// Length of the longest row.
    pub fn cols(&self) -> usize {
        self.content.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get the entry at (row, col). Out of bounds reads as absent.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.content.get(row)?.get(col)?.as_ref()
    }

    /// Set the entry at (row, col), growing the matrix if needed.
    pub fn set(&mut self, row: usize, col: usize, value: Option<T>) {
        if row >= self.content.len() {
            self.content.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.content[row];
        if col >= r.len() {
            r.resize_with(col + 1, || None);
        }
        r[col] = value;
    }

    /// Set a present entry at (row, col).
    pub fn insert(&mut self, row: usize, col: usize, value: T) {
        self.set(row, col, Some(value));
    }

    /// Mutable access to a present entry.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.content.get_mut(row)?.get_mut(col)?.as_mut()
    }

    /// Iterate over present entries as `(row, col, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.content.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_ref().map(|v| (r, c, v)))
        })
    }

    /// Apply `f` to every present entry, keeping absent cells absent.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Matrix<U> {
        let mut content = Vec::with_capacity(self.content.len());
        for row in &self.content {
            let mut mapped = Vec::with_capacity(row.len());
            for cell in row {
                mapped.push(cell.as_ref().map(|v| f(v)));
            }
            content.push(mapped);
        }
        Matrix { content }
    }
}

impl<T: Clone> Matrix<T> {
    /// Swap row and column indices. Absent cells stay absent.
    pub fn transpose(&self) -> Self {
        let (rows, cols) = self.size();
        let mut result = Matrix::absent(cols, rows);
        for (r, c, value) in self.iter() {
            result.insert(c, r, value.clone());
        }
        result
    }

    /// Compose a flat matrix from a matrix of sub-matrices.
    ///
    /// Each outer row takes the height of its tallest block and each outer
    /// column the width of its widest block; blocks are placed at the prefix
    /// sums of those extents. Absent outer cells leave their region absent.
    pub fn from_blocks(blocks: &Matrix<Matrix<T>>) -> Self {
        let (outer_rows, outer_cols) = blocks.size();
        let mut heights = vec![0usize; outer_rows];
        let mut widths = vec![0usize; outer_cols];
        for (r, c, block) in blocks.iter() {
            let (h, w) = block.size();
            heights[r] = heights[r].max(h);
            widths[c] = widths[c].max(w);
        }

        let row_offsets = prefix_sums(&heights);
        let col_offsets = prefix_sums(&widths);
        let mut result = Matrix::absent(
            heights.iter().sum::<usize>(),
            widths.iter().sum::<usize>(),
        );

        for (r, c, block) in blocks.iter() {
            result.copy_block(block, row_offsets[r], col_offsets[c]);
        }
        result
    }

    fn copy_block(&mut self, block: &Matrix<T>, row: usize, col: usize) {
        for (r, c, value) in block.iter() {
            self.insert(row + r, col + c, value.clone());
        }
    }
}

/// Exclusive prefix sums: offset of each extent.
fn prefix_sums(extents: &[usize]) -> Vec<usize> {
    extents
        .iter()
        .scan(0usize, |acc, &e| {
            let start = *acc;
            *acc += e;
            Some(start)
        })
        .collect()
}

impl Matrix<f64> {
    /// Dense row-major export of the top-left `rows` x `cols` region,
    /// with absent cells read as zero.
    pub fn to_row_major(&self, rows: usize, cols: usize) -> Vec<f64> {
        let mut dense = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                dense.push(self.get(r, c).copied().unwrap_or(0.0));
            }
        }
        dense
    }
}

impl Neg for Matrix<f64> {
    type Output = Matrix<f64>;

    fn neg(self) -> Matrix<f64> {
        self.map(|v| -v)
    }
}

impl Neg for &Matrix<f64> {
    type Output = Matrix<f64>;

    fn neg(self) -> Matrix<f64> {
        self.map(|v| -v)
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        let (rows, cols) = self.size();
        if (rows, cols) != other.size() {
            return false;
        }
        (0..rows).all(|r| (0..cols).all(|c| self.get(r, c) == other.get(r, c)))
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        let cells: Vec<Vec<String>> = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| match self.get(r, c) {
                        Some(v) => v.to_string(),
                        None => "-".to_string(),
                    })
                    .collect()
            })
            .collect();
        let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

        for row in &cells {
            for cell in row {
                write!(f, "{:<width$} ", cell, width = width + 1)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
