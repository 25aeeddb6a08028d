//! Dense row-major matrices for counts and probabilities.
//!
//! Rows and columns are dense indices produced by
//! [`LabelIndex`](crate::labels::LabelIndex); the matrix itself knows nothing
//! about labels.

use std::fmt::Write as _;

/// Row-major `n_rows x n_cols` matrix stored in one contiguous buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> DenseMatrix<T> {
    /// Matrix filled with `T::default()` (zero for the numeric types used here).
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![T::default(); n_rows * n_cols],
        }
    }

    /// Build from nested rows. Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        let data = rows.into_iter().flatten().collect();
        Some(Self {
            n_rows,
            n_cols,
            data,
        })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let off = self.offset(row, col);
        self.data[off] = value;
    }
}

impl<T> DenseMatrix<T> {
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        let off = self.offset(row, col);
        &mut self.data[off]
    }

    /// Borrow row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let start = i * self.n_cols;
        &mut self.data[start..start + self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Flat view of the whole buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n_rows && col < self.n_cols, "index out of range");
        row * self.n_cols + col
    }
}

impl DenseMatrix<u64> {
    #[inline]
    pub fn increment(&mut self, row: usize, col: usize) {
        *self.get_mut(row, col) += 1;
    }

    pub fn row_total(&self, i: usize) -> u64 {
        self.row(i).iter().sum()
    }
}

impl DenseMatrix<f64> {
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    /// True if every row sums to 1 within `tol`, or is entirely zero.
    ///
    /// All-zero rows are how states without outgoing evidence are stored.
    pub fn is_row_stochastic(&self, tol: f64) -> bool {
        self.rows().all(|row| {
            row.iter().all(|&v| v == 0.0) || (row.iter().sum::<f64>() - 1.0).abs() <= tol
        })
    }
}

/// Format a row as space-separated values with exactly `precision` decimals.
pub fn format_row(row: &[f64], precision: usize) -> String {
    let mut out = String::with_capacity(row.len() * (precision + 3));
    for (j, v) in row.iter().enumerate() {
        if j > 0 {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{v:.precision$}");
    }
    out
}
