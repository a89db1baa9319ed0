//! Dense grid containers for problem data.
//!
//! The modelling layer works over two- and three-dimensional matrices
//! (price, demand, capacity, ...). Nested `Vec`s invite ragged data and
//! per-level bounds slips, so both containers store their elements in one
//! flat `Vec` addressed by a computed linear index, validate
//! rectangularity when built from nested input, and only hand out
//! elements through bounds-checked accessors.

use num_traits::Zero;

use crate::error::{AllotError, Result};

/// A dense row-major 2D grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid2<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid2<T> {
    /// Builds a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(AllotError::InvalidInput(format!(
                    "ragged matrix: row 0 has {} columns but row {} has {}",
                    n_cols,
                    i,
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Grid2 {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Builds a grid by evaluating `f` at every (row, col).
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Grid2 { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked element access.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(&self.data[row * self.cols + col])
    }

    /// Iterates over `((row, col), &value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }
}

impl<T: Clone> Grid2<T> {
    /// Builds a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Grid2 {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

}

impl<T: Copy + Zero> Grid2<T> {
    /// Sum of all cells.
    pub fn total(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, v| acc + *v)
    }
}

/// A dense 3D grid stored in row-major order over axes (a, b, c).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid3<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

impl<T> Grid3<T> {
    /// Builds a grid from nested vectors, rejecting ragged input.
    pub fn from_nested(nested: Vec<Vec<Vec<T>>>) -> Result<Self> {
        let d0 = nested.len();
        let d1 = nested.first().map(Vec::len).unwrap_or(0);
        let d2 = nested
            .first()
            .and_then(|m| m.first())
            .map(Vec::len)
            .unwrap_or(0);
        let mut data = Vec::with_capacity(d0 * d1 * d2);
        for (i, plane) in nested.into_iter().enumerate() {
            if plane.len() != d1 {
                return Err(AllotError::InvalidInput(format!(
                    "ragged matrix: plane {} has {} rows, expected {}",
                    i,
                    plane.len(),
                    d1
                )));
            }
            for (j, row) in plane.into_iter().enumerate() {
                if row.len() != d2 {
                    return Err(AllotError::InvalidInput(format!(
                        "ragged matrix: row ({}, {}) has {} entries, expected {}",
                        i,
                        j,
                        row.len(),
                        d2
                    )));
                }
                data.extend(row);
            }
        }
        Ok(Grid3 {
            dims: [d0, d1, d2],
            data,
        })
    }

    /// Builds a grid by evaluating `f` at every (a, b, c).
    pub fn from_fn(
        d0: usize,
        d1: usize,
        d2: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(d0 * d1 * d2);
        for a in 0..d0 {
            for b in 0..d1 {
                for c in 0..d2 {
                    data.push(f(a, b, c));
                }
            }
        }
        Grid3 {
            dims: [d0, d1, d2],
            data,
        }
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dims[0], self.dims[1], self.dims[2])
    }

    /// Bounds-checked element access.
    pub fn get(&self, a: usize, b: usize, c: usize) -> Option<&T> {
        let [d0, d1, d2] = self.dims;
        if a >= d0 || b >= d1 || c >= d2 {
            return None;
        }
        Some(&self.data[(a * d1 + b) * d2 + c])
    }

    /// Iterates over `((a, b, c), &value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), &T)> {
        let [_, d1, d2] = self.dims;
        self.data.iter().enumerate().map(move |(i, v)| {
            let c = i % d2;
            let b = (i / d2) % d1;
            let a = i / (d1 * d2);
            ((a, b, c), v)
        })
    }

    /// Builds a new grid of the same dims by mapping every cell.
    pub fn map<U>(&self, mut f: impl FnMut((usize, usize, usize), &T) -> U) -> Grid3<U> {
        let [d0, d1, d2] = self.dims;
        Grid3::from_fn(d0, d1, d2, |a, b, c| {
            f((a, b, c), &self.data[(a * d1 + b) * d2 + c])
        })
    }
}
