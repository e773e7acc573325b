//! The `FeatureMap` grid type.
//!
//! A feature map is a dense, row-major 2-D grid of `f32` values. It is the
//! input and output of every operation in this crate: images go in, filtered
//! maps and pooled summaries come out.

use crate::api::error::{FeatmapError, FeatmapResult};
use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt;

/// Dense row-major 2-D grid of `f32` values.
///
/// Cell `(row, col)` lives at `data[row * cols + col]`. Construction always
/// validates that the flat buffer fills the grid exactly, so every method can
/// rely on `data.len() == rows * cols`.
#[derive(Clone, PartialEq)]
pub struct FeatureMap {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl FeatureMap {
    // ==================== Constructors ====================

    /// Create a grid from a flat row-major buffer.
    ///
    /// Returns [`FeatmapError::DataLength`] when `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> FeatmapResult<Self> {
        if data.len() != rows * cols {
            return Err(FeatmapError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a grid from nested rows.
    ///
    /// All rows must have the same length; a [`FeatmapError::RaggedRow`] names
    /// the first offender otherwise. An empty outer vector yields a 0x0 grid.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> FeatmapResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(FeatmapError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Create a grid filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 0.0)
    }

    /// Create a grid filled with a specific value.
    pub fn full(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a grid with random uniform values in `[0, 1)`.
    pub fn random(rows: usize, cols: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..rows * cols).map(|_| rng.r#gen::<f32>()).collect();
        Self { data, rows, cols }
    }

    /// Create a grid with random values from the standard normal distribution.
    pub fn randn(rows: usize, cols: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..rows * cols)
            .map(|_| rng.sample::<f32, _>(StandardNormal))
            .collect();
        Self { data, rows, cols }
    }

    /// Internal constructor for buffers whose length is correct by
    /// construction.
    #[inline]
    pub(crate) fn from_raw(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    // ==================== Accessors ====================

    /// Get the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the shape as a `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get the total number of cells.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the cells.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Copy the cells into a flat row-major vector.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Copy the cells into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.data.chunks(self.cols.max(1)).map(<[f32]>::to_vec).collect()
    }

    /// Checked cell access.
    pub fn get(&self, row: usize, col: usize) -> FeatmapResult<f32> {
        if row >= self.rows || col >= self.cols {
            return Err(FeatmapError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.at(row, col))
    }

    /// Checked row access.
    pub fn row(&self, row: usize) -> FeatmapResult<&[f32]> {
        if row >= self.rows {
            return Err(FeatmapError::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Unchecked cell access. Callers guarantee the indices are in bounds.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    // ==================== Element-wise ops ====================

    /// Apply `f` to every cell, producing a new grid of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn relu(&self) -> Self {
        self.map(|v| v.max(0.0))
    }
}

impl fmt::Debug for FeatureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureMap({}x{})", self.rows, self.cols)
    }
}

/// Renders the grid as right-aligned columns, one text line per grid row.
impl fmt::Display for FeatureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return write!(f, "[]");
        }
        let width = self
            .data
            .iter()
            .map(|v| format!("{v}").len())
            .max()
            .unwrap_or(1);
        for (i, row) in self.data.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
            write!(f, "{}", cells.join("  "))?;
        }
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape() {
        let m = FeatureMap::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.numel(), 6);
        assert!(!m.is_empty());
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = FeatureMap::from_vec(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            FeatmapError::DataLength {
                rows: 2,
                cols: 2,
                len: 3
            }
        ));
    }

    #[test]
    fn test_from_rows() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            FeatmapError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_from_rows_empty() {
        let m = FeatureMap::from_rows(vec![]).unwrap();
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
    }

    #[test]
    fn test_zeros_and_full() {
        let z = FeatureMap::zeros(3, 4);
        assert_eq!(z.shape(), (3, 4));
        assert!(z.data().iter().all(|&v| v == 0.0));

        let f = FeatureMap::full(2, 2, 7.5);
        assert!(f.data().iter().all(|&v| v == 7.5));
    }

    #[test]
    fn test_random_range() {
        let m = FeatureMap::random(8, 8);
        assert_eq!(m.numel(), 64);
        assert!(m.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_randn_shape() {
        let m = FeatureMap::randn(4, 5);
        assert_eq!(m.shape(), (4, 5));
        assert!(m.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_get_checked() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), 3.0);
        let err = m.get(2, 0).unwrap_err();
        assert!(matches!(err, FeatmapError::IndexOutOfBounds { row: 2, .. }));
    }

    #[test]
    fn test_row_checked() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.row(1).unwrap(), &[3.0, 4.0]);
        assert!(m.row(2).is_err());
    }

    #[test]
    fn test_to_vec() {
        let m = FeatureMap::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_to_rows_round_trip() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let m = FeatureMap::from_rows(rows.clone()).unwrap();
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn test_map_and_relu() {
        let m = FeatureMap::from_rows(vec![vec![-2.0, 3.0], vec![0.5, -0.5]]).unwrap();
        let doubled = m.map(|v| v * 2.0);
        assert_eq!(doubled.data(), &[-4.0, 6.0, 1.0, -1.0]);

        let rectified = m.relu();
        assert_eq!(rectified.data(), &[0.0, 3.0, 0.5, 0.0]);
    }

    #[test]
    fn test_debug_format() {
        let m = FeatureMap::zeros(5, 3);
        assert_eq!(format!("{m:?}"), "FeatureMap(5x3)");
    }

    #[test]
    fn test_display_alignment() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 40.0]]).unwrap();
        assert_eq!(format!("{m}"), " 1   2\n 3  40");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(format!("{}", FeatureMap::zeros(0, 0)), "[]");
    }
}
