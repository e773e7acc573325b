//! 2-D pooling.
//!
//! Pooling slides a square window over the input and reduces each window to a
//! single value, shrinking the map while keeping its strongest responses
//! (max) or its local averages (average). Windows that would hang over the
//! right or bottom edge are dropped, so output dimensions round down.

use crate::api::error::{FeatmapError, FeatmapResult};
use crate::api::types::PoolKind;
use crate::core::grid::FeatureMap;
use std::time::Instant;

/// Max pooling with a `size x size` window advancing by `stride`.
pub fn max_pool2d(input: &FeatureMap, size: usize, stride: usize) -> FeatmapResult<FeatureMap> {
    pool_with(input, size, stride, PoolKind::Max)
}

/// Average pooling with a `size x size` window advancing by `stride`.
pub fn avg_pool2d(input: &FeatureMap, size: usize, stride: usize) -> FeatmapResult<FeatureMap> {
    pool_with(input, size, stride, PoolKind::Average)
}

fn pool_with(
    input: &FeatureMap,
    size: usize,
    stride: usize,
    kind: PoolKind,
) -> FeatmapResult<FeatureMap> {
    let _t = if log::log_enabled!(log::Level::Trace) { Some(Instant::now()) } else { None };
    if input.is_empty() {
        return Err(FeatmapError::EmptyInput);
    }
    if size == 0 {
        return Err(FeatmapError::ZeroWindow);
    }
    if stride == 0 {
        return Err(FeatmapError::ZeroStride);
    }
    if size > input.rows() || size > input.cols() {
        return Err(FeatmapError::WindowTooLarge {
            rows: input.rows(),
            cols: input.cols(),
            size,
        });
    }

    let out_rows = (input.rows() - size) / stride + 1;
    let out_cols = (input.cols() - size) / stride + 1;
    let mut data = vec![0.0; out_rows * out_cols];
    for i in 0..out_rows {
        for j in 0..out_cols {
            data[i * out_cols + j] = reduce_window(input, i * stride, j * stride, size, kind);
        }
    }

    if let Some(t) = _t {
        log::trace!("[perf] pool::{} [{}x{}] window {} stride {} {:.3}ms",
            kind, input.rows(), input.cols(), size, stride,
            t.elapsed().as_secs_f64() * 1000.0);
    }
    Ok(FeatureMap::from_raw(data, out_rows, out_cols))
}

fn reduce_window(input: &FeatureMap, row: usize, col: usize, size: usize, kind: PoolKind) -> f32 {
    match kind {
        PoolKind::Max => {
            let mut best = f32::NEG_INFINITY;
            for u in 0..size {
                for v in 0..size {
                    best = best.max(input.at(row + u, col + v));
                }
            }
            best
        }
        PoolKind::Average => {
            let mut sum = 0.0;
            for u in 0..size {
                for v in 0..size {
                    sum += input.at(row + u, col + v);
                }
            }
            sum / (size * size) as f32
        }
    }
}

/// Configurable pooling over a fixed window.
///
/// The stride defaults to the window size, giving the usual non-overlapping
/// tiling. Override it with [`Pool2d::with_stride`] for overlapping windows.
#[derive(Debug, Clone)]
pub struct Pool2d {
    kind: PoolKind,
    size: usize,
    stride: usize,
}

impl Pool2d {
    /// Pooling with a `size x size` window and stride equal to `size`.
    pub fn new(kind: PoolKind, size: usize) -> Self {
        Self {
            kind,
            size,
            stride: size,
        }
    }

    /// Sets the stride and returns self (builder pattern).
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Output shape for an input of `input_shape`, without running the pool.
    pub fn output_shape(&self, input_shape: (usize, usize)) -> FeatmapResult<(usize, usize)> {
        let (rows, cols) = input_shape;
        if rows == 0 || cols == 0 {
            return Err(FeatmapError::EmptyInput);
        }
        if self.size == 0 {
            return Err(FeatmapError::ZeroWindow);
        }
        if self.stride == 0 {
            return Err(FeatmapError::ZeroStride);
        }
        if self.size > rows || self.size > cols {
            return Err(FeatmapError::WindowTooLarge {
                rows,
                cols,
                size: self.size,
            });
        }
        Ok((
            (rows - self.size) / self.stride + 1,
            (cols - self.size) / self.stride + 1,
        ))
    }

    /// Runs the pool.
    pub fn apply(&self, input: &FeatureMap) -> FeatmapResult<FeatureMap> {
        pool_with(input, self.size, self.stride, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(rows: usize, cols: usize) -> FeatureMap {
        let data = (0..rows * cols).map(|i| (i + 1) as f32).collect();
        FeatureMap::from_vec(data, rows, cols).unwrap()
    }

    #[test]
    fn test_max_pool_tiling() {
        let input = ramp(4, 4);
        let out = max_pool2d(&input, 2, 2).unwrap();
        assert_eq!(out.to_rows(), vec![vec![6.0, 8.0], vec![14.0, 16.0]]);
    }

    #[test]
    fn test_max_pool_overlapping() {
        let input = ramp(4, 4);
        let out = max_pool2d(&input, 2, 1).unwrap();
        assert_eq!(out.shape(), (3, 3));
        assert_eq!(
            out.to_rows(),
            vec![
                vec![6.0, 7.0, 8.0],
                vec![10.0, 11.0, 12.0],
                vec![14.0, 15.0, 16.0],
            ]
        );
    }

    #[test]
    fn test_avg_pool_window_means() {
        let input = ramp(4, 4);
        let out = avg_pool2d(&input, 2, 2).unwrap();
        assert_eq!(out.to_rows(), vec![vec![3.5, 5.5], vec![11.5, 13.5]]);
    }

    #[test]
    fn test_ragged_edge_dropped() {
        // 5x5 with a 2x2 stride-2 window leaves the last row and column
        // uncovered; the output is 2x2, not 3x3.
        let input = ramp(5, 5);
        let out = max_pool2d(&input, 2, 2).unwrap();
        assert_eq!(out.shape(), (2, 2));
        assert_eq!(out.to_rows(), vec![vec![7.0, 9.0], vec![17.0, 19.0]]);
    }

    #[test]
    fn test_max_pool_negative_values() {
        let input = FeatureMap::from_rows(vec![vec![-5.0, -2.0], vec![-8.0, -3.0]]).unwrap();
        let out = max_pool2d(&input, 2, 2).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), -2.0);
    }

    #[test]
    fn test_window_covering_whole_input() {
        let input = ramp(3, 3);
        let max = max_pool2d(&input, 3, 1).unwrap();
        assert_eq!(max.shape(), (1, 1));
        assert_eq!(max.get(0, 0).unwrap(), 9.0);

        let avg = avg_pool2d(&input, 3, 1).unwrap();
        assert!((avg.get(0, 0).unwrap() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_pool2d_default_stride_is_window() {
        let pool = Pool2d::new(PoolKind::Max, 2);
        assert_eq!(pool.stride(), 2);
        let out = pool.apply(&ramp(4, 4)).unwrap();
        assert_eq!(out.shape(), (2, 2));
    }

    #[test]
    fn test_pool2d_stride_override() {
        let pool = Pool2d::new(PoolKind::Average, 3).with_stride(1);
        let out = pool.apply(&ramp(5, 5)).unwrap();
        assert_eq!(out.shape(), (3, 3));
        assert_eq!(pool.output_shape((5, 5)).unwrap(), (3, 3));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            max_pool2d(&FeatureMap::zeros(0, 0), 2, 2),
            Err(FeatmapError::EmptyInput)
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = max_pool2d(&ramp(4, 4), 0, 1).unwrap_err();
        assert!(matches!(err, FeatmapError::ZeroWindow));
    }

    #[test]
    fn test_zero_stride_rejected() {
        let err = avg_pool2d(&ramp(4, 4), 2, 0).unwrap_err();
        assert!(matches!(err, FeatmapError::ZeroStride));
    }

    #[test]
    fn test_window_too_large_rejected() {
        let err = max_pool2d(&ramp(3, 3), 4, 1).unwrap_err();
        assert!(matches!(
            err,
            FeatmapError::WindowTooLarge {
                rows: 3,
                cols: 3,
                size: 4
            }
        ));
    }
}
