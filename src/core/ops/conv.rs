//! 2-D convolution.
//!
//! The convolution here is the CNN convention: the kernel slides over the
//! input and each output cell is the element-wise product of the kernel with
//! the window under it, summed. The kernel is not flipped, so this is
//! cross-correlation in signal-processing terms.

use crate::api::error::{FeatmapError, FeatmapResult};
use crate::api::types::Padding;
use crate::core::grid::FeatureMap;
use crate::core::ops::pad::pad_axes;
use std::time::Instant;

/// Convolves `input` with `kernel` at stride 1 without padding.
///
/// The kernel only visits positions where it fits entirely inside the input,
/// so the output shape is `(rows - k_rows + 1, cols - k_cols + 1)`.
pub fn conv2d(input: &FeatureMap, kernel: &FeatureMap) -> FeatmapResult<FeatureMap> {
    correlate(input, kernel, 1)
}

/// Convolves after surrounding `input` with `margin` rings of zeros.
///
/// With `margin = (k - 1) / 2` for an odd `k x k` kernel the output keeps the
/// input shape; larger margins grow it.
pub fn conv2d_padded(
    input: &FeatureMap,
    kernel: &FeatureMap,
    margin: usize,
) -> FeatmapResult<FeatureMap> {
    if input.is_empty() {
        return Err(FeatmapError::EmptyInput);
    }
    let padded = pad_axes(input, margin, margin);
    correlate(&padded, kernel, 1)
}

/// Sliding-window weighted sum. All validation for the free functions and
/// [`Conv2d::apply`] funnels through here.
fn correlate(input: &FeatureMap, kernel: &FeatureMap, stride: usize) -> FeatmapResult<FeatureMap> {
    let _t = if log::log_enabled!(log::Level::Trace) { Some(Instant::now()) } else { None };
    if input.is_empty() || kernel.is_empty() {
        return Err(FeatmapError::EmptyInput);
    }
    if stride == 0 {
        return Err(FeatmapError::ZeroStride);
    }
    if kernel.rows() > input.rows() || kernel.cols() > input.cols() {
        return Err(FeatmapError::KernelTooLarge {
            rows: input.rows(),
            cols: input.cols(),
            kernel_rows: kernel.rows(),
            kernel_cols: kernel.cols(),
        });
    }

    let out_rows = (input.rows() - kernel.rows()) / stride + 1;
    let out_cols = (input.cols() - kernel.cols()) / stride + 1;
    let mut data = vec![0.0; out_rows * out_cols];
    for i in 0..out_rows {
        for j in 0..out_cols {
            let mut acc = 0.0;
            for u in 0..kernel.rows() {
                for v in 0..kernel.cols() {
                    acc += input.at(i * stride + u, j * stride + v) * kernel.at(u, v);
                }
            }
            data[i * out_cols + j] = acc;
        }
    }

    if let Some(t) = _t {
        log::trace!("[perf] conv::correlate [{}x{}]x[{}x{}] stride {} {:.3}ms",
            input.rows(), input.cols(), kernel.rows(), kernel.cols(), stride,
            t.elapsed().as_secs_f64() * 1000.0);
    }
    Ok(FeatureMap::from_raw(data, out_rows, out_cols))
}

/// Configurable 2-D convolution over a fixed kernel.
///
/// Built with the defaults of [`conv2d`] (valid padding, stride 1) and
/// adjusted through the `with_*` methods:
///
/// ```rust
/// use featmap::{Conv2d, FeatureMap, Padding};
///
/// let kernel = FeatureMap::full(3, 3, 1.0 / 9.0);
/// let blur = Conv2d::new(kernel).with_padding(Padding::Same);
/// let image = FeatureMap::random(8, 8);
/// assert_eq!(blur.apply(&image).unwrap().shape(), (8, 8));
/// ```
#[derive(Debug, Clone)]
pub struct Conv2d {
    kernel: FeatureMap,
    padding: Padding,
    stride: usize,
}

impl Conv2d {
    /// Valid-padding, stride-1 convolution over `kernel`.
    pub fn new(kernel: FeatureMap) -> Self {
        Self {
            kernel,
            padding: Padding::Valid,
            stride: 1,
        }
    }

    /// Sets the edge handling and returns self (builder pattern).
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the stride and returns self (builder pattern).
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn kernel(&self) -> &FeatureMap {
        &self.kernel
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Margins implied by the padding mode.
    ///
    /// Shape-preserving padding needs `(k - 1) / 2` rings per axis, which
    /// only balances for odd kernel dimensions.
    fn margins(&self) -> FeatmapResult<(usize, usize)> {
        match self.padding {
            Padding::Valid => Ok((0, 0)),
            Padding::Same => {
                if self.kernel.rows() % 2 == 0 || self.kernel.cols() % 2 == 0 {
                    Err(FeatmapError::SamePaddingEvenKernel {
                        rows: self.kernel.rows(),
                        cols: self.kernel.cols(),
                    })
                } else {
                    Ok(((self.kernel.rows() - 1) / 2, (self.kernel.cols() - 1) / 2))
                }
            }
        }
    }

    /// Output shape for an input of `input_shape`, without running the
    /// convolution. Fails with the same errors [`Conv2d::apply`] would.
    pub fn output_shape(&self, input_shape: (usize, usize)) -> FeatmapResult<(usize, usize)> {
        let (rows, cols) = input_shape;
        if rows == 0 || cols == 0 || self.kernel.is_empty() {
            return Err(FeatmapError::EmptyInput);
        }
        if self.stride == 0 {
            return Err(FeatmapError::ZeroStride);
        }
        let (row_margin, col_margin) = self.margins()?;
        let (rows, cols) = (rows + 2 * row_margin, cols + 2 * col_margin);
        if self.kernel.rows() > rows || self.kernel.cols() > cols {
            return Err(FeatmapError::KernelTooLarge {
                rows,
                cols,
                kernel_rows: self.kernel.rows(),
                kernel_cols: self.kernel.cols(),
            });
        }
        Ok((
            (rows - self.kernel.rows()) / self.stride + 1,
            (cols - self.kernel.cols()) / self.stride + 1,
        ))
    }

    /// Runs the convolution.
    pub fn apply(&self, input: &FeatureMap) -> FeatmapResult<FeatureMap> {
        if input.is_empty() {
            return Err(FeatmapError::EmptyInput);
        }
        let (row_margin, col_margin) = self.margins()?;
        let padded;
        let src = if row_margin == 0 && col_margin == 0 {
            input
        } else {
            padded = pad_axes(input, row_margin, col_margin);
            &padded
        };
        correlate(src, &self.kernel, self.stride)
    }
}
