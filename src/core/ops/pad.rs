//! Zero padding.
//!
//! Padding surrounds a grid with rings of zeros so that a following
//! convolution can visit the border cells as often as the interior ones.

use crate::core::grid::FeatureMap;

/// Surrounds `input` with `margin` rings of zeros.
///
/// The output shape is `(rows + 2 * margin, cols + 2 * margin)`. A margin of
/// zero returns an unchanged copy.
pub fn zero_pad(input: &FeatureMap, margin: usize) -> FeatureMap {
    pad_axes(input, margin, margin)
}

/// Pads the row and column axes independently. Shape-preserving padding for
/// non-square kernels needs different margins per axis.
pub(crate) fn pad_axes(input: &FeatureMap, row_margin: usize, col_margin: usize) -> FeatureMap {
    if row_margin == 0 && col_margin == 0 {
        return input.clone();
    }
    let out_rows = input.rows() + 2 * row_margin;
    let out_cols = input.cols() + 2 * col_margin;
    let mut data = vec![0.0; out_rows * out_cols];
    let cols = input.cols();
    for r in 0..input.rows() {
        let src = &input.data()[r * cols..(r + 1) * cols];
        let start = (r + row_margin) * out_cols + col_margin;
        data[start..start + cols].copy_from_slice(src);
    }
    FeatureMap::from_raw(data, out_rows, out_cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_margin_is_identity() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let padded = zero_pad(&m, 0);
        assert_eq!(padded, m);
    }

    #[test]
    fn test_single_ring() {
        let m = FeatureMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let padded = zero_pad(&m, 1);
        assert_eq!(padded.shape(), (4, 4));
        assert_eq!(
            padded.to_rows(),
            vec![
                vec![0.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 2.0, 0.0],
                vec![0.0, 3.0, 4.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_wide_margin_shape() {
        let m = FeatureMap::full(3, 5, 1.0);
        let padded = zero_pad(&m, 2);
        assert_eq!(padded.shape(), (7, 9));
        let total: f32 = padded.data().iter().sum();
        assert!((total - 15.0).abs() < 1e-6, "padding must not add mass");
    }

    #[test]
    fn test_asymmetric_axes() {
        let m = FeatureMap::full(2, 2, 5.0);
        let padded = pad_axes(&m, 1, 0);
        assert_eq!(padded.shape(), (4, 2));
        assert_eq!(padded.get(0, 0).unwrap(), 0.0);
        assert_eq!(padded.get(1, 0).unwrap(), 5.0);
    }

    #[test]
    fn test_empty_input() {
        let padded = zero_pad(&FeatureMap::zeros(0, 0), 1);
        assert_eq!(padded.shape(), (2, 2));
        assert!(padded.data().iter().all(|&v| v == 0.0));
    }
}
