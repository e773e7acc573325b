//! Built-in convolution kernels.
//!
//! These are the classic hand-designed filters used to illustrate what a
//! convolution does before any learning enters the picture. Each returns a
//! fresh [`FeatureMap`] ready to hand to [`conv2d`](crate::conv2d) or
//! [`Conv2d`](crate::Conv2d).

use crate::core::grid::FeatureMap;

/// Kernel names accepted by [`by_name`].
pub const NAMES: [&str; 5] = [
    "identity",
    "vertical-edge",
    "horizontal-edge",
    "sharpen",
    "box-blur",
];

/// 1x1 kernel that leaves the input unchanged.
pub fn identity() -> FeatureMap {
    FeatureMap::from_raw(vec![1.0], 1, 1)
}

/// Responds to vertical edges: bright on the left, dark on the right gives a
/// positive response, the mirror image a negative one.
pub fn vertical_edge() -> FeatureMap {
    FeatureMap::from_raw(
        vec![
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0,
        ],
        3,
        3,
    )
}

/// Responds to horizontal edges. Transpose of [`vertical_edge`].
pub fn horizontal_edge() -> FeatureMap {
    FeatureMap::from_raw(
        vec![
            1.0, 1.0, 1.0, //
            0.0, 0.0, 0.0, //
            -1.0, -1.0, -1.0,
        ],
        3,
        3,
    )
}

/// Exaggerates the difference between a cell and its four neighbours.
pub fn sharpen() -> FeatureMap {
    FeatureMap::from_raw(
        vec![
            0.0, -1.0, 0.0, //
            -1.0, 5.0, -1.0, //
            0.0, -1.0, 0.0,
        ],
        3,
        3,
    )
}

/// Uniform `size x size` averaging kernel. The weights sum to one, so flat
/// regions pass through unchanged.
pub fn box_blur(size: usize) -> FeatureMap {
    FeatureMap::full(size, size, 1.0 / (size * size) as f32)
}

/// Looks up a kernel by its name in [`NAMES`]. `box-blur` uses a 3x3 window.
pub fn by_name(name: &str) -> Option<FeatureMap> {
    match name {
        "identity" => Some(identity()),
        "vertical-edge" => Some(vertical_edge()),
        "horizontal-edge" => Some(horizontal_edge()),
        "sharpen" => Some(sharpen()),
        "box-blur" => Some(box_blur(3)),
        _ => None,
    }
}
