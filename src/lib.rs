//! # featmap
//!
//! Feature-map primitives for convolutional networks: 2-D convolution, zero
//! padding, and pooling over small in-memory grids.
//!
//! The crate is deliberately scoped to the forward pass of the classic CNN
//! building blocks. A [`FeatureMap`] is a dense row-major grid of `f32`
//! cells; [`conv2d`] slides a kernel over it, [`zero_pad`] grows its borders,
//! and [`max_pool2d`] / [`avg_pool2d`] shrink it again. The [`filters`]
//! module ships the classic hand-designed kernels (edge detectors, sharpen,
//! box blur) for experimenting without training anything.
//!
//! ## Example
//!
//! ```rust
//! use featmap::{FeatureMap, conv2d, filters};
//!
//! let image = FeatureMap::from_rows(vec![
//!     vec![1.0, 2.0, 3.0],
//!     vec![4.0, 5.0, 6.0],
//!     vec![7.0, 8.0, 9.0],
//! ])
//! .unwrap();
//!
//! // A 3x3 kernel over a 3x3 image leaves a single valid position.
//! let response = conv2d(&image, &filters::vertical_edge()).unwrap();
//! assert_eq!(response.shape(), (1, 1));
//! assert_eq!(response.get(0, 0).unwrap(), -6.0);
//! ```
//!
//! Configurable variants live on the op structs:
//!
//! ```rust
//! use featmap::{Conv2d, FeatureMap, Padding, filters};
//!
//! let conv = Conv2d::new(filters::sharpen()).with_padding(Padding::Same);
//! let image = FeatureMap::random(6, 6);
//! assert_eq!(conv.apply(&image).unwrap().shape(), (6, 6));
//! ```

pub mod api;
mod core;
mod saf;

pub use saf::*;
