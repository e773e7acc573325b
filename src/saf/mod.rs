//! Facade re-exports for featmap

pub use crate::api::error::{FeatmapError, FeatmapResult};
pub use crate::api::types::{Padding, PoolKind};
pub use crate::core::filters;
pub use crate::core::grid::FeatureMap;
pub use crate::core::ops::conv::{Conv2d, conv2d, conv2d_padded};
pub use crate::core::ops::pad::zero_pad;
pub use crate::core::ops::pool::{Pool2d, avg_pool2d, max_pool2d};
