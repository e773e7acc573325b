//! Public types shared across feature-map operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge handling for convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    /// No padding. The kernel only visits positions where it fits entirely
    /// inside the input, so the output shrinks by `kernel - 1` per axis.
    #[default]
    Valid,
    /// Zero-pad the borders so a stride-1 convolution preserves the input
    /// shape. Requires odd kernel dimensions.
    Same,
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Valid => write!(f, "valid"),
            Padding::Same => write!(f, "same"),
        }
    }
}

/// Reduction applied over each pooling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Keep the largest value in the window.
    #[default]
    Max,
    /// Average all values in the window.
    Average,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Max => write!(f, "max"),
            PoolKind::Average => write!(f, "average"),
        }
    }
}
