use thiserror::Error;

pub type FeatmapResult<T> = Result<T, FeatmapError>;

#[derive(Debug, Error)]
pub enum FeatmapError {
    #[error("Data length mismatch: {len} values cannot fill a {rows}x{cols} grid")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("Ragged rows: row {row} has {got} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("Index out of bounds: ({row}, {col}) is outside a {rows}x{cols} grid")]
    IndexOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    #[error("Empty input: operation requires at least one cell")]
    EmptyInput,

    #[error("Kernel too large: {kernel_rows}x{kernel_cols} kernel exceeds {rows}x{cols} input")]
    KernelTooLarge { rows: usize, cols: usize, kernel_rows: usize, kernel_cols: usize },

    #[error("Window too large: {size}x{size} window exceeds {rows}x{cols} input")]
    WindowTooLarge { rows: usize, cols: usize, size: usize },

    #[error("Invalid stride: stride must be at least 1")]
    ZeroStride,

    #[error("Invalid window: window size must be at least 1")]
    ZeroWindow,

    #[error("Same padding requires odd kernel dimensions, got {rows}x{cols}")]
    SamePaddingEvenKernel { rows: usize, cols: usize },
}
