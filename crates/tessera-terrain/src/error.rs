//! Terrain generation error types.

/// Errors raised by grid indexing, parameter validation, and result access.
///
/// Every variant is a contract violation rather than a transient fault, so
/// callers should surface them immediately instead of retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A coordinate or flat index fell outside the grid.
    #[error("{what} out of range for {width}x{height} grid")]
    OutOfRange {
        /// Human-readable description of the offending value.
        what: String,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// Dual grid results were requested before any generation pass.
    #[error("terrain has not been generated yet")]
    NotGenerated,

    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Layer count was zero or does not fit in the variant's layer bits.
    #[error("layer count must be in 1..={max}, got {count}")]
    InvalidLayerCount {
        /// Requested layer count.
        count: u32,
        /// Largest supported layer count.
        max: u32,
    },

    /// Noise scale was not a positive finite number.
    #[error("noise scale must be positive and finite, got {0}")]
    InvalidNoiseScale(f64),

    /// Noise power was not a positive finite number.
    #[error("noise power must be positive and finite, got {0}")]
    InvalidNoisePower(f64),

    /// Fractal noise settings would produce non-finite samples.
    #[error("invalid fractal noise settings: {0}")]
    InvalidNoiseSettings(String),

    /// A pre-computed corner value was negative, NaN, or above the layer range.
    #[error("corner value {value} at index {index} does not fit a {layer_count}-layer field")]
    InvalidCornerValue {
        /// Flat index of the offending corner.
        index: usize,
        /// The rejected value.
        value: f64,
        /// Layer count of the field being built.
        layer_count: u8,
    },

    /// A pre-computed value list did not cover the grid exactly.
    #[error("expected {expected} corner values, got {actual}")]
    ValueCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}
