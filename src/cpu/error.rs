use thiserror::Error;

/// Failures reported by [`CpuEngine`](super::CpuEngine) and [`Tensor`](super::Tensor)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Dimension out of range: got {dim} for a tensor with {ndim} dimension(s)")]
    InvalidDim { dim: i64, ndim: usize },

    #[error("Invalid number of data points ({n}) specified")]
    InvalidLength { n: i64 },

    #[error("Number of data points ({n}) exceeds the supported maximum of {max}")]
    LengthTooLarge { n: i64, max: usize },

    #[error("Output of shape {shape:?} does not fit in addressable memory")]
    OutputTooLarge { shape: Vec<usize> },

    #[error("Failed to allocate a buffer of {elements} elements")]
    AllocationFailed { elements: usize },

    #[error("Invalid normalization mode: \"{0}\"")]
    InvalidNorm(String),

    #[error("{operation} expects a {expected} input tensor, but got {got}")]
    DtypeMismatch {
        operation: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Cannot build a tensor of shape {shape:?} from {len} elements")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
