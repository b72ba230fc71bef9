use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdError {
    #[error("kdtree: dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },
}
