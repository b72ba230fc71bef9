use spotfind_kdtree::KdError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeakError {
    #[error("peaks: length mismatch: {what} has {got} entries, want {want}")]
    LengthMismatch {
        what: &'static str,
        got: usize,
        want: usize,
    },

    #[error("peaks: {0}")]
    Index(#[from] KdError),
}
