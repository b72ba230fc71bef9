//! Proximity-based peak status maintenance for iterative fitting.
//!
//! An image-analysis pipeline refines candidate peaks over repeated fitting
//! passes, tracking each candidate's [`PeakStatus`] in an array parallel to
//! its coordinates. Between passes this crate re-evaluates those statuses
//! against current neighbor positions: dimmer duplicates and insignificant
//! detections are rejected, and settled peaks near a removal or a new
//! detection are woken for refitting.
//!
//! Every operation builds a throwaway 2-D index (see `spotfind-kdtree`)
//! from the positions it is handed; the status slice is the only state that
//! persists across calls.
//!
//! # Example
//!
//! ```rust
//! use spotfind_peaks::{mark_dimmer_peaks, PeakStatus};
//!
//! let x = [0.0, 1.0];
//! let y = [0.0, 0.0];
//! let height = [10.0, 5.0];
//! let mut status = [PeakStatus::Running, PeakStatus::Running];
//!
//! let removed = mark_dimmer_peaks(&x, &y, &height, &mut status, 2.0, 2.0).unwrap();
//! assert_eq!(removed, 1);
//! assert_eq!(status[1], PeakStatus::Error);
//! ```

pub mod error;
pub mod maintenance;
pub mod status;

pub use error::PeakError;
pub use maintenance::{
    mark_dimmer_peaks, mark_low_significance_peaks, mark_running_if_near, nearest_peaks,
};
pub use status::PeakStatus;
