/// Fitting status of one candidate peak.
///
/// The fitting pipeline keeps a status per candidate, parallel to the
/// coordinate and attribute arrays. `Error` is terminal: an errored peak is
/// never re-examined and never woken, but it still occupies its position and
/// remains visible to neighbors as a query match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PeakStatus {
    /// Still being fit; will be refined on the next pass.
    Running = 0,

    /// Fit has settled; skipped until something nearby changes.
    Converged = 1,

    /// Rejected; excluded from all further fitting.
    Error = 2,
}

impl PeakStatus {
    /// Decode the pipeline's raw status code.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Running),
            1 => Some(Self::Converged),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// Raw status code used in the pipeline's int32 status arrays.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        for s in [PeakStatus::Running, PeakStatus::Converged, PeakStatus::Error] {
            assert_eq!(PeakStatus::from_raw(s.as_raw()), Some(s));
        }
        assert_eq!(PeakStatus::from_raw(-1), None);
        assert_eq!(PeakStatus::from_raw(3), None);
    }
}
