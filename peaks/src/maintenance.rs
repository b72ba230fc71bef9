//! Proximity-based maintenance of the per-peak status array.
//!
//! Each operation builds a fresh 2-D index from the current peak positions,
//! queries it per candidate, and mutates only the caller's status slice. The
//! index is discarded at the end of the call; positions move between fitting
//! passes, so rebuilding is cheaper and simpler than keeping an index in
//! sync with deletions.

use spotfind_kdtree::{KdTree, ResultPool};
use tracing::debug;

use crate::error::PeakError;
use crate::status::PeakStatus;

fn check_len(what: &'static str, got: usize, want: usize) -> Result<(), PeakError> {
    if got != want {
        return Err(PeakError::LengthMismatch { what, got, want });
    }
    Ok(())
}

/// Index peak positions with their array index as the item identifier.
fn build_index(x: &[f64], y: &[f64]) -> Result<KdTree, PeakError> {
    let mut kd = KdTree::new(2);
    for i in 0..x.len() {
        kd.insert(&[x[i], y[i]], i)?;
    }
    Ok(kd)
}

/// Wake converged peaks within `radius` of `pos` back to running.
fn wake_neighbors(
    kd: &KdTree,
    pool: &ResultPool,
    pos: &[f64],
    radius: f64,
    status: &mut [PeakStatus],
) -> Result<(), PeakError> {
    let neighbors = kd.range_in(pos, radius, false, pool)?;
    for n in neighbors.iter() {
        if status[n.item] == PeakStatus::Converged {
            status[n.item] = PeakStatus::Running;
        }
    }
    Ok(())
}

/// Mark peaks that have a strictly brighter neighbor within
/// `removal_radius` as [`PeakStatus::Error`] and wake converged peaks
/// within `neighbor_radius` of each removal. Returns the number of peaks
/// removed.
///
/// Equal heights never suppress either peak. Errored peaks are skipped as
/// subjects but still count as neighbors, so a peak sitting next to an
/// already rejected brighter one is still suppressed.
pub fn mark_dimmer_peaks(
    x: &[f64],
    y: &[f64],
    height: &[f64],
    status: &mut [PeakStatus],
    removal_radius: f64,
    neighbor_radius: f64,
) -> Result<usize, PeakError> {
    check_len("y", y.len(), x.len())?;
    check_len("height", height.len(), x.len())?;
    check_len("status", status.len(), x.len())?;

    let kd = build_index(x, y)?;
    let pool = ResultPool::new();
    let mut removed = 0;

    for i in 0..x.len() {
        if status[i] == PeakStatus::Error {
            continue;
        }

        let pos = [x[i], y[i]];
        let is_dimmer = {
            let neighbors = kd.range_in(&pos, removal_radius, false, &pool)?;
            // Every peak matches itself, so a lone peak yields one entry.
            if neighbors.len() < 2 {
                continue;
            }
            neighbors.iter().any(|n| height[n.item] > height[i])
        };

        if is_dimmer {
            status[i] = PeakStatus::Error;
            removed += 1;
            wake_neighbors(&kd, &pool, &pos, neighbor_radius, status)?;
        }
    }

    debug!("marked {} of {} peaks as dimmer", removed, x.len());
    Ok(removed)
}

/// Mark peaks whose significance is at or below `min_significance` as
/// [`PeakStatus::Error`] and wake converged peaks within `neighbor_radius`
/// of each removal. Returns the number of peaks removed.
pub fn mark_low_significance_peaks(
    x: &[f64],
    y: &[f64],
    significance: &[f64],
    status: &mut [PeakStatus],
    min_significance: f64,
    neighbor_radius: f64,
) -> Result<usize, PeakError> {
    check_len("y", y.len(), x.len())?;
    check_len("significance", significance.len(), x.len())?;
    check_len("status", status.len(), x.len())?;

    let kd = build_index(x, y)?;
    let pool = ResultPool::new();
    let mut removed = 0;

    for i in 0..x.len() {
        if status[i] == PeakStatus::Error {
            continue;
        }
        if significance[i] > min_significance {
            continue;
        }

        status[i] = PeakStatus::Error;
        removed += 1;
        wake_neighbors(&kd, &pool, &[x[i], y[i]], neighbor_radius, status)?;
    }

    debug!(
        "marked {} of {} peaks as low significance",
        removed,
        x.len()
    );
    Ok(removed)
}

/// Set settled current peaks back to [`PeakStatus::Running`] when a peak
/// from the new candidate set appears within `radius` of them.
///
/// The index is built over the new set, which is typically much smaller
/// than the current one. Running and errored peaks are left alone, so the
/// operation is idempotent for a fixed pair of inputs.
pub fn mark_running_if_near(
    cur_x: &[f64],
    cur_y: &[f64],
    new_x: &[f64],
    new_y: &[f64],
    status: &mut [PeakStatus],
    radius: f64,
) -> Result<(), PeakError> {
    check_len("cur_y", cur_y.len(), cur_x.len())?;
    check_len("status", status.len(), cur_x.len())?;
    check_len("new_y", new_y.len(), new_x.len())?;

    let kd = build_index(new_x, new_y)?;
    let pool = ResultPool::new();
    let mut woken = 0;

    for i in 0..cur_x.len() {
        if status[i] == PeakStatus::Running || status[i] == PeakStatus::Error {
            continue;
        }

        let neighbors = kd.range_in(&[cur_x[i], cur_y[i]], radius, false, &pool)?;
        if !neighbors.is_empty() {
            status[i] = PeakStatus::Running;
            woken += 1;
        }
    }

    debug!("woke {} of {} peaks near new candidates", woken, cur_x.len());
    Ok(())
}

/// For each query position, the index of the nearest indexed peak within
/// `radius` and its Euclidean distance, or `None` when nothing is that
/// close.
///
/// Scans an unordered radius result for the minimum rather than asking for
/// an ordered one; the result sets are tiny and the linear scan is cheaper
/// than sorted insertion.
pub fn nearest_peaks(
    x: &[f64],
    y: &[f64],
    query_x: &[f64],
    query_y: &[f64],
    radius: f64,
) -> Result<Vec<Option<(usize, f64)>>, PeakError> {
    check_len("y", y.len(), x.len())?;
    check_len("query_y", query_y.len(), query_x.len())?;

    let kd = build_index(x, y)?;
    let pool = ResultPool::new();
    let mut out = Vec::with_capacity(query_x.len());

    for j in 0..query_x.len() {
        let mut set = kd.range_in(&[query_x[j], query_y[j]], radius, false, &pool)?;
        let mut best: Option<(usize, f64)> = None;
        set.rewind();
        while !set.at_end() {
            if let (Some((item, _)), Some(dist_sq)) = (set.item(), set.dist_sq()) {
                if best.map_or(true, |(_, b)| dist_sq < b) {
                    best = Some((item, dist_sq));
                }
            }
            set.advance();
        }
        out.push(best.map(|(i, d)| (i, d.sqrt())));
    }

    Ok(out)
}
