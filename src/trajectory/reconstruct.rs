//! Slot-index alignment across hourly snapshots.
//!
//! The upstream feed carries no balloon identifiers, so a balloon is taken to
//! be "whatever sits at index `i`" in every hourly array. This only holds if
//! the source orders balloons identically from hour to hour. Callers only see
//! [`Trajectory`] values, so a real identifier join can replace this module.

use crate::altitude::BandFilter;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::trajectory::{PathPoint, Trajectory};

const MIN_POINTS: usize = 2;

/// Trajectories for every comparable slot, walking back from `start_offset`
/// until the first missing hour.
pub fn build_trajectories(
    store: &SnapshotStore,
    start_offset: usize,
    filter: &BandFilter,
) -> Vec<Trajectory> {
    let run = store.contiguous_from(start_offset);
    let Some(slots) = comparable_slots(&run) else {
        return Vec::new();
    };

    (0..slots)
        .filter_map(|slot| trace_slot(&run, start_offset, slot, filter))
        .collect()
}

/// The trajectory for a single slot, if it has one.
pub fn build_trajectory(
    store: &SnapshotStore,
    start_offset: usize,
    slot: usize,
    filter: &BandFilter,
) -> Option<Trajectory> {
    let run = store.contiguous_from(start_offset);
    if slot >= comparable_slots(&run)? {
        return None;
    }
    trace_slot(&run, start_offset, slot, filter)
}

/// Slots below the shortest snapshot in the run exist in every hour.
fn comparable_slots(run: &[(usize, &Snapshot)]) -> Option<usize> {
    run.iter().map(|(_, snapshot)| snapshot.len()).min()
}

fn trace_slot(
    run: &[(usize, &Snapshot)],
    start_offset: usize,
    slot: usize,
    filter: &BandFilter,
) -> Option<Trajectory> {
    let points: Vec<PathPoint> = run
        .iter()
        .enumerate()
        .filter_map(|(step, (_, snapshot))| {
            snapshot
                .get(slot)
                .filter(|p| p.is_valid() && filter.allows(p))
                // Numbered by walk position, so a skipped hour leaves a gap
                // in `hours_ago` instead of shifting later points.
                .map(|p| PathPoint::new(p, start_offset + step))
        })
        .collect();

    (points.len() >= MIN_POINTS).then(|| Trajectory::from_points(slot, points))
}
