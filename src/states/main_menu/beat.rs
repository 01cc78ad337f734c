//! Beat tracking for the logo pulse.

use crate::models::TimingPoint;

/// Progress through the current beat at `position_ms`, in `[0, 1)`.
///
/// Uses the last uninherited timing point before the position, or the
/// first point when the position precedes all of them.
pub fn beat_progress(points: &[TimingPoint], position_ms: f64) -> Option<f64> {
    let mut found = false;
    let mut beat_length = 0.0;
    let mut offset = 0.0;
    for point in points {
        if !found || point.time_ms < position_ms {
            found = true;
            if !point.inherited && point.beat_length_ms > 0.0 {
                beat_length = point.beat_length_ms;
                offset = point.time_ms;
            }
        }
    }
    if !found || beat_length <= 0.0 {
        return None;
    }
    Some((position_ms - offset).rem_euclid(beat_length) / beat_length)
}
