//! Utility helpers: window sizing.

use crate::schedule::ChangePoint;

/// Suggest a posterior window (in steps) for a schedule with known changes.
///
/// Uses the sliding-window scaling `O(sqrt(T / Υ_T))` from Garivier & Moulines
/// 2008 (arXiv:0805.3415), where `T` is the duration and `Υ_T` the number of
/// changes in the true probabilities. Change-points at step 0 only set the
/// initial value and are not counted; neither are those past the end.
///
/// Returns a window in `[1, duration]` (or 1 for a zero duration).
///
/// # Example
///
/// ```rust
/// use thompson_split::{change_points, suggested_window};
///
/// // One terminal drops at step 20 and recovers at step 40: two changes.
/// let a = change_points([(0, 0.9), (20, 0.5), (40, 0.9)]);
/// let w = suggested_window(60, &[a.as_slice()]);
/// assert_eq!(w, 5);
/// ```
pub fn suggested_window(duration: usize, schedules: &[&[ChangePoint<f64>]]) -> usize {
    if duration == 0 {
        return 1;
    }
    let changes = schedules
        .iter()
        .flat_map(|s| s.iter())
        .filter(|p| p.step > 0 && p.step < duration)
        .count()
        .max(1);
    let w = (duration as f64 / changes as f64).sqrt().round() as usize;
    w.clamp(1, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::change_points;

    #[test]
    fn stationary_schedule_uses_sqrt_duration() {
        let a = change_points([(0, 0.7)]);
        assert_eq!(suggested_window(100, &[a.as_slice()]), 10);
        assert_eq!(suggested_window(100, &[]), 10);
    }

    #[test]
    fn more_changes_shrink_the_window() {
        let few = change_points([(0, 0.7), (50, 0.3)]);
        let many = change_points([(0, 0.7), (10, 0.3), (20, 0.7), (30, 0.3), (40, 0.7)]);
        let w_few = suggested_window(400, &[few.as_slice()]);
        let w_many = suggested_window(400, &[many.as_slice()]);
        assert!(w_many < w_few, "w_many={w_many} w_few={w_few}");
    }

    #[test]
    fn window_is_clamped_to_duration() {
        assert_eq!(suggested_window(1, &[]), 1);
        assert_eq!(suggested_window(0, &[]), 1);
        let late = change_points([(500, 0.1)]);
        assert_eq!(suggested_window(4, &[late.as_slice()]), 2);
    }
}
