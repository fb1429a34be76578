//! Piecewise-constant schedules built from sparse change-points.
//!
//! Both the traffic volume and each terminal's true success probability are
//! described as a short list of `(step, value)` pairs: "from this step on, the
//! value is X". [`materialize`] expands such a list into one value per step.

/// A `(step, value)` pair marking where a schedule changes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangePoint<T> {
    /// First step at which `value` applies.
    pub step: usize,
    pub value: T,
}

impl<T> ChangePoint<T> {
    pub fn new(step: usize, value: T) -> Self {
        Self { step, value }
    }
}

impl<T> From<(usize, T)> for ChangePoint<T> {
    fn from((step, value): (usize, T)) -> Self {
        Self { step, value }
    }
}

/// Collect `(step, value)` tuples into change-points.
pub fn change_points<T, I>(pairs: I) -> Vec<ChangePoint<T>>
where
    I: IntoIterator<Item = (usize, T)>,
{
    pairs.into_iter().map(ChangePoint::from).collect()
}

/// Expand sparse change-points into a dense vector of length `duration`.
///
/// Change-points are stable-sorted by step, then walked with a single cursor.
/// Each step consumes **at most one** change-point: the one under the cursor,
/// if its step is at or before the current step. Steps before the first
/// change-point hold `T::default()`.
///
/// Consequence: when several change-points share a step, the first applies at
/// that step and each following one applies one step later. For
/// `[(0, 1), (0, 2)]` over three steps the result is `[1, 2, 2]`, not
/// `[2, 2, 2]`. This is almost certainly an accident of the one-advance-per-step
/// walk, but it is kept as-is; callers wanting last-write-wins should dedupe
/// their input.
///
/// Change-points at or beyond `duration` are never reached.
pub fn materialize<T>(duration: usize, points: &[ChangePoint<T>]) -> Vec<T>
where
    T: Copy + Default,
{
    // Never sort the caller's slice in place.
    let mut sorted: Vec<ChangePoint<T>> = points.to_vec();
    sorted.sort_by_key(|p| p.step);

    let mut out = Vec::with_capacity(duration);
    let mut value = T::default();
    let mut cursor = 0usize;
    for step in 0..duration {
        if let Some(p) = sorted.get(cursor) {
            if p.step <= step {
                value = p.value;
                cursor += 1;
            }
        }
        out.push(value);
    }
    out
}

/// An immutable dense schedule: one value per simulated step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule<T> {
    values: Vec<T>,
}

impl<T: Copy + Default> Schedule<T> {
    /// Materialize a schedule of length `duration` (see [`materialize`]).
    pub fn from_change_points(duration: usize, points: &[ChangePoint<T>]) -> Self {
        Self {
            values: materialize(duration, points),
        }
    }

    /// Value in effect at `step`.
    ///
    /// Panics if `step >= len()`.
    pub fn get(&self, step: usize) -> T {
        self.values[step]
    }
}

impl<T> Schedule<T> {
    /// Number of steps covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter()
    }
}

impl<T: Clone> Schedule<T> {
    /// Owned copy of the dense values.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn holds_each_value_until_the_next_change() {
        let pts = change_points([(0, 10u64), (2, 20)]);
        assert_eq!(materialize(5, &pts), vec![10, 10, 20, 20, 20]);
    }

    #[test]
    fn empty_input_is_all_default() {
        let pts: Vec<ChangePoint<f64>> = Vec::new();
        assert_eq!(materialize(4, &pts), vec![0.0; 4]);
    }

    #[test]
    fn leading_steps_before_first_change_are_default() {
        let pts = change_points([(3, 7u64)]);
        assert_eq!(materialize(5, &pts), vec![0, 0, 0, 7, 7]);
    }

    #[test]
    fn same_step_duplicates_apply_one_step_apart() {
        let pts = change_points([(0, 1u64), (0, 2)]);
        assert_eq!(materialize(3, &pts), vec![1, 2, 2]);
    }

    #[test]
    fn unsorted_input_is_sorted_by_step() {
        let pts = change_points([(40, 0.9), (0, 0.9), (20, 0.5)]);
        let out = materialize(60, &pts);
        assert_eq!(out[19], 0.9);
        assert_eq!(out[20], 0.5);
        assert_eq!(out[39], 0.5);
        assert_eq!(out[40], 0.9);
    }

    #[test]
    fn change_points_past_duration_are_ignored() {
        let pts = change_points([(0, 1u64), (10, 5)]);
        assert_eq!(materialize(3, &pts), vec![1, 1, 1]);
    }

    #[test]
    fn input_slice_is_not_reordered() {
        let pts = change_points([(2, 1u64), (0, 3)]);
        let before = pts.clone();
        let _ = materialize(4, &pts);
        assert_eq!(pts, before);
    }

    #[test]
    fn schedule_exposes_dense_values() {
        let s = Schedule::from_change_points(4, &change_points([(1, 3u64)]));
        assert_eq!(s.len(), 4);
        assert_eq!(s.get(0), 0);
        assert_eq!(s.get(3), 3);
        assert_eq!(s.as_slice(), &[0, 3, 3, 3]);
    }

    proptest! {
        #[test]
        fn materialize_is_deterministic_and_sized(
            duration in 1usize..200,
            pts in proptest::collection::vec((0usize..250, 0u64..1000), 0..20),
        ) {
            let pts = change_points(pts);
            let a = materialize(duration, &pts);
            let b = materialize(duration, &pts);
            prop_assert_eq!(a.len(), duration);
            prop_assert_eq!(&a, &b);
        }

        #[test]
        fn distinct_steps_give_last_preceding_value(
            duration in 1usize..100,
            steps in proptest::collection::btree_set(0usize..120, 0..10),
        ) {
            // Distinct steps: the value at each step is the latest change-point at or before it.
            let pts: Vec<ChangePoint<u64>> = steps
                .iter()
                .map(|&s| ChangePoint::new(s, s as u64 + 1))
                .collect();
            let out = materialize(duration, &pts);
            for (step, &v) in out.iter().enumerate() {
                let expected = steps
                    .iter()
                    .filter(|&&s| s <= step)
                    .next_back()
                    .map(|&s| s as u64 + 1)
                    .unwrap_or(0);
                prop_assert_eq!(v, expected, "step={}", step);
            }
        }
    }
}
