//! Span partitioning.
//!
//! Splits a shelf's target length into column widths drawn from a small set
//! of preferred widths. Widths are counted in multiples of a base step; the
//! step is optionally stretched so the columns cover the target exactly.
//!
//! The distribution walks the preferred widths from narrowest to widest and
//! gives each an equal share of the available steps. Any undersized
//! remainder produced at the end is moved to the front by the final ascending
//! sort.

use log::trace;

use crate::error::ShelfwrightError;

/// Column widths produced by [`Partitioner::partition`].
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    step: f32,
    chunks: Vec<u32>,
}

impl Partition {
    /// The step every chunk is multiplied by; stretched in exact-match mode.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Column widths counted in steps, ascending.
    pub fn chunks(&self) -> &[u32] {
        &self.chunks
    }

    /// Column widths in real units, ascending.
    pub fn widths(&self) -> impl Iterator<Item = f32> + '_ {
        self.chunks.iter().map(|&chunk| chunk as f32 * self.step)
    }

    /// Total length covered by the columns.
    pub fn total(&self) -> f32 {
        self.chunks.iter().sum::<u32>() as f32 * self.step
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Validated partitioning parameters.
///
/// # Examples
///
/// ```
/// use shelfwright::layout::Partitioner;
///
/// let partitioner = Partitioner::new(10.0, &[2, 4], true).unwrap();
/// let partition = partitioner.partition(40.0);
///
/// assert_eq!(partition.chunks(), &[2, 2]);
/// assert_eq!(partition.widths().collect::<Vec<_>>(), vec![20.0, 20.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Partitioner {
    step: f32,
    preferred: Vec<u32>,
    match_exact: bool,
}

impl Partitioner {
    /// Create a partitioner for the given base step and preferred widths.
    ///
    /// Preferred widths are sorted ascending and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Config`] if the step is not positive, the
    /// preferred width set is empty, or a preferred width is zero.
    pub fn new(step: f32, preferred: &[u32], match_exact: bool) -> Result<Self, ShelfwrightError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ShelfwrightError::Config(format!(
                "column width step must be positive, got {step}"
            )));
        }
        if preferred.is_empty() {
            return Err(ShelfwrightError::Config(
                "at least one preferred column width is required".to_string(),
            ));
        }
        if preferred.contains(&0) {
            return Err(ShelfwrightError::Config(
                "preferred column widths must be positive".to_string(),
            ));
        }

        let mut preferred = preferred.to_vec();
        preferred.sort_unstable();
        preferred.dedup();

        Ok(Self {
            step,
            preferred,
            match_exact,
        })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn preferred(&self) -> &[u32] {
        &self.preferred
    }

    pub fn match_exact(&self) -> bool {
        self.match_exact
    }

    /// Split `target_length` into column widths.
    ///
    /// Never exceeds the target by more than one step: the number of steps is
    /// `floor(target / step)`, at least one. In exact-match mode the step is
    /// stretched to `target / steps` so the widths sum to the target.
    pub fn partition(&self, target_length: f32) -> Partition {
        let steps = if target_length.is_finite() && target_length > 0.0 {
            ((target_length / self.step).floor() as u32).max(1)
        } else {
            1
        };

        let step = if self.match_exact && target_length.is_finite() && target_length > 0.0 {
            target_length / steps as f32
        } else {
            self.step
        };

        let mut chunks = self.distribute(steps);
        chunks.sort();

        trace!(target_length, steps, step, chunks:?; "Partitioned span");

        Partition { step, chunks }
    }

    /// Distribute `steps` over the preferred widths, giving each width a
    /// share of `steps / preferred.len()`.
    fn distribute(&self, steps: u32) -> Vec<u32> {
        let widths = self.preferred.len() as u64;
        let last = self.preferred.len() - 1;

        let mut chunks = Vec::new();
        let mut width_idx = 0;
        let mut steps_left = steps;
        let mut current_width_steps = 0u32;

        while steps_left > 0 {
            let chunk = self.preferred[width_idx.min(last)].min(steps_left);
            chunks.push(chunk);
            steps_left -= chunk;
            current_width_steps += chunk;

            // current_width_steps >= steps / widths, kept in integers
            if u64::from(current_width_steps) * widths >= u64::from(steps) {
                width_idx += 1;
                current_width_steps = 0;
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_two_widths_share_equally() {
        let partition = Partitioner::new(10.0, &[2, 4], true).unwrap().partition(40.0);

        assert_eq!(partition.chunks(), &[2, 2]);
        assert_approx_eq!(f32, partition.step(), 10.0);
        assert_approx_eq!(f32, partition.total(), 40.0);
    }

    #[test]
    fn test_remainder_sorted_first() {
        // 13 steps, share 6.5: 2+2+2+2 -> 8, then 4 + min(4, 1) = 5
        let partition = Partitioner::new(10.0, &[2, 4], false).unwrap().partition(130.0);

        assert_eq!(partition.chunks(), &[1, 2, 2, 2, 2, 4]);
        assert_approx_eq!(f32, partition.total(), 130.0);
    }

    #[test]
    fn test_exact_match_stretches_step() {
        let partition = Partitioner::new(10.0, &[2, 4], true).unwrap().partition(47.0);

        assert_eq!(partition.chunks(), &[2, 2]);
        assert_approx_eq!(f32, partition.step(), 11.75);
        assert_approx_eq!(f32, partition.total(), 47.0);
    }

    #[test]
    fn test_without_exact_match_stays_below_target() {
        let partition = Partitioner::new(10.0, &[2, 4], false).unwrap().partition(47.0);

        assert_approx_eq!(f32, partition.step(), 10.0);
        assert_approx_eq!(f32, partition.total(), 40.0);
    }

    #[test]
    fn test_single_step_is_one_full_column() {
        let partition = Partitioner::new(10.0, &[2, 4], true).unwrap().partition(14.0);

        assert_eq!(partition.chunks(), &[1]);
        assert_eq!(partition.widths().collect::<Vec<_>>(), vec![14.0]);
    }

    #[test]
    fn test_target_below_step() {
        let partition = Partitioner::new(10.0, &[2], false).unwrap().partition(6.0);

        assert_eq!(partition.chunks(), &[1]);
        assert_approx_eq!(f32, partition.total(), 10.0);
    }

    #[test]
    fn test_invalid_target_is_one_step() {
        let partitioner = Partitioner::new(10.0, &[3], true).unwrap();

        assert_eq!(partitioner.partition(0.0).chunks(), &[1]);
        assert_eq!(partitioner.partition(f32::NAN).chunks(), &[1]);
        assert_approx_eq!(f32, partitioner.partition(-5.0).step(), 10.0);
    }

    #[test]
    fn test_preferred_widths_sorted_and_deduplicated() {
        let partitioner = Partitioner::new(5.0, &[4, 2, 4, 3], true).unwrap();
        assert_eq!(partitioner.preferred(), &[2, 3, 4]);
    }

    #[test]
    fn test_single_preferred_width() {
        let partition = Partitioner::new(10.0, &[3], true).unwrap().partition(100.0);
        assert_eq!(partition.chunks(), &[1, 3, 3, 3]);
    }

    #[test]
    fn test_three_widths() {
        // 12 steps, share 4: [2, 2] [3, 3] then the widest width is capped to 2
        let partition = Partitioner::new(10.0, &[2, 3, 4], true).unwrap().partition(120.0);
        assert_eq!(partition.chunks(), &[2, 2, 2, 3, 3]);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(Partitioner::new(0.0, &[2], true).is_err());
        assert!(Partitioner::new(f32::INFINITY, &[2], true).is_err());
        assert!(Partitioner::new(10.0, &[], true).is_err());
        assert!(Partitioner::new(10.0, &[2, 0], true).is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn preferred_strategy() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(1u32..8, 1..5)
    }

    /// Exact-match partitions cover the target exactly.
    fn check_exact_sum(target: f32, step: f32, preferred: &[u32]) -> Result<(), TestCaseError> {
        let partition = Partitioner::new(step, preferred, true).unwrap().partition(target);
        let sum: f32 = partition.widths().sum();

        prop_assert!(approx_eq!(f32, sum, target, epsilon = target * 1e-4));
        Ok(())
    }

    /// Without exact match the columns never overshoot by a full step and
    /// never fall short by a full step.
    fn check_nominal_sum(target: f32, step: f32, preferred: &[u32]) -> Result<(), TestCaseError> {
        let partition = Partitioner::new(step, preferred, false).unwrap().partition(target);
        let sum: f32 = partition.widths().sum();

        prop_assert!(sum <= target.max(step) + step * 1e-3);
        prop_assert!(target - sum < step);
        Ok(())
    }

    /// Every chunk is a positive step multiple no wider than the widest
    /// preferred width, and chunks are ascending.
    fn check_chunk_shape(target: f32, step: f32, preferred: &[u32]) -> Result<(), TestCaseError> {
        let partitioner = Partitioner::new(step, preferred, true).unwrap();
        let partition = partitioner.partition(target);
        let widest = *partitioner.preferred().last().unwrap();

        prop_assert!(!partition.is_empty());
        prop_assert!(partition.chunks().iter().all(|&c| c >= 1 && c <= widest));
        prop_assert!(partition.chunks().windows(2).all(|w| w[0] <= w[1]));
        Ok(())
    }

    /// Identical inputs produce identical partitions.
    fn check_deterministic(target: f32, step: f32, preferred: &[u32]) -> Result<(), TestCaseError> {
        let first = Partitioner::new(step, preferred, true).unwrap().partition(target);
        let second = Partitioner::new(step, preferred, true).unwrap().partition(target);

        prop_assert_eq!(first, second);
        Ok(())
    }

    proptest! {
        #[test]
        fn exact_sum(target in 1.0f32..2000.0, step in 1.0f32..50.0, preferred in preferred_strategy()) {
            check_exact_sum(target, step, &preferred)?;
        }

        #[test]
        fn nominal_sum(target in 1.0f32..2000.0, step in 1.0f32..50.0, preferred in preferred_strategy()) {
            check_nominal_sum(target, step, &preferred)?;
        }

        #[test]
        fn chunk_shape(target in 1.0f32..2000.0, step in 1.0f32..50.0, preferred in preferred_strategy()) {
            check_chunk_shape(target, step, &preferred)?;
        }

        #[test]
        fn deterministic(target in 1.0f32..2000.0, step in 1.0f32..50.0, preferred in preferred_strategy()) {
            check_deterministic(target, step, &preferred)?;
        }
    }
}
