// crates/aegis-dataset-core/src/runtime/plan.rs
// ============================================================================
// Module: Bucket Plan
// Description: Exact per-bucket sample counts for one split.
// Purpose: Keep every split's composition fixed regardless of its size.
// Dependencies: rand, crate::core
// ============================================================================

//! ## Overview
//! Bucket weights are 0.40/0.30/0.15/0.10/0.05 in [`Bucket::ALL`] order.
//! Each count is `total * weight` rounded half to even, computed in basis
//! points so no floating-point error can move a tie. Rounding drift is then
//! corrected one unit at a time, cycling through the buckets in order and
//! never taking a count below zero, until the counts sum to the total.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::Bucket;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Basis points per unit weight.
const BASIS: usize = 10_000;

/// Bucket weights in basis points, in [`Bucket::ALL`] order.
pub const BUCKET_WEIGHTS_BP: [usize; 5] = [4_000, 3_000, 1_500, 1_000, 500];

// ============================================================================
// SECTION: Plan
// ============================================================================

/// Sample counts per bucket for one split.
///
/// # Invariants
/// - The counts sum to `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPlan {
    /// Requested total.
    total: usize,
    /// Counts in [`Bucket::ALL`] order.
    counts: [usize; 5],
}

impl BucketPlan {
    /// Computes the plan for `total` samples.
    #[must_use]
    pub fn new(total: usize) -> Self {
        let mut counts = BUCKET_WEIGHTS_BP.map(|weight| scaled_round_half_even(total, weight));
        let mut sum: usize = counts.iter().sum();
        let mut cursor = 0;
        while sum != total {
            let slot = &mut counts[cursor % counts.len()];
            if sum < total {
                *slot += 1;
                sum += 1;
            } else if *slot > 0 {
                *slot -= 1;
                sum -= 1;
            }
            cursor += 1;
        }
        Self {
            total,
            counts,
        }
    }

    /// Returns the requested total.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the count planned for `bucket`.
    #[must_use]
    pub const fn count(&self, bucket: Bucket) -> usize {
        self.counts[bucket.index()]
    }

    /// Expands the plan into one entry per sample, grouped by bucket.
    #[must_use]
    pub fn expand(&self) -> Vec<Bucket> {
        let mut buckets = Vec::with_capacity(self.total);
        for bucket in Bucket::ALL {
            buckets.extend(std::iter::repeat_n(bucket, self.count(bucket)));
        }
        buckets
    }

    /// Expands the plan and shuffles it with the run RNG.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Bucket> {
        let mut buckets = self.expand();
        buckets.shuffle(rng);
        buckets
    }
}

/// Returns `total * weight_bp / BASIS` rounded half to even.
fn scaled_round_half_even(total: usize, weight_bp: usize) -> usize {
    let whole = (total / BASIS) * weight_bp;
    let partial = (total % BASIS) * weight_bp;
    let quotient = whole + partial / BASIS;
    let remainder = partial % BASIS;
    let doubled = remainder * 2;
    if doubled > BASIS || (doubled == BASIS && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::BucketPlan;
    use super::scaled_round_half_even;
    use crate::core::Bucket;

    #[test]
    fn default_split_sizes() {
        let plan = BucketPlan::new(12_000);
        assert_eq!(plan.count(Bucket::SingleAction), 4_800);
        assert_eq!(plan.count(Bucket::MultiAction), 3_600);
        assert_eq!(plan.count(Bucket::NoAction), 1_800);
        assert_eq!(plan.count(Bucket::LowConfidence), 1_200);
        assert_eq!(plan.count(Bucket::GeneralConversation), 600);
    }

    #[test]
    fn ties_round_to_even() {
        // 5 * 0.30 = 1.5 -> 2, 5 * 0.10 = 0.5 -> 0, 5 * 0.05 = 0.25 -> 0.
        assert_eq!(scaled_round_half_even(5, 3_000), 2);
        assert_eq!(scaled_round_half_even(5, 1_000), 0);
        assert_eq!(scaled_round_half_even(25, 1_000), 2);
        assert_eq!(scaled_round_half_even(35, 1_000), 4);
    }

    #[test]
    fn drift_is_added_in_bucket_order() {
        // 5 -> [2, 2, 1, 0, 0] sums to 5 without drift.
        let plan = BucketPlan::new(5);
        assert_eq!(plan.expand().len(), 5);
        // 3 -> [1, 1, 0, 0, 0] (0.45 -> 0) then +1 to single_action.
        let plan = BucketPlan::new(3);
        assert_eq!(plan.count(Bucket::SingleAction), 2);
        assert_eq!(plan.count(Bucket::MultiAction), 1);
    }

    #[test]
    fn empty_split_has_no_buckets() {
        assert!(BucketPlan::new(0).expand().is_empty());
    }
}
