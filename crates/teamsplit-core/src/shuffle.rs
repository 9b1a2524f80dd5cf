// Seeded tiered shuffle: rank, slice into tiers, shuffle each tier.
//
// A participant never leaves their tier, so randomization stays within a
// skill band.

use std::cmp::Ordering;

use crate::record::{ParticipantRecord, RecordSet};
use crate::rng::SeededRng;

/// Lower and upper bounds on the number of tiers.
const MIN_BUCKETS: usize = 2;
const MAX_BUCKETS: usize = 10;

/// Number of tiers for a given team count: `clamp(teams * 2, 2, 10)`.
pub fn bucket_count(team_count: usize) -> usize {
    team_count.saturating_mul(2).clamp(MIN_BUCKETS, MAX_BUCKETS)
}

/// Tier width for `n` participants: `ceil(n / buckets)`.
pub fn bucket_size(n: usize, buckets: usize) -> usize {
    n.div_ceil(buckets.max(1))
}

/// Records sorted descending by `ranking_attribute` (non-numeric = 0).
///
/// The sort is stable, so ties keep identifier order.
pub fn ranked_order<'a>(records: &'a RecordSet, ranking_attribute: &str) -> Vec<&'a ParticipantRecord> {
    let mut sorted: Vec<&ParticipantRecord> = records.values().collect();
    sorted.sort_by(|a, b| {
        b.number_or_zero(ranking_attribute)
            .partial_cmp(&a.number_or_zero(ranking_attribute))
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// In-place Fisher-Yates, walking from the last index down to 1.
pub fn fisher_yates<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Draft order for the snake draft.
///
/// Sorts by ranking, cuts `bucket_count(team_count)` contiguous tiers, and
/// shuffles each tier with one generator seeded from `seed`, tier by tier.
pub fn tiered_shuffle<'a>(
    records: &'a RecordSet,
    ranking_attribute: &str,
    team_count: usize,
    seed: i64,
) -> Vec<&'a ParticipantRecord> {
    let mut order = ranked_order(records, ranking_attribute);
    if order.is_empty() {
        return order;
    }

    let size = bucket_size(order.len(), bucket_count(team_count));
    let mut rng = SeededRng::new(seed);
    for tier in order.chunks_mut(size) {
        fisher_yates(tier, &mut rng);
    }
    order
}

/// Plain seeded shuffle over the whole set, in identifier order first.
pub fn seeded_shuffle(records: &RecordSet, seed: i64) -> Vec<&ParticipantRecord> {
    let mut order: Vec<&ParticipantRecord> = records.values().collect();
    let mut rng = SeededRng::new(seed);
    fisher_yates(&mut order, &mut rng);
    order
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
