// Greedy balance: each participant joins the team with the lowest running sum.

use tracing::debug;

use super::TeamAssignment;
use crate::record::ParticipantRecord;

/// Assign `order` to the currently lowest-scoring team, one at a time.
///
/// Ties go to the lowest team index. Team sizes are unconstrained; zero teams
/// yields an empty assignment. Returns the rosters and the final team sums.
pub fn greedy_balance(
    order: &[&ParticipantRecord],
    team_count: usize,
    ranking_attribute: &str,
) -> (TeamAssignment, Vec<f64>) {
    let mut teams = TeamAssignment::empty(team_count);
    let mut sums = vec![0.0_f64; team_count];
    if team_count == 0 {
        return (teams, sums);
    }

    for participant in order {
        let target = lowest_sum_index(&sums);
        let value = participant.number_or_zero(ranking_attribute);
        sums[target] += value;
        debug!(
            "greedy pick: '{}' ({}) -> team {} (sum now {})",
            participant.id,
            value,
            target + 1,
            sums[target]
        );
        teams.push(target, participant.id.clone());
    }

    (teams, sums)
}

/// Index of the smallest sum; first index wins ties. `sums` must be non-empty.
fn lowest_sum_index(sums: &[f64]) -> usize {
    let mut best = 0;
    for (idx, sum) in sums.iter().enumerate().skip(1) {
        if *sum < sums[best] {
            best = idx;
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
