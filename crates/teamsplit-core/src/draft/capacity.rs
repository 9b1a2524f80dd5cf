// Per-team seat limits for the snake draft.

use serde::{Deserialize, Serialize};

/// Maximum roster size per team, in team order.
///
/// Every team gets `total / teams` seats and the first `total % teams` teams
/// get one extra, so the capacities always sum to `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCapacityPlan {
    capacities: Vec<usize>,
}

impl TeamCapacityPlan {
    /// Plan for `total` participants over `team_count` teams. Zero teams
    /// gives an empty plan.
    pub fn new(total: usize, team_count: usize) -> Self {
        if team_count == 0 {
            return TeamCapacityPlan {
                capacities: Vec::new(),
            };
        }
        let base = total / team_count;
        let extra = total % team_count;
        let capacities = (0..team_count)
            .map(|i| base + usize::from(i < extra))
            .collect();
        TeamCapacityPlan { capacities }
    }

    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    pub fn capacity(&self, team_idx: usize) -> usize {
        self.capacities.get(team_idx).copied().unwrap_or(0)
    }

    pub fn team_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn total(&self) -> usize {
        self.capacities.iter().sum()
    }
}
