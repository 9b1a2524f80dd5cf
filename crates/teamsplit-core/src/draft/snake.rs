// Capacity-constrained snake draft.
//
// Picks go 1, 2, ..., N, N, ..., 2, 1, 1, 2, ... and full teams are skipped
// in the current direction. The cursor is a plain value owned by one call.

use tracing::{debug, error};

use super::capacity::TeamCapacityPlan;
use super::TeamAssignment;
use crate::record::ParticipantRecord;

/// Direction the cursor is travelling along the team list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Team pointer plus direction; bounces off both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeCursor {
    index: usize,
    direction: Direction,
    team_count: usize,
}

impl SnakeCursor {
    pub fn new(team_count: usize) -> Self {
        SnakeCursor {
            index: 0,
            direction: Direction::Forward,
            team_count,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one step. Stepping past the last team flips to `Backward` and
    /// stays on the last team; stepping before the first flips to `Forward`
    /// and stays on team 0.
    pub fn advance(&mut self) {
        if self.team_count == 0 {
            return;
        }
        match self.direction {
            Direction::Forward => {
                if self.index + 1 >= self.team_count {
                    self.direction = Direction::Backward;
                    self.index = self.team_count - 1;
                } else {
                    self.index += 1;
                }
            }
            Direction::Backward => {
                if self.index == 0 {
                    self.direction = Direction::Forward;
                } else {
                    self.index -= 1;
                }
            }
        }
    }
}

/// Assign `order` to `team_count` teams with a snake draft.
///
/// Team sizes follow `TeamCapacityPlan::new(order.len(), team_count)`. Zero
/// teams yields an empty assignment.
pub fn snake_draft(order: &[&ParticipantRecord], team_count: usize) -> TeamAssignment {
    let plan = TeamCapacityPlan::new(order.len(), team_count);
    let mut teams = TeamAssignment::empty(team_count);
    if plan.total() == 0 {
        return teams;
    }

    let mut cursor = SnakeCursor::new(team_count);
    // A full sweep in both directions visits every team at least once.
    let max_steps = team_count * 2;

    for participant in order {
        let mut steps = 0;
        while teams.rosters()[cursor.index()].len() >= plan.capacity(cursor.index()) {
            cursor.advance();
            steps += 1;
            if steps > max_steps {
                error!(
                    "snake draft found no open seat for '{}'; capacity plan exhausted",
                    participant.id
                );
                return teams;
            }
        }
        debug!("snake pick: '{}' -> team {}", participant.id, cursor.index() + 1);
        teams.push(cursor.index(), participant.id.clone());
        cursor.advance();
    }

    debug_assert_eq!(teams.sizes(), plan.capacities());
    teams
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
