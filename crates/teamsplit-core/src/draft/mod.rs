// Team assignment: rosters produced by the snake draft or greedy balance.

pub mod capacity;
pub mod greedy;
pub mod snake;

use serde::{Deserialize, Serialize};

/// One (participant, team) pair. Team numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub participant_id: String,
    pub team: usize,
}

/// Final rosters. Index `i` holds team `i + 1`, members in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    rosters: Vec<Vec<String>>,
}

impl TeamAssignment {
    /// `team_count` empty rosters.
    pub fn empty(team_count: usize) -> Self {
        TeamAssignment {
            rosters: vec![Vec::new(); team_count],
        }
    }

    pub fn from_rosters(rosters: Vec<Vec<String>>) -> Self {
        TeamAssignment { rosters }
    }

    pub fn team_count(&self) -> usize {
        self.rosters.len()
    }

    /// Total participants across all teams.
    pub fn participant_count(&self) -> usize {
        self.rosters.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.participant_count() == 0
    }

    pub fn rosters(&self) -> &[Vec<String>] {
        &self.rosters
    }

    /// Members of a 1-based team number.
    pub fn roster(&self, team: usize) -> Option<&[String]> {
        team.checked_sub(1)
            .and_then(|idx| self.rosters.get(idx))
            .map(Vec::as_slice)
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.rosters.iter().map(Vec::len).collect()
    }

    /// 1-based team number of a participant.
    pub fn team_of(&self, participant_id: &str) -> Option<usize> {
        self.rosters
            .iter()
            .position(|r| r.iter().any(|id| id == participant_id))
            .map(|idx| idx + 1)
    }

    /// Flat (participant, team) list, grouped by team in team order.
    pub fn entries(&self) -> Vec<Assignment> {
        self.rosters
            .iter()
            .enumerate()
            .flat_map(|(idx, roster)| {
                roster.iter().map(move |id| Assignment {
                    participant_id: id.clone(),
                    team: idx + 1,
                })
            })
            .collect()
    }

    pub(crate) fn push(&mut self, team_idx: usize, participant_id: String) {
        self.rosters[team_idx].push(participant_id);
    }
}
