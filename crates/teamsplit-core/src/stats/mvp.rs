// MVP highlights: per-team leaders for each key stat, one MVP per team, and
// the overall leader of each key stat across teams.

use serde::{Deserialize, Serialize};

use crate::record::ParticipantRecord;

/// Top participant for one attribute within a scope (a team, or all teams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLeader {
    pub attribute: String,
    pub participant_id: String,
    pub team: usize,
    pub value: f64,
}

/// The single highlighted participant of a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMvp {
    pub team: usize,
    pub participant_id: String,
    /// Key stat that earned the highlight.
    pub attribute: String,
    pub value: f64,
}

/// Leader of each attribute within one team's roster, in priority order.
///
/// Only members with a numeric value compete; attributes nobody on the
/// roster carries are left out. Ties keep the earlier roster member.
pub fn team_leaders(team: usize, roster: &[&ParticipantRecord], attributes: &[String]) -> Vec<StatLeader> {
    attributes
        .iter()
        .filter_map(|attr| {
            let mut best: Option<(&ParticipantRecord, f64)> = None;
            for member in roster {
                let Some(value) = member.get(attr).and_then(|v| v.as_number()) else {
                    continue;
                };
                if best.map_or(true, |(_, top)| value > top) {
                    best = Some((member, value));
                }
            }
            best.map(|(member, value)| StatLeader {
                attribute: attr.clone(),
                participant_id: member.id.clone(),
                team,
                value,
            })
        })
        .collect()
}

/// First key stat (in priority order) that produced a leader.
pub fn team_mvp(leaders: &[StatLeader]) -> Option<TeamMvp> {
    leaders.first().map(|leader| TeamMvp {
        team: leader.team,
        participant_id: leader.participant_id.clone(),
        attribute: leader.attribute.clone(),
        value: leader.value,
    })
}

/// Overall leader of each attribute, chosen among the per-team leaders.
/// Ties go to the lower team number.
pub fn cross_team_leaders(per_team: &[Vec<StatLeader>], attributes: &[String]) -> Vec<StatLeader> {
    attributes
        .iter()
        .filter_map(|attr| {
            per_team
                .iter()
                .flatten()
                .filter(|leader| &leader.attribute == attr)
                .fold(None::<&StatLeader>, |best, leader| match best {
                    Some(b) if b.value >= leader.value => Some(b),
                    _ => Some(leader),
                })
                .cloned()
        })
        .collect()
}
