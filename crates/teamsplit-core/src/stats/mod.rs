// Statistics engine: global and per-team descriptive stats plus MVP highlights.
//
// Everything here is derived from the final assignment and recomputed from
// scratch on every run.

pub mod descriptive;
pub mod mvp;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::draft::TeamAssignment;
use crate::record::{ParticipantRecord, RecordSet};

pub use descriptive::{round_display, DescriptiveStats, RoundedStats};
pub use mvp::{StatLeader, TeamMvp};

// ---------------------------------------------------------------------------
// Bundle types
// ---------------------------------------------------------------------------

/// Statistics for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeStats {
    pub attribute: String,
    pub stats: DescriptiveStats,
}

/// Per-team block, same shape as the global one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: usize,
    pub players: usize,
    pub attributes: Vec<AttributeStats>,
    pub leaders: Vec<StatLeader>,
}

/// Headline numbers for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_teams: usize,
    pub total_participants: usize,
    pub average_team_size: f64,
    /// Average per-team sum of the ranking attribute.
    pub average_team_score: f64,
    pub sources_read: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsBundle {
    pub summary: Summary,
    pub global: Vec<AttributeStats>,
    pub teams: Vec<TeamStats>,
    /// One MVP per team that has one, in team order.
    pub team_mvps: Vec<TeamMvp>,
    /// Overall leader of each key stat across all teams.
    pub stat_leaders: Vec<StatLeader>,
}

impl StatisticsBundle {
    /// Global statistics for one attribute.
    pub fn global_for(&self, attribute: &str) -> Option<&DescriptiveStats> {
        find_attribute(&self.global, attribute)
    }

    /// Per-team statistics for a 1-based team number and attribute.
    pub fn team_for(&self, team: usize, attribute: &str) -> Option<&DescriptiveStats> {
        self.teams
            .iter()
            .find(|t| t.team == team)
            .and_then(|t| find_attribute(&t.attributes, attribute))
    }
}

fn find_attribute<'a>(list: &'a [AttributeStats], attribute: &str) -> Option<&'a DescriptiveStats> {
    list.iter().find(|a| a.attribute == attribute).map(|a| &a.stats)
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Build the full statistics bundle for an assignment.
///
/// Attributes covered are the ranking attribute followed by the configured
/// stat attributes; non-numeric and missing values count as 0.
pub fn compute(
    assignment: &TeamAssignment,
    records: &RecordSet,
    config: &RunConfig,
    sources_read: usize,
) -> StatisticsBundle {
    let attributes = config.key_fields();
    let outliers = config.outlier_count;

    let everyone: Vec<&ParticipantRecord> = assignment
        .rosters()
        .iter()
        .flatten()
        .filter_map(|id| records.get(id))
        .collect();
    let global = attribute_stats(&everyone, &attributes, outliers);

    let mut teams = Vec::with_capacity(assignment.team_count());
    let mut team_mvps = Vec::new();
    let mut per_team_leaders = Vec::with_capacity(assignment.team_count());

    for (idx, roster) in assignment.rosters().iter().enumerate() {
        let team = idx + 1;
        let members: Vec<&ParticipantRecord> = roster.iter().filter_map(|id| records.get(id)).collect();
        let leaders = mvp::team_leaders(team, &members, &config.mvp_attributes);
        if let Some(m) = mvp::team_mvp(&leaders) {
            team_mvps.push(m);
        }
        teams.push(TeamStats {
            team,
            players: members.len(),
            attributes: attribute_stats(&members, &attributes, outliers),
            leaders: leaders.clone(),
        });
        per_team_leaders.push(leaders);
    }

    let stat_leaders = mvp::cross_team_leaders(&per_team_leaders, &config.mvp_attributes);

    let total_teams = assignment.team_count();
    let total_participants = everyone.len();
    let ranking_total: f64 = everyone
        .iter()
        .map(|r| r.number_or_zero(&config.ranking_attribute))
        .sum();
    let (average_team_size, average_team_score) = if total_teams > 0 {
        (
            total_participants as f64 / total_teams as f64,
            ranking_total / total_teams as f64,
        )
    } else {
        (0.0, 0.0)
    };

    StatisticsBundle {
        summary: Summary {
            total_teams,
            total_participants,
            average_team_size,
            average_team_score,
            sources_read,
        },
        global,
        teams,
        team_mvps,
        stat_leaders,
    }
}

fn attribute_stats(members: &[&ParticipantRecord], attributes: &[String], outliers: usize) -> Vec<AttributeStats> {
    attributes
        .iter()
        .map(|attr| {
            let values: Vec<f64> = members.iter().map(|m| m.number_or_zero(attr)).collect();
            AttributeStats {
                attribute: attr.clone(),
                stats: DescriptiveStats::from_values(&values, outliers),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
