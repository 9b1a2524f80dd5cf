// End-to-end split: normalize -> shuffle -> assign -> statistics.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{AssignmentStrategy, RunConfig};
use crate::draft::greedy::greedy_balance;
use crate::draft::snake::snake_draft;
use crate::draft::{Assignment, TeamAssignment};
use crate::normalize::{normalize_sources, NormalizedSet, RawSource, SourceWarning};
use crate::record::{ParticipantRecord, RecordSet};
use crate::rng::generate_seed;
use crate::shuffle::{seeded_shuffle, tiered_shuffle};
use crate::stats::{self, StatisticsBundle};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SplitError {
    /// Nothing survived normalization. Warnings are kept so the caller can
    /// still explain why.
    #[error("no participants found after reading {sources_read} source(s) ({} warning(s))", .warnings.len())]
    NoData {
        sources_read: usize,
        warnings: Vec<SourceWarning>,
    },

    #[error("team count must be at least 1")]
    InvalidTeamCount,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One team with its members, optionally carrying full records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRoster {
    pub team: usize,
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<ParticipantRecord>>,
}

/// Everything a reporter needs to render a run.
#[derive(Debug, Clone, Serialize)]
pub struct DraftOutcome {
    /// Seed actually used; rerunning with it reproduces the split.
    pub seed: i64,
    pub strategy: AssignmentStrategy,
    /// Participant ids in the order they were offered to teams.
    pub draft_order: Vec<String>,
    pub assignment: TeamAssignment,
    pub stats: StatisticsBundle,
    pub warnings: Vec<SourceWarning>,
    #[serde(skip)]
    pub records: RecordSet,
}

impl DraftOutcome {
    /// Flat (participant, team) list.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.assignment.entries()
    }

    /// Teams grouped by number; `include_records` attaches member records.
    pub fn teams(&self, include_records: bool) -> Vec<TeamRoster> {
        self.assignment
            .rosters()
            .iter()
            .enumerate()
            .map(|(idx, members)| TeamRoster {
                team: idx + 1,
                members: members.clone(),
                records: include_records.then(|| {
                    members
                        .iter()
                        .filter_map(|id| self.records.get(id).cloned())
                        .collect()
                }),
            })
            .collect()
    }

    /// Full records of a 1-based team, in pick order.
    pub fn roster_records(&self, team: usize) -> Vec<&ParticipantRecord> {
        self.assignment
            .roster(team)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Runs the whole split for one configuration.
#[derive(Debug, Clone)]
pub struct TeamSplitter {
    config: RunConfig,
}

impl TeamSplitter {
    pub fn new(config: RunConfig) -> Self {
        TeamSplitter { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Normalize raw sources, then split.
    pub fn run(&self, sources: &[RawSource]) -> Result<DraftOutcome, SplitError> {
        let normalized = normalize_sources(sources, &self.config.id_field, &self.config.key_fields());
        self.run_normalized(normalized)
    }

    /// Split an already-normalized record set.
    pub fn run_normalized(&self, normalized: NormalizedSet) -> Result<DraftOutcome, SplitError> {
        let NormalizedSet {
            records,
            warnings,
            sources_read,
        } = normalized;

        if records.is_empty() {
            return Err(SplitError::NoData {
                sources_read,
                warnings,
            });
        }
        let team_count = self.config.team_count;
        if team_count == 0 {
            return Err(SplitError::InvalidTeamCount);
        }

        let seed = match self.config.seed {
            Some(seed) => seed,
            None => {
                let seed = generate_seed();
                info!("no seed configured; generated seed {}", seed);
                seed
            }
        };
        let ranking = self.config.ranking_attribute.as_str();
        let strategy = self.config.strategy;

        let (draft_order, assignment) = match strategy {
            AssignmentStrategy::SnakeDraft => {
                let order = tiered_shuffle(&records, ranking, team_count, seed);
                let teams = snake_draft(&order, team_count);
                (ids(&order), teams)
            }
            AssignmentStrategy::GreedyBalance => {
                let order = seeded_shuffle(&records, seed);
                let (teams, sums) = greedy_balance(&order, team_count, ranking);
                info!("greedy balance team sums: {:?}", sums);
                (ids(&order), teams)
            }
        };

        info!(
            "assigned {} participants to {} teams ({}, seed {}), sizes {:?}",
            assignment.participant_count(),
            team_count,
            strategy,
            seed,
            assignment.sizes()
        );

        let stats = stats::compute(&assignment, &records, &self.config, sources_read);

        Ok(DraftOutcome {
            seed,
            strategy,
            draft_order,
            assignment,
            stats,
            warnings,
            records,
        })
    }
}

fn ids(order: &[&ParticipantRecord]) -> Vec<String> {
    order.iter().map(|r| r.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
