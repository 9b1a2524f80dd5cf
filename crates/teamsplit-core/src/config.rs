// Run configuration consumed by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ranking attribute (the historical points column).
pub const DEFAULT_RANKING_ATTRIBUTE: &str = "historical_points_earned";

/// Default identifier column.
pub const DEFAULT_ID_FIELD: &str = "player_id";

pub const ATTR_ACTIVITY: &str = "days_active_last_30";
pub const ATTR_STREAK: &str = "current_streak_value";
pub const ATTR_EVENTS: &str = "historical_events_participated";
pub const ATTR_ENGAGEMENT: &str = "historical_event_engagements";
pub const ATTR_SPEND: &str = "historical_points_spent";
pub const ATTR_MESSAGES: &str = "historical_messages_sent";
pub const ATTR_LAST_ACTIVE: &str = "last_active_ts";

/// Secondary attributes that get descriptive statistics alongside the
/// ranking attribute.
pub const DEFAULT_STAT_ATTRIBUTES: &[&str] = &[
    ATTR_ACTIVITY,
    ATTR_STREAK,
    ATTR_EVENTS,
    ATTR_ENGAGEMENT,
    ATTR_SPEND,
    ATTR_MESSAGES,
    ATTR_LAST_ACTIVE,
];

/// MVP key stats, highest priority first.
pub const DEFAULT_MVP_ATTRIBUTES: &[&str] = &[
    DEFAULT_RANKING_ATTRIBUTE,
    ATTR_ENGAGEMENT,
    ATTR_EVENTS,
    ATTR_STREAK,
    ATTR_ACTIVITY,
];

// ---------------------------------------------------------------------------
// Assignment strategy
// ---------------------------------------------------------------------------

/// How shuffled participants are distributed over teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStrategy {
    /// Tiered shuffle + capacity-constrained snake draft (size parity).
    #[default]
    SnakeDraft,
    /// Plain shuffle + lowest-running-sum assignment (score parity).
    GreedyBalance,
}

impl AssignmentStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStrategy::SnakeDraft => "snake-draft",
            AssignmentStrategy::GreedyBalance => "greedy-balance",
        }
    }
}

impl fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Everything a single split run needs besides the records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for the shuffle; generated (and reported) when `None`. Any
    /// integer is accepted; the generator uses it modulo 2^32.
    pub seed: Option<i64>,
    pub team_count: usize,
    pub ranking_attribute: String,
    pub strategy: AssignmentStrategy,
    pub id_field: String,
    pub stat_attributes: Vec<String>,
    pub mvp_attributes: Vec<String>,
    /// Length of the top-N / bottom-N outlier lists.
    pub outlier_count: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            seed: None,
            team_count: 2,
            ranking_attribute: DEFAULT_RANKING_ATTRIBUTE.to_string(),
            strategy: AssignmentStrategy::default(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            stat_attributes: DEFAULT_STAT_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            mvp_attributes: DEFAULT_MVP_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            outlier_count: 5,
        }
    }
}

impl RunConfig {
    /// Fields whose values are expected to be numeric: the ranking attribute
    /// followed by the stat attributes, without duplicates.
    pub fn key_fields(&self) -> Vec<String> {
        let mut fields = vec![self.ranking_attribute.clone()];
        for attr in &self.stat_attributes {
            if !fields.contains(attr) {
                fields.push(attr.clone());
            }
        }
        fields
    }
}
