// JSON report for a finished split.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use teamsplit_core::draft::Assignment;
use teamsplit_core::pipeline::TeamRoster;
use teamsplit_core::stats::StatisticsBundle;
use teamsplit_core::{AssignmentStrategy, DraftOutcome, SourceWarning};

/// Everything written out for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// Seed actually used; put it in `[run] seed` to reproduce this split.
    pub seed: i64,
    pub strategy: AssignmentStrategy,
    pub assignments: Vec<Assignment>,
    pub teams: Vec<TeamRoster>,
    pub stats: StatisticsBundle,
    pub warnings: Vec<SourceWarning>,
}

impl Report {
    pub fn build(outcome: &DraftOutcome, include_records: bool, generated_at: DateTime<Utc>) -> Self {
        Report {
            generated_at,
            seed: outcome.seed,
            strategy: outcome.strategy,
            assignments: outcome.assignments(),
            teams: outcome.teams(include_records),
            stats: outcome.stats.clone(),
            warnings: outcome.warnings.clone(),
        }
    }

    /// Pretty-printed JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut out: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn write_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))?;
        info!("report written to {}", path.display());
        Ok(())
    }
}

/// One log line per team plus the headline numbers.
pub fn log_summary(outcome: &DraftOutcome, ranking_attribute: &str) {
    let summary = &outcome.stats.summary;
    info!(
        "{} participants from {} source(s) split into {} teams ({}, seed {})",
        summary.total_participants, summary.sources_read, summary.total_teams, outcome.strategy, outcome.seed
    );
    for team in &outcome.stats.teams {
        let points = team
            .attributes
            .iter()
            .find(|a| a.attribute == ranking_attribute)
            .map(|a| a.stats.rounded());
        let mvp = outcome
            .stats
            .team_mvps
            .iter()
            .find(|m| m.team == team.team)
            .map_or("-", |m| m.participant_id.as_str());
        match points {
            Some(p) => info!(
                "team {}: {} players, {} total {}, mean {}, mvp {}",
                team.team, team.players, p.sum, ranking_attribute, p.mean, mvp
            ),
            None => info!("team {}: {} players, mvp {}", team.team, team.players, mvp),
        }
    }
    if !outcome.warnings.is_empty() {
        info!("{} data warning(s) recorded in the report", outcome.warnings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use teamsplit_core::{RawSource, RunConfig, TeamSplitter};

    fn outcome() -> DraftOutcome {
        let rows = vec![
            vec!["player_id".to_string(), "historical_points_earned".to_string()],
            vec!["1".to_string(), "30".to_string()],
            vec!["2".to_string(), "20".to_string()],
            vec!["3".to_string(), "".to_string()],
        ];
        let config = RunConfig {
            seed: Some(11),
            team_count: 2,
            ..RunConfig::default()
        };
        TeamSplitter::new(config)
            .run(&[RawSource::new("grid", rows)])
            .unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn report_json_has_expected_sections() {
        let report = Report::build(&outcome(), false, fixed_time());
        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["generated_at"], "2024-03-01T12:00:00Z");
        assert_eq!(json["seed"], 11);
        assert_eq!(json["strategy"], "snake-draft");
        assert_eq!(json["assignments"].as_array().unwrap().len(), 3);
        assert_eq!(json["teams"].as_array().unwrap().len(), 2);
        assert!(json["teams"][0].get("records").is_none());
        assert_eq!(json["stats"]["summary"]["total_participants"], 3);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(json["warnings"][0]["row"], 4);
    }

    #[test]
    fn include_records_attaches_member_records() {
        let report = Report::build(&outcome(), true, fixed_time());
        let json = serde_json::to_value(&report).unwrap();
        let team = &json["teams"][0];
        let members = team["members"].as_array().unwrap();
        let records = team["records"].as_array().unwrap();
        assert_eq!(members.len(), records.len());
        assert_eq!(records[0]["id"], members[0]);
    }

    #[test]
    fn write_file_creates_parent_dirs() {
        let tmp = std::env::temp_dir().join("teamsplit_report_out");
        let _ = std::fs::remove_dir_all(&tmp);
        let path = tmp.join("nested").join("teams.json");

        Report::build(&outcome(), false, fixed_time())
            .write_file(&path)
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"assignments\""));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
