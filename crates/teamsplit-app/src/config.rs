// Configuration loading and parsing (config/teamsplit.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use teamsplit_core::RunConfig;

/// File name shared by `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "teamsplit.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// teamsplit.toml structs
// ---------------------------------------------------------------------------

/// Assembled application config.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Engine settings; every key is optional and falls back to the defaults.
    #[serde(default)]
    pub run: RunConfig,
    /// Tabular sources in merge order. Later sources win on shared fields.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Label used in warnings. Defaults to the path.
    #[serde(default)]
    pub id: Option<String>,
    /// CSV path, relative to the directory the config was loaded from.
    pub path: String,
}

impl SourceConfig {
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Report destination; stdout when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// Attach full participant records to each team in the report.
    #[serde(default)]
    pub include_records: bool,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/teamsplit.toml` relative to `base_dir`.
///
/// Does not copy defaults; call `ensure_config_file` first.
pub fn load_config_from(base_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: AppConfig = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/teamsplit.toml` from `defaults/teamsplit.toml` on first run.
///
/// Returns the created path, or `None` when a config file is already in
/// place. An existing file is never touched.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let default = base_dir.join("defaults").join(CONFIG_FILE);
    if !default.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} under {}",
                base_dir.display()
            ),
        });
    }

    let copy = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", target.display()),
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(copy)?;
    }
    std::fs::copy(&default, &target).map_err(copy)?;

    Ok(Some(target))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let run = &config.run;

    if run.team_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "run.team_count".into(),
            message: "must be greater than 0".into(),
        });
    }

    let name_fields: &[(&str, &str)] = &[
        ("run.ranking_attribute", run.ranking_attribute.as_str()),
        ("run.id_field", run.id_field.as_str()),
    ];
    for (name, val) in name_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if run.outlier_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "run.outlier_count".into(),
            message: "must be > 0".into(),
        });
    }

    if config.sources.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "sources".into(),
            message: "at least one [[sources]] entry is required".into(),
        });
    }

    for (idx, source) in config.sources.iter().enumerate() {
        if source.path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("sources[{idx}].path"),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use teamsplit_core::AssignmentStrategy;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Fresh `<tmp>/<name>/config/` containing `toml` as teamsplit.toml.
    fn write_config(name: &str, toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), toml).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_default_config_file() {
        let tmp = std::env::temp_dir().join("teamsplit_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            crate_root().join("defaults").join(CONFIG_FILE),
            tmp.join("defaults").join(CONFIG_FILE),
        )
        .unwrap();

        let created = ensure_config_file(&tmp).expect("should copy the default config");
        assert_eq!(created, Some(tmp.join("config").join(CONFIG_FILE)));
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);

        let config = load_config_from(&tmp).expect("should load default config");
        assert_eq!(config.run.team_count, 4);
        assert_eq!(config.run.ranking_attribute, "historical_points_earned");
        assert_eq!(config.run.id_field, "player_id");
        assert_eq!(config.run.strategy, AssignmentStrategy::SnakeDraft);
        assert_eq!(config.run.outlier_count, 5);
        assert!(config.run.seed.is_none());
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].label(), "profile");
        assert!(config.output.path.is_none());
        assert!(!config.output.include_records);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_is_not_overwritten() {
        let tmp = write_config(
            "teamsplit_config_keep_existing",
            "[[sources]]\npath = \"a.csv\"\n",
        );
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), "garbage = [").unwrap();

        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        assert!(load_config_from(&tmp).is_ok());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_defaults_and_config_is_an_error() {
        let tmp = std::env::temp_dir().join("teamsplit_config_nothing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_file(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));

        // an empty config/ directory is not a config file
        fs::create_dir_all(tmp.join("config")).unwrap();
        let err = ensure_config_file(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn omitted_run_keys_use_defaults() {
        let tmp = write_config(
            "teamsplit_config_minimal",
            r#"
[run]
team_count = 3
seed = 7
strategy = "greedy-balance"

[[sources]]
id = "main"
path = "data/main.csv"

[output]
path = "out/report.json"
include_records = true
"#,
        );

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.run.team_count, 3);
        assert_eq!(config.run.seed, Some(7));
        assert_eq!(config.run.strategy, AssignmentStrategy::GreedyBalance);
        assert_eq!(config.run.id_field, "player_id");
        assert_eq!(config.run.stat_attributes.len(), 7);
        assert_eq!(config.output.path.as_deref(), Some("out/report.json"));
        assert!(config.output.include_records);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_accepts_any_integer() {
        for (text, expected) in [("-5", -5_i64), ("5000000000", 5_000_000_000)] {
            let tmp = write_config(
                "teamsplit_config_wide_seed",
                &format!("[run]\nseed = {text}\n\n[[sources]]\npath = \"a.csv\"\n"),
            );
            let config = load_config_from(&tmp).unwrap();
            assert_eq!(config.run.seed, Some(expected));

            let _ = fs::remove_dir_all(&tmp);
        }
    }

    #[test]
    fn source_label_falls_back_to_path() {
        let tmp = write_config(
            "teamsplit_config_source_label",
            "[[sources]]\npath = \"data/b.csv\"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.sources[0].label(), "data/b.csv");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tmp = write_config("teamsplit_config_malformed", "[run\nteam_count = 2");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_strategy_is_a_parse_error() {
        let tmp = write_config(
            "teamsplit_config_bad_strategy",
            "[run]\nstrategy = \"round-robin\"\n\n[[sources]]\npath = \"a.csv\"\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_team_count_zero() {
        let tmp = write_config(
            "teamsplit_config_team_count_zero",
            "[run]\nteam_count = 0\n\n[[sources]]\npath = \"a.csv\"\n",
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "run.team_count");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_ranking_attribute() {
        let tmp = write_config(
            "teamsplit_config_empty_ranking",
            "[run]\nranking_attribute = \"  \"\n\n[[sources]]\npath = \"a.csv\"\n",
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "run.ranking_attribute");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_id_field() {
        let tmp = write_config(
            "teamsplit_config_empty_id",
            "[run]\nid_field = \"\"\n\n[[sources]]\npath = \"a.csv\"\n",
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "run.id_field");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_outlier_count() {
        let tmp = write_config(
            "teamsplit_config_zero_outliers",
            "[run]\noutlier_count = 0\n\n[[sources]]\npath = \"a.csv\"\n",
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "run.outlier_count");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_missing_sources() {
        let tmp = write_config("teamsplit_config_no_sources", "[run]\nteam_count = 2\n");
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "sources");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_blank_source_path() {
        let tmp = write_config(
            "teamsplit_config_blank_source",
            "[[sources]]\npath = \"a.csv\"\n\n[[sources]]\npath = \"\"\n",
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "sources[1].path");

        let _ = fs::remove_dir_all(&tmp);
    }
}
