// Team split entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout is reserved for the report)
// 2. Load config, copying defaults on first run
// 3. Load CSV sources
// 4. Run the split
// 5. Log a summary and write the JSON report

use teamsplit_app::config;
use teamsplit_app::report::{self, Report};
use teamsplit_app::sources;
use teamsplit_core::{SplitError, TeamSplitter};

use anyhow::Context;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("teamsplit starting up");

    // 2. Load config
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    if let Some(path) = config::ensure_config_file(&base_dir).context("failed to initialize configuration")? {
        info!("created {} from defaults", path.display());
    }
    let config = config::load_config_from(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: {} teams, strategy {}, ranking by {}, {} source(s)",
        config.run.team_count,
        config.run.strategy,
        config.run.ranking_attribute,
        config.sources.len()
    );

    // 3. Load sources
    let raw = sources::load_sources(&base_dir, &config.sources);

    // 4. Split
    let splitter = TeamSplitter::new(config.run.clone());
    let outcome = match splitter.run(&raw) {
        Ok(outcome) => outcome,
        Err(SplitError::NoData {
            sources_read,
            warnings,
        }) => {
            for w in &warnings {
                warn!("{}", w);
            }
            return Err(SplitError::NoData {
                sources_read,
                warnings,
            })
            .context("nothing to split");
        }
        Err(e) => return Err(e).context("split failed"),
    };

    // 5. Report
    report::log_summary(&outcome, &config.run.ranking_attribute);
    let report = Report::build(&outcome, config.output.include_records, chrono::Utc::now());
    match &config.output.path {
        Some(path) => {
            let path = sources::resolve_path(&base_dir, path);
            report
                .write_file(&path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
        None => {
            report
                .write_to(std::io::stdout().lock())
                .context("failed to write report to stdout")?;
        }
    }

    info!("teamsplit finished (seed {})", outcome.seed);
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("teamsplit=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
