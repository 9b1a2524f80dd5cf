// CSV source loading.
//
// Each configured file is read as a raw grid (header row included) and handed
// to the engine's normalizer, which owns all header and value handling. A file
// that cannot be read becomes an unreadable source so the run can continue
// with the others.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use teamsplit_core::RawSource;

use crate::config::SourceConfig;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read CSV {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

/// Read every row of a CSV stream as strings. Ragged rows are kept as-is;
/// invalid UTF-8 is replaced rather than rejected.
fn load_grid_from_reader<R: Read>(rdr: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load one CSV file as a raw grid.
pub fn load_grid(path: &Path) -> Result<Vec<Vec<String>>, SourceError> {
    let file = std::fs::File::open(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_grid_from_reader(file).map_err(|e| SourceError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Resolve a configured path against `base_dir` unless it is absolute.
pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Load every configured source in merge order.
///
/// Never fails: a file that cannot be opened or parsed is returned as an
/// unreadable source, which the normalizer reports as a warning.
pub fn load_sources(base_dir: &Path, sources: &[SourceConfig]) -> Vec<RawSource> {
    sources
        .iter()
        .map(|source| {
            let path = resolve_path(base_dir, &source.path);
            match load_grid(&path) {
                Ok(rows) => {
                    info!("loaded source '{}': {} row(s) from {}", source.label(), rows.len(), path.display());
                    RawSource::new(source.label(), rows)
                }
                Err(e) => {
                    warn!("source '{}' unreadable: {}", source.label(), e);
                    RawSource::unreadable(source.label(), e.to_string())
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
