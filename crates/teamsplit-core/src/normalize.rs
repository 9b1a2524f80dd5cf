// Record normalization: merge raw source grids into one record per participant.
//
// Each source is a header row followed by data rows, cells aligned by position.
// Sources merge in the order given, so a later source wins on any field it
// actually supplies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

use crate::record::{canonical_id, FieldValue, ParticipantRecord, RecordSet};

// ---------------------------------------------------------------------------
// Ingestion contract
// ---------------------------------------------------------------------------

/// One already-fetched tabular source. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSource {
    /// Identifier used in warnings (file path, sheet id, ...).
    pub id: String,
    pub rows: Vec<Vec<String>>,
    /// Set when the collaborator could not read the source at all.
    pub unreadable: Option<String>,
}

impl RawSource {
    pub fn new(id: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        RawSource {
            id: id.into(),
            rows,
            unreadable: None,
        }
    }

    /// A source that failed to load; it contributes zero rows.
    pub fn unreadable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        RawSource {
            id: id.into(),
            rows: Vec::new(),
            unreadable: Some(reason.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// A non-fatal data-quality note collected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWarning {
    pub source: String,
    /// 1-based grid row (header = 1). `None` for source-level problems.
    pub row: Option<usize>,
    pub field: Option<String>,
    pub message: String,
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.source)?;
        if let Some(row) = self.row {
            write!(f, " row {row}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " `{field}`")?;
        }
        write!(f, "] {}", self.message)
    }
}

// ---------------------------------------------------------------------------
// Normalized output
// ---------------------------------------------------------------------------

/// Output of normalization, and input to every later stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSet {
    pub records: RecordSet,
    pub warnings: Vec<SourceWarning>,
    /// Sources that produced a header and at least one data row.
    pub sources_read: usize,
}

impl NormalizedSet {
    /// Wrap a record set that was merged elsewhere.
    pub fn from_records(records: impl IntoIterator<Item = ParticipantRecord>) -> Self {
        NormalizedSet {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            warnings: Vec::new(),
            sources_read: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Merge all sources into canonical records keyed by `id_field`.
///
/// `key_fields` are the attributes expected to be numeric; missing or
/// non-numeric values there are reported but never drop the row.
pub fn normalize_sources(
    sources: &[RawSource],
    id_field: &str,
    key_fields: &[String],
) -> NormalizedSet {
    let mut out = NormalizedSet::default();

    for source in sources {
        if let Some(reason) = &source.unreadable {
            warn!("source '{}' could not be read: {}", source.id, reason);
            out.warnings.push(source_warning(
                &source.id,
                format!("source could not be read: {reason}"),
            ));
            continue;
        }
        if source.rows.len() < 2 {
            warn!(
                "source '{}' has {} row(s); need a header and at least one data row",
                source.id,
                source.rows.len()
            );
            out.warnings.push(source_warning(
                &source.id,
                "source has no data rows".to_string(),
            ));
            continue;
        }

        out.sources_read += 1;
        let merged_before = out.records.len();
        merge_source(source, id_field, key_fields, &mut out);
        info!(
            "source '{}': {} data rows, {} new participants",
            source.id,
            source.rows.len() - 1,
            out.records.len() - merged_before
        );
    }

    info!(
        "normalized {} participants from {} source(s), {} warning(s)",
        out.records.len(),
        out.sources_read,
        out.warnings.len()
    );
    out
}

fn merge_source(source: &RawSource, id_field: &str, key_fields: &[String], out: &mut NormalizedSet) {
    let headers: Vec<Option<String>> = source.rows[0]
        .iter()
        .map(|h| {
            let h = h.trim();
            (!h.is_empty()).then(|| h.to_string())
        })
        .collect();

    let has_header = |name: &str| headers.iter().flatten().any(|h| h == name);

    // rightmost duplicate wins, as in `parse_row`
    let Some(id_col) = headers.iter().rposition(|h| h.as_deref() == Some(id_field)) else {
        warn!("source '{}' has no `{}` column; skipping its rows", source.id, id_field);
        out.warnings.push(SourceWarning {
            source: source.id.clone(),
            row: Some(1),
            field: Some(id_field.to_string()),
            message: "identifier column not found in header".to_string(),
        });
        return;
    };

    let checked_keys: Vec<&String> = key_fields.iter().filter(|k| has_header(k)).collect();

    for (idx, row) in source.rows.iter().enumerate().skip(1) {
        let row_number = idx + 1;
        let fields = parse_row(&headers, row);

        let Some(id) = row.get(id_col).and_then(|cell| canonical_id(cell)) else {
            debug!("source '{}' row {}: no usable identifier", source.id, row_number);
            out.warnings.push(SourceWarning {
                source: source.id.clone(),
                row: Some(row_number),
                field: Some(id_field.to_string()),
                message: "missing or empty identifier; row skipped".to_string(),
            });
            continue;
        };

        let existing = out.records.get(&id);
        for key in &checked_keys {
            let message = match fields.get(key.as_str()) {
                Some(FieldValue::Number(_)) => continue,
                Some(FieldValue::Text(text)) => format!("non-numeric value '{text}' treated as 0"),
                // an earlier source already supplied the number and it is kept
                Some(FieldValue::Missing) | None if existing.is_some_and(|r| r.has_number(key)) => continue,
                Some(FieldValue::Missing) | None => "missing value treated as 0".to_string(),
            };
            debug!("source '{}' row {} `{}`: {}", source.id, row_number, key, message);
            out.warnings.push(SourceWarning {
                source: source.id.clone(),
                row: Some(row_number),
                field: Some((*key).clone()),
                message,
            });
        }

        out.records
            .entry(id.clone())
            .or_insert_with(|| ParticipantRecord::new(id))
            .merge_fields(fields);
    }
}

/// Pair headers with positional cells. Short rows yield `Missing` for the
/// absent trailing cells; duplicate headers keep the rightmost column.
fn parse_row(headers: &[Option<String>], row: &[String]) -> BTreeMap<String, FieldValue> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(i, header)| {
            let header = header.as_ref()?;
            let value = row
                .get(i)
                .map(|cell| FieldValue::from_cell(cell))
                .unwrap_or(FieldValue::Missing);
            Some((header.clone(), value))
        })
        .collect()
}

fn source_warning(source: &str, message: String) -> SourceWarning {
    SourceWarning {
        source: source.to_string(),
        row: None,
        field: None,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
