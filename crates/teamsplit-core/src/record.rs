// Canonical participant records produced by normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A single attribute value on a participant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Explicit "no value" marker for empty or absent cells.
    Missing,
}

impl FieldValue {
    /// Classify a raw cell.
    ///
    /// Empty (after trimming) becomes `Missing`; text that parses as a finite
    /// number becomes `Number`; anything else is kept as `Text`. `NaN` and
    /// `inf` parse but are not finite, so they stay text.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }

    /// The numeric value, if this field holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric value, or 0.0 for text and missing values.
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Participant records
// ---------------------------------------------------------------------------

/// One participant after all sources have been merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Canonical identifier (see `canonical_id`).
    pub id: String,
    /// Attribute name -> value. The identifier column is kept here too.
    pub fields: BTreeMap<String, FieldValue>,
}

impl ParticipantRecord {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantRecord {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and pre-merged inputs.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of an attribute; missing, absent, and text are 0.0.
    pub fn number_or_zero(&self, name: &str) -> f64 {
        self.fields
            .get(name)
            .map(FieldValue::number_or_zero)
            .unwrap_or(0.0)
    }

    /// Whether the attribute is present and numeric.
    pub fn has_number(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(FieldValue::as_number)
            .is_some()
    }

    /// Merge a freshly parsed row into this record.
    ///
    /// Present values overwrite; a missing value only fills a field that has
    /// never been seen, so a later sparse source cannot erase earlier data.
    pub fn merge_fields(&mut self, row: BTreeMap<String, FieldValue>) {
        for (name, value) in row {
            if value.is_missing() {
                self.fields.entry(name).or_insert(FieldValue::Missing);
            } else {
                self.fields.insert(name, value);
            }
        }
    }
}

/// Participant records keyed (and iterated) by canonical identifier.
pub type RecordSet = BTreeMap<String, ParticipantRecord>;

/// Turn a raw identifier cell into the key used for merging.
///
/// Plain integers keep their exact digits minus sign noise and leading
/// zeros, so `007` and `+7` map to `"7"` at any length. Other numbers go
/// through their value (`7.0` -> `"7"`); text is trimmed. Returns `None` for
/// empty cells.
pub fn canonical_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if let Some(digits) = integer_digits(trimmed) {
        return Some(digits);
    }
    match FieldValue::from_cell(trimmed) {
        FieldValue::Number(n) if n == 0.0 => Some("0".to_string()),
        FieldValue::Number(n) => Some(format!("{n}")),
        FieldValue::Text(s) => Some(s),
        FieldValue::Missing => None,
    }
}

/// `[+-]digits` with sign and leading zeros normalized; `None` otherwise.
fn integer_digits(text: &str) -> Option<String> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    Some(match (significant.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{significant}"),
        (false, false) => significant.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cell_classifies_values() {
        assert_eq!(FieldValue::from_cell(""), FieldValue::Missing);
        assert_eq!(FieldValue::from_cell("   "), FieldValue::Missing);
        assert_eq!(FieldValue::from_cell("42"), FieldValue::Number(42.0));
        assert_eq!(FieldValue::from_cell(" 3.5 "), FieldValue::Number(3.5));
        assert_eq!(FieldValue::from_cell("1e3"), FieldValue::Number(1000.0));
        assert_eq!(
            FieldValue::from_cell("alice"),
            FieldValue::Text("alice".into())
        );
    }

    #[test]
    fn from_cell_rejects_non_finite_numbers() {
        assert_eq!(FieldValue::from_cell("NaN"), FieldValue::Text("NaN".into()));
        assert_eq!(FieldValue::from_cell("inf"), FieldValue::Text("inf".into()));
    }

    #[test]
    fn number_or_zero_defaults() {
        let rec = ParticipantRecord::new("p1")
            .with_field("points", FieldValue::Number(12.0))
            .with_field("name", FieldValue::Text("Ana".into()))
            .with_field("streak", FieldValue::Missing);
        assert_eq!(rec.number_or_zero("points"), 12.0);
        assert_eq!(rec.number_or_zero("name"), 0.0);
        assert_eq!(rec.number_or_zero("streak"), 0.0);
        assert_eq!(rec.number_or_zero("absent"), 0.0);
        assert!(rec.has_number("points"));
        assert!(!rec.has_number("streak"));
    }

    #[test]
    fn merge_overwrites_present_and_keeps_old_on_missing() {
        let mut rec = ParticipantRecord::new("p1")
            .with_field("x", FieldValue::Number(1.0))
            .with_field("y", FieldValue::Number(2.0));

        let mut row = BTreeMap::new();
        row.insert("x".to_string(), FieldValue::Number(10.0));
        row.insert("y".to_string(), FieldValue::Missing);
        row.insert("z".to_string(), FieldValue::Missing);
        rec.merge_fields(row);

        assert_eq!(rec.get("x"), Some(&FieldValue::Number(10.0)));
        assert_eq!(rec.get("y"), Some(&FieldValue::Number(2.0)));
        assert_eq!(rec.get("z"), Some(&FieldValue::Missing));
    }

    #[test]
    fn canonical_id_normalizes_numbers() {
        assert_eq!(canonical_id("007"), Some("7".to_string()));
        assert_eq!(canonical_id(" +7 "), Some("7".to_string()));
        assert_eq!(canonical_id("7.0"), Some("7".to_string()));
        assert_eq!(canonical_id("-007"), Some("-7".to_string()));
        assert_eq!(canonical_id("000"), Some("0".to_string()));
        assert_eq!(canonical_id("-0.0"), Some("0".to_string()));
        assert_eq!(canonical_id(" abc "), Some("abc".to_string()));
        assert_eq!(canonical_id(""), None);
        assert_eq!(canonical_id("   "), None);
    }

    #[test]
    fn canonical_id_keeps_long_integers_exact() {
        let a = canonical_id("12345678901234567890").unwrap();
        let b = canonical_id("12345678901234567891").unwrap();
        assert_eq!(a, "12345678901234567890");
        assert_eq!(b, "12345678901234567891");
        assert_ne!(a, b);
        assert_eq!(canonical_id("0012345678901234567890"), Some(a));
    }

    #[test]
    fn field_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            FieldValue::Number(1.5),
            FieldValue::Text("a".into()),
            FieldValue::Missing,
        ])
        .unwrap();
        assert_eq!(json, r#"[1.5,"a",null]"#);
    }
}
