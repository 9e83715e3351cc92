//! Row normalization for form submissions.
//!
//! The registry receives its raw data as a flat sequence of row maps —
//! one map per registration event, keyed by the form's question headings.
//! This module turns those into typed field maps:
//! - heading keys are coerced to lowercase snake_case
//! - checkbox answers split on the literal `", "` into ordered lists
//! - scalar answers are whitespace-trimmed (an absent answer stays absent,
//!   it never becomes an empty string)
//! - language names translate to ISO 639-1 codes via the injected table;
//!   a row naming an unknown language is excluded with a buffered warning
//!
//! Decoding helpers accept the two shapes the upstream export produces:
//! an array of keyed row objects, or a header row followed by value rows
//! (spreadsheet `values` payload).
//!
//! Pure transform: identical inputs always yield identical outputs.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::errors::{CorporaError, CorporaResult};
use crate::fields::is_list_field;
use crate::languages::LanguageIndex;

/// A raw submission row: question heading → answer. Absent answers are
/// absent keys, not empty strings.
pub type RawRow = BTreeMap<String, String>;

/// Convert a form question heading into its canonical field key.
pub fn to_snake_case(heading: &str) -> String {
    heading.replace(' ', "_").to_lowercase()
}

/// A normalized row: trimmed scalars plus split list fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    scalars: BTreeMap<String, String>,
    lists: BTreeMap<String, Vec<String>>,
}

impl NormalizedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.scalars.insert(key.into(), value.into());
    }

    pub fn insert_list(&mut self, key: impl Into<String>, items: Vec<String>) {
        self.lists.insert(key.into(), items);
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.scalars.get(key).map(String::as_str)
    }

    /// List field value; absent fields read as the empty list.
    pub fn list(&self, key: &str) -> &[String] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Result of a normalization pass: the surviving rows plus buffered
/// diagnostics for the excluded ones.
#[derive(Debug)]
pub struct NormalizeReport {
    pub rows: Vec<NormalizedRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalizes raw rows against a read-only language table.
pub struct Normalizer<'a> {
    languages: &'a LanguageIndex,
}

impl<'a> Normalizer<'a> {
    pub fn new(languages: &'a LanguageIndex) -> Self {
        Self { languages }
    }

    pub fn normalize(&self, rows: &[RawRow]) -> NormalizeReport {
        let mut out = Vec::with_capacity(rows.len());
        let mut diagnostics = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(index, row) {
                Ok(normalized) => out.push(normalized),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        NormalizeReport {
            rows: out,
            diagnostics,
        }
    }

    fn normalize_row(&self, index: usize, row: &RawRow) -> Result<NormalizedRow, Diagnostic> {
        let mut normalized = NormalizedRow::new();

        for (heading, value) in row {
            let key = to_snake_case(heading);

            if is_list_field(&key) {
                let mut items = split_checkboxes(value);
                if key == "languages" {
                    items = self.translate_languages(index, &items)?;
                }
                normalized.insert_list(key, items);
            } else {
                normalized.insert_scalar(key, value.trim());
            }
        }

        Ok(normalized)
    }

    fn translate_languages(
        &self,
        index: usize,
        names: &[String],
    ) -> Result<Vec<String>, Diagnostic> {
        let mut codes = Vec::with_capacity(names.len());
        for name in names {
            match self.languages.code_for(name) {
                Some(code) => codes.push(code.to_string()),
                None => {
                    return Err(Diagnostic::warning(
                        "row.unknown_language",
                        format!("row {index}: unknown language name '{name}'; row excluded"),
                    ))
                }
            }
        }
        Ok(codes)
    }
}

/// Split a checkbox answer into its ordered items. An empty answer reads
/// as the empty list, not a single empty item.
fn split_checkboxes(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(", ").map(|item| item.trim().to_string()).collect()
}

/// Decode a JSON payload into raw rows.
///
/// Accepts either shape the upstream export produces:
/// - an array of row objects (`responses.json` shape)
/// - an array of string arrays: header row first (spreadsheet `values`)
///
/// Anything else is the one fatal condition of the engine: input that is
/// not a sequence of row maps at all.
pub fn rows_from_json(value: &Value) -> CorporaResult<Vec<RawRow>> {
    let items = value
        .as_array()
        .ok_or_else(|| CorporaError::invalid_input("input must be a JSON array of rows"))?;

    if items.is_empty() {
        return Ok(Vec::new());
    }

    if items.iter().all(Value::is_object) {
        return items.iter().map(row_from_object).collect();
    }

    if items.iter().all(Value::is_array) {
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let cells = item.as_array().ok_or_else(|| {
                CorporaError::invalid_input(format!("sheet row {index} is not an array"))
            })?;
            let mut row = Vec::with_capacity(cells.len());
            for (col, cell) in cells.iter().enumerate() {
                row.push(scalar_to_string(cell).ok_or_else(|| {
                    CorporaError::invalid_input(format!(
                        "sheet row {index}, column {col}: cell must be a scalar"
                    ))
                })?);
            }
            values.push(row);
        }
        return Ok(rows_from_sheet(&values));
    }

    Err(CorporaError::invalid_input(
        "input must be an array of row objects or an array of sheet rows",
    ))
}

fn row_from_object(value: &Value) -> CorporaResult<RawRow> {
    let obj = value
        .as_object()
        .ok_or_else(|| CorporaError::invalid_input("row is not an object"))?;

    let mut row = RawRow::new();
    for (key, field) in obj {
        if field.is_null() {
            continue;
        }
        let s = scalar_to_string(field).ok_or_else(|| {
            CorporaError::invalid_input(format!("row field '{key}' must be a scalar"))
        })?;
        row.insert(key.clone(), s);
    }
    Ok(row)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Convert a spreadsheet `values` payload (header row first) into raw rows.
///
/// The first and third headings are the export's submission timestamp and
/// registrant email; they are renamed to `timestamp` and `email_address`
/// before heading conversion, matching the upstream sheet layout. Value
/// rows shorter than the header leave the trailing fields absent.
pub fn rows_from_sheet(values: &[Vec<String>]) -> Vec<RawRow> {
    let Some((header, responses)) = values.split_first() else {
        return Vec::new();
    };

    let mut headings: Vec<String> = header.clone();
    if !headings.is_empty() {
        headings[0] = "timestamp".to_string();
    }
    if headings.len() > 2 {
        headings[2] = "email_address".to_string();
    }

    responses
        .iter()
        .map(|cells| {
            let mut row = RawRow::new();
            for (heading, cell) in headings.iter().zip(cells.iter()) {
                row.insert(heading.clone(), cell.clone());
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(entries: &[(&str, &str)]) -> RawRow {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn headings_become_snake_case() {
        assert_eq!(to_snake_case("Corpus path"), "corpus_path");
        assert_eq!(
            to_snake_case("I want to register a new:"),
            "i_want_to_register_a_new:"
        );
    }

    #[test]
    fn checkbox_fields_split_into_lists() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);

        let report = normalizer.normalize(&[raw(&[
            ("Third parties", "ACME, Initech"),
            ("Domain", "  biomedical  "),
        ])]);

        assert!(report.diagnostics.is_empty());
        let row = &report.rows[0];
        assert_eq!(row.list("third_parties"), ["ACME", "Initech"]);
        assert_eq!(row.scalar("domain"), Some("biomedical"));
    }

    #[test]
    fn empty_checkbox_answer_is_empty_list() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);

        let report = normalizer.normalize(&[raw(&[("Actions", "")])]);
        assert_eq!(report.rows[0].list("actions"), &[] as &[String]);
    }

    #[test]
    fn absent_scalar_stays_absent() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);

        let report = normalizer.normalize(&[raw(&[("Domain", "legal")])]);
        let row = &report.rows[0];
        assert_eq!(row.scalar("provider"), None);
        assert_eq!(row.scalar("domain"), Some("legal"));
    }

    #[test]
    fn language_names_translate_to_codes() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);

        let report = normalizer.normalize(&[raw(&[("Languages", "English, Spanish")])]);
        assert_eq!(report.rows[0].list("languages"), ["en", "es"]);
    }

    #[test]
    fn unknown_language_excludes_row_with_warning() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);

        let report = normalizer.normalize(&[
            raw(&[("Languages", "English, Klingon")]),
            raw(&[("Languages", "Basque")]),
        ]);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].list("languages"), ["eu"]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, "row.unknown_language");
        assert!(report.diagnostics[0].message.contains("Klingon"));
    }

    #[test]
    fn normalization_is_deterministic() {
        let langs = LanguageIndex::builtin();
        let normalizer = Normalizer::new(&langs);
        let rows = vec![raw(&[("Languages", "English"), ("Domain", "news")])];

        let a = normalizer.normalize(&rows);
        let b = normalizer.normalize(&rows);
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn rows_from_json_accepts_row_objects() {
        let value = json!([
            { "corpus_path": "c1", "size_in_gigabytes": 12, "comments": null }
        ]);
        let rows = rows_from_json(&value).unwrap();
        assert_eq!(rows[0].get("corpus_path").map(String::as_str), Some("c1"));
        assert_eq!(rows[0].get("size_in_gigabytes").map(String::as_str), Some("12"));
        assert!(!rows[0].contains_key("comments"));
    }

    #[test]
    fn rows_from_json_accepts_sheet_values() {
        let value = json!([
            ["Timestamp", "I want to register a new:", "Email", "Corpus path"],
            ["1/1/2024", "Corpus", "a@b.es", "c1"],
            ["2/1/2024", "Version"]
        ]);
        let rows = rows_from_json(&value).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("timestamp").map(String::as_str), Some("1/1/2024"));
        assert_eq!(rows[0].get("email_address").map(String::as_str), Some("a@b.es"));
        assert_eq!(rows[0].get("Corpus path").map(String::as_str), Some("c1"));
        // Short row: trailing fields absent.
        assert!(!rows[1].contains_key("email_address"));
    }

    #[test]
    fn rows_from_json_rejects_non_arrays() {
        let err = rows_from_json(&json!({"not": "rows"})).unwrap_err();
        assert!(err.to_string().contains("array"));

        let err = rows_from_json(&json!([{"a": "b"}, ["mixed"]])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }
}
