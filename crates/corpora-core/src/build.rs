//! Tree builder: folds flat submission rows into the nested
//! corpus → version → state structure.
//!
//! The build is a single pass over normalized rows:
//! 1. partition rows by their record-kind discriminant
//! 2. construct corpora in submission order, indexing them by path
//! 3. attach versions by the first `/`-segment of their path
//! 4. attach states by the first two `/`-segments of their path
//!
//! Linkage resolution goes through path indexes built during the pass, not
//! repeated scans, which keeps the orphan and duplicate cases explicit:
//! - a child whose parent path matches nothing is dropped with an
//!   orphan warning
//! - duplicate corpus paths are retained as separate entries, never merged;
//!   a child with an ambiguous parent attaches to the first match in
//!   submission order
//!
//! No row failure is fatal. The builder always returns a (possibly smaller)
//! tree plus the buffered diagnostics, and running it twice over the same
//! rows yields identical output.

use std::collections::BTreeMap;

use crate::diagnostics::Diagnostic;
use crate::fields::RECORD_KIND;
use crate::model::{Corpus, RecordKind, State, TriState, Version};
use crate::normalize::NormalizedRow;

/// Result of a build pass.
#[derive(Debug)]
pub struct BuildReport {
    pub corpora: Vec<Corpus>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// Build the nested corpus list from normalized rows.
pub fn build_tree(rows: &[NormalizedRow]) -> BuildReport {
    let mut diagnostics = Vec::new();

    // Partition by kind, preserving submission order within each bucket.
    let mut corpus_rows = Vec::new();
    let mut version_rows = Vec::new();
    let mut state_rows = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match row.scalar(RECORD_KIND) {
            None => diagnostics.push(Diagnostic::warning(
                "row.missing_kind",
                format!("row {index}: missing record kind; row excluded"),
            )),
            Some(raw) => match RecordKind::parse(raw) {
                Some(RecordKind::Corpus) => corpus_rows.push((index, row)),
                Some(RecordKind::Version) => version_rows.push((index, row)),
                Some(RecordKind::State) => state_rows.push((index, row)),
                None => diagnostics.push(Diagnostic::warning(
                    "row.unknown_kind",
                    format!("row {index}: unrecognized record kind '{raw}'; row excluded"),
                )),
            },
        }
    }

    // Corpora are primary entries; the index maps each path to every entry
    // claiming it so duplicates stay visible.
    let mut corpora: Vec<Corpus> = Vec::with_capacity(corpus_rows.len());
    let mut corpus_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (index, row) in corpus_rows {
        let Some(path) = nonempty_scalar(row, "corpus_path") else {
            diagnostics.push(Diagnostic::warning(
                "build.malformed_path",
                format!("row {index}: corpus row without corpus_path; row excluded"),
            ));
            continue;
        };

        if corpus_index.contains_key(path) {
            diagnostics.push(Diagnostic::warning(
                "build.duplicate_corpus_path",
                format!("row {index}: duplicate corpus_path '{path}'; both entries retained"),
            ));
        }

        corpus_index
            .entry(path.to_string())
            .or_default()
            .push(corpora.len());
        corpora.push(corpus_from_row(index, path, row, &mut diagnostics));
    }

    // Versions need to find their owning corpus path.
    let mut version_index: BTreeMap<String, Vec<(usize, usize)>> = BTreeMap::new();

    for (index, row) in version_rows {
        let Some(path) = nonempty_scalar(row, "version_path") else {
            diagnostics.push(Diagnostic::warning(
                "build.malformed_path",
                format!("row {index}: version row without version_path; row excluded"),
            ));
            continue;
        };

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 {
            diagnostics.push(Diagnostic::warning(
                "build.malformed_path",
                format!("row {index}: version_path '{path}' has fewer than two segments; row excluded"),
            ));
            continue;
        }

        let parent = segments[0];
        let Some(owners) = corpus_index.get(parent) else {
            diagnostics.push(Diagnostic::warning(
                "build.orphan_version",
                format!("row {index}: version '{path}' has no parent corpus '{parent}'; row excluded"),
            ));
            continue;
        };

        if owners.len() > 1 {
            diagnostics.push(Diagnostic::warning(
                "build.ambiguous_parent",
                format!(
                    "row {index}: version '{path}' matches {} corpora with path '{parent}'; attached to the first",
                    owners.len()
                ),
            ));
        }

        let corpus_idx = owners[0];
        let version_idx = corpora[corpus_idx].versions.len();
        corpora[corpus_idx]
            .versions
            .push(version_from_row(path, row));
        version_index
            .entry(path.to_string())
            .or_default()
            .push((corpus_idx, version_idx));
    }

    // States need to find their owning version path.
    for (index, row) in state_rows {
        let Some(path) = nonempty_scalar(row, "state_path") else {
            diagnostics.push(Diagnostic::warning(
                "build.malformed_path",
                format!("row {index}: state row without state_path; row excluded"),
            ));
            continue;
        };

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 3 {
            diagnostics.push(Diagnostic::warning(
                "build.malformed_path",
                format!("row {index}: state_path '{path}' has fewer than three segments; row excluded"),
            ));
            continue;
        }

        let parent = format!("{}/{}", segments[0], segments[1]);
        let Some(owners) = version_index.get(&parent) else {
            diagnostics.push(Diagnostic::warning(
                "build.orphan_state",
                format!("row {index}: state '{path}' has no parent version '{parent}'; row excluded"),
            ));
            continue;
        };

        if owners.len() > 1 {
            diagnostics.push(Diagnostic::warning(
                "build.ambiguous_parent",
                format!(
                    "row {index}: state '{path}' matches {} versions with path '{parent}'; attached to the first",
                    owners.len()
                ),
            ));
        }

        let (corpus_idx, version_idx) = owners[0];
        corpora[corpus_idx].versions[version_idx]
            .states
            .push(state_from_row(path, row));
    }

    BuildReport {
        corpora,
        diagnostics,
    }
}

fn nonempty_scalar<'r>(row: &'r NormalizedRow, key: &str) -> Option<&'r str> {
    row.scalar(key).filter(|v| !v.is_empty())
}

fn owned(row: &NormalizedRow, key: &str) -> Option<String> {
    row.scalar(key).map(str::to_string)
}

/// Read a tri-state answer. A blank answer is typed absence; an answer
/// outside the controlled vocabulary drops the field with a warning.
fn flag(
    index: usize,
    row: &NormalizedRow,
    key: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<TriState> {
    let value = row.scalar(key)?;
    if value.is_empty() {
        return None;
    }
    match TriState::parse(value) {
        Some(v) => Some(v),
        None => {
            diagnostics.push(Diagnostic::warning(
                "row.invalid_flag",
                format!("row {index}: unrecognized {key} answer '{value}'; field dropped"),
            ));
            None
        }
    }
}

fn corpus_from_row(
    index: usize,
    path: &str,
    row: &NormalizedRow,
    diagnostics: &mut Vec<Diagnostic>,
) -> Corpus {
    Corpus {
        corpus_path: path.to_string(),
        corpus_name: owned(row, "corpus_name"),
        domain: owned(row, "domain"),
        provider: owned(row, "provider"),
        license: owned(row, "license"),
        source: owned(row, "source"),
        languages: row.list("languages").to_vec(),
        parallel: flag(index, row, "parallel", diagnostics),
        aggregated: flag(index, row, "aggregated", diagnostics),
        document_level: flag(index, row, "document_level", diagnostics),
        third_parties: row.list("third_parties").to_vec(),
        publishable: flag(index, row, "publishable", diagnostics),
        comments: owned(row, "comments"),
        versions: Vec::new(),
    }
}

fn version_from_row(path: &str, row: &NormalizedRow) -> Version {
    Version {
        version_path: path.to_string(),
        version_name: owned(row, "version_name"),
        version_date: owned(row, "version_date"),
        states: Vec::new(),
    }
}

fn state_from_row(path: &str, row: &NormalizedRow) -> State {
    State {
        state_path: path.to_string(),
        state_name: owned(row, "state_name"),
        encoding: owned(row, "encoding"),
        format: owned(row, "format"),
        state_date: owned(row, "state_date"),
        size_in_gigabytes: owned(row, "size_in_gigabytes"),
        size_in_million_tokens: owned(row, "size_in_million_tokens"),
        annotation_types: row.list("annotation_types").to_vec(),
        annotation_format: owned(row, "annotation_format"),
        release_url: owned(row, "release_url"),
        prior_state: owned(row, "prior_state"),
        actions: row.list("actions").to_vec(),
        script_location: owned(row, "script_location"),
        command: owned(row, "command"),
        action_comments: owned(row, "action_comments"),
        email_address: owned(row, "email_address"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use crate::diagnostics::DiagnosticLevel;

    fn row(kind: &str, entries: &[(&str, &str)]) -> NormalizedRow {
        let mut r = NormalizedRow::new();
        r.insert_scalar(RECORD_KIND, kind);
        for (k, v) in entries {
            r.insert_scalar(*k, *v);
        }
        r
    }

    #[test]
    fn builds_nested_tree_in_submission_order() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1"), ("corpus_name", "Foo")]),
            row("Corpus", &[("corpus_path", "c2")]),
            row("Version", &[("version_path", "c1/v1")]),
            row("Version", &[("version_path", "c2/v1")]),
            row("Version", &[("version_path", "c1/v2")]),
            row("State", &[("state_path", "c1/v1/raw")]),
            row("State", &[("state_path", "c1/v1/clean")]),
        ];

        let report = build_tree(&rows);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.corpora.len(), 2);

        let c1 = &report.corpora[0];
        assert_eq!(c1.corpus_path, "c1");
        let paths: Vec<&str> = c1.versions.iter().map(|v| v.version_path.as_str()).collect();
        assert_eq!(paths, ["c1/v1", "c1/v2"]);

        let states: Vec<&str> = c1.versions[0]
            .states
            .iter()
            .map(|s| s.state_path.as_str())
            .collect();
        assert_eq!(states, ["c1/v1/raw", "c1/v1/clean"]);

        assert_eq!(report.corpora[1].versions.len(), 1);
    }

    #[test]
    fn orphan_version_is_dropped_with_warning() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1")]),
            row("Version", &[("version_path", "zz/v1")]),
        ];

        let report = build_tree(&rows);
        assert_eq!(report.corpora.len(), 1);
        assert!(report.corpora[0].versions.is_empty());
        assert_eq!(report.warnings(), 1);
        assert_eq!(report.diagnostics[0].code, "build.orphan_version");
        assert_matches!(report.diagnostics[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn orphan_state_is_dropped_with_warning() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1")]),
            row("Version", &[("version_path", "c1/v1")]),
            row("State", &[("state_path", "c1/v2/raw")]),
        ];

        let report = build_tree(&rows);
        assert!(report.corpora[0].versions[0].states.is_empty());
        assert_eq!(report.diagnostics[0].code, "build.orphan_state");
    }

    #[test]
    fn malformed_paths_are_excluded_not_fatal() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1")]),
            row("Version", &[("version_path", "c1")]),
            row("State", &[("state_path", "c1/v1")]),
            row("Corpus", &[]),
        ];

        let report = build_tree(&rows);
        assert_eq!(report.corpora.len(), 1);
        assert!(report.corpora[0].versions.is_empty());
        assert_eq!(report.warnings(), 3);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| d.code == "build.malformed_path"));
    }

    #[test]
    fn unrecognized_kind_is_reported() {
        let rows = vec![
            row("Dataset", &[("corpus_path", "c1")]),
            NormalizedRow::new(),
        ];

        let report = build_tree(&rows);
        assert!(report.corpora.is_empty());
        assert_eq!(report.diagnostics[0].code, "row.unknown_kind");
        assert_eq!(report.diagnostics[1].code, "row.missing_kind");
    }

    #[test]
    fn duplicate_corpus_paths_are_both_retained() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1"), ("corpus_name", "first")]),
            row("Corpus", &[("corpus_path", "c1"), ("corpus_name", "second")]),
            row("Version", &[("version_path", "c1/v1")]),
        ];

        let report = build_tree(&rows);
        assert_eq!(report.corpora.len(), 2);
        assert_eq!(report.corpora[0].corpus_name.as_deref(), Some("first"));
        assert_eq!(report.corpora[1].corpus_name.as_deref(), Some("second"));

        // The version attaches to the first entry only.
        assert_eq!(report.corpora[0].versions.len(), 1);
        assert!(report.corpora[1].versions.is_empty());

        let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["build.duplicate_corpus_path", "build.ambiguous_parent"]);
    }

    #[test]
    fn invalid_flag_answer_drops_field_with_warning() {
        let rows = vec![row(
            "Corpus",
            &[("corpus_path", "c1"), ("parallel", "maybe"), ("publishable", "na")],
        )];

        let report = build_tree(&rows);
        let corpus = &report.corpora[0];
        assert_eq!(corpus.parallel, None);
        assert_eq!(corpus.publishable, Some(TriState::Unknown));
        assert_eq!(report.diagnostics[0].code, "row.invalid_flag");
    }

    #[test]
    fn building_twice_yields_identical_output() {
        let rows = vec![
            row("Corpus", &[("corpus_path", "c1")]),
            row("Version", &[("version_path", "c1/v1")]),
            row("State", &[("state_path", "c1/v1/raw")]),
        ];

        let a = serde_json::to_string(&build_tree(&rows).corpora).unwrap();
        let b = serde_json::to_string(&build_tree(&rows).corpora).unwrap();
        assert_eq!(a, b);
    }
}
