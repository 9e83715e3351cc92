//! ISO 639-1 language reference data.
//!
//! The registry form collects language names as free text ("English",
//! "Spanish"); records persist ISO codes. This module carries the
//! controlled vocabulary for that translation:
//! - a table of code / canonical name / aliases, compiled into the binary
//! - a case-insensitive index resolving a name, alias, or code to its code
//!
//! The table is read-only reference data. It is constructed once at process
//! start and passed by reference into the normalizer and the query engine —
//! never consulted through globals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Embedded reference table. Kept as JSON so it can also be exported
/// verbatim to `languages.json` for out-of-process consumers.
const EMBEDDED: &str = include_str!("languages.json");

/// One controlled-vocabulary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Case-insensitive lookup over the language table.
#[derive(Debug, Clone)]
pub struct LanguageIndex {
    entries: Vec<LanguageEntry>,
    /// Lowercased code, name, and alias terms, each pointing into `entries`.
    by_term: BTreeMap<String, usize>,
}

impl LanguageIndex {
    /// Build the index over the compiled-in reference table.
    pub fn builtin() -> Self {
        let entries: Vec<LanguageEntry> =
            serde_json::from_str(EMBEDDED).expect("embedded languages.json is valid");
        Self::from_entries(entries)
    }

    /// Build the index over a caller-supplied table.
    ///
    /// If two entries claim the same term, the first one wins.
    pub fn from_entries(entries: Vec<LanguageEntry>) -> Self {
        let mut by_term = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let mut terms = vec![entry.code.clone(), entry.name.clone()];
            terms.extend(entry.aliases.iter().cloned());
            for term in terms {
                by_term.entry(term.to_lowercase()).or_insert(idx);
            }
        }
        Self { entries, by_term }
    }

    /// Resolve a name, alias, or code to the canonical ISO code.
    pub fn code_for(&self, term: &str) -> Option<&str> {
        self.by_term
            .get(&term.trim().to_lowercase())
            .map(|&idx| self.entries[idx].code.as_str())
    }

    /// Canonical display name for an ISO code.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.by_term
            .get(&code.trim().to_lowercase())
            .map(|&idx| self.entries[idx].name.as_str())
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_names_and_codes() {
        let langs = LanguageIndex::builtin();
        assert_eq!(langs.code_for("English"), Some("en"));
        assert_eq!(langs.code_for("spanish"), Some("es"));
        assert_eq!(langs.code_for("en"), Some("en"));
        assert_eq!(langs.name_for("eu"), Some("Basque"));
    }

    #[test]
    fn aliases_resolve() {
        let langs = LanguageIndex::builtin();
        assert_eq!(langs.code_for("castilian"), Some("es"));
        assert_eq!(langs.code_for("farsi"), Some("fa"));
    }

    #[test]
    fn unknown_term_is_none() {
        let langs = LanguageIndex::builtin();
        assert_eq!(langs.code_for("klingon"), None);
    }

    #[test]
    fn custom_table_first_entry_wins() {
        let langs = LanguageIndex::from_entries(vec![
            LanguageEntry {
                code: "aa".to_string(),
                name: "Shared".to_string(),
                aliases: vec![],
            },
            LanguageEntry {
                code: "bb".to_string(),
                name: "shared".to_string(),
                aliases: vec![],
            },
        ]);
        assert_eq!(langs.code_for("SHARED"), Some("aa"));
    }
}
