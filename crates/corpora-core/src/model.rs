//! Record types for the corpus → version → state hierarchy.
//!
//! These are the persisted shapes: a registry is a JSON array of [`Corpus`]
//! objects, each holding its versions in submission order, each version
//! holding its states in submission order. Field names and their order are
//! fixed; nothing else is ever emitted.
//!
//! Design notes:
//! - Scalar attributes are `Option<String>`: a field the registrant never
//!   answered serializes as `null`, distinct from an empty answer.
//! - Checkbox attributes are `Vec<String>`, never a delimited string.
//! - The yes/no questions are a typed [`TriState`]; the form's "not
//!   applicable" answer is the literal phrase "I don't know".
//! - Records are built once per pass and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Discriminant carried by every form submission row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Corpus,
    Version,
    State,
}

impl RecordKind {
    /// Parse the form answer. The vocabulary is closed; anything else is
    /// a validation problem for the caller to report.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Corpus" => Some(Self::Corpus),
            "Version" => Some(Self::Version),
            "State" => Some(Self::State),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corpus => "Corpus",
            Self::Version => "Version",
            Self::State => "State",
        }
    }
}

/// Answer to a yes/no form question that also admits "I don't know".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriState {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[serde(rename = "I don't know")]
    Unknown,
}

impl TriState {
    /// Parse a form answer, case-insensitively. "na" is the short form
    /// registrants use for "I don't know".
    pub fn parse(s: &str) -> Option<Self> {
        let v = s.trim().to_lowercase();
        match v.as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "i don't know" | "i dont know" | "na" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "I don't know",
        }
    }
}

/// Top-level registered dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// Unique key; also the linkage prefix for version paths.
    pub corpus_path: String,
    pub corpus_name: Option<String>,
    pub domain: Option<String>,
    pub provider: Option<String>,
    pub license: Option<String>,
    pub source: Option<String>,
    /// Ordered ISO 639-1 codes, translated from the form's language names.
    #[serde(default)]
    pub languages: Vec<String>,
    pub parallel: Option<TriState>,
    pub aggregated: Option<TriState>,
    pub document_level: Option<TriState>,
    #[serde(default)]
    pub third_parties: Vec<String>,
    pub publishable: Option<TriState>,
    pub comments: Option<String>,
    /// Owned versions, in submission order.
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl Corpus {
    /// All states across every version, in tree order.
    pub fn iter_states(&self) -> impl Iterator<Item = &State> {
        self.versions.iter().flat_map(|v| v.states.iter())
    }

    /// The fixed display-attribute subset used in search results
    /// (see [`crate::fields::DISPLAY_ATTRIBUTES`]).
    pub fn display_fields(&self) -> [&str; 3] {
        [
            self.corpus_path.as_str(),
            self.corpus_name.as_deref().unwrap_or(""),
            self.domain.as_deref().unwrap_or(""),
        ]
    }
}

/// A dated snapshot of a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Must equal `<corpus_path>/<segment>`.
    pub version_path: String,
    pub version_name: Option<String>,
    pub version_date: Option<String>,
    /// Owned states, in submission order.
    #[serde(default)]
    pub states: Vec<State>,
}

/// A processing stage within a version (raw, cleaned, annotated, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Must equal `<corpus_path>/<version_segment>/<state_segment>`.
    pub state_path: String,
    pub state_name: Option<String>,
    pub encoding: Option<String>,
    pub format: Option<String>,
    pub state_date: Option<String>,
    pub size_in_gigabytes: Option<String>,
    pub size_in_million_tokens: Option<String>,
    #[serde(default)]
    pub annotation_types: Vec<String>,
    pub annotation_format: Option<String>,
    pub release_url: Option<String>,
    /// Reference to a prior state by name; not enforced as a graph edge.
    pub prior_state: Option<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    pub script_location: Option<String>,
    pub command: Option<String>,
    pub action_comments: Option<String>,
    pub email_address: Option<String>,
}
