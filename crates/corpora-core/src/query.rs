//! Query engine for the persisted corpus list.
//!
//! A query is a set of typed predicates combined with logical AND; there is
//! no OR/NOT. Matching is case-insensitive throughout:
//! - checkbox attributes match when the query's term set is a subset of the
//!   record's value set
//! - scalar attributes match when the term occurs as a substring of the
//!   record's value (so a domain query of "medic" finds "biomedical")
//! - an attribute absent on a record reads as the empty string and never
//!   matches a non-empty term
//!
//! Language terms are resolved through the same lookup table the
//! normalizer uses, so "english", "eng-aliases", and "en" all reach the
//! stored ISO codes. A `publishable` term of "na" is rewritten to the
//! controlled answer "I don't know" before matching.
//!
//! Corpus-level predicates address the corpus record itself. State-level
//! predicates (encoding, format, annotation types, actions, registrant
//! email) match a corpus when at least one of its states matches.
//!
//! Results preserve the order of the record list, and the same query over
//! the same records always returns the same result.

use std::collections::BTreeSet;

use crate::languages::LanguageIndex;
use crate::model::{Corpus, TriState};

/// A predicate value as it arrives from a string-keyed map.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// A single attribute filter. The set of recognized attributes is closed;
/// lowering from string keys happens in [`Predicate::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    // Corpus-level.
    Languages(Vec<String>),
    ThirdParties(Vec<String>),
    Domain(String),
    Provider(String),
    Parallel(String),
    Aggregated(String),
    DocumentLevel(String),
    Publishable(String),
    // State-level: a corpus matches when any of its states matches.
    AnnotationTypes(Vec<String>),
    Actions(Vec<String>),
    Encoding(String),
    Format(String),
    EmailAddress(String),
}

impl Predicate {
    /// The attribute name this predicate filters on.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Languages(_) => "languages",
            Self::ThirdParties(_) => "third_parties",
            Self::Domain(_) => "domain",
            Self::Provider(_) => "provider",
            Self::Parallel(_) => "parallel",
            Self::Aggregated(_) => "aggregated",
            Self::DocumentLevel(_) => "document_level",
            Self::Publishable(_) => "publishable",
            Self::AnnotationTypes(_) => "annotation_types",
            Self::Actions(_) => "actions",
            Self::Encoding(_) => "encoding",
            Self::Format(_) => "format",
            Self::EmailAddress(_) => "email_address",
        }
    }

    /// Lower a string-keyed attribute/value pair into a typed predicate.
    ///
    /// Returns `None` for attribute names outside the recognized set, and
    /// for a list value handed to a scalar attribute. A scalar value for a
    /// checkbox attribute is accepted as a single-term list.
    pub fn parse(key: &str, value: &QueryValue) -> Option<Self> {
        let list = || -> Vec<String> {
            match value {
                QueryValue::Scalar(s) => vec![s.clone()],
                QueryValue::List(items) => items.clone(),
            }
        };
        let scalar = || -> Option<String> {
            match value {
                QueryValue::Scalar(s) => Some(s.clone()),
                QueryValue::List(_) => None,
            }
        };

        match key {
            "languages" => Some(Self::Languages(list())),
            "third_parties" => Some(Self::ThirdParties(list())),
            "annotation_types" => Some(Self::AnnotationTypes(list())),
            "actions" => Some(Self::Actions(list())),
            "domain" => scalar().map(Self::Domain),
            "provider" => scalar().map(Self::Provider),
            "parallel" => scalar().map(Self::Parallel),
            "aggregated" => scalar().map(Self::Aggregated),
            "document_level" => scalar().map(Self::DocumentLevel),
            "publishable" => scalar().map(Self::Publishable),
            "encoding" => scalar().map(Self::Encoding),
            "format" => scalar().map(Self::Format),
            "email_address" => scalar().map(Self::EmailAddress),
            _ => None,
        }
    }
}

/// An ordered conjunction of predicates. An empty query filters nothing
/// and selects every record — distinguishable from a query that matched
/// nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Lower a sparse string-keyed predicate map.
    ///
    /// Empty values are treated as omitted. Unrecognized attribute names do
    /// not fail the query and do not filter anything; they are returned to
    /// the caller so the leniency stays visible.
    pub fn from_pairs<I>(pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (String, QueryValue)>,
    {
        let mut query = Self::new();
        let mut ignored = Vec::new();

        for (key, value) in pairs {
            let empty = match &value {
                QueryValue::Scalar(s) => s.trim().is_empty(),
                QueryValue::List(items) => items.is_empty(),
            };
            if empty {
                continue;
            }
            match Predicate::parse(&key, &value) {
                Some(predicate) => query.push(predicate),
                None => ignored.push(key),
            }
        }

        (query, ignored)
    }
}

/// Evaluates queries against corpus records, resolving language terms
/// through a read-only reference table.
pub struct QueryEngine<'a> {
    languages: &'a LanguageIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(languages: &'a LanguageIndex) -> Self {
        Self { languages }
    }

    /// Return the records satisfying every predicate, in input order.
    pub fn filter<'c>(&self, corpora: &'c [Corpus], query: &Query) -> Vec<&'c Corpus> {
        corpora
            .iter()
            .filter(|corpus| {
                query
                    .predicates()
                    .iter()
                    .all(|predicate| self.matches(corpus, predicate))
            })
            .collect()
    }

    fn matches(&self, corpus: &Corpus, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Languages(terms) => {
                let codes = self.language_terms(terms);
                is_subset(&codes, &corpus.languages)
            }
            Predicate::ThirdParties(terms) => is_subset(terms, &corpus.third_parties),
            Predicate::Domain(term) => scalar_contains(corpus.domain.as_deref(), term),
            Predicate::Provider(term) => scalar_contains(corpus.provider.as_deref(), term),
            Predicate::Parallel(term) => flag_contains(corpus.parallel, term),
            Predicate::Aggregated(term) => flag_contains(corpus.aggregated, term),
            Predicate::DocumentLevel(term) => flag_contains(corpus.document_level, term),
            Predicate::Publishable(term) => {
                flag_contains(corpus.publishable, &publishable_term(term))
            }
            Predicate::AnnotationTypes(terms) => corpus
                .iter_states()
                .any(|state| is_subset(terms, &state.annotation_types)),
            Predicate::Actions(terms) => corpus
                .iter_states()
                .any(|state| is_subset(terms, &state.actions)),
            Predicate::Encoding(term) => corpus
                .iter_states()
                .any(|state| scalar_contains(state.encoding.as_deref(), term)),
            Predicate::Format(term) => corpus
                .iter_states()
                .any(|state| scalar_contains(state.format.as_deref(), term)),
            Predicate::EmailAddress(term) => corpus
                .iter_states()
                .any(|state| scalar_contains(state.email_address.as_deref(), term)),
        }
    }

    /// Resolve query terms (names, aliases, or codes) to ISO codes. A term
    /// outside the table falls back to its lowercased raw form, which then
    /// simply fails to match any stored code.
    fn language_terms(&self, terms: &[String]) -> Vec<String> {
        terms
            .iter()
            .map(|term| {
                self.languages
                    .code_for(term)
                    .map(str::to_string)
                    .unwrap_or_else(|| term.trim().to_lowercase())
            })
            .collect()
    }
}

fn is_subset(terms: &[String], values: &[String]) -> bool {
    let values: BTreeSet<String> = values.iter().map(|v| v.to_lowercase()).collect();
    terms.iter().all(|term| values.contains(&term.to_lowercase()))
}

fn scalar_contains(value: Option<&str>, term: &str) -> bool {
    value
        .unwrap_or("")
        .to_lowercase()
        .contains(&term.to_lowercase())
}

fn flag_contains(flag: Option<TriState>, term: &str) -> bool {
    scalar_contains(flag.map(|f| f.as_str()), term)
}

/// "na" is the registrants' shorthand for the controlled answer.
fn publishable_term(term: &str) -> String {
    if term.trim().eq_ignore_ascii_case("na") {
        "i don't know".to_string()
    } else {
        term.to_string()
    }
}
