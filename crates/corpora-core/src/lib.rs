//! corpora-core
//!
//! Core engine for the corpora registry:
//! - Typed Corpus/Version/State records and their persisted JSON form
//! - Row normalization (snake_case headings, checkbox splitting, language codes)
//! - Tree reconstruction from flat form submissions, with buffered diagnostics
//! - Predicate queries with subset and substring semantics
//! - Distinct-value discovery over the record tree
//!
//! The core crate does not do network or filesystem I/O. Higher-level crates
//! perform I/O and pass decoded rows/structures into the engine.

pub mod build;
pub mod diagnostics;
pub mod discover;
pub mod errors;
pub mod fields;
pub mod languages;
pub mod model;
pub mod normalize;
pub mod query;

pub use crate::errors::{CorporaError, CorporaResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::build::{build_tree, BuildReport};
    pub use crate::diagnostics::{Diagnostic, DiagnosticLevel};
    pub use crate::discover::distinct_values;
    pub use crate::languages::{LanguageEntry, LanguageIndex};
    pub use crate::model::{Corpus, RecordKind, State, TriState, Version};
    pub use crate::normalize::{rows_from_json, NormalizedRow, Normalizer, RawRow};
    pub use crate::query::{Predicate, Query, QueryEngine, QueryValue};
    pub use crate::{CorporaError, CorporaResult};
}
