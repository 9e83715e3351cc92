//! Distinct-value discovery over the record tree.
//!
//! Lists the values actually present for an attribute, so registrants can
//! see which search terms will find something. Checkbox attributes are
//! flattened; state-level attributes walk every version's states. Empty
//! values are skipped and the result is sorted and deduplicated.

use std::collections::BTreeSet;

use crate::model::{Corpus, State, TriState};

/// Distinct non-empty values for `attribute` across all records.
///
/// Returns `None` when the attribute name is outside the recognized set.
pub fn distinct_values(corpora: &[Corpus], attribute: &str) -> Option<Vec<String>> {
    let mut values: BTreeSet<String> = BTreeSet::new();

    match attribute {
        "corpus_path" => {
            for c in corpora {
                add(&mut values, &c.corpus_path);
            }
        }
        "corpus_name" => corpus_scalar(corpora, &mut values, |c| &c.corpus_name),
        "domain" => corpus_scalar(corpora, &mut values, |c| &c.domain),
        "provider" => corpus_scalar(corpora, &mut values, |c| &c.provider),
        "license" => corpus_scalar(corpora, &mut values, |c| &c.license),
        "source" => corpus_scalar(corpora, &mut values, |c| &c.source),
        "comments" => corpus_scalar(corpora, &mut values, |c| &c.comments),
        "languages" => {
            for c in corpora {
                for v in &c.languages {
                    add(&mut values, v);
                }
            }
        }
        "third_parties" => {
            for c in corpora {
                for v in &c.third_parties {
                    add(&mut values, v);
                }
            }
        }
        "parallel" => corpus_flag(corpora, &mut values, |c| c.parallel),
        "aggregated" => corpus_flag(corpora, &mut values, |c| c.aggregated),
        "document_level" => corpus_flag(corpora, &mut values, |c| c.document_level),
        "publishable" => corpus_flag(corpora, &mut values, |c| c.publishable),
        "version_path" => {
            for c in corpora {
                for v in &c.versions {
                    add(&mut values, &v.version_path);
                }
            }
        }
        "version_name" => {
            for c in corpora {
                for v in &c.versions {
                    add_opt(&mut values, &v.version_name);
                }
            }
        }
        "version_date" => {
            for c in corpora {
                for v in &c.versions {
                    add_opt(&mut values, &v.version_date);
                }
            }
        }
        "state_path" => {
            for s in states(corpora) {
                add(&mut values, &s.state_path);
            }
        }
        "state_name" => state_scalar(corpora, &mut values, |s| &s.state_name),
        "encoding" => state_scalar(corpora, &mut values, |s| &s.encoding),
        "format" => state_scalar(corpora, &mut values, |s| &s.format),
        "state_date" => state_scalar(corpora, &mut values, |s| &s.state_date),
        "size_in_gigabytes" => state_scalar(corpora, &mut values, |s| &s.size_in_gigabytes),
        "size_in_million_tokens" => {
            state_scalar(corpora, &mut values, |s| &s.size_in_million_tokens)
        }
        "annotation_format" => state_scalar(corpora, &mut values, |s| &s.annotation_format),
        "release_url" => state_scalar(corpora, &mut values, |s| &s.release_url),
        "prior_state" => state_scalar(corpora, &mut values, |s| &s.prior_state),
        "script_location" => state_scalar(corpora, &mut values, |s| &s.script_location),
        "command" => state_scalar(corpora, &mut values, |s| &s.command),
        "action_comments" => state_scalar(corpora, &mut values, |s| &s.action_comments),
        "email_address" => state_scalar(corpora, &mut values, |s| &s.email_address),
        "annotation_types" => {
            for s in states(corpora) {
                for v in &s.annotation_types {
                    add(&mut values, v);
                }
            }
        }
        "actions" => {
            for s in states(corpora) {
                for v in &s.actions {
                    add(&mut values, v);
                }
            }
        }
        _ => return None,
    }

    Some(values.into_iter().collect())
}

fn states(corpora: &[Corpus]) -> impl Iterator<Item = &State> {
    corpora.iter().flat_map(Corpus::iter_states)
}

fn add(values: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() {
        values.insert(value.to_string());
    }
}

fn add_opt(values: &mut BTreeSet<String>, value: &Option<String>) {
    if let Some(v) = value {
        add(values, v);
    }
}

fn corpus_scalar<'c>(
    corpora: &'c [Corpus],
    values: &mut BTreeSet<String>,
    field: impl Fn(&'c Corpus) -> &'c Option<String>,
) {
    for c in corpora {
        add_opt(values, field(c));
    }
}

fn corpus_flag(
    corpora: &[Corpus],
    values: &mut BTreeSet<String>,
    field: impl Fn(&Corpus) -> Option<TriState>,
) {
    for c in corpora {
        if let Some(flag) = field(c) {
            values.insert(flag.as_str().to_string());
        }
    }
}

fn state_scalar<'c>(
    corpora: &'c [Corpus],
    values: &mut BTreeSet<String>,
    field: impl Fn(&'c State) -> &'c Option<String>,
) {
    for s in states(corpora) {
        add_opt(values, field(s));
    }
}
