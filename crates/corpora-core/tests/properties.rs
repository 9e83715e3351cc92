//! Property tests for the tree builder over arbitrary row mixes:
//! rebuilds are byte-identical, corpora keep submission order, and no
//! orphan ever reaches the tree.

use proptest::prelude::*;

use corpora_core::fields::RECORD_KIND;
use corpora_core::prelude::*;

fn arb_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Corpus".to_string()),
        Just("Version".to_string()),
        Just("State".to_string()),
        Just("Dataset".to_string()),
    ]
}

fn arb_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[abc](/[abc]){0,2}").unwrap()
}

fn arb_row() -> impl Strategy<Value = NormalizedRow> {
    (arb_kind(), arb_path()).prop_map(|(kind, path)| {
        let field = match kind.as_str() {
            "Version" => "version_path",
            "State" => "state_path",
            _ => "corpus_path",
        };
        let mut row = NormalizedRow::new();
        row.insert_scalar(RECORD_KIND, kind);
        row.insert_scalar(field, path);
        row
    })
}

proptest! {
    #[test]
    fn build_is_idempotent(rows in proptest::collection::vec(arb_row(), 0..24)) {
        let first = serde_json::to_string(&build_tree(&rows).corpora).unwrap();
        let second = serde_json::to_string(&build_tree(&rows).corpora).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn corpora_keep_submission_order(rows in proptest::collection::vec(arb_row(), 0..24)) {
        let expected: Vec<String> = rows
            .iter()
            .filter(|row| row.scalar(RECORD_KIND) == Some("Corpus"))
            .filter_map(|row| row.scalar("corpus_path"))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect();

        let report = build_tree(&rows);
        let got: Vec<String> = report
            .corpora
            .iter()
            .map(|c| c.corpus_path.clone())
            .collect();

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn attached_children_always_match_their_parent(rows in proptest::collection::vec(arb_row(), 0..24)) {
        let report = build_tree(&rows);
        for corpus in &report.corpora {
            for version in &corpus.versions {
                prop_assert_eq!(
                    version.version_path.split('/').next(),
                    Some(corpus.corpus_path.as_str())
                );
                for state in &version.states {
                    let parent: Vec<&str> = state.state_path.split('/').take(2).collect();
                    prop_assert_eq!(parent.join("/"), version.version_path.clone());
                }
            }
        }
    }
}
