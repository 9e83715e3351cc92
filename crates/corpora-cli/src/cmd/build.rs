use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use corpora_core::build::build_tree;
use corpora_core::diagnostics::Diagnostic;
use corpora_core::languages::LanguageIndex;
use corpora_core::normalize::{rows_from_json, Normalizer};
use corpora_store::{Store, StoreConfig};

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct BuildOut {
    pub rows: usize,
    pub corpora: usize,
    pub versions: usize,
    pub states: usize,
    pub warnings: usize,
    pub metadata_path: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub async fn run(store_root: &str, input_arg: &str, keep_responses: bool) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));

    pb.set_message("resolving input");
    let payload = input::resolve_to_json(input_arg).await?;

    pb.set_message("decoding rows");
    let rows = rows_from_json(&payload)?;

    pb.set_message("normalizing rows");
    let languages = LanguageIndex::builtin();
    let normalized = Normalizer::new(&languages).normalize(&rows);

    pb.set_message("building tree");
    let report = build_tree(&normalized.rows);

    pb.set_message("writing metadata");
    let store = Store::open(StoreConfig::new(store_root))?;
    store.write_metadata(&report.corpora)?;
    if keep_responses {
        store.write_responses(&rows)?;
    }

    pb.finish_and_clear();

    let mut diagnostics = normalized.diagnostics;
    diagnostics.extend(report.diagnostics);

    let versions: usize = report.corpora.iter().map(|c| c.versions.len()).sum();
    let states: usize = report
        .corpora
        .iter()
        .map(|c| c.iter_states().count())
        .sum();

    let out = BuildOut {
        rows: rows.len(),
        corpora: report.corpora.len(),
        versions,
        states,
        warnings: diagnostics.iter().filter(|d| d.is_warning()).count(),
        metadata_path: store.metadata_path().display().to_string(),
        diagnostics,
    };

    if output::is_json() {
        return output::print(&out);
    }

    for diagnostic in &out.diagnostics {
        output::warning(&format!("{}: {}", diagnostic.code, diagnostic.message));
    }
    println!(
        "registered {} corpora ({} versions, {} states) from {} rows",
        out.corpora, out.versions, out.states, out.rows
    );
    println!("metadata written to {}", out.metadata_path);
    Ok(())
}
