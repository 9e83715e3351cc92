use anyhow::Result;
use comfy_table::{ContentArrangement, Table};

use corpora_core::fields::DISPLAY_ATTRIBUTES;
use corpora_core::languages::LanguageIndex;
use corpora_core::query::{Query, QueryEngine, QueryValue};

use crate::args::FindArgs;
use crate::cmd;
use crate::output;

pub fn run(store_root: &str, args: &FindArgs) -> Result<()> {
    let corpora = cmd::read_metadata(store_root)?;

    let (query, _ignored) = Query::from_pairs(query_pairs(args));
    let languages = LanguageIndex::builtin();
    let engine = QueryEngine::new(&languages);
    let matches = engine.filter(&corpora, &query);

    if output::is_json() {
        return output::print(&matches);
    }

    if matches.is_empty() {
        println!("No matches found.\nTry 'corpora find --help' for more information.");
        return Ok(());
    }

    println!("There are {} matches:\n", matches.len());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(DISPLAY_ATTRIBUTES.iter().map(|attr| attr.to_uppercase()));
    table.set_header(header);

    for (index, corpus) in matches.iter().enumerate() {
        let [path, name, domain] = corpus.display_fields();
        table.add_row(vec![
            (index + 1).to_string(),
            path.to_string(),
            name.to_string(),
            domain.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Lower the typed CLI arguments into the engine's sparse predicate pairs.
fn query_pairs(args: &FindArgs) -> Vec<(String, QueryValue)> {
    let mut pairs = Vec::new();

    push_list(&mut pairs, "languages", &args.languages);
    push_list(&mut pairs, "third_parties", &args.third_parties);
    push_scalar(&mut pairs, "domain", &args.domain);
    push_scalar(&mut pairs, "provider", &args.provider);
    push_scalar(&mut pairs, "parallel", &args.parallel);
    push_scalar(&mut pairs, "aggregated", &args.aggregated);
    push_scalar(&mut pairs, "document_level", &args.document_level);
    push_scalar(&mut pairs, "publishable", &args.publishable);
    push_list(&mut pairs, "actions", &args.actions);
    push_list(&mut pairs, "annotation_types", &args.annotation_types);
    push_scalar(&mut pairs, "encoding", &args.encoding);
    push_scalar(&mut pairs, "format", &args.format);
    push_scalar(&mut pairs, "email_address", &args.email_address);

    pairs
}

fn push_list(pairs: &mut Vec<(String, QueryValue)>, key: &str, value: &Option<Vec<String>>) {
    if let Some(items) = value {
        pairs.push((key.to_string(), QueryValue::List(items.clone())));
    }
}

fn push_scalar(pairs: &mut Vec<(String, QueryValue)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        pairs.push((key.to_string(), QueryValue::Scalar(v.clone())));
    }
}
