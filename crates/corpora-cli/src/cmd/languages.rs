use anyhow::Result;
use comfy_table::{ContentArrangement, Table};

use corpora_core::languages::LanguageIndex;
use corpora_store::{Store, StoreConfig};

use crate::output;

pub fn run(store_root: &str, export: bool) -> Result<()> {
    let languages = LanguageIndex::builtin();

    if export {
        let store = Store::open(StoreConfig::new(store_root))?;
        store.write_languages(languages.entries())?;
        let path = store.languages_path();
        if output::is_json() {
            return output::print(&serde_json::json!({
                "exported": path.display().to_string(),
                "entries": languages.len(),
            }));
        }
        println!("wrote {} entries to {}", languages.len(), path.display());
        return Ok(());
    }

    if output::is_json() {
        return output::print(&languages.entries());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["CODE", "NAME", "ALIASES"]);
    for entry in languages.entries() {
        table.add_row(vec![
            entry.code.clone(),
            entry.name.clone(),
            entry.aliases.join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}
