use anyhow::{anyhow, Result};
use comfy_table::{ContentArrangement, Table};

use corpora_core::discover::distinct_values;

use crate::cmd;
use crate::output;

pub fn run(store_root: &str, attribute: &str) -> Result<()> {
    let corpora = cmd::read_metadata(store_root)?;

    let values = distinct_values(&corpora, attribute)
        .ok_or_else(|| anyhow!("unrecognized attribute '{attribute}'"))?;

    if output::is_json() {
        return output::print(&values);
    }

    if values.is_empty() {
        println!("No values found.\nTry 'corpora discover --help' for more information.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#".to_string(), attribute.to_uppercase()]);
    for (index, value) in values.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), value.clone()]);
    }

    println!("{table}");
    Ok(())
}
