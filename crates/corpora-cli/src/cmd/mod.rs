use anyhow::{anyhow, Result};

use corpora_core::model::Corpus;
use corpora_store::{Store, StoreConfig, StoreError};

use crate::args::{Cli, Command};

mod build;
mod discover;
mod find;
mod languages;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            input,
            keep_responses,
        } => build::run(&cli.store_root, &input, keep_responses).await,
        Command::Find(args) => find::run(&cli.store_root, &args),
        Command::Discover { attribute } => discover::run(&cli.store_root, &attribute),
        Command::Languages { export } => languages::run(&cli.store_root, export),
    }
}

/// Read the persisted tree, turning a missing store into actionable advice.
pub(crate) fn read_metadata(store_root: &str) -> Result<Vec<Corpus>> {
    let store = Store::open(StoreConfig::new(store_root))?;
    match store.read_metadata() {
        Ok(corpora) => Ok(corpora),
        Err(StoreError::MissingMetadata(path)) => Err(anyhow!(
            "no metadata at {}; run 'corpora build <input>' first",
            path.display()
        )),
        Err(e) => Err(e.into()),
    }
}
