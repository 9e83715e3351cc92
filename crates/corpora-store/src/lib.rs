//! Local persistence for the corpora registry.
//!
//! The store is a flat directory of JSON documents:
//! - `metadata.json` — the nested corpus tree, the query engine's input
//! - `responses.json` — the decoded raw submission rows, kept for reference
//! - `languages.json` — an export of the language reference table
//!
//! The tree is rebuilt from scratch on every build pass, so writes simply
//! replace the previous document; there are no transactions and no
//! incremental updates.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use corpora_core::languages::LanguageEntry;
use corpora_core::model::Corpus;
use corpora_core::normalize::RawRow;

pub const METADATA_FILENAME: &str = "metadata.json";
pub const RESPONSES_FILENAME: &str = "responses.json";
pub const LANGUAGES_FILENAME: &str = "languages.json";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no metadata found at {0}; run a build first")]
    MissingMetadata(PathBuf),
}

/// Store location. Separate from [`Store`] so callers can construct and
/// validate configuration before touching the filesystem.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// A directory of registry documents.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) the store directory.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.root)?;
        Ok(Self { root: config.root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILENAME)
    }

    pub fn responses_path(&self) -> PathBuf {
        self.root.join(RESPONSES_FILENAME)
    }

    pub fn languages_path(&self) -> PathBuf {
        self.root.join(LANGUAGES_FILENAME)
    }

    /// Replace the persisted corpus tree.
    pub fn write_metadata(&self, corpora: &[Corpus]) -> StoreResult<()> {
        write_json(&self.metadata_path(), corpora)
    }

    /// Read the persisted corpus tree.
    pub fn read_metadata(&self) -> StoreResult<Vec<Corpus>> {
        let path = self.metadata_path();
        if !path.exists() {
            return Err(StoreError::MissingMetadata(path));
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Keep the decoded raw rows next to the metadata, for reference.
    pub fn write_responses(&self, rows: &[RawRow]) -> StoreResult<()> {
        write_json(&self.responses_path(), rows)
    }

    /// Export the language reference table.
    pub fn write_languages(&self, entries: &[LanguageEntry]) -> StoreResult<()> {
        write_json(&self.languages_path(), entries)
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use corpora_core::model::TriState;

    fn corpus(path: &str) -> Corpus {
        Corpus {
            corpus_path: path.to_string(),
            corpus_name: Some("Foo".to_string()),
            domain: None,
            provider: None,
            license: None,
            source: None,
            languages: vec!["en".to_string()],
            parallel: Some(TriState::Unknown),
            aggregated: None,
            document_level: None,
            third_parties: vec![],
            publishable: None,
            comments: None,
            versions: vec![],
        }
    }

    #[test]
    fn metadata_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).unwrap();

        let corpora = vec![corpus("c1"), corpus("c2")];
        store.write_metadata(&corpora).unwrap();

        let restored = store.read_metadata().unwrap();
        assert_eq!(restored, corpora);
    }

    #[test]
    fn missing_metadata_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path().join("nested"))).unwrap();

        let err = store.read_metadata().unwrap_err();
        assert!(matches!(err, StoreError::MissingMetadata(_)));
    }

    #[test]
    fn responses_and_languages_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).unwrap();

        let mut row = RawRow::new();
        row.insert("corpus_path".to_string(), "c1".to_string());
        store.write_responses(&[row]).unwrap();
        assert!(store.responses_path().exists());

        let entries = vec![LanguageEntry {
            code: "en".to_string(),
            name: "English".to_string(),
            aliases: vec![],
        }];
        store.write_languages(&entries).unwrap();
        let raw = fs::read_to_string(store.languages_path()).unwrap();
        assert!(raw.contains("\"English\""));
    }

    #[test]
    fn rewrites_replace_the_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).unwrap();

        store.write_metadata(&[corpus("c1"), corpus("c2")]).unwrap();
        store.write_metadata(&[corpus("c3")]).unwrap();

        let restored = store.read_metadata().unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].corpus_path, "c3");
    }
}
