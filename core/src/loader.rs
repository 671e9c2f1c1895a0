use crate::corpus::Corpus;
use crate::engine::SearchEngine;
use crate::tokenizer::TokenizerKind;
use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decoded text of one file plus the name it is searched under.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub name: String,
    pub content: String,
}

/// Read every regular file in `dir` (and below it when `recursive`), in
/// file-name order. Files that cannot be read are logged and skipped.
pub fn load_directory<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<LoadedDocument>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut docs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        let name = path.strip_prefix(dir).unwrap_or(path).to_string_lossy().into_owned();
        tracing::debug!(%name, bytes = bytes.len(), "loaded document");
        docs.push(LoadedDocument { name, content: String::from_utf8_lossy(&bytes).into_owned() });
    }

    tracing::info!(dir = %dir.display(), num_docs = docs.len(), "loaded corpus");
    Ok(docs)
}

/// Where and how to build an engine from files on disk.
#[derive(Debug, Clone)]
pub struct CorpusSource {
    pub dir: PathBuf,
    pub recursive: bool,
    pub tokenizer: TokenizerKind,
}

impl CorpusSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), recursive: false, tokenizer: TokenizerKind::default() }
    }

    pub fn load(&self) -> Result<SearchEngine<TokenizerKind>> {
        let loaded = load_directory(&self.dir, self.recursive)?;
        let mut corpus = Corpus::with_tokenizer(self.tokenizer);
        corpus.extend_loaded(loaded);
        Ok(corpus.into_engine())
    }
}
