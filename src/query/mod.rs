// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query module - concordance, document and corpus summary commands

pub mod concordance;
pub mod info;
pub mod text;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use conc::corpus::{CorpusBuilder, MemoryCorpus};
use conc::errors::suggestions;

fn resolve_root(cwd: &Path, raw_path: Option<&str>) -> PathBuf {
    let raw = raw_path.unwrap_or(".");
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Build the corpus for a command from its directory argument.
pub fn load_corpus(dir: Option<&str>, case_sensitive: bool) -> Result<MemoryCorpus> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = resolve_root(&cwd, dir);
    if !root.exists() {
        bail!("Path not found: {}", root.display());
    }
    if !root.is_dir() {
        bail!("Corpus path must be a directory: {}", root.display());
    }

    let corpus = CorpusBuilder::from_dir(&root)
        .with_context(|| format!("Failed to read corpus from {}", root.display()))?
        .case_sensitive(case_sensitive)
        .build();
    if corpus.document_count() == 0 {
        bail!(suggestions::empty_corpus_suggestion(&root.display().to_string()));
    }
    Ok(corpus)
}
