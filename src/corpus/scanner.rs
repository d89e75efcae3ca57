// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document scanner using the ignore crate (same as ripgrep)

use anyhow::{bail, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::warn;

const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Scanned document with content
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    pub content: String,
}

/// Text document scanner that respects .gitignore
pub struct DocumentScanner {
    root: PathBuf,
}

impl DocumentScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn make_builder(&self) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true)
            .filter_entry(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name != ".git" && name != ".hg" && name != ".svn")
                    .unwrap_or(true)
            });
        builder
    }

    /// Scan all text documents, sorted by path so document ids are stable.
    pub fn scan(&self) -> Result<Vec<ScannedDocument>> {
        if !self.root.is_dir() {
            bail!("Corpus directory not found: {}", self.root.display());
        }

        let (tx, rx) = mpsc::channel();
        let walker = self.make_builder().build_parallel();
        let root = self.root.clone();

        walker.run(|| {
            let tx = tx.clone();
            let root = root.clone();

            Box::new(move |entry| {
                if let Ok(entry) = entry {
                    let path = entry.path();
                    let is_text = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(is_text_extension);
                    if path.is_file() && is_text {
                        match std::fs::read_to_string(path) {
                            Ok(content) => {
                                let relative_path = path
                                    .strip_prefix(&root)
                                    .unwrap_or(path)
                                    .components()
                                    .map(|c| c.as_os_str().to_string_lossy())
                                    .collect::<Vec<_>>()
                                    .join("/");
                                let _ = tx.send(ScannedDocument {
                                    relative_path,
                                    content,
                                });
                            }
                            Err(err) => warn!("skipping {}: {}", path.display(), err),
                        }
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(tx);
        let mut documents: Vec<ScannedDocument> = rx.into_iter().collect();
        documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(documents)
    }
}

/// True when a file extension is read as a corpus document.
pub fn is_text_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    TEXT_EXTENSIONS
        .iter()
        .any(|candidate| *candidate == lower.as_str())
}
