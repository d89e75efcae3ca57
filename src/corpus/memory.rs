// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory corpus: vocabulary, flattened token channels and a positional index
//!
//! Documents are laid end to end, each one followed by the end-of-text
//! sentinel:
//!
//! ```text
//! stream:    [the cat sat <eot>][the dog sat still <eot>]
//! token2doc:  0   0   0   0      1   1   1   1     1
//! ```

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

use super::scanner::DocumentScanner;
use super::text::Text;
use super::tokenizer;
use super::{Channel, Corpus, Position, TokenId, TokenizedQuery, UNKNOWN_TOKEN};
use crate::errors::AccessorError;

/// Display string of the end-of-text sentinel
pub const EOT_TOKEN_STR: &str = "<eot>";
/// Sentinel id; always the first vocabulary entry
pub const EOT_TOKEN: TokenId = 0;

#[derive(Debug, Clone)]
struct DocumentSpan {
    start: Position,
    len: usize,
    metadata: BTreeMap<String, String>,
}

/// Corpus size overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub name: String,
    pub documents: usize,
    /// Word and punctuation tokens, sentinels excluded
    pub tokens: usize,
    pub vocabulary: usize,
    pub case_sensitive: bool,
}

/// Incrementally flattens documents into token channels.
#[derive(Debug)]
pub struct CorpusBuilder {
    name: String,
    case_sensitive: bool,
    vocab: Vec<String>,
    lookup: HashMap<String, TokenId>,
    orth: Vec<TokenId>,
    lower: Vec<TokenId>,
    token2doc: Vec<u32>,
    has_spaces: Vec<bool>,
    documents: Vec<DocumentSpan>,
}

impl CorpusBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut builder = Self {
            name: name.into(),
            case_sensitive: false,
            vocab: Vec::new(),
            lookup: HashMap::new(),
            orth: Vec::new(),
            lower: Vec::new(),
            token2doc: Vec::new(),
            has_spaces: Vec::new(),
            documents: Vec::new(),
        };
        let eot = builder.intern(EOT_TOKEN_STR);
        debug_assert_eq!(eot, EOT_TOKEN);
        builder
    }

    /// Match queries against the orthographic channel instead of the lower-cased one
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Build from every text document under `root`, ordered by path.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let mut builder = Self::new(name);
        for doc in DocumentScanner::new(root).scan()? {
            let mut metadata = BTreeMap::new();
            metadata.insert("path".to_string(), doc.relative_path);
            builder.add_document_with_metadata(&doc.content, metadata);
        }
        info!(
            documents = builder.documents.len(),
            tokens = builder.orth.len() - builder.documents.len(),
            "corpus loaded from {}",
            root.display()
        );
        Ok(builder)
    }

    fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.lookup.get(token) {
            return id;
        }
        let id = self.vocab.len() as TokenId;
        self.vocab.push(token.to_string());
        self.lookup.insert(token.to_string(), id);
        id
    }

    /// Append a document, returning its id.
    pub fn add_document(&mut self, name: &str, text: &str) -> usize {
        let mut metadata = BTreeMap::new();
        metadata.insert("name".to_string(), name.to_string());
        self.add_document_with_metadata(text, metadata)
    }

    pub fn add_document_with_metadata(
        &mut self,
        text: &str,
        metadata: BTreeMap<String, String>,
    ) -> usize {
        let doc_id = self.documents.len();
        let start = self.orth.len();
        let tokens = tokenizer::tokenize(text);
        for token in &tokens {
            let orth = self.intern(token.text);
            let lower = self.intern(&token.text.to_lowercase());
            self.orth.push(orth);
            self.lower.push(lower);
            self.token2doc.push(doc_id as u32);
            self.has_spaces.push(token.has_space);
        }
        self.orth.push(EOT_TOKEN);
        self.lower.push(EOT_TOKEN);
        self.token2doc.push(doc_id as u32);
        self.has_spaces.push(false);
        self.documents.push(DocumentSpan {
            start,
            len: tokens.len(),
            metadata,
        });
        doc_id
    }

    pub fn build(self) -> MemoryCorpus {
        // Rank 0 is reserved for the sentinel; everything else sorts by
        // lower-cased form, then by exact form.
        let mut order: Vec<TokenId> = (1..self.vocab.len() as TokenId).collect();
        order.par_sort_by_cached_key(|&id| {
            let form = &self.vocab[id as usize];
            (form.to_lowercase(), form.clone())
        });
        let mut ranks = vec![0u32; self.vocab.len()];
        for (rank, &id) in order.iter().enumerate() {
            ranks[id as usize] = rank as u32 + 1;
        }

        let mut lower_index: HashMap<TokenId, Vec<Position>> = HashMap::new();
        for (position, &id) in self.lower.iter().enumerate() {
            if id != EOT_TOKEN {
                lower_index.entry(id).or_default().push(position);
            }
        }

        // Distinct types as queries see them: folded unless case-sensitive.
        let matched = if self.case_sensitive {
            &self.orth
        } else {
            &self.lower
        };
        let mut seen = vec![false; self.vocab.len()];
        for &id in matched {
            seen[id as usize] = true;
        }
        let types = seen.iter().skip(1).filter(|&&s| s).count();

        debug!(
            vocabulary = types,
            stream_len = self.orth.len(),
            "corpus built"
        );

        MemoryCorpus {
            name: self.name,
            case_sensitive: self.case_sensitive,
            vocab: self.vocab,
            lookup: self.lookup,
            ranks,
            orth: self.orth,
            lower: self.lower,
            token2doc: self.token2doc,
            has_spaces: self.has_spaces,
            documents: self.documents,
            lower_index,
            types,
        }
    }
}

/// Immutable corpus held entirely in memory.
#[derive(Debug)]
pub struct MemoryCorpus {
    name: String,
    case_sensitive: bool,
    vocab: Vec<String>,
    lookup: HashMap<String, TokenId>,
    ranks: Vec<u32>,
    orth: Vec<TokenId>,
    lower: Vec<TokenId>,
    token2doc: Vec<u32>,
    has_spaces: Vec<bool>,
    documents: Vec<DocumentSpan>,
    lower_index: HashMap<TokenId, Vec<Position>>,
    /// Distinct non-sentinel ids on the matching channel
    types: usize,
}

impl MemoryCorpus {
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Length of the flattened stream, sentinels included.
    pub fn stream_len(&self) -> usize {
        self.orth.len()
    }

    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            name: self.name.clone(),
            documents: self.documents.len(),
            tokens: self.orth.len() - self.documents.len(),
            vocabulary: self.types,
            case_sensitive: self.case_sensitive,
        }
    }

    /// Rebuild one document from the stream.
    pub fn text(&self, doc_id: usize) -> Result<Text, AccessorError> {
        let span = self
            .documents
            .get(doc_id)
            .ok_or(AccessorError::DocumentNotFound {
                doc_id,
                doc_count: self.documents.len(),
            })?;
        let range = span.start..span.start + span.len;
        Ok(Text {
            tokens: self.orth[range.clone()]
                .iter()
                .map(|&id| self.vocab[id as usize].clone())
                .collect(),
            has_spaces: self.has_spaces[range].to_vec(),
            metadata: span.metadata.clone(),
        })
    }

    fn column(&self, channel: Channel) -> &[u32] {
        match channel {
            Channel::Orth => &self.orth,
            Channel::Lower => &self.lower,
            Channel::TokenToDoc => &self.token2doc,
        }
    }
}

impl Corpus for MemoryCorpus {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, query: &str) -> TokenizedQuery {
        let channel = if self.case_sensitive {
            Channel::Orth
        } else {
            Channel::Lower
        };
        let sequence: Vec<TokenId> = tokenizer::tokenize_words(query)
            .into_iter()
            .map(|word| {
                let key = if self.case_sensitive {
                    word.to_string()
                } else {
                    word.to_lowercase()
                };
                self.lookup.get(&key).copied().unwrap_or(UNKNOWN_TOKEN)
            })
            .collect();
        let sequences = if sequence.is_empty() {
            Vec::new()
        } else {
            vec![sequence]
        };
        TokenizedQuery { sequences, channel }
    }

    fn locate_matches(
        &self,
        sequence: &[TokenId],
        channel: Channel,
    ) -> Result<Vec<Position>, AccessorError> {
        let Some((&first, rest)) = sequence.split_first() else {
            return Ok(Vec::new());
        };
        let column = match channel {
            Channel::Orth | Channel::Lower => self.column(channel),
            Channel::TokenToDoc => {
                return Err(AccessorError::UnknownChannel(format!(
                    "{channel} is not a searchable channel"
                )))
            }
        };

        let candidates: Vec<Position> = match channel {
            Channel::Lower => self.lower_index.get(&first).cloned().unwrap_or_default(),
            _ => column
                .par_iter()
                .enumerate()
                .filter(|(_, id)| **id == first)
                .map(|(position, _)| position)
                .collect(),
        };

        Ok(candidates
            .into_iter()
            .filter(|&start| {
                start + sequence.len() <= column.len()
                    && rest
                        .iter()
                        .enumerate()
                        .all(|(i, &id)| column[start + 1 + i] == id)
            })
            .collect())
    }

    fn read_channel(&self, channel: Channel) -> Result<&[u32], AccessorError> {
        Ok(self.column(channel))
    }

    fn resolve_rank(&self, token_ids: &[TokenId]) -> Result<Vec<u32>, AccessorError> {
        token_ids
            .iter()
            .map(|&id| {
                self.ranks
                    .get(id as usize)
                    .copied()
                    .ok_or_else(|| AccessorError::Malformed(format!("token id {id} has no rank")))
            })
            .collect()
    }

    fn resolve_display_string(&self, token_ids: &[TokenId]) -> Result<Vec<String>, AccessorError> {
        token_ids
            .iter()
            .map(|&id| {
                self.vocab.get(id as usize).cloned().ok_or_else(|| {
                    AccessorError::Malformed(format!("token id {id} is not in the vocabulary"))
                })
            })
            .collect()
    }

    fn eot_token(&self) -> TokenId {
        EOT_TOKEN
    }
}
