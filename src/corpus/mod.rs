// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus service consumed by the concordance engine
//!
//! The engine only talks to a corpus through the [`Corpus`] trait: a
//! flattened token stream (documents laid end to end, each followed by the
//! end-of-text sentinel) exposed as fixed-width columns addressable by
//! absolute position. [`MemoryCorpus`] is the in-process implementation.

pub mod memory;
pub mod scanner;
pub mod text;
pub mod tokenizer;

use serde::Serialize;
use std::fmt;

use crate::errors::AccessorError;

pub use memory::{CorpusBuilder, CorpusSummary, MemoryCorpus};
pub use text::Text;

/// Interned token id.
pub type TokenId = u32;

/// Absolute offset into the flattened token stream.
pub type Position = usize;

/// Id reported for query tokens absent from the vocabulary; never occurs in a channel.
pub const UNKNOWN_TOKEN: TokenId = TokenId::MAX;

/// Column of the flattened token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Orthographic form as written
    Orth,
    /// Lower-cased form, used for case-insensitive matching
    Lower,
    /// Document id of each position
    TokenToDoc,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Orth => "orth_index",
            Channel::Lower => "lower_index",
            Channel::TokenToDoc => "token2doc_index",
        };
        f.write_str(name)
    }
}

/// Query split into candidate token sequences, plus the channel to search them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedQuery {
    pub sequences: Vec<Vec<TokenId>>,
    pub channel: Channel,
}

impl TokenizedQuery {
    /// The sequence concordancing runs on, if the query produced any tokens.
    pub fn primary(&self) -> Option<&[TokenId]> {
        self.sequences
            .first()
            .map(Vec::as_slice)
            .filter(|seq| !seq.is_empty())
    }
}

/// Read-only corpus access. Implementations must be safe to share across threads.
pub trait Corpus: Send + Sync {
    /// Display name used in report descriptions
    fn name(&self) -> &str;

    /// Tokenize a query. Unknown or empty queries must not fail: they yield
    /// sequences that locate zero matches.
    fn tokenize(&self, query: &str) -> TokenizedQuery;

    /// Every start position of `sequence` in `channel`, ascending.
    fn locate_matches(
        &self,
        sequence: &[TokenId],
        channel: Channel,
    ) -> Result<Vec<Position>, AccessorError>;

    /// Whole column, indexable by absolute position.
    fn read_channel(&self, channel: Channel) -> Result<&[u32], AccessorError>;

    /// Comparable sort rank per token id.
    fn resolve_rank(&self, token_ids: &[TokenId]) -> Result<Vec<u32>, AccessorError>;

    /// Display string per token id.
    fn resolve_display_string(&self, token_ids: &[TokenId]) -> Result<Vec<String>, AccessorError>;

    /// Reserved id separating documents in the stream.
    fn eot_token(&self) -> TokenId;
}
