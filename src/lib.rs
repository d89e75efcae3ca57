// SPDX-License-Identifier: MIT OR Apache-2.0

//! conc - corpus concordancer
//!
//! Locates a token sequence in a tokenized corpus and serves pages of
//! keyword-in-context lines sorted on surrounding collocates, without fully
//! sorting every match for each page.

pub mod concordance;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod output;

pub use concordance::{Concordance, ConcordanceOptions, ConcordanceReport, SortOrder};
pub use corpus::{Corpus, CorpusBuilder, MemoryCorpus};
pub use errors::{AccessorError, ConcError};
