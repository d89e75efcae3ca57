// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages that carry enough context
//! (query, page, ordering) to reproduce the failing call.

use thiserror::Error;

use crate::concordance::order::SortOrder;

/// Failure reported by a corpus service.
#[derive(Debug, Error)]
pub enum AccessorError {
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Document {doc_id} not found (corpus has {doc_count} documents)")]
    DocumentNotFound { doc_id: usize, doc_count: usize },

    #[error("Malformed corpus data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the concordance engine
#[derive(Debug, Error)]
pub enum ConcError {
    #[error(
        "Invalid order: '{order}' (query: \"{query}\")\n\n\
         Order must be one of: {}\n\
         Example: conc concordance \"{query}\" --order 1L2L3L",
        SortOrder::accepted_names().join(", ")
    )]
    InvalidOrderingPolicy { order: String, query: String },

    #[error(
        "Invalid page size: {page_size} (query: \"{query}\")\n\n\
         Page size must be at least 1.\n\
         Example: conc concordance \"{query}\" --page-size 20"
    )]
    InvalidPageSize { page_size: usize, query: String },

    #[error("Corpus access failed for query \"{query}\" (page {page}, order {order}): {source}")]
    Accessor {
        query: String,
        page: usize,
        order: String,
        #[source]
        source: AccessorError,
    },
}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Get suggestion for an empty or unknown query
    pub fn no_matches_suggestion(query: &str) -> String {
        format!(
            "No matches found for '{}'\n\n\
             Try:\n\
             - A different spelling or a shorter phrase\n\
             - Dropping --case-sensitive if it was set\n\
             - Running 'conc info' to check the corpus has documents",
            query
        )
    }

    /// Get suggestion for a corpus directory without documents
    pub fn empty_corpus_suggestion(path: &str) -> String {
        format!(
            "No documents found under '{}'\n\n\
             conc reads .txt and .md files. Point it at a directory of texts:\n\
             $ conc concordance \"the\" --dir /path/to/texts",
            path
        )
    }
}
