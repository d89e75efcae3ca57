// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paginated concordance results handed to the presentation layer

use serde::Serialize;

use super::order::{Offset, SortOrder};
use crate::corpus::{Position, TokenId};

/// Totals and paging state for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub total_docs: usize,
    /// Page served (after clamping); 0 when there are no matches
    pub page: usize,
    pub total_pages: usize,
}

/// Raw sort and context columns, only present in full-column output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDetail {
    pub position: Position,
    /// Row index in coarse (primary-key) order
    pub row: usize,
    pub sort_ranks: [u32; 3],
    /// Token id per entry of the report's `context_offsets`
    pub token_ids: Vec<TokenId>,
}

/// One KWIC line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceLine {
    pub document_id: u32,
    pub left: String,
    pub node: String,
    pub right: String,
    #[serde(flatten)]
    pub detail: Option<LineDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceReport {
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub query: String,
    pub order: SortOrder,
    pub context_length: usize,
    pub summary: Summary,
    /// Human-readable summary lines
    pub formatted: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_offsets: Option<Vec<Offset>>,
    pub rows: Vec<ConcordanceLine>,
}

impl ConcordanceReport {
    pub(crate) fn title_for(query: &str) -> String {
        format!("Concordance for \"{}\"", query)
    }

    /// Report for a query that located nothing.
    pub fn empty(query: &str, order: SortOrder, context_length: usize) -> Self {
        Self {
            kind: "concordance",
            title: Self::title_for(query),
            description: "No matches".to_string(),
            query: query.to_string(),
            order,
            context_length,
            summary: Summary::default(),
            formatted: Vec::new(),
            context_offsets: None,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total_count == 0
    }
}

pub(crate) fn formatted_summary(summary: &Summary, shown: usize) -> Vec<String> {
    vec![
        format!("Total Concordance Lines: {}", summary.total_count),
        format!("Total Documents: {}", summary.total_docs),
        format!("Showing {} lines", shown),
        format!("Page {} of {}", summary.page, summary.total_pages),
    ]
}
