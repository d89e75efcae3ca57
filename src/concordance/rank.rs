// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coarse ordering of all matches on the primary sort key
//!
//! This is the only step that touches every match: one bulk gather of the
//! primary collocate, one rank lookup and one stable sort. Everything after
//! it works on a page-sized slice.

use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

use super::order::{Offset, SortOffsets};
use crate::corpus::{Channel, Corpus, Position, TokenId};
use crate::errors::AccessorError;

/// One match in coarse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoarseRow {
    pub position: Position,
    /// Dense index of this row in coarse order
    pub row: usize,
    /// Rank of the primary sort-key collocate
    pub rank0: u32,
}

/// All matches of a query sorted on the primary key, plus totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoarseTable {
    pub rows: Vec<CoarseRow>,
    pub total_docs: usize,
}

impl CoarseTable {
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read `column` at `position + offset` for every position in one bulk pass.
///
/// Positions outside the stream read as `fill`, so the stream edges behave
/// like document boundaries.
pub fn gather(column: &[u32], positions: &[Position], offset: Offset, fill: TokenId) -> Vec<u32> {
    positions
        .par_iter()
        .map(|&position| {
            position
                .checked_add_signed(offset)
                .and_then(|at| column.get(at).copied())
                .unwrap_or(fill)
        })
        .collect()
}

/// Rank lookup that insists on one rank per token.
pub fn resolve_ranks<C: Corpus + ?Sized>(
    corpus: &C,
    token_ids: &[TokenId],
) -> Result<Vec<u32>, AccessorError> {
    let ranks = corpus.resolve_rank(token_ids)?;
    if ranks.len() != token_ids.len() {
        return Err(AccessorError::Malformed(format!(
            "rank lookup returned {} values for {} tokens",
            ranks.len(),
            token_ids.len()
        )));
    }
    Ok(ranks)
}

/// Sort every match on the rank of its primary collocate.
///
/// Ties keep the order `positions` arrived in.
pub fn rank_matches<C: Corpus + ?Sized>(
    corpus: &C,
    positions: &[Position],
    sort_offsets: &SortOffsets,
) -> Result<CoarseTable, AccessorError> {
    let started = Instant::now();
    let eot = corpus.eot_token();

    let orth = corpus.read_channel(Channel::Orth)?;
    let key_ids = gather(orth, positions, sort_offsets[0], eot);
    let ranks = resolve_ranks(corpus, &key_ids)?;

    let mut pairs: Vec<(Position, u32)> = positions.iter().copied().zip(ranks).collect();
    // par_sort_by_key is stable
    pairs.par_sort_by_key(|&(_, rank)| rank);
    let rows = pairs
        .into_iter()
        .enumerate()
        .map(|(row, (position, rank0))| CoarseRow {
            position,
            row,
            rank0,
        })
        .collect();

    let docs = corpus.read_channel(Channel::TokenToDoc)?;
    let mut doc_ids = gather(docs, positions, 0, u32::MAX);
    doc_ids.par_sort_unstable();
    doc_ids.dedup();

    debug!(
        matches = positions.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "coarse sort on offset {}",
        sort_offsets[0]
    );

    Ok(CoarseTable {
        rows,
        total_docs: doc_ids.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concordance::order::SortOrder;
    use crate::corpus::CorpusBuilder;

    #[test]
    fn gather_clamps_to_stream_edges() {
        let column = [10, 11, 12];
        assert_eq!(gather(&column, &[0, 1, 2], -1, 0), vec![0, 10, 11]);
        assert_eq!(gather(&column, &[0, 1, 2], 1, 0), vec![11, 12, 0]);
    }

    #[test]
    fn coarse_sort_is_stable_on_ties() {
        let mut builder = CorpusBuilder::new("ties");
        builder.add_document("a", "x b y a z b w a");
        let corpus = builder.build();
        // "x", "y", "z", "w" are followed by b, a, b, a
        let positions = vec![0, 2, 4, 6];
        let offsets = SortOrder::RightNatural.sort_offsets(1);
        let table = rank_matches(&corpus, &positions, &offsets).expect("rank");

        let order: Vec<Position> = table.rows.iter().map(|r| r.position).collect();
        assert_eq!(order, vec![2, 6, 0, 4]);
        let rows: Vec<usize> = table.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert_eq!(table.total_docs, 1);
        assert_eq!(table.total_count(), 4);
    }

    #[test]
    fn counts_distinct_documents() {
        let mut builder = CorpusBuilder::new("docs");
        builder.add_document("a", "one two one");
        builder.add_document("b", "one");
        builder.add_document("c", "two");
        let corpus = builder.build();
        let query = corpus.tokenize("one");
        let positions = corpus
            .locate_matches(query.primary().expect("seq"), query.channel)
            .expect("locate");
        assert_eq!(positions.len(), 3);
        let offsets = SortOrder::LeftNatural.sort_offsets(1);
        let table = rank_matches(&corpus, &positions, &offsets).expect("rank");
        assert_eq!(table.total_docs, 2);
    }
}
