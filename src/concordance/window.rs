// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context window materialization for the rows around one page
//!
//! Gathers one token column per context offset for the expanded slice,
//! ranks the secondary and tertiary collocates, re-sorts the slice on the
//! full key and cuts the exact page out of it.

use std::time::Instant;
use tracing::debug;

use super::order::{Offset, SortOffsets};
use super::rank::{gather, resolve_ranks, CoarseRow};
use super::slice::PageSlice;
use crate::corpus::{Channel, Corpus, Position, TokenId};
use crate::errors::AccessorError;

/// A fully keyed row of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRow {
    pub position: Position,
    /// Coarse-order row index
    pub row: usize,
    pub document_id: u32,
    /// Ranks of the three sort-key collocates
    pub ranks: [u32; 3],
    /// Token id at each context offset, in offset order
    pub tokens: Vec<TokenId>,
}

/// Offsets displayed around a node: `-context_length ..= context_length + sequence_len - 1`.
///
/// Widths beyond `Offset::MAX` saturate; callers clamp to the stream length first.
pub fn context_offsets(context_length: usize, sequence_len: usize) -> Vec<Offset> {
    let width = Offset::try_from(context_length).unwrap_or(Offset::MAX);
    let node = Offset::try_from(sequence_len).unwrap_or(Offset::MAX);
    (width.saturating_neg()..width.saturating_add(node)).collect()
}

/// Materialize, fully sort and cut out the rows of `slice`.
pub fn materialize_page<C: Corpus + ?Sized>(
    corpus: &C,
    rows: &[CoarseRow],
    slice: &PageSlice,
    sort_offsets: &SortOffsets,
    offsets: &[Offset],
) -> Result<Vec<WindowRow>, AccessorError> {
    let started = Instant::now();
    let expanded = &rows[slice.expanded.clone()];
    let positions: Vec<Position> = expanded.iter().map(|r| r.position).collect();
    let eot = corpus.eot_token();
    let orth = corpus.read_channel(Channel::Orth)?;

    let columns: Vec<Vec<TokenId>> = offsets
        .iter()
        .map(|&offset| gather(orth, &positions, offset, eot))
        .collect();

    // Secondary and tertiary keys. A key outside the displayed window is
    // gathered on its own.
    let mut key_ranks: [Vec<u32>; 2] = [Vec::new(), Vec::new()];
    for (slot, &key_offset) in sort_offsets[1..].iter().enumerate() {
        let ranks = match offsets.iter().position(|&o| o == key_offset) {
            Some(i) => resolve_ranks(corpus, &columns[i])?,
            None => resolve_ranks(corpus, &gather(orth, &positions, key_offset, eot))?,
        };
        key_ranks[slot] = ranks;
    }

    let docs = corpus.read_channel(Channel::TokenToDoc)?;
    let document_ids = gather(docs, &positions, 0, u32::MAX);

    let mut window: Vec<WindowRow> = expanded
        .iter()
        .enumerate()
        .map(|(i, coarse)| WindowRow {
            position: coarse.position,
            row: coarse.row,
            document_id: document_ids[i],
            ranks: [coarse.rank0, key_ranks[0][i], key_ranks[1][i]],
            tokens: columns.iter().map(|column| column[i]).collect(),
        })
        .collect();

    // Stable: full-key ties keep coarse order, which keeps match order.
    window.sort_by_key(|row| row.ranks);

    debug!(
        expanded = window.len(),
        page_len = slice.page_len,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "materialized concordance window"
    );

    let from = slice.page_offset();
    Ok(window.drain(from..from + slice.page_len).collect())
}
