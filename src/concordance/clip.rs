// SPDX-License-Identifier: MIT OR Apache-2.0

//! Left / node / right strings, clipped at document boundaries

use super::order::Offset;
use crate::corpus::TokenId;

/// Display strings of one concordance line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClippedLine {
    pub left: String,
    pub node: String,
    pub right: String,
}

/// Split one row of context tokens into left, node and right strings.
///
/// `ids` and `strings` are parallel to `offsets`. The left context keeps only
/// what follows its last sentinel, the right context only what precedes its
/// first sentinel; the node is never clipped.
pub fn clip_line(
    offsets: &[Offset],
    sequence_len: usize,
    ids: &[TokenId],
    strings: &[&str],
    eot: TokenId,
) -> ClippedLine {
    let node_end = sequence_len as Offset;
    let left_len = offsets.iter().take_while(|&&o| o < 0).count();
    let right_start = offsets
        .iter()
        .position(|&o| o >= node_end)
        .unwrap_or(offsets.len());

    let left_from = ids[..left_len]
        .iter()
        .rposition(|&id| id == eot)
        .map_or(0, |i| i + 1);
    let right_to = ids[right_start..]
        .iter()
        .position(|&id| id == eot)
        .map_or(offsets.len(), |i| right_start + i);

    ClippedLine {
        left: strings[left_from..left_len].join(" "),
        node: strings[left_len..right_start].join(" "),
        right: strings[right_start..right_to].join(" "),
    }
}
