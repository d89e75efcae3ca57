// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering policies and the collocate offsets they sort on

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Offset relative to a match start. Negative offsets are left of the node.
pub type Offset = isize;

/// The three collocate offsets sorted on, primary key first.
pub type SortOffsets = [Offset; 3];

/// Named collocate ordering for concordance lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// 1L2L3L: first, second, third token left of the node
    LeftNatural,
    /// 3L2L1L
    LeftReversed,
    /// 2L1L1R
    Left2Right1,
    /// 1L1R2R
    Left1Right2,
    /// 1R2R3R: first, second, third token right of the node
    #[default]
    RightNatural,
}

const ACCEPTED_NAMES: &[&str] = &[
    "1L2L3L",
    "natural-left",
    "LEFT",
    "3L2L1L",
    "natural-left-reversed",
    "2L1L1R",
    "left2-right1",
    "1L1R2R",
    "left1-right2",
    "1R2R3R",
    "right-natural",
    "natural-right",
    "RIGHT",
];

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::LeftNatural,
        SortOrder::LeftReversed,
        SortOrder::Left2Right1,
        SortOrder::Left1Right2,
        SortOrder::RightNatural,
    ];

    /// Every spelling `parse` accepts, for error messages and help text.
    pub fn accepted_names() -> &'static [&'static str] {
        ACCEPTED_NAMES
    }

    pub fn parse(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "1L2L3L" | "LEFT" | "NATURAL-LEFT" => Some(SortOrder::LeftNatural),
            "3L2L1L" | "NATURAL-LEFT-REVERSED" => Some(SortOrder::LeftReversed),
            "2L1L1R" | "LEFT2-RIGHT1" => Some(SortOrder::Left2Right1),
            "1L1R2R" | "LEFT1-RIGHT2" => Some(SortOrder::Left1Right2),
            "1R2R3R" | "RIGHT" | "RIGHT-NATURAL" | "NATURAL-RIGHT" => {
                Some(SortOrder::RightNatural)
            }
            _ => None,
        }
    }

    /// Canonical code, e.g. `1R2R3R`.
    pub fn code(self) -> &'static str {
        match self {
            SortOrder::LeftNatural => "1L2L3L",
            SortOrder::LeftReversed => "3L2L1L",
            SortOrder::Left2Right1 => "2L1L1R",
            SortOrder::Left1Right2 => "1L1R2R",
            SortOrder::RightNatural => "1R2R3R",
        }
    }

    /// Offsets of the sort-key collocates for a node of `sequence_len` tokens.
    ///
    /// Right-hand keys start after the whole node, so multi-token matches sort
    /// on what follows them rather than on their own second token.
    pub fn sort_offsets(self, sequence_len: usize) -> SortOffsets {
        let left = |k: Offset| -k;
        let right = |k: Offset| sequence_len as Offset + k - 1;
        match self {
            SortOrder::LeftNatural => [left(1), left(2), left(3)],
            SortOrder::LeftReversed => [left(3), left(2), left(1)],
            SortOrder::Left2Right1 => [left(2), left(1), right(1)],
            SortOrder::Left1Right2 => [left(1), right(1), right(2)],
            SortOrder::RightNatural => [right(1), right(2), right(3)],
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| s.to_string())
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
