// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page planning over the coarse order
//!
//! Secondary keys can reorder rows only within a run of equal primary
//! ranks, so a page is always contained in the rows spanned by the tie
//! groups at its first and last row:
//!
//! ```text
//! row:     0 1 2 3 4 5 6 7
//! rank0:   a a b b b b c c      page 2 of size 4 = rows 4..8
//! expanded:    [b b b b c c]    rows 2..8
//! ```

use std::ops::Range;
use tracing::warn;

use super::rank::CoarseRow;

/// Rows to materialize for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Page actually served, 1-indexed, after clamping
    pub page: usize,
    pub total_pages: usize,
    /// First row of the page in full sort order
    pub page_start: usize,
    pub page_len: usize,
    /// Coarse rows to materialize, widened to whole tie groups
    pub expanded: Range<usize>,
}

impl PageSlice {
    /// Offset of the page within the re-sorted expanded slice.
    pub fn page_offset(&self) -> usize {
        self.page_start - self.expanded.start
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size)
}

/// Plan the slice for `page`, clamping out-of-range pages into `1..=total_pages`.
///
/// Returns `None` when there are no rows. `page_size` must be non-zero.
pub fn plan_page(rows: &[CoarseRow], page: usize, page_size: usize) -> Option<PageSlice> {
    if rows.is_empty() || page_size == 0 {
        return None;
    }
    let total_pages = total_pages(rows.len(), page_size);
    let clamped = page.clamp(1, total_pages);
    if clamped != page {
        warn!(
            requested = page,
            served = clamped,
            total_pages,
            "page out of range, clamping"
        );
    }

    let page_start = (clamped - 1) * page_size;
    let page_end = (page_start + page_size).min(rows.len()) - 1;

    let start_rank = rows[page_start].rank0;
    let end_rank = rows[page_end].rank0;
    let expanded_start = rows.partition_point(|r| r.rank0 < start_rank);
    let expanded_end = rows.partition_point(|r| r.rank0 <= end_rank);

    Some(PageSlice {
        page: clamped,
        total_pages,
        page_start,
        page_len: page_end + 1 - page_start,
        expanded: expanded_start..expanded_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ranks: &[u32]) -> Vec<CoarseRow> {
        ranks
            .iter()
            .enumerate()
            .map(|(row, &rank0)| CoarseRow {
                position: row * 10,
                row,
                rank0,
            })
            .collect()
    }

    #[test]
    fn widens_to_tie_groups_at_both_edges() {
        let table = rows(&[1, 1, 2, 2, 2, 2, 3, 3, 3]);
        let slice = plan_page(&table, 2, 4).expect("slice");
        assert_eq!(slice.page_start, 4);
        assert_eq!(slice.page_len, 4);
        assert_eq!(slice.expanded, 2..9);
        assert_eq!(slice.page_offset(), 2);
        assert_eq!(slice.total_pages, 3);
    }

    #[test]
    fn distinct_ranks_need_no_widening() {
        let table = rows(&[1, 2, 3, 4, 5]);
        let slice = plan_page(&table, 1, 2).expect("slice");
        assert_eq!(slice.expanded, 0..2);
        assert_eq!(slice.page_offset(), 0);
    }

    #[test]
    fn last_partial_page() {
        let table = rows(&[1, 2, 3, 4, 5]);
        let slice = plan_page(&table, 3, 2).expect("slice");
        assert_eq!(slice.page_start, 4);
        assert_eq!(slice.page_len, 1);
        assert_eq!(slice.expanded, 4..5);
    }

    #[test]
    fn clamps_out_of_range_pages() {
        let table = rows(&[1, 2, 3, 4, 5]);
        assert_eq!(plan_page(&table, 99, 2).expect("slice").page, 3);
        assert_eq!(plan_page(&table, 0, 2).expect("slice").page, 1);
    }

    #[test]
    fn empty_table_has_no_slice() {
        assert_eq!(plan_page(&[], 1, 10), None);
    }

    #[test]
    fn single_tie_group_spans_everything() {
        let table = rows(&[7; 6]);
        let slice = plan_page(&table, 2, 2).expect("slice");
        assert_eq!(slice.expanded, 0..6);
        assert_eq!(slice.page_offset(), 2);
    }
}
