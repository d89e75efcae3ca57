// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concordance retrieval and windowing engine
//!
//! A request runs locate -> coarse rank -> slice -> materialize -> clip.
//! Locating and coarse ranking touch every match and are cached per
//! (query, order); the remaining steps only touch the rows around the
//! requested page.

pub mod cache;
pub mod clip;
pub mod order;
pub mod rank;
pub mod report;
pub mod slice;
pub mod window;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::corpus::{Channel, Corpus};
use crate::errors::{AccessorError, ConcError};

pub use cache::{CacheKey, CacheStats, ResultCache};
pub use order::SortOrder;
pub use report::{ConcordanceLine, ConcordanceReport, LineDetail, Summary};

use cache::CacheEntry;
use clip::clip_line;
use order::Offset;
use rank::rank_matches;
use slice::plan_page;
use window::{context_offsets, materialize_page, WindowRow};

/// Cache tag for concordance tables
pub const CONCORDANCE_TAG: &str = "concordance";
pub const DEFAULT_CONTEXT_LENGTH: usize = 5;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Per-request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcordanceOptions {
    /// Tokens shown on each side of the node
    pub context_length: usize,
    /// Ordering policy name, see [`SortOrder::accepted_names`]
    pub order: String,
    pub page_size: usize,
    /// 1-indexed; clamped into range
    pub page: usize,
    /// Include positions, sort ranks and raw context token ids
    pub show_all_columns: bool,
    pub use_cache: bool,
}

impl Default for ConcordanceOptions {
    fn default() -> Self {
        Self {
            context_length: DEFAULT_CONTEXT_LENGTH,
            order: SortOrder::default().code().to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            show_all_columns: false,
            use_cache: true,
        }
    }
}

/// Concordancer over a shared corpus.
///
/// Safe to share across threads: the corpus is read-only and the cache
/// serializes its own writes.
pub struct Concordance<C: ?Sized> {
    corpus: Arc<C>,
    cache: Arc<ResultCache>,
}

impl<C: Corpus + ?Sized> Concordance<C> {
    pub fn new(corpus: Arc<C>) -> Self {
        Self::with_cache(corpus, Arc::new(ResultCache::new()))
    }

    pub fn with_cache(corpus: Arc<C>, cache: Arc<ResultCache>) -> Self {
        Self { corpus, cache }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Report one page of concordance lines for `query`.
    pub fn concordance(
        &self,
        query: &str,
        options: &ConcordanceOptions,
    ) -> Result<ConcordanceReport, ConcError> {
        let order = SortOrder::parse(&options.order).ok_or_else(|| {
            ConcError::InvalidOrderingPolicy {
                order: options.order.clone(),
                query: query.to_string(),
            }
        })?;
        if options.page_size == 0 {
            return Err(ConcError::InvalidPageSize {
                page_size: 0,
                query: query.to_string(),
            });
        }

        let started = Instant::now();
        let corpus = self.corpus.as_ref();
        let fail = |source: AccessorError| ConcError::Accessor {
            query: query.to_string(),
            page: options.page,
            order: order.code().to_string(),
            source,
        };
        let empty = || ConcordanceReport::empty(query, order, options.context_length);

        let tokenized = corpus.tokenize(query);
        let Some(sequence) = tokenized.primary() else {
            info!("query \"{}\" produced no tokens", query);
            return Ok(empty());
        };

        let key = CacheKey {
            tag: CONCORDANCE_TAG,
            sequences: tokenized.sequences.clone(),
            channel: tokenized.channel,
            order,
        };
        let cached = if options.use_cache {
            self.cache.get(&key)
        } else {
            None
        };
        let entry = match cached {
            Some(entry) => {
                info!("using cached concordance results for \"{}\"", query);
                entry
            }
            None => {
                info!("processing concordance results for \"{}\"", query);
                let positions = corpus
                    .locate_matches(sequence, tokenized.channel)
                    .map_err(&fail)?;
                if positions.is_empty() {
                    info!("no matches for \"{}\"", query);
                    return Ok(empty());
                }
                let sort_offsets = order.sort_offsets(sequence.len());
                let table = rank_matches(corpus, &positions, &sort_offsets).map_err(&fail)?;
                let entry = CacheEntry {
                    table,
                    sort_offsets,
                    sequence_len: sequence.len(),
                };
                if options.use_cache {
                    self.cache.insert(key, entry)
                } else {
                    Arc::new(entry)
                }
            }
        };

        let Some(slice) = plan_page(&entry.table.rows, options.page, options.page_size) else {
            return Ok(empty());
        };
        // Offsets past the stream edge only ever read the sentinel.
        let stream_len = corpus.read_channel(Channel::Orth).map_err(&fail)?.len();
        let window = options.context_length.min(stream_len);
        if window < options.context_length {
            debug!(
                requested = options.context_length,
                window, "context window clamped to stream length"
            );
        }
        let offsets = context_offsets(window, entry.sequence_len);
        let page_rows = materialize_page(
            corpus,
            &entry.table.rows,
            &slice,
            &entry.sort_offsets,
            &offsets,
        )
        .map_err(&fail)?;
        let rows = self
            .render_lines(&page_rows, &offsets, entry.sequence_len, options.show_all_columns)
            .map_err(&fail)?;

        let summary = Summary {
            total_count: entry.total_count(),
            total_docs: entry.total_docs(),
            page: slice.page,
            total_pages: slice.total_pages,
        };
        debug!(
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "concordance report for \"{}\"",
            query
        );

        Ok(ConcordanceReport {
            kind: CONCORDANCE_TAG,
            title: ConcordanceReport::title_for(query),
            description: format!(
                "{}, Context tokens: {}, Order: {}",
                corpus.name(),
                options.context_length,
                order
            ),
            query: query.to_string(),
            order,
            context_length: options.context_length,
            formatted: report::formatted_summary(&summary, rows.len()),
            summary,
            context_offsets: options.show_all_columns.then(|| offsets.clone()),
            rows,
        })
    }

    /// Resolve display strings one offset column at a time, then clip each row.
    fn render_lines(
        &self,
        page_rows: &[WindowRow],
        offsets: &[Offset],
        sequence_len: usize,
        show_all_columns: bool,
    ) -> Result<Vec<ConcordanceLine>, AccessorError> {
        let corpus = self.corpus.as_ref();
        let eot = corpus.eot_token();
        let columns = (0..offsets.len())
            .map(|j| {
                let ids: Vec<_> = page_rows.iter().map(|row| row.tokens[j]).collect();
                let strings = corpus.resolve_display_string(&ids)?;
                if strings.len() != ids.len() {
                    return Err(AccessorError::Malformed(format!(
                        "display lookup returned {} values for {} tokens",
                        strings.len(),
                        ids.len()
                    )));
                }
                Ok(strings)
            })
            .collect::<Result<Vec<Vec<String>>, AccessorError>>()?;

        Ok(page_rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let strings: Vec<&str> = columns.iter().map(|column| column[i].as_str()).collect();
                let line = clip_line(offsets, sequence_len, &row.tokens, &strings, eot);
                ConcordanceLine {
                    document_id: row.document_id,
                    left: line.left,
                    node: line.node,
                    right: line.right,
                    detail: show_all_columns.then(|| LineDetail {
                        position: row.position,
                        row: row.row,
                        sort_ranks: row.ranks,
                        token_ids: row.tokens.clone(),
                    }),
                }
            })
            .collect())
    }
}
