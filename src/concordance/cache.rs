// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-lifetime cache of coarse concordance tables
//!
//! Entries are immutable and shared behind `Arc`, so a reader never sees a
//! half-written entry. Two threads computing the same key both insert; the
//! later insert replaces the earlier one and both values are identical.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;
use std::sync::Arc;

use super::order::{SortOffsets, SortOrder};
use super::rank::CoarseTable;
use crate::corpus::{Channel, TokenId};

/// Exact-match cache key: operation, tokenized query and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tag: &'static str,
    pub sequences: Vec<Vec<TokenId>>,
    pub channel: Channel,
    pub order: SortOrder,
}

/// Everything needed to serve any page without re-locating or re-ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub table: CoarseTable,
    pub sort_offsets: SortOffsets,
    pub sequence_len: usize,
}

impl CacheEntry {
    pub fn total_count(&self) -> usize {
        self.table.total_count()
    }

    pub fn total_docs(&self) -> usize {
        self.table.total_docs
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let found = self.entries.read().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store an entry; the last writer for a key wins.
    pub fn insert(&self, key: CacheKey, entry: CacheEntry) -> Arc<CacheEntry> {
        let entry = Arc::new(entry);
        self.entries.write().insert(key, Arc::clone(&entry));
        entry
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
