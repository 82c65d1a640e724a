//! Byte-ordered postings index
//!
//! This module provides the ordered map at the bottom of every fact index:
//! a `BTreeMap` from encoded key bytes to a postings list (a `Vec` of
//! encoded values, in insertion order). Key order is plain byte order, so
//! any key range that shares a byte prefix is contiguous and a prefix scan
//! is a single ordered walk.
//!
//! The index never deduplicates: inserting the same posting under the same
//! key twice stores it twice.

use std::collections::BTreeMap;
use tracing::trace;

/// One key and its postings, as returned by a scan.
///
/// Snapshots are owned copies; they stay valid after the index mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Encoded key bytes.
    pub key: Vec<u8>,
    /// Postings stored under the key, oldest first.
    pub postings: Vec<Vec<u8>>,
}

/// Ordered map from encoded keys to postings lists.
#[derive(Debug, Default)]
pub struct PostingsIndex {
    entries: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
}

impl PostingsIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Append one posting under a key
    ///
    /// If the key is new, creates its postings list; otherwise appends to
    /// the existing list. Never overwrites or deduplicates.
    pub fn insert(&mut self, key: Vec<u8>, posting: Vec<u8>) {
        self.entries.entry(key).or_default().push(posting);
    }

    /// Append several postings under a key
    pub fn insert_many(&mut self, key: Vec<u8>, postings: impl IntoIterator<Item = Vec<u8>>) {
        self.entries.entry(key).or_default().extend(postings);
    }

    /// Borrow the postings stored under a key, if any
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Scan all entries whose key starts with `prefix`, in ascending key order
    ///
    /// Returns owned snapshots. An empty prefix scans the whole index.
    pub fn scan_prefix(&self, prefix: &[u8]) -> Vec<IndexEntry> {
        let matches: Vec<IndexEntry> = self
            .entries
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, postings)| IndexEntry {
                key: key.clone(),
                postings: postings.clone(),
            })
            .collect();
        trace!(
            target: "factdb::storage",
            prefix_len = prefix.len(),
            entries = matches.len(),
            "prefix scan"
        );
        matches
    }

    /// Number of distinct keys in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
