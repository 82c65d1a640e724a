//! Scan seam over prefix-scannable indexes
//!
//! The [`Scan`] trait is the boundary the dataflow layer reads through: any
//! source that can answer an ascending prefix scan over encoded keys can
//! feed an operator tree. [`PostingsIndex`] implements it directly; the
//! engine implements it on its index handles.

use crate::postings::{IndexEntry, PostingsIndex};
use factdb_core::{Result, Tuple};

/// A source of ascending prefix scans over encoded keys.
pub trait Scan {
    /// All entries whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Vec<IndexEntry>;
}

impl Scan for PostingsIndex {
    fn scan_prefix(&self, prefix: &[u8]) -> Vec<IndexEntry> {
        PostingsIndex::scan_prefix(self, prefix)
    }
}

/// One scanned key with its postings decoded into tuples.
///
/// The key stays raw: callers that know its layout decode it themselves,
/// and callers that only need the postings skip that work.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry {
    /// Encoded key bytes.
    pub key: Vec<u8>,
    /// Postings under the key, decoded, oldest first.
    pub postings: Vec<Tuple>,
}

/// Prefix-scan `source` and decode every posting.
///
/// Fails on the first posting that does not decode.
pub fn scan_decoded<S: Scan + ?Sized>(source: &S, prefix: &[u8]) -> Result<Vec<DecodedEntry>> {
    let mut decoded = Vec::new();
    for entry in source.scan_prefix(prefix) {
        let postings = entry
            .postings
            .iter()
            .map(|posting| Tuple::decode(posting))
            .collect::<Result<Vec<_>>>()?;
        decoded.push(DecodedEntry {
            key: entry.key,
            postings,
        });
    }
    Ok(decoded)
}
