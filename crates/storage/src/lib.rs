//! Ordered postings storage for factdb
//!
//! This crate holds the byte-ordered index the fact database is built on:
//! - PostingsIndex: BTreeMap from encoded keys to postings lists
//! - IndexEntry: owned scan snapshots
//! - Scan: the prefix-scan trait the dataflow layer reads through
//! - scan_decoded: prefix scans with postings decoded into tuples

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod postings;
pub mod scan;

pub use postings::{IndexEntry, PostingsIndex};
pub use scan::{scan_decoded, DecodedEntry, Scan};
