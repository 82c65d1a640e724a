//! The factdb engine
//!
//! This crate holds the fact database itself:
//! - Fact: (subject, predicate, object) triples and their index encodings
//! - Database: the three covering indexes behind one RwLock
//! - TempId: placeholders for entities created inside a transaction
//! - TxData / EntityUpdate: transaction update sets
//! - Entity / AttrValue: documents folded from facts

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod entity;
pub mod error;
pub mod fact;
pub mod temp_id;
pub mod update;

pub use database::{Database, IndexHandle, IndexKind};
pub use entity::{AttrValue, Entity};
pub use error::{Error, Result};
pub use fact::{Fact, Subject};
pub use temp_id::TempId;
pub use update::{EntityUpdate, TxData, TxResult, UpdateValue, IDENTITY_PREDICATE};
