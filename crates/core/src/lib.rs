//! Core types for factdb
//!
//! This crate defines the foundational types used throughout the system:
//! - Value / ElementType: the closed set of scalar types facts can store
//! - EntityId: identifier the database assigns to entities
//! - Tuple: ordered value sequences with an order-preserving byte encoding
//! - Limits: configurable size limits on names and string payloads
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod tuple;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use limits::{LimitError, Limits};
pub use tuple::Tuple;
pub use value::{ElementType, EntityId, Value};
