//! Size limits for idents and values
//!
//! This module defines configurable size limits that the database enforces on
//! ident names, predicate names, and string payloads before any index is
//! touched. Violations surface as `LimitError`.

use crate::Value;
use thiserror::Error;

/// Size limits for names and values
///
/// Enforced at ident creation, fact observation, and transaction expansion.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum ident or predicate name length in bytes (default: 1024)
    pub max_name_bytes: usize,

    /// Maximum string value length in bytes (default: 64KB)
    pub max_string_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_name_bytes: 1024,
            max_string_bytes: 64 * 1024, // 64KB
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// Useful for unit tests that exercise limit enforcement without
    /// building large values.
    pub fn with_small_limits() -> Self {
        Limits {
            max_name_bytes: 16,
            max_string_bytes: 32,
        }
    }

    /// Validate an ident or predicate name
    ///
    /// Names must be non-empty and no longer than `max_name_bytes`.
    pub fn validate_name(&self, name: &str) -> Result<(), LimitError> {
        if name.is_empty() {
            return Err(LimitError::NameEmpty);
        }
        let len = name.len();
        if len > self.max_name_bytes {
            return Err(LimitError::NameTooLong {
                actual: len,
                max: self.max_name_bytes,
            });
        }
        Ok(())
    }

    /// Validate a value against size limits
    ///
    /// Only string payloads carry a size; other scalars always pass.
    pub fn validate_value(&self, value: &Value) -> Result<(), LimitError> {
        match value {
            Value::String(s) if s.len() > self.max_string_bytes => {
                Err(LimitError::StringTooLong {
                    actual: s.len(),
                    max: self.max_string_bytes,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Limit validation errors
#[derive(Debug, Error)]
pub enum LimitError {
    /// Ident or predicate name was empty
    #[error("Name cannot be empty")]
    NameEmpty,

    /// Ident or predicate name exceeds maximum length
    #[error("Name too long: {actual} bytes exceeds maximum {max}")]
    NameTooLong {
        /// Actual name length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// String value exceeds maximum length
    #[error("String too long: {actual} bytes exceeds maximum {max}")]
    StringTooLong {
        /// Actual string length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}
