//! Order-preserving tuple codec
//!
//! A [`Tuple`] is an ordered sequence of [`Value`]s. Tuples encode to byte
//! strings whose lexicographic order equals element-wise tuple order, which
//! is what lets a byte-ordered index answer range and prefix queries over
//! typed data.
//!
//! ## Encoding
//!
//! Each element is a one-byte type tag followed by a payload:
//!
//! | type   | tag    | payload                                            |
//! |--------|--------|----------------------------------------------------|
//! | string | `0x00` | UTF-8 bytes, NUL-escaped, NUL-terminated           |
//! | int64  | `0x01` | 8 bytes big-endian, sign bit flipped               |
//! | uint64 | `0x02` | 8 bytes big-endian                                 |
//! | bool   | `0x03` | 1 byte, `0x00` false / `0x01` true                 |
//! | ref    | `0x04` | entity id, 8 bytes big-endian                      |
//!
//! Inside a string payload every literal NUL is written as `0x00 0xFF`; the
//! bare `0x00` terminator marks the end. The escape marker `0xFF` can never
//! be confused with string content because it is not a valid UTF-8 byte.
//! Flipping the sign bit of an int64 makes negative values sort below
//! positive ones in unsigned byte comparison.
//!
//! ## Contract
//!
//! - `decode(encode(t)) == t` for every tuple `t`.
//! - `encode(a) < encode(b)` (as byte strings) iff `a < b` (element-wise,
//!   with cross-type order given by tag order).
//! - A tuple's encoding is a byte prefix of the encoding of any tuple it is
//!   an element prefix of.

use crate::error::{Error, Result};
use crate::value::{ElementType, EntityId, Value};
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_STRING: u8 = 0x00;
const TAG_INT: u8 = 0x01;
const TAG_UINT: u8 = 0x02;
const TAG_BOOL: u8 = 0x03;
const TAG_REF: u8 = 0x04;

const STRING_TERM: u8 = 0x00;
const ESCAPED_NUL: u8 = 0xFF;
const SIGN_FLIP: u64 = 1 << 63;

/// An ordered sequence of scalar values with an order-preserving encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Tuple {
    elements: Vec<Value>,
}

impl Tuple {
    /// Build a tuple from elements.
    pub fn new(elements: Vec<Value>) -> Self {
        Tuple { elements }
    }

    /// The empty tuple. Encodes to zero bytes.
    pub fn empty() -> Self {
        Tuple::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the tuple has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrow the elements.
    pub fn values(&self) -> &[Value] {
        &self.elements
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.elements.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.elements.len(),
        })
    }

    /// The string at `index`, or a `TypeMismatch` error.
    pub fn get_string(&self, index: usize) -> Result<&str> {
        let value = self.get(index)?;
        value.as_str().ok_or_else(|| Error::TypeMismatch {
            index,
            expected: ElementType::String,
            actual: value.element_type(),
        })
    }

    /// The int64 at `index`, or a `TypeMismatch` error.
    pub fn get_i64(&self, index: usize) -> Result<i64> {
        let value = self.get(index)?;
        value.as_int().ok_or_else(|| Error::TypeMismatch {
            index,
            expected: ElementType::Int,
            actual: value.element_type(),
        })
    }

    /// The uint64 at `index`, or a `TypeMismatch` error.
    pub fn get_u64(&self, index: usize) -> Result<u64> {
        let value = self.get(index)?;
        value.as_uint().ok_or_else(|| Error::TypeMismatch {
            index,
            expected: ElementType::UInt,
            actual: value.element_type(),
        })
    }

    /// The bool at `index`, or a `TypeMismatch` error.
    pub fn get_bool(&self, index: usize) -> Result<bool> {
        let value = self.get(index)?;
        value.as_bool().ok_or_else(|| Error::TypeMismatch {
            index,
            expected: ElementType::Bool,
            actual: value.element_type(),
        })
    }

    /// The entity reference at `index`, or a `TypeMismatch` error.
    pub fn get_entity_id(&self, index: usize) -> Result<EntityId> {
        let value = self.get(index)?;
        value.as_entity_id().ok_or_else(|| Error::TypeMismatch {
            index,
            expected: ElementType::Ref,
            actual: value.element_type(),
        })
    }

    /// Types of the elements, in order.
    pub fn schema_types(&self) -> Vec<ElementType> {
        self.elements.iter().map(Value::element_type).collect()
    }

    /// A new tuple holding this tuple's elements followed by `other`'s.
    pub fn concat(&self, other: &Tuple) -> Tuple {
        let mut elements = Vec::with_capacity(self.elements.len() + other.elements.len());
        elements.extend_from_slice(&self.elements);
        elements.extend_from_slice(&other.elements);
        Tuple { elements }
    }

    /// A new tuple with the element at `index` removed.
    pub fn without(&self, index: usize) -> Result<Tuple> {
        if index >= self.elements.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        let mut elements = self.elements.clone();
        elements.remove(index);
        Ok(Tuple { elements })
    }

    /// Encode to an order-preserving byte string.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len_hint());
        for value in &self.elements {
            encode_value(value, &mut buf);
        }
        buf
    }

    /// Decode an encoded byte string back into a tuple.
    pub fn decode(bytes: &[u8]) -> Result<Tuple> {
        let mut elements = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let tag_offset = pos;
            let tag = bytes[pos];
            pos += 1;
            let value = match tag {
                TAG_STRING => Value::String(decode_string(bytes, &mut pos)?),
                TAG_INT => Value::Int((read_fixed_u64(bytes, &mut pos)? ^ SIGN_FLIP) as i64),
                TAG_UINT => Value::UInt(read_fixed_u64(bytes, &mut pos)?),
                TAG_BOOL => Value::Bool(decode_bool(bytes, &mut pos)?),
                TAG_REF => Value::Ref(EntityId::new(read_fixed_u64(bytes, &mut pos)?)),
                other => {
                    return Err(Error::decode(
                        tag_offset,
                        format!("unknown type tag 0x{:02x}", other),
                    ))
                }
            };
            elements.push(value);
        }
        Ok(Tuple { elements })
    }

    fn encoded_len_hint(&self) -> usize {
        self.elements
            .iter()
            .map(|value| match value {
                Value::String(s) => 2 + s.len(),
                Value::Int(_) | Value::UInt(_) | Value::Ref(_) => 9,
                Value::Bool(_) => 2,
            })
            .sum()
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(elements: Vec<Value>) -> Self {
        Tuple { elements }
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Tuple {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Tuple {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", value, value.element_type())?;
        }
        write!(f, ")")
    }
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::String(s) => {
            buf.push(TAG_STRING);
            for &b in s.as_bytes() {
                buf.push(b);
                if b == STRING_TERM {
                    buf.push(ESCAPED_NUL);
                }
            }
            buf.push(STRING_TERM);
        }
        Value::Int(x) => {
            buf.push(TAG_INT);
            push_u64(buf, (*x as u64) ^ SIGN_FLIP);
        }
        Value::UInt(x) => {
            buf.push(TAG_UINT);
            push_u64(buf, *x);
        }
        Value::Bool(b) => {
            buf.push(TAG_BOOL);
            buf.push(u8::from(*b));
        }
        Value::Ref(id) => {
            buf.push(TAG_REF);
            push_u64(buf, id.as_u64());
        }
    }
}

fn push_u64(buf: &mut Vec<u8>, x: u64) {
    let mut payload = [0u8; 8];
    BigEndian::write_u64(&mut payload, x);
    buf.extend_from_slice(&payload);
}

fn read_fixed_u64(bytes: &[u8], pos: &mut usize) -> Result<u64> {
    let end = *pos + 8;
    let payload = bytes
        .get(*pos..end)
        .ok_or_else(|| Error::decode(*pos, "truncated integer payload"))?;
    *pos = end;
    Ok(BigEndian::read_u64(payload))
}

fn decode_bool(bytes: &[u8], pos: &mut usize) -> Result<bool> {
    let payload = *bytes
        .get(*pos)
        .ok_or_else(|| Error::decode(*pos, "truncated boolean payload"))?;
    *pos += 1;
    match payload {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(Error::decode(
            *pos - 1,
            format!("invalid boolean payload 0x{:02x}", other),
        )),
    }
}

fn decode_string(bytes: &[u8], pos: &mut usize) -> Result<String> {
    let start = *pos;
    let mut out = Vec::new();
    loop {
        match bytes.get(*pos) {
            None => return Err(Error::decode(start, "unterminated string")),
            Some(&STRING_TERM) => {
                if bytes.get(*pos + 1) == Some(&ESCAPED_NUL) {
                    out.push(STRING_TERM);
                    *pos += 2;
                } else {
                    *pos += 1;
                    break;
                }
            }
            Some(&b) => {
                out.push(b);
                *pos += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| Error::decode(start, "string payload is not valid UTF-8"))
}
