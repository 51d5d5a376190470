//! Field-level value decoding for Paradox records.
//!
//! Turns the raw bytes of one field into a [`Value`] according to the
//! field's [`DecodeStrategy`]:
//!
//! | Strategy | Encoding on disk | Decoder |
//! |----------|------------------|---------|
//! | Integer | Big-endian, first byte `0x80` for non-negative values | [`decode_int`] |
//! | Timestamp | 8-byte big-endian fixed point, top bit is a sign flag | [`decode_timestamp`] |
//! | Date | Not decoded | placeholder [`Value::Date`] |
//! | Text | NUL-padded single-byte code page | [`decode_text`] |
//!
//! None of the decoders fail. Malformed input degrades: text gets
//! replacement characters, timestamps outside the representable calendar
//! range are clamped.

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::paradox::constants::*;
use crate::paradox::field_types::DecodeStrategy;

/// Decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Long, auto-increment and number fields.
    Int(i64),
    /// Timestamp fields, already shifted by the caller's hour correction.
    Timestamp(DateTime<Utc>),
    /// Date fields. The on-disk value is not decoded.
    Date,
    /// Every other field type, decoded from the table's code page.
    Text(String),
}

impl Value {
    /// Returns the integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a timestamp value.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the text of a text value.
    ///
    /// The date placeholder reads as an empty string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Date => Some(""),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Timestamp(_) => "timestamp",
            Value::Date => "date",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::Date => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Timestamp(ts) => ts.serialize(serializer),
            Value::Date => serializer.serialize_str(""),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Parameters shared by every field of a decode pass.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext {
    /// Hour correction subtracted from every timestamp.
    pub fix_hour: i32,
    /// Code page of text fields.
    pub encoding: &'static Encoding,
}

/// Decode one field's raw bytes with the given strategy.
pub fn decode_field(raw: &[u8], strategy: DecodeStrategy, ctx: &FieldContext) -> Value {
    match strategy {
        DecodeStrategy::Integer => Value::Int(decode_int(raw)),
        DecodeStrategy::Timestamp => Value::Timestamp(decode_timestamp(raw, ctx.fix_hour)),
        DecodeStrategy::Date => Value::Date,
        DecodeStrategy::Text => Value::Text(decode_text(raw, ctx.encoding)),
    }
}

/// Decode an integer field.
///
/// Paradox stores non-negative integers big-endian with the top bit set, so
/// a small value has `0x80` as its first byte. Exactly that byte is cleared;
/// any other first byte is kept. At most the first four bytes are read.
///
/// # Examples
///
/// ```
/// use pxdb::paradox::field_decode::decode_int;
///
/// assert_eq!(decode_int(&[0x80, 0x00, 0x00, 0x2a]), 42);
/// assert_eq!(decode_int(&[0x00, 0x00, 0x01, 0x00]), 256);
/// assert_eq!(decode_int(&[]), 0);
/// ```
pub fn decode_int(raw: &[u8]) -> i64 {
    let n = raw.len().min(SIZE_PX_INT_VALUE);
    if n == 0 {
        return 0;
    }

    let mut buf = [0u8; SIZE_PX_INT_VALUE];
    buf[..n].copy_from_slice(&raw[..n]);
    if buf[0] == PX_INT_SIGN_BIAS {
        buf[0] = 0x00;
    }

    BigEndian::read_uint(&buf[..n], n) as i64
}

/// Convert a timestamp field to Unix seconds.
///
/// The field is read as a big-endian u64 with the top bit cleared, shifted
/// right 8 bits, divided by 500 and moved from the Paradox epoch to the Unix
/// epoch. `fix_hour` corrects the time zone the table was written in; each
/// extra hour moves the result back by 3600 seconds. Fields shorter than
/// 8 bytes are zero-filled on the right.
pub fn timestamp_seconds(raw: &[u8], fix_hour: i32) -> i64 {
    let mut buf = [0u8; SIZE_PX_TIMESTAMP];
    let n = raw.len().min(SIZE_PX_TIMESTAMP);
    buf[..n].copy_from_slice(&raw[..n]);
    buf[0] &= PX_TIMESTAMP_SIGN_MASK;

    let ticks = BigEndian::read_u64(&buf) as i64;
    (ticks >> PX_TIMESTAMP_SHIFT) / PX_TIMESTAMP_DIVISOR
        - PX_TIMESTAMP_EPOCH
        - (PX_TIMESTAMP_BIAS_SECS + fix_hour as i64 * SECS_PER_HOUR)
}

/// Decode a timestamp field into a UTC calendar timestamp.
///
/// Seconds outside chrono's supported range (empty or garbage fields) are
/// clamped to the earliest or latest representable instant.
pub fn decode_timestamp(raw: &[u8], fix_hour: i32) -> DateTime<Utc> {
    let secs = timestamp_seconds(raw, fix_hour);
    DateTime::from_timestamp(secs, 0).unwrap_or(if secs < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Decode a text field.
///
/// Trailing NUL padding is dropped and the rest is decoded from the given
/// single-byte code page. Unmappable bytes become U+FFFD.
pub fn decode_text(raw: &[u8], encoding: &'static Encoding) -> String {
    let end = raw
        .iter()
        .rposition(|&b| b != 0x00)
        .map_or(0, |last| last + 1);
    let (text, _had_errors) = encoding.decode_without_bom_handling(&raw[..end]);
    text.into_owned()
}
