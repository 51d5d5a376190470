//! Paradox field type definitions.
//!
//! Each field descriptor in the table header carries a one-byte type tag.
//! [`FieldType`] maps that tag to a closed set of variants, each with its
//! Paradox name and description via the `FieldType::metadata` method, and
//! selects the [`DecodeStrategy`] used by the record decoder.
//!
//! Tags that are not recognized are kept as [`FieldType::Unknown`] and decode
//! as legacy text, the same as every other non-numeric type.

use serde::Serialize;
use std::fmt;

/// Paradox field types (Paradox 4 through 7 table levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    /// Fixed-width character data (pxfAlpha = 0x01)
    Alpha,
    /// Days since 1 Jan 0001 (pxfDate = 0x02)
    Date,
    /// 16-bit integer (pxfShort = 0x03)
    Short,
    /// 32-bit integer (pxfLong = 0x04)
    Long,
    /// Money amount, 8-byte float (pxfCurrency = 0x05)
    Currency,
    /// 8-byte float (pxfNumber = 0x06)
    Number,
    /// Boolean (pxfLogical = 0x09)
    Logical,
    /// Memo BLOB reference (pxfMemoBLOb = 0x0c)
    MemoBlob,
    /// Binary BLOB reference (pxfBLOb = 0x0d)
    BinBlob,
    /// Graphic BLOB reference (pxfGraphic = 0x10)
    Graphic,
    /// Milliseconds since midnight (pxfTime = 0x14)
    Time,
    /// Date and time (pxfTimestamp = 0x15)
    Timestamp,
    /// Auto-increment counter (pxfAutoInc = 0x16)
    AutoInc,
    /// Packed decimal (pxfBCD = 0x17)
    Bcd,
    /// Unrecognized tag
    Unknown(u8),
}

/// How the record decoder turns a field's raw bytes into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Big-endian integer with the 0x80 sign-bias byte cleared.
    Integer,
    /// Fixed-point milliseconds converted to a calendar timestamp.
    Timestamp,
    /// Not decoded; yields an empty placeholder.
    Date,
    /// NUL-trimmed single-byte code page text.
    Text,
}

impl FieldType {
    /// Parse a field type from the tag byte of a field descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use pxdb::paradox::field_types::FieldType;
    ///
    /// assert_eq!(FieldType::from_u8(0x04), FieldType::Long);
    /// assert_eq!(FieldType::from_u8(0x15), FieldType::Timestamp);
    /// assert_eq!(FieldType::from_u8(0x42), FieldType::Unknown(0x42));
    /// ```
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => FieldType::Alpha,
            0x02 => FieldType::Date,
            0x03 => FieldType::Short,
            0x04 => FieldType::Long,
            0x05 => FieldType::Currency,
            0x06 => FieldType::Number,
            0x09 => FieldType::Logical,
            0x0c => FieldType::MemoBlob,
            0x0d => FieldType::BinBlob,
            0x10 => FieldType::Graphic,
            0x14 => FieldType::Time,
            0x15 => FieldType::Timestamp,
            0x16 => FieldType::AutoInc,
            0x17 => FieldType::Bcd,
            other => FieldType::Unknown(other),
        }
    }

    /// Returns the raw tag byte of this field type.
    pub fn as_u8(self) -> u8 {
        match self {
            FieldType::Alpha => 0x01,
            FieldType::Date => 0x02,
            FieldType::Short => 0x03,
            FieldType::Long => 0x04,
            FieldType::Currency => 0x05,
            FieldType::Number => 0x06,
            FieldType::Logical => 0x09,
            FieldType::MemoBlob => 0x0c,
            FieldType::BinBlob => 0x0d,
            FieldType::Graphic => 0x10,
            FieldType::Time => 0x14,
            FieldType::Timestamp => 0x15,
            FieldType::AutoInc => 0x16,
            FieldType::Bcd => 0x17,
            FieldType::Unknown(tag) => tag,
        }
    }

    /// Select the decoder for this type.
    ///
    /// Long, auto-increment and number fields decode as integers. Number is
    /// an 8-byte float on disk but tables in the wild use it for integer
    /// keys, so it goes through the integer path too.
    pub fn strategy(self) -> DecodeStrategy {
        match self {
            FieldType::Long | FieldType::AutoInc | FieldType::Number => DecodeStrategy::Integer,
            FieldType::Timestamp => DecodeStrategy::Timestamp,
            FieldType::Date => DecodeStrategy::Date,
            _ => DecodeStrategy::Text,
        }
    }

    /// Returns (name, description) for this field type.
    fn metadata(self) -> (&'static str, &'static str) {
        match self {
            FieldType::Alpha => ("ALPHA", "Fixed-width text"),
            FieldType::Date => ("DATE", "Calendar date"),
            FieldType::Short => ("SHORT", "16-bit integer"),
            FieldType::Long => ("LONG", "32-bit integer"),
            FieldType::Currency => ("CURRENCY", "Money amount"),
            FieldType::Number => ("NUMBER", "Floating point number"),
            FieldType::Logical => ("LOGICAL", "Boolean"),
            FieldType::MemoBlob => ("MEMO_BLOB", "Memo BLOB reference"),
            FieldType::BinBlob => ("BINARY_BLOB", "Binary BLOB reference"),
            FieldType::Graphic => ("GRAPHIC", "Graphic BLOB reference"),
            FieldType::Time => ("TIME", "Time of day"),
            FieldType::Timestamp => ("TIMESTAMP", "Date and time"),
            FieldType::AutoInc => ("AUTOINC", "Auto-increment counter"),
            FieldType::Bcd => ("BCD", "Packed decimal"),
            FieldType::Unknown(_) => ("UNKNOWN", "Unrecognized field type"),
        }
    }

    /// Returns the Paradox-style name for this field type (e.g. `"LONG"`).
    pub fn name(self) -> &'static str {
        self.metadata().0
    }

    /// Returns a human-readable description of this field type.
    pub fn description(self) -> &'static str {
        self.metadata().1
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Unknown(tag) => write!(f, "UNKNOWN(0x{:02x})", tag),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for tag in [
            0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x09, 0x0c, 0x0d, 0x10, 0x14, 0x15, 0x16, 0x17,
        ] {
            let ft = FieldType::from_u8(tag);
            assert!(!matches!(ft, FieldType::Unknown(_)), "tag 0x{:02x}", tag);
            assert_eq!(ft.as_u8(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_keeps_value() {
        let ft = FieldType::from_u8(0x07);
        assert_eq!(ft, FieldType::Unknown(0x07));
        assert_eq!(ft.as_u8(), 0x07);
        assert_eq!(ft.strategy(), DecodeStrategy::Text);
        assert_eq!(ft.to_string(), "UNKNOWN(0x07)");
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(FieldType::Long.strategy(), DecodeStrategy::Integer);
        assert_eq!(FieldType::AutoInc.strategy(), DecodeStrategy::Integer);
        assert_eq!(FieldType::Number.strategy(), DecodeStrategy::Integer);
        assert_eq!(FieldType::Timestamp.strategy(), DecodeStrategy::Timestamp);
        assert_eq!(FieldType::Date.strategy(), DecodeStrategy::Date);
        assert_eq!(FieldType::Alpha.strategy(), DecodeStrategy::Text);
        // Short and time are not in the integer set
        assert_eq!(FieldType::Short.strategy(), DecodeStrategy::Text);
        assert_eq!(FieldType::Time.strategy(), DecodeStrategy::Text);
        assert_eq!(FieldType::Logical.strategy(), DecodeStrategy::Text);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldType::Timestamp.to_string(), "TIMESTAMP");
        assert_eq!(FieldType::MemoBlob.description(), "Memo BLOB reference");
    }
}
