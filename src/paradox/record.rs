//! Record layout and row assembly.
//!
//! A record is `record_size` bytes holding every field back to back in
//! descriptor order, followed by padding when the field widths add up to
//! less than the record size. [`RecordReader`] is a forward-only cursor over
//! the file image; bytes past the end of the file read as zero, the same as
//! an unfilled scratch buffer. [`decode_record`] decodes one record and
//! leaves the cursor at the start of the next one.

use crate::paradox::field_decode::{decode_field, FieldContext, Value};
use crate::paradox::header::FieldDescriptor;

/// Forward-only cursor over the record area of a table.
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
    scratch: Vec<u8>,
}

impl<'a> RecordReader<'a> {
    /// Start reading at absolute offset `pos`.
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        RecordReader {
            data,
            pos,
            scratch: Vec::with_capacity(u8::MAX as usize),
        }
    }

    /// Current absolute offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the next `size` bytes into the scratch buffer and return it.
    fn read_field(&mut self, size: usize) -> &[u8] {
        self.scratch.clear();
        self.scratch.resize(size, 0);

        let avail = self.data.get(self.pos..).unwrap_or_default();
        let n = avail.len().min(size);
        self.scratch[..n].copy_from_slice(&avail[..n]);
        self.pos += size;

        &self.scratch
    }

    /// Skip `n` bytes.
    fn skip(&mut self, n: usize) {
        self.pos += n;
    }
}

/// One decoded record with its byte accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// One value per field, in descriptor order.
    pub values: Vec<Value>,
    /// Bytes taken by the fields.
    pub consumed: usize,
    /// Padding bytes skipped after the fields.
    pub padding: usize,
}

/// Decode the record at the reader's position.
///
/// Reads each field's `size` bytes in order, decodes them by type, then
/// skips `record_size - consumed` padding bytes when the fields are
/// narrower than the record.
pub fn decode_record(
    reader: &mut RecordReader<'_>,
    fields: &[FieldDescriptor],
    record_size: usize,
    ctx: &FieldContext,
) -> DecodedRecord {
    let mut values = Vec::with_capacity(fields.len());
    let mut consumed = 0usize;

    for field in fields {
        let size = field.size as usize;
        consumed += size;
        let raw = reader.read_field(size);
        values.push(decode_field(raw, field.field_type.strategy(), ctx));
    }

    let padding = record_size.saturating_sub(consumed);
    if padding > 0 {
        reader.skip(padding);
    }

    DecodedRecord {
        values,
        consumed,
        padding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paradox::field_types::FieldType;
    use encoding_rs::WINDOWS_1251;

    fn field(name: &str, field_type: FieldType, size: u8) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            field_type,
            size,
        }
    }

    fn ctx() -> FieldContext {
        FieldContext {
            fix_hour: 0,
            encoding: WINDOWS_1251,
        }
    }

    #[test]
    fn test_decode_record_with_padding() {
        let fields = vec![
            field("ID", FieldType::Long, 4),
            field("NAME", FieldType::Alpha, 6),
        ];
        let mut data = vec![0x80, 0x00, 0x00, 0x05];
        data.extend_from_slice(b"Ivan\0\0");
        data.extend_from_slice(&[0xEE; 4]); // padding
        data.extend_from_slice(&[0x80, 0x00, 0x00, 0x06]);
        data.extend_from_slice(b"Olga\0\0");

        let mut reader = RecordReader::new(&data, 0);
        let rec = decode_record(&mut reader, &fields, 14, &ctx());
        assert_eq!(rec.values, vec![Value::Int(5), Value::Text("Ivan".to_string())]);
        assert_eq!(rec.consumed, 10);
        assert_eq!(rec.padding, 4);
        assert_eq!(rec.consumed + rec.padding, 14);
        assert_eq!(reader.position(), 14);

        let rec = decode_record(&mut reader, &fields, 14, &ctx());
        assert_eq!(rec.values, vec![Value::Int(6), Value::Text("Olga".to_string())]);
    }

    #[test]
    fn test_decode_record_exact_fit() {
        let fields = vec![field("A", FieldType::Long, 4)];
        let data = [0x80, 0, 0, 1, 0x80, 0, 0, 2];
        let mut reader = RecordReader::new(&data, 0);
        let rec = decode_record(&mut reader, &fields, 4, &ctx());
        assert_eq!(rec.padding, 0);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_decode_record_past_end_reads_zeros() {
        let fields = vec![
            field("ID", FieldType::Long, 4),
            field("NAME", FieldType::Alpha, 6),
        ];
        let data = [0x80, 0x00];
        let mut reader = RecordReader::new(&data, 0);
        let rec = decode_record(&mut reader, &fields, 10, &ctx());
        // 0x80 0x00 0x00 0x00 after zero fill
        assert_eq!(rec.values, vec![Value::Int(0), Value::Text(String::new())]);
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_fields_wider_than_record_take_no_padding() {
        let fields = vec![field("A", FieldType::Alpha, 8)];
        let data = b"ABCDEFGH";
        let mut reader = RecordReader::new(data, 0);
        let rec = decode_record(&mut reader, &fields, 6, &ctx());
        assert_eq!(rec.consumed, 8);
        assert_eq!(rec.padding, 0);
        assert_eq!(reader.position(), 8);
    }
}
