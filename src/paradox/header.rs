//! Paradox table header and field descriptor parsing.
//!
//! The header occupies the start of the file (block 0). Three values drive
//! the rest of the decode: the record size at offset 0, the header size at
//! offset 2 (which is also the stride between data blocks), and the field
//! count at offset 0x21, all little-endian u16.
//!
//! The field descriptor table starts at offset 0x78 with one `(type, size)`
//! byte pair per field. After it come the table-name pointer, one pointer
//! per field name and the 261-byte table name, none of which are needed
//! here. The field names follow as NUL-terminated strings in field order.

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::Encoding;
use serde::Serialize;

use crate::paradox::constants::*;
use crate::paradox::field_types::FieldType;
use crate::PxError;

/// Parsed table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableHeader {
    /// Bytes per record, fixed for the whole table. Offset 0x00.
    pub record_size: u16,
    /// Header length in bytes; block `n` starts at `n * header_size`. Offset 0x02.
    pub header_size: u16,
    /// Number of field descriptors. Offset 0x21.
    pub num_fields: u16,
}

impl TableHeader {
    /// Parse the table header from the start of the file.
    ///
    /// Fails with [`PxError::TruncatedHeader`] when `data` is shorter than
    /// the fixed header span, and with [`PxError::Parse`] when the record
    /// size or header size is zero (neither allows a block walk).
    ///
    /// # Examples
    ///
    /// ```
    /// use byteorder::{ByteOrder, LittleEndian};
    /// use pxdb::paradox::header::TableHeader;
    ///
    /// let mut data = vec![0u8; 0x78];
    /// LittleEndian::write_u16(&mut data[0..], 10);
    /// LittleEndian::write_u16(&mut data[2..], 0x800);
    /// LittleEndian::write_u16(&mut data[0x21..], 2);
    ///
    /// let hdr = TableHeader::parse(&data).unwrap();
    /// assert_eq!(hdr.record_size, 10);
    /// assert_eq!(hdr.header_size, 0x800);
    /// assert_eq!(hdr.num_fields, 2);
    /// assert_eq!(hdr.block_offset(3), Some(3 * 0x800));
    /// assert_eq!(hdr.block_offset(u64::MAX), None);
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self, PxError> {
        if data.len() < SIZE_PX_HEADER_MIN {
            return Err(PxError::TruncatedHeader {
                len: data.len(),
                need: SIZE_PX_HEADER_MIN,
            });
        }

        let hdr = TableHeader {
            record_size: LittleEndian::read_u16(&data[PX_RECORD_SIZE..]),
            header_size: LittleEndian::read_u16(&data[PX_HEADER_SIZE..]),
            num_fields: LittleEndian::read_u16(&data[PX_NUM_FIELDS..]),
        };

        if hdr.record_size == 0 {
            return Err(PxError::Parse("Record size in table header is 0".to_string()));
        }
        if hdr.header_size == 0 {
            return Err(PxError::Parse("Header size in table header is 0".to_string()));
        }

        Ok(hdr)
    }

    /// Absolute byte offset of data block `index`, or `None` if it does
    /// not fit in a u64.
    pub fn block_offset(&self, index: u64) -> Option<u64> {
        index.checked_mul(self.header_size as u64)
    }

    /// Absolute byte offset of the first field name.
    pub fn field_names_offset(&self) -> usize {
        let n = self.num_fields as usize;
        PX_FIELD_INFO
            + n * SIZE_PX_FIELD_INFO
            + SIZE_PX_TABLE_NAME_PTR
            + n * SIZE_PX_FIELD_NAME_PTR
            + SIZE_PX_TABLE_NAME
    }
}

/// One column of the table: type tag, byte width and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name from the name table.
    pub name: String,
    /// Type tag.
    pub field_type: FieldType,
    /// Width of the field inside a record, in bytes.
    pub size: u8,
}

/// Parse the field descriptor table and the field names that follow it.
///
/// Names are decoded with `encoding`, the table's code page. Fails with
/// [`PxError::TruncatedDescriptors`] when the data ends before every
/// descriptor and every NUL-terminated name has been read.
pub fn parse_field_descriptors(
    data: &[u8],
    header: &TableHeader,
    encoding: &'static Encoding,
) -> Result<Vec<FieldDescriptor>, PxError> {
    let n = header.num_fields as usize;
    let info_end = PX_FIELD_INFO + n * SIZE_PX_FIELD_INFO;
    if data.len() < info_end {
        return Err(PxError::TruncatedDescriptors(format!(
            "{} field descriptors need {} bytes, file has {}",
            n,
            info_end,
            data.len()
        )));
    }

    let mut fields: Vec<FieldDescriptor> = data[PX_FIELD_INFO..info_end]
        .chunks_exact(SIZE_PX_FIELD_INFO)
        .map(|pair| FieldDescriptor {
            name: String::new(),
            field_type: FieldType::from_u8(pair[0]),
            size: pair[1],
        })
        .collect();

    let mut pos = header.field_names_offset();
    for (i, field) in fields.iter_mut().enumerate() {
        let rest = data.get(pos..).unwrap_or_default();
        let len = rest
            .iter()
            .position(|&b| b == PX_NAME_DELIMITER)
            .ok_or_else(|| {
                PxError::TruncatedDescriptors(format!(
                    "name of field {} of {} is not terminated before end of file (offset {})",
                    i + 1,
                    n,
                    pos
                ))
            })?;
        let (name, _) = encoding.decode_without_bom_handling(&rest[..len]);
        field.name = name.into_owned();
        pos += len + 1;
    }

    Ok(fields)
}
