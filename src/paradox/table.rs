//! Paradox table file loading and row decoding.
//!
//! Provides [`Table`], the primary entry point for reading `.DB` files. The
//! whole file is read into memory once; the header and field descriptors are
//! parsed up front and held read-only, then [`Table::read_rows`] walks the
//! data blocks and hands each decoded record to a [`RowSink`].
//!
//! [`read_table`] does all of that in one call for the common case.

use encoding_rs::{Encoding, WINDOWS_1251};
use serde::Serialize;
use std::path::Path;

use crate::paradox::block::{BlockHeader, BlockIter};
use crate::paradox::field_decode::FieldContext;
use crate::paradox::header::{parse_field_descriptors, FieldDescriptor, TableHeader};
use crate::paradox::record::{decode_record, RecordReader};
use crate::paradox::sink::RowSink;
use crate::PxError;

/// Code page of text fields when nothing else is configured.
pub static DEFAULT_ENCODING: &Encoding = WINDOWS_1251;

/// Per-call decode parameters.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Hours subtracted from every decoded timestamp.
    pub fix_hour: i32,
    /// Code page of text fields.
    pub encoding: &'static Encoding,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            fix_hour: 0,
            encoding: DEFAULT_ENCODING,
        }
    }
}

impl DecodeOptions {
    /// Options with the given hour correction and the default code page.
    pub fn with_fix_hour(fix_hour: i32) -> Self {
        DecodeOptions {
            fix_hour,
            ..Self::default()
        }
    }

    /// Replace the code page by a WHATWG encoding label such as `"koi8-r"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pxdb::paradox::table::DecodeOptions;
    ///
    /// let opts = DecodeOptions::default().encoding_label("cp866").unwrap();
    /// assert_eq!(opts.encoding.name(), "IBM866");
    /// assert!(DecodeOptions::default().encoding_label("no-such-codepage").is_err());
    /// ```
    pub fn encoding_label(self, label: &str) -> Result<Self, PxError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PxError::Argument(format!("Unknown encoding label '{}'", label)))?;
        Ok(DecodeOptions { encoding, ..self })
    }

    fn field_context(&self) -> FieldContext {
        FieldContext {
            fix_hour: self.fix_hour,
            encoding: self.encoding,
        }
    }
}

/// Counters from one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadSummary {
    /// Blocks visited, including skipped ones.
    pub blocks: u64,
    /// Blocks whose `add_size` marked them corrupt or sentinel.
    pub skipped_blocks: u64,
    /// Rows handed to the sink.
    pub rows: u64,
}

/// An in-memory Paradox table file with its parsed schema.
pub struct Table {
    data: Vec<u8>,
    header: TableHeader,
    fields: Vec<FieldDescriptor>,
}

impl Table {
    /// Read a table file into memory and parse its header and field descriptors.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PxError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| PxError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }

    /// Parse a table from an in-memory file image.
    ///
    /// Field names are decoded with [`DEFAULT_ENCODING`].
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PxError> {
        let header = TableHeader::parse(&data)?;
        let fields = parse_field_descriptors(&data, &header, DEFAULT_ENCODING)?;
        Ok(Table {
            data,
            header,
            fields,
        })
    }

    /// Returns the parsed table header.
    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    /// Returns the field descriptors in record order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns the raw file image.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over the data blocks by fixed stride from block 1.
    pub fn blocks(&self) -> BlockIter<'_> {
        BlockIter::new(&self.data, self.header)
    }

    /// Decode every record slot of every block and hand the rows to `sink`.
    ///
    /// Rows arrive in block-then-record order. Blocks with a sentinel
    /// `add_size` contribute no rows. The only error after the header has
    /// been parsed is one returned by the sink itself.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pxdb::paradox::sink::FnSink;
    /// use pxdb::paradox::table::{DecodeOptions, Table};
    ///
    /// let table = Table::open("pLogData.db").unwrap();
    /// let mut sink = FnSink(|row: Vec<pxdb::paradox::field_decode::Value>| {
    ///     println!("{:?}", row);
    ///     Ok::<(), pxdb::PxError>(())
    /// });
    /// table.read_rows(&mut sink, &DecodeOptions::with_fix_hour(1)).unwrap();
    /// ```
    pub fn read_rows(
        &self,
        sink: &mut dyn RowSink,
        opts: &DecodeOptions,
    ) -> Result<ReadSummary, PxError> {
        let ctx = opts.field_context();
        let record_size = self.header.record_size as usize;
        let mut summary = ReadSummary::default();

        for block in self.blocks() {
            summary.blocks += 1;
            if block.is_skipped() {
                summary.skipped_blocks += 1;
                continue;
            }

            let mut reader = RecordReader::new(&self.data, records_start(&block));
            for _ in 0..block.num_recs {
                let record = decode_record(&mut reader, &self.fields, record_size, &ctx);
                sink.append_row(record.values)?;
                summary.rows += 1;
            }
        }

        Ok(summary)
    }
}

fn records_start(block: &BlockHeader) -> usize {
    // The block header was read from memory, so its offset fits in usize
    block.records_offset() as usize
}

/// Decode the table file at `path` into `sink`, applying `fix_hour` to every
/// timestamp. Text fields use [`DEFAULT_ENCODING`].
pub fn read_table<P: AsRef<Path>>(
    path: P,
    sink: &mut dyn RowSink,
    fix_hour: i32,
) -> Result<ReadSummary, PxError> {
    let table = Table::open(path)?;
    table.read_rows(sink, &DecodeOptions::with_fix_hour(fix_hour))
}
