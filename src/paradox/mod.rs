//! Paradox `.DB` table format parsing.
//!
//! This module reads the on-disk structures of Borland Paradox table files:
//! the table header, field descriptors and names, the fixed-stride data
//! blocks, and the big-endian field encodings inside each record.
//!
//! Start with [`table::Table`] to open a `.DB` file, then call
//! [`table::Table::read_rows`] with a [`sink::RowSink`] to receive decoded
//! rows.

pub mod block;
pub mod constants;
pub mod field_decode;
pub mod field_types;
pub mod header;
pub mod record;
pub mod sink;
pub mod table;
