//! Data block headers and the block walker.
//!
//! Records live in data blocks of `header_size` bytes. Block `n` starts at
//! `n * header_size`; block 0 is the table header itself. Every block
//! begins with a 6-byte header: next block number, previous block number
//! and `add_size`, the byte offset of the last record in the block.
//!
//! [`BlockIter`] walks blocks by fixed stride from index 1. The next/prev
//! numbers are reported but not followed. The walk ends at the first block
//! whose next-block number cannot be read because the file is exhausted.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::paradox::constants::*;
use crate::paradox::header::TableHeader;

/// Parsed data block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    /// Block index (1-based, block 0 is the table header).
    pub index: u64,
    /// Absolute byte offset of the block.
    pub offset: u64,
    /// Next block number in the chain. Bytes 0-1.
    pub next_block: u16,
    /// Previous block number in the chain. Bytes 2-3.
    pub prev_block: u16,
    /// Offset of the last record relative to the first one. Bytes 4-5.
    pub add_size: u16,
    /// Number of record slots in the block.
    pub num_recs: u16,
}

impl BlockHeader {
    /// Parse the header of block `index`.
    ///
    /// Returns `None` when fewer than 2 bytes remain at the block offset,
    /// which is the end of the block chain. A missing `prev_block` or
    /// `add_size` reads as 0.
    pub fn parse(data: &[u8], header: &TableHeader, index: u64) -> Option<Self> {
        let offset = header.block_offset(index)?;
        let start = usize::try_from(offset).ok()?;
        let block = data.get(start..)?;
        if block.len() < PX_BLOCK_NEXT + SIZE_PX_BLOCK_PTR {
            return None;
        }

        let mut head = [0u8; SIZE_PX_BLOCK_HEAD];
        let n = block.len().min(SIZE_PX_BLOCK_HEAD);
        head[..n].copy_from_slice(&block[..n]);

        let add_size = LittleEndian::read_u16(&head[PX_BLOCK_ADD_SIZE..]);
        Some(BlockHeader {
            index,
            offset,
            next_block: LittleEndian::read_u16(&head[PX_BLOCK_NEXT..]),
            prev_block: LittleEndian::read_u16(&head[PX_BLOCK_PREV..]),
            add_size,
            num_recs: records_in_block(add_size, header.record_size),
        })
    }

    /// Returns true when `add_size` marks a corrupt or sentinel block.
    pub fn is_skipped(&self) -> bool {
        self.add_size > PX_ADD_SIZE_MAX
    }

    /// Absolute byte offset of the first record in this block.
    pub fn records_offset(&self) -> u64 {
        self.offset + SIZE_PX_BLOCK_HEAD as u64
    }
}

/// Number of record slots in a block.
///
/// `add_size` is the offset of the last record, so the count is
/// `add_size / record_size + 1`. Values above 32767 mark a corrupt or
/// sentinel block, which holds no records.
///
/// # Examples
///
/// ```
/// use pxdb::paradox::block::records_in_block;
///
/// assert_eq!(records_in_block(0, 10), 1);
/// assert_eq!(records_in_block(10, 10), 2);
/// assert_eq!(records_in_block(25, 10), 3);
/// assert_eq!(records_in_block(40000, 10), 0);
/// ```
pub fn records_in_block(add_size: u16, record_size: u16) -> u16 {
    if add_size > PX_ADD_SIZE_MAX || record_size == 0 {
        0
    } else {
        add_size / record_size + 1
    }
}

/// Iterator over the data blocks of a table, by fixed stride from block 1.
pub struct BlockIter<'a> {
    data: &'a [u8],
    header: TableHeader,
    next_index: u64,
}

impl<'a> BlockIter<'a> {
    /// Walk the blocks of `data` laid out by `header`.
    pub fn new(data: &'a [u8], header: TableHeader) -> Self {
        BlockIter {
            data,
            header,
            next_index: PX_FIRST_BLOCK,
        }
    }
}

impl Iterator for BlockIter<'_> {
    type Item = BlockHeader;

    fn next(&mut self) -> Option<BlockHeader> {
        let block = BlockHeader::parse(self.data, &self.header, self.next_index)?;
        self.next_index += 1;
        Some(block)
    }
}
