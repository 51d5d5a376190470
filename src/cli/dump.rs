use std::io::Write;

use encoding_rs::Encoding;

use crate::cli::wprintln;
use crate::paradox::table::Table;
use crate::util::hex::{format_offset, hex_dump, hex_dump_with_encoding};
use crate::PxError;

/// Bytes shown in offset mode when no length is given.
const DEFAULT_OFFSET_LENGTH: usize = 256;

pub struct DumpOptions {
    pub file: String,
    pub block: Option<u64>,
    pub offset: Option<u64>,
    pub length: Option<usize>,
    pub raw: bool,
    /// Code page for the sidebar; `None` shows ASCII only.
    pub encoding: Option<&'static Encoding>,
}

/// Hex dump a block (block 0 is the table header) or a byte range.
pub fn execute(opts: &DumpOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    let table = Table::open(&opts.file)?;
    let data = table.data();
    let file_size = table.file_size();

    let (start, length, label) = match opts.offset {
        Some(offset) => (
            offset,
            opts.length.unwrap_or(DEFAULT_OFFSET_LENGTH),
            format!("at offset {}", format_offset(offset)),
        ),
        None => {
            let block = opts.block.unwrap_or(0);
            let block_size = table.header().header_size as usize;
            let offset = table.header().block_offset(block).ok_or_else(|| {
                PxError::Argument(format!(
                    "block {} starts beyond file size {}",
                    block, file_size
                ))
            })?;
            (
                offset,
                opts.length.unwrap_or(block_size).min(block_size),
                format!("block {}", block),
            )
        }
    };

    if start >= file_size {
        return Err(PxError::Argument(format!(
            "{} starts beyond file size {}",
            label, file_size
        )));
    }

    // start < file_size, so it fits in usize
    let begin = start as usize;
    let end = begin.saturating_add(length).min(data.len());
    let bytes = &data[begin..end];

    if opts.raw {
        return writer
            .write_all(bytes)
            .map_err(|e| PxError::Io(format!("Cannot write to output: {}", e)));
    }

    wprintln!(
        writer,
        "Hex dump of {} {} ({} bytes):",
        opts.file,
        label,
        bytes.len()
    )?;
    wprintln!(writer)?;
    let dump = match opts.encoding {
        Some(enc) => hex_dump_with_encoding(bytes, start, enc),
        None => hex_dump(bytes, start),
    };
    wprintln!(writer, "{}", dump)?;

    Ok(())
}
