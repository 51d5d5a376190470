use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{wprintln, write_json};
use crate::paradox::block::BlockHeader;
use crate::paradox::table::Table;
use crate::util::hex::format_hex16;
use crate::PxError;

pub struct BlocksOptions {
    pub file: String,
    pub json: bool,
}

#[derive(Serialize)]
struct BlocksJson<'a> {
    file: &'a str,
    block_size: u16,
    record_size: u16,
    blocks: Vec<BlockJson>,
}

#[derive(Serialize)]
struct BlockJson {
    #[serde(flatten)]
    header: BlockHeader,
    skipped: bool,
}

/// List every data block visited by the fixed-stride walk.
pub fn execute(opts: &BlocksOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    let table = Table::open(&opts.file)?;
    let blocks: Vec<BlockHeader> = table.blocks().collect();

    if opts.json {
        let out = BlocksJson {
            file: &opts.file,
            block_size: table.header().header_size,
            record_size: table.header().record_size,
            blocks: blocks
                .into_iter()
                .map(|b| BlockJson {
                    skipped: b.is_skipped(),
                    header: b,
                })
                .collect(),
        };
        return write_json(writer, &out);
    }

    wprintln!(
        writer,
        "{}",
        format!(
            "{} blocks of {} bytes in {}",
            blocks.len(),
            table.header().header_size,
            opts.file
        )
        .bold()
    )?;
    wprintln!(
        writer,
        "{:>6}  {:>10}  {:>6}  {:>6}  {:>8}  {:>7}",
        "Block", "Offset", "Next", "Prev", "AddSize", "Records"
    )?;

    for b in &blocks {
        let records = if b.is_skipped() {
            "skipped".yellow().to_string()
        } else {
            b.num_recs.to_string()
        };
        wprintln!(
            writer,
            "{:>6}  {:>10}  {:>6}  {:>6}  {:>8}  {:>7}",
            b.index,
            format!("0x{:x}", b.offset),
            b.next_block,
            b.prev_block,
            format_hex16(b.add_size),
            records
        )?;
    }

    Ok(())
}
