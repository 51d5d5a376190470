use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{wprintln, write_json};
use crate::paradox::field_decode::Value;
use crate::paradox::header::{FieldDescriptor, TableHeader};
use crate::paradox::sink::FnSink;
use crate::paradox::table::{DecodeOptions, ReadSummary, Table};
use crate::util::hex::format_offset;
use crate::PxError;

pub struct InfoOptions {
    pub file: String,
    pub json: bool,
}

#[derive(Serialize)]
struct InfoJson<'a> {
    file: &'a str,
    file_size: u64,
    header: &'a TableHeader,
    fields: Vec<FieldJson<'a>>,
    field_bytes: usize,
    summary: ReadSummary,
}

#[derive(Serialize)]
struct FieldJson<'a> {
    name: &'a str,
    type_code: u8,
    type_name: &'static str,
    size: u8,
}

impl<'a> From<&'a FieldDescriptor> for FieldJson<'a> {
    fn from(f: &'a FieldDescriptor) -> Self {
        FieldJson {
            name: &f.name,
            type_code: f.field_type.as_u8(),
            type_name: f.field_type.name(),
            size: f.size,
        }
    }
}

/// Show the header, the field layout and how many blocks and rows the table holds.
pub fn execute(opts: &InfoOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    let table = Table::open(&opts.file)?;
    // Counting rows needs a full decode; the rows themselves are dropped.
    let mut discard = FnSink(|_row: Vec<Value>| Ok::<(), PxError>(()));
    let summary = table.read_rows(&mut discard, &DecodeOptions::default())?;
    let header = table.header();
    let field_bytes: usize = table.fields().iter().map(|f| f.size as usize).sum();

    if opts.json {
        let info = InfoJson {
            file: &opts.file,
            file_size: table.file_size(),
            header,
            fields: table.fields().iter().map(FieldJson::from).collect(),
            field_bytes,
            summary,
        };
        return write_json(writer, &info);
    }

    wprintln!(writer, "{}", format!("Table: {}", opts.file).bold())?;
    wprintln!(writer, "  File size:     {}", format_offset(table.file_size()))?;
    wprintln!(writer, "  Record size:   {}", header.record_size)?;
    wprintln!(writer, "  Block size:    {}", header.header_size)?;
    wprintln!(writer, "  Fields:        {}", header.num_fields)?;
    if field_bytes < header.record_size as usize {
        wprintln!(
            writer,
            "  Padding:       {} bytes per record",
            header.record_size as usize - field_bytes
        )?;
    } else if field_bytes > header.record_size as usize {
        wprintln!(
            writer,
            "  {}",
            format!(
                "Fields span {} bytes, more than the record size",
                field_bytes
            )
            .yellow()
        )?;
    }
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Fields:".bold())?;
    wprintln!(
        writer,
        "  {:<4} {:<24} {:<12} {:>4}  {}",
        "#", "Name", "Type", "Size", "Description"
    )?;
    for (i, f) in table.fields().iter().enumerate() {
        wprintln!(
            writer,
            "  {:<4} {:<24} {:<12} {:>4}  {}",
            i,
            f.name,
            f.field_type.to_string(),
            f.size,
            f.field_type.description()
        )?;
    }
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Blocks:".bold())?;
    wprintln!(writer, "  Visited:       {}", summary.blocks)?;
    if summary.skipped_blocks > 0 {
        wprintln!(
            writer,
            "  Skipped:       {}",
            summary.skipped_blocks.to_string().yellow()
        )?;
    } else {
        wprintln!(writer, "  Skipped:       {}", summary.skipped_blocks)?;
    }
    wprintln!(writer, "  Rows:          {}", summary.rows)?;

    Ok(())
}
