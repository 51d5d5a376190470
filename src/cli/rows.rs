use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::app::RowFormat;
use crate::cli::{wprint, wprintln, write_json};
use crate::paradox::field_decode::Value;
use crate::paradox::sink::{RowCollector, RowSink};
use crate::paradox::table::{DecodeOptions, Table};
use crate::PxError;

pub struct RowsOptions {
    pub file: String,
    pub decode: DecodeOptions,
    pub format: RowFormat,
    pub limit: Option<u64>,
}

#[derive(Serialize)]
struct RowsJson<'a> {
    file: &'a str,
    fields: Vec<&'a str>,
    rows: Vec<Vec<Value>>,
}

/// Streams rows to the writer as text or CSV.
struct RowPrinter<'w> {
    writer: &'w mut dyn Write,
    format: RowFormat,
    limit: Option<u64>,
    written: u64,
}

impl RowSink for RowPrinter<'_> {
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError> {
        if self.limit.is_some_and(|n| self.written >= n) {
            return Ok(());
        }
        self.written += 1;

        match self.format {
            RowFormat::Csv => {
                let cells: Vec<String> = values.iter().map(csv_escape).collect();
                wprintln!(self.writer, "{}", cells.join(","))
            }
            _ => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        wprint!(self.writer, " | ")?;
                    }
                    wprint!(self.writer, "{}", v)?;
                }
                wprintln!(self.writer)
            }
        }
    }
}

/// Decode the table and print its rows in block-then-record order.
pub fn execute(opts: &RowsOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    let table = Table::open(&opts.file)?;
    let names: Vec<&str> = table.fields().iter().map(|f| f.name.as_str()).collect();

    if opts.format == RowFormat::Json {
        let mut rows = RowCollector::default();
        table.read_rows(&mut rows, &opts.decode)?;
        if let Some(n) = opts.limit {
            rows.rows.truncate(usize::try_from(n).unwrap_or(usize::MAX));
        }
        let out = RowsJson {
            file: &opts.file,
            fields: names,
            rows: rows.rows,
        };
        return write_json(writer, &out);
    }

    if opts.format == RowFormat::Csv {
        let header: Vec<String> = names.iter().map(|n| csv_escape_str(n)).collect();
        wprintln!(writer, "{}", header.join(","))?;
    } else {
        wprintln!(writer, "{}", names.join(" | ").bold())?;
    }

    let mut printer = RowPrinter {
        writer: &mut *writer,
        format: opts.format,
        limit: opts.limit,
        written: 0,
    };
    let summary = table.read_rows(&mut printer, &opts.decode)?;
    let written = printer.written;

    if opts.format == RowFormat::Text {
        wprintln!(writer)?;
        wprintln!(
            writer,
            "{} of {} rows from {} blocks ({} skipped)",
            written,
            summary.rows,
            summary.blocks,
            summary.skipped_blocks
        )?;
    }

    Ok(())
}

/// CSV-escape a decoded value (RFC 4180).
fn csv_escape(val: &Value) -> String {
    match val {
        Value::Int(n) => n.to_string(),
        Value::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        Value::Date => String::new(),
        Value::Text(s) => csv_escape_str(s),
    }
}

fn csv_escape_str(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
