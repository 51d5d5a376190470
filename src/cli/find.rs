use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use crate::cli::{wprintln, write_json};
use crate::paradox::field_decode::Value;
use crate::paradox::sink::FnSink;
use crate::paradox::table::{DecodeOptions, Table};
use crate::util::fs::{find_table_files, TABLE_EXTENSIONS};
use crate::PxError;

pub struct FindOptions {
    pub dir: PathBuf,
    pub json: bool,
}

#[derive(Serialize)]
struct FindJson {
    dir: String,
    tables: Vec<TableEntryJson>,
}

#[derive(Serialize)]
struct TableEntryJson {
    file: String,
    file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// List the tables in a directory with their field and row counts.
///
/// A file that fails to parse is listed with its error instead of aborting
/// the listing.
pub fn execute(opts: &FindOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    if !opts.dir.is_dir() {
        return Err(PxError::Argument(format!(
            "Database directory does not exist: {}",
            opts.dir.display()
        )));
    }

    let files = find_table_files(&opts.dir, TABLE_EXTENSIONS)?;
    let tables: Vec<TableEntryJson> = files
        .iter()
        .map(|path| inspect(&opts.dir, path))
        .collect();

    if opts.json {
        let out = FindJson {
            dir: opts.dir.display().to_string(),
            tables,
        };
        return write_json(writer, &out);
    }

    if tables.is_empty() {
        wprintln!(writer, "No .db files found in {}", opts.dir.display())?;
        return Ok(());
    }

    for t in &tables {
        match &t.error {
            Some(err) => wprintln!(writer, "{}  {}", t.file, err.red())?,
            None => wprintln!(
                writer,
                "{}  {} fields, {} rows, {} bytes",
                t.file,
                t.fields.unwrap_or_default(),
                t.rows.unwrap_or_default(),
                t.file_size
            )?,
        }
    }

    Ok(())
}

fn inspect(dir: &Path, path: &Path) -> TableEntryJson {
    let display = path.strip_prefix(dir).unwrap_or(path).display().to_string();
    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let counted = Table::open(path).and_then(|table| {
        let mut discard = FnSink(|_row: Vec<Value>| Ok::<(), PxError>(()));
        let summary = table.read_rows(&mut discard, &DecodeOptions::default())?;
        Ok((table.fields().len(), summary.rows))
    });

    match counted {
        Ok((fields, rows)) => TableEntryJson {
            file: display,
            file_size,
            fields: Some(fields),
            rows: Some(rows),
            error: None,
        },
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "skipping unreadable table");
            TableEntryJson {
                file: display,
                file_size,
                fields: None,
                rows: None,
                error: Some(e.to_string()),
            }
        }
    }
}
