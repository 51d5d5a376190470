//! CLI subcommand implementations for the `pxdb` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the resolved arguments and a
//! `pub fn execute(opts, writer) -> Result<(), PxError>` entry point. The
//! `writer: &mut dyn Write` parameter allows output to be captured in tests
//! or redirected to a file via the global `--output` flag. Values that may
//! come from the config file (database directory, hour correction, code
//! page) are resolved by `main.rs` before the options are built.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `pxdb info` | [`info`] | Table header, field descriptors and block/row summary |
//! | `pxdb rows` | [`rows`] | Decode rows as text, JSON or CSV |
//! | `pxdb blocks` | [`blocks`] | Data block list with chain pointers and record counts |
//! | `pxdb dump` | [`dump`] | Hex dump of raw bytes by block number or absolute offset |
//! | `pxdb find` | [`find`] | List the `.DB` tables in a directory |
//! | `pxdb last-seen` | [`last_seen`] | Last time each employee passed a door, as JSON |
//!
//! The `wprintln!` and `wprint!` macros wrap `writeln!`/`write!` to convert
//! `io::Error` into `PxError`.

pub mod app;
pub mod blocks;
pub mod dump;
pub mod find;
pub mod info;
pub mod last_seen;
pub mod rows;

/// Write a line to the given writer, converting io::Error to PxError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::PxError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::PxError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to PxError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::PxError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

use crate::PxError;

/// Serialize `value` as pretty JSON and write it with a trailing newline.
pub(crate) fn write_json<T: serde::Serialize>(
    writer: &mut dyn std::io::Write,
    value: &T,
) -> Result<(), PxError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PxError::Parse(format!("JSON serialization error: {}", e)))?;
    wprintln!(writer, "{}", json)
}
