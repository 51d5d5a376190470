//! Paradox table decoding toolkit.
//!
//! The `paradox-utils` crate (library name `pxdb`) provides Rust types and
//! functions for reading Borland Paradox table files (`.DB`). A table file
//! carries its own schema: a fixed header, a field-descriptor table, a
//! NUL-terminated field-name table, and a chain of fixed-stride data blocks
//! holding fixed-width records. The decoder recovers typed rows from the raw
//! bytes without any external schema.
//!
//! # CLI Reference
//!
//! Install the `pxdb` binary and use its subcommands to work with Paradox
//! tables from the command line.
//!
//! ```text
//! cargo install paradox-utils
//! ```
//!
//! ## Subcommands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`pxdb info`](cli::app::Commands::Info) | Header, field descriptors and row summary |
//! | [`pxdb rows`](cli::app::Commands::Rows) | Decode rows as text, JSON or CSV |
//! | [`pxdb blocks`](cli::app::Commands::Blocks) | List data blocks and their record counts |
//! | [`pxdb dump`](cli::app::Commands::Dump) | Hex dump of the header or a data block |
//! | [`pxdb find`](cli::app::Commands::Find) | List tables in a directory |
//! | [`pxdb last-seen`](cli::app::Commands::LastSeen) | Employee last-seen report from an access-control database |
//!
//! ## Global options
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>`,
//! `--config <file>` and `--log-level <filter>`.
//!
//! # Library API
//!
//! ```toml
//! [dependencies]
//! pxdb = { package = "paradox-utils", version = "0.3", default-features = false }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use pxdb::paradox::sink::RowCollector;
//! use pxdb::paradox::table::{DecodeOptions, Table};
//!
//! let table = Table::open("pList.DB").unwrap();
//! for field in table.fields() {
//!     println!("{} {} ({} bytes)", field.name, field.field_type, field.size);
//! }
//!
//! let mut rows = RowCollector::default();
//! let summary = table.read_rows(&mut rows, &DecodeOptions::default()).unwrap();
//! println!("{} rows in {} blocks", summary.rows, summary.blocks);
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`paradox::table`] | File loading, row decoding entry points |
//! | [`paradox::header`] | Table header and field descriptor parsing |
//! | [`paradox::block`] | Data block headers and the fixed-stride block walker |
//! | [`paradox::record`] | Record layout and row assembly |
//! | [`paradox::field_decode`] | Per-type value decoding |
//! | [`paradox::field_types`] | Field type tags |
//! | [`paradox::sink`] | Row sink trait and positional extraction |
//! | [`paradox::constants`] | File structure constants |
//! | [`report`] | Employee/event consumers and the last-seen report |
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | on | Builds the `pxdb` binary, config file support and log setup. |

#[cfg(feature = "cli")]
pub mod cli;
pub mod paradox;
pub mod report;
pub mod util;

use thiserror::Error;

/// Errors returned by `pxdb` operations.
#[derive(Error, Debug)]
pub enum PxError {
    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// The file is shorter than the fixed table header.
    #[error("Truncated header: file is {len} bytes, need at least {need}")]
    TruncatedHeader { len: usize, need: usize },

    /// The field descriptor or field name table ends before all fields are read.
    #[error("Truncated field descriptors: {0}")]
    TruncatedDescriptors(String),

    /// A parse error occurred (impossible header values, malformed config or JSON).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A row sink rejected a decoded row.
    #[error("Row error: {0}")]
    Row(String),

    /// An invalid argument was supplied (unknown encoding, bad offset, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),
}
