use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "pxdb")]
#[command(about = "Paradox table file analysis toolkit")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Path to a TOML config file (default: <exe-dir>/<exe-name>.conf if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log filter for diagnostics on stderr (e.g. info, debug); RUST_LOG wins
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Output format of the `rows` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RowFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show table header, field descriptors and block summary
    Info {
        /// Path to Paradox table file (.DB)
        #[arg(short, long)]
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Decode and print table rows
    Rows {
        /// Path to Paradox table file (.DB)
        #[arg(short, long)]
        file: String,

        /// Hours subtracted from every timestamp (default: from config, else 0)
        #[arg(long = "fix-hour", allow_negative_numbers = true)]
        fix_hour: Option<i32>,

        /// Code page of text fields (default: from config, else windows-1251)
        #[arg(long)]
        encoding: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: RowFormat,

        /// Stop after this many rows
        #[arg(short = 'n', long)]
        limit: Option<u64>,
    },

    /// List data blocks with their chain pointers and record counts
    Blocks {
        /// Path to Paradox table file (.DB)
        #[arg(short, long)]
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Hex dump of raw table bytes
    Dump {
        /// Path to Paradox table file (.DB)
        #[arg(short, long)]
        file: String,

        /// Block number to dump (default: 0, the table header)
        #[arg(short, long)]
        block: Option<u64>,

        /// Absolute byte offset to start dumping (bypasses block mode)
        #[arg(long)]
        offset: Option<u64>,

        /// Number of bytes to dump (default: block size or 256 for offset mode)
        #[arg(short, long)]
        length: Option<usize>,

        /// Output raw binary bytes (no formatting)
        #[arg(long)]
        raw: bool,

        /// Code page for the text sidebar (default: ASCII only)
        #[arg(long)]
        encoding: Option<String>,
    },

    /// List Paradox tables in a directory
    Find {
        /// Directory to search (default: database path from config)
        #[arg(short, long)]
        dir: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Report when each employee last passed a door
    #[command(name = "last-seen")]
    LastSeen {
        /// Database directory holding pList.DB and pLogData.db (default: from config)
        #[arg(short, long)]
        dir: Option<String>,

        /// Hours subtracted from every timestamp (default: from config, else 0)
        #[arg(long = "fix-hour", allow_negative_numbers = true)]
        fix_hour: Option<i32>,

        /// Event code that counts as a pass
        #[arg(long = "event-code", default_value_t = 28)]
        event_code: i64,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
