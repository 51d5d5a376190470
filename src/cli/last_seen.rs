use std::io::Write;
use std::path::PathBuf;

use crate::cli::wprintln;
use crate::paradox::table::DecodeOptions;
use crate::report::last_seen::build_report;
use crate::PxError;

pub struct LastSeenOptions {
    pub dir: PathBuf,
    pub decode: DecodeOptions,
    pub event_code: i64,
    pub pretty: bool,
}

/// Print the last-seen employees report as a JSON array.
pub fn execute(opts: &LastSeenOptions, writer: &mut dyn Write) -> Result<(), PxError> {
    if !opts.dir.is_dir() {
        return Err(PxError::Argument(format!(
            "Database directory does not exist: {}",
            opts.dir.display()
        )));
    }

    let report = build_report(&opts.dir, &opts.decode, opts.event_code)?;

    let json = if opts.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| PxError::Parse(format!("JSON serialization error: {}", e)))?;

    wprintln!(writer, "{}", json)
}
