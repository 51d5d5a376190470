//! Configuration file support.
//!
//! `pxdb` reads an optional TOML file:
//!
//! ```toml
//! [database]
//! path = "/srv/orion"
//! fix_hour = 0
//! encoding = "windows-1251"
//!
//! [log]
//! level = "info"
//! file = "/var/log/pxdb.log"
//! ```
//!
//! The section and key names of the access control server's own config
//! (`[OrionDatabase]` with `Path`) are accepted as aliases, and unknown
//! sections such as `[WebServer]` are ignored, so an existing server config
//! can be pointed at directly.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI arguments
//! 2. `--config <file>`, or `<exe-dir>/<exe-stem>.conf` when present
//! 3. Hardcoded defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paradox::table::DecodeOptions;
use crate::PxError;

/// Extension of the config file looked up next to the executable.
pub const CONFIG_EXTENSION: &str = "conf";

/// Log filter used when neither the config nor the CLI sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level config file structure. Every field is optional so the file
/// only needs to contain the values the user wants to set.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PxConfig {
    /// `[database]`
    #[serde(default, alias = "OrionDatabase")]
    pub database: DatabaseConfig,

    /// `[log]`
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Directory holding the `.DB` files.
    #[serde(alias = "Path")]
    pub path: Option<PathBuf>,
    /// Hours subtracted from every decoded timestamp.
    pub fix_hour: Option<i32>,
    /// WHATWG label of the text code page.
    pub encoding: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `pxdb=debug`.
    pub level: Option<String>,
    /// File that log lines are appended to, in addition to stderr.
    pub file: Option<PathBuf>,
}

impl PxConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PxError> {
        toml::from_str(text).map_err(|e| PxError::Parse(format!("Invalid config: {}", e)))
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, PxError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PxError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| PxError::Parse(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Database directory: the CLI value if given, else the configured one.
    pub fn database_dir(&self, cli: Option<&Path>) -> Option<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.database.path.clone())
    }

    /// Build decode options, letting CLI values override the file.
    pub fn decode_options(
        &self,
        fix_hour: Option<i32>,
        encoding: Option<&str>,
    ) -> Result<DecodeOptions, PxError> {
        let opts = DecodeOptions::with_fix_hour(
            fix_hour.or(self.database.fix_hour).unwrap_or_default(),
        );
        match encoding.or(self.database.encoding.as_deref()) {
            Some(label) => opts.encoding_label(label),
            None => Ok(opts),
        }
    }

    /// Log filter: the CLI value if given, else the configured one, else
    /// [`DEFAULT_LOG_LEVEL`].
    pub fn log_level(&self, cli: Option<&str>) -> String {
        cli.or(self.log.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    }
}

/// `<exe-dir>/<exe-stem>.conf` for the running executable.
pub fn default_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.with_extension(CONFIG_EXTENSION))
}

/// Load the config named on the command line, else the one next to the
/// executable if it exists, else defaults.
///
/// Returns the config and the file it came from.
pub fn resolve_config(explicit: Option<&Path>) -> Result<(PxConfig, Option<PathBuf>), PxError> {
    if let Some(path) = explicit {
        return Ok((PxConfig::load(path)?, Some(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) if path.is_file() => Ok((PxConfig::load(&path)?, Some(path))),
        _ => Ok((PxConfig::default(), None)),
    }
}
