//! Shared utilities (hex dump formatting, table file discovery, config and logging setup).

#[cfg(feature = "cli")]
pub mod config;
pub mod fs;
pub mod hex;
#[cfg(feature = "cli")]
pub mod logging;
