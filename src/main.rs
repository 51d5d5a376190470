#[cfg(not(feature = "cli"))]
compile_error!("The `pxdb` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use pxdb::cli;
use pxdb::cli::app::{Cli, ColorMode, Commands};
use pxdb::paradox::table::DecodeOptions;
use pxdb::util::config::{resolve_config, PxConfig};
use pxdb::util::logging::init_logging;
use pxdb::PxError;

fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PxError> {
    let (config, config_source) = resolve_config(cli.config.as_deref().map(Path::new))?;
    init_logging(
        &config.log_level(cli.log_level.as_deref()),
        config.log.file.as_deref(),
    )?;
    if let Some(path) = &config_source {
        tracing::debug!(config = %path.display(), "configuration loaded");
    }

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| PxError::Io(format!("Cannot create {}: {}", path, e)))?,
        None => Box::new(std::io::stdout()),
    };

    match cli.command {
        Commands::Info { file, json } => {
            cli::info::execute(&cli::info::InfoOptions { file, json }, &mut writer)
        }

        Commands::Rows {
            file,
            fix_hour,
            encoding,
            format,
            limit,
        } => cli::rows::execute(
            &cli::rows::RowsOptions {
                file,
                decode: config.decode_options(fix_hour, encoding.as_deref())?,
                format,
                limit,
            },
            &mut writer,
        ),

        Commands::Blocks { file, json } => {
            cli::blocks::execute(&cli::blocks::BlocksOptions { file, json }, &mut writer)
        }

        Commands::Dump {
            file,
            block,
            offset,
            length,
            raw,
            encoding,
        } => cli::dump::execute(
            &cli::dump::DumpOptions {
                file,
                block,
                offset,
                length,
                raw,
                encoding: match encoding {
                    Some(label) => Some(DecodeOptions::default().encoding_label(&label)?.encoding),
                    None => None,
                },
            },
            &mut writer,
        ),

        Commands::Find { dir, json } => cli::find::execute(
            &cli::find::FindOptions {
                dir: database_dir(&config, dir)?,
                json,
            },
            &mut writer,
        ),

        Commands::LastSeen {
            dir,
            fix_hour,
            event_code,
            pretty,
        } => cli::last_seen::execute(
            &cli::last_seen::LastSeenOptions {
                dir: database_dir(&config, dir)?,
                decode: config.decode_options(fix_hour, None)?,
                event_code,
                pretty,
            },
            &mut writer,
        ),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "pxdb", &mut writer);
            Ok(())
        }
    }
}

fn database_dir(config: &PxConfig, cli_dir: Option<String>) -> Result<PathBuf, PxError> {
    config
        .database_dir(cli_dir.as_deref().map(Path::new))
        .ok_or_else(|| {
            PxError::Argument(
                "No database directory: pass --dir or set [database] path in the config"
                    .to_string(),
            )
        })
}
