//! Filesystem helpers for table file discovery.
//!
//! Provides [`find_table_files`] to search a Paradox data directory for
//! `.DB` files, and [`find_table_file`] to resolve one table name against a
//! directory regardless of the extension's case (`pList.DB` next to
//! `pLogData.db` is common). Used by the `find` and `last-seen` subcommands.

use std::path::{Path, PathBuf};

use crate::PxError;

/// Extensions of Paradox table files, compared case-insensitively.
pub const TABLE_EXTENSIONS: &[&str] = &["db"];

/// Find table files in a data directory, filtered by extension.
///
/// Searches the given directory and its immediate subdirectories for files
/// whose extension matches any of `extensions`, ignoring ASCII case.
/// Results are sorted by path.
pub fn find_table_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, PxError> {
    let mut files = Vec::new();

    for path in read_dir_paths(dir)? {
        if path.is_dir() {
            files.extend(
                read_dir_paths(&path)?
                    .into_iter()
                    .filter(|p| p.is_file() && has_matching_extension(p, extensions)),
            );
        } else if has_matching_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve `name` inside `dir`, ignoring ASCII case of the whole file name.
///
/// An exact match wins. Otherwise the first case-insensitive match in
/// directory order is returned. A missing file is an I/O error naming the
/// expected path.
pub fn find_table_file(dir: &Path, name: &str) -> Result<PathBuf, PxError> {
    let exact = dir.join(name);
    if exact.is_file() {
        return Ok(exact);
    }

    read_dir_paths(dir)?
        .into_iter()
        .find(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|f| f.eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| PxError::Io(format!("Table file not found: {}", exact.display())))
}

fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>, PxError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| PxError::Io(format!("Cannot read directory {}: {}", dir.display(), e)))?;

    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| PxError::Io(format!("Cannot read directory entry: {}", e)))
        })
        .collect()
}

fn has_matching_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
