//! Path helpers for user-supplied and default on-disk locations.

use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "localmarket";

/// Expands a leading `~` (Unix or Windows separator) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// Resolves a file under the per-user data directory, falling back to the
/// working directory when the platform has none.
pub fn default_data_file(file_name: &str) -> PathBuf {
    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(file_name)
}
