//! Path resolution for user-scoped data and configuration.
//!
//! Everything lyst writes lives under the platform's user data directory
//! (`~/.local/share/lyst` on Linux, `~/Library/Application Support/lyst` on
//! macOS). The optional config file lives under the user config directory.

use crate::domain::error::{LystError, Result};
use std::path::{Path, PathBuf};

/// Directory and file-name stem used everywhere.
pub const APP_NAME: &str = "lyst";

/// Returns the directory holding the database and log file.
///
/// # Errors
///
/// Returns [`LystError::Config`] if the platform has no user data directory
/// (for example when `$HOME` is unset).
///
/// # Examples
///
/// ```no_run
/// let dir = lyst::infrastructure::data_dir()?;
/// assert!(dir.ends_with("lyst"));
/// # Ok::<(), lyst::LystError>(())
/// ```
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| LystError::Config("no user data directory available".to_string()))
}

/// Default database location: `<data dir>/lyst.db`.
///
/// # Errors
///
/// See [`data_dir`].
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(format!("{APP_NAME}.db")))
}

/// Location of the rotating log file, if a data directory exists.
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    data_dir().ok().map(|dir| dir.join(format!("{APP_NAME}.log")))
}

/// Default config file location: `<config dir>/lyst/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths in the config file are written by hand, so `~/lists.db` should
/// work there even though no shell expanded it.
///
/// # Examples
///
/// ```
/// use lyst::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/absolute/path")), Path::new("/absolute/path"));
/// assert_eq!(expand_tilde(Path::new("relative/~")), Path::new("relative/~"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
