//! Platform-specific paths for the defaults file.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/dualsig/` (Linux), `~/Library/Application Support/dualsig/` (macOS), `%APPDATA%\dualsig\` (Windows)
//! - **System config**: `/etc/dualsig/` (Linux), `/Library/Application Support/dualsig/` (macOS)
//!
//! # Example
//!
//! ```rust,no_run
//! use dualsig_config::paths;
//!
//! if let Some(path) = paths::find_defaults() {
//!     println!("Defaults from: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "dualsig";

/// File name of the defaults file.
pub const DEFAULTS_FILE: &str = "defaults.toml";

/// Environment variable naming an explicit defaults file.
pub const DEFAULTS_ENV: &str = "DUALSIG_DEFAULTS";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the system-wide configuration directory.
pub fn system_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/etc").join(APP_NAME)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support").join(APP_NAME)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
    }
}

/// Path of the user's defaults file (which may not exist).
pub fn defaults_path() -> PathBuf {
    user_config_dir().join(DEFAULTS_FILE)
}

/// Find the defaults file to use.
///
/// Searches in the following order:
/// 1. The file named by `DUALSIG_DEFAULTS`
/// 2. User config directory
/// 3. System config directory
pub fn find_defaults() -> Option<PathBuf> {
    let env_path = std::env::var_os(DEFAULTS_ENV).map(PathBuf::from);
    first_existing(
        env_path
            .into_iter()
            .chain([defaults_path(), system_config_dir().join(DEFAULTS_FILE)]),
    )
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

/// Ensure the user config directory exists.
///
/// Creates the directory and any parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    ensure_dir(&user_config_dir())
}

fn ensure_dir(dir: &Path) -> Result<PathBuf, crate::ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| crate::ConfigError::create_dir(dir, e))?;
    }
    Ok(dir.to_path_buf())
}
