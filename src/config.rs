// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Configuration file and environment sources
//!
//! A `.tgv.toml` in the working directory (or the home directory as a
//! fallback) may set the symlink path and a pinned version. Plain-text
//! `.tgvrc` and `.terragrunt-version` files and the `TG_VERSION` variable
//! supply a version only. Precedence between the sources is decided by the
//! caller; this module just reads them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

pub const TOML_FILENAME: &str = ".tgv.toml";
pub const RC_FILENAME: &str = ".tgvrc";
pub const VERSION_FILENAME: &str = ".terragrunt-version";

/// Environment variable naming a version to install.
pub const VERSION_ENV: &str = "TG_VERSION";

/// Contents of a `.tgv.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Pinned terragrunt version.
    pub version: Option<String>,
    /// Path for the active terragrunt symlink.
    pub bin: Option<PathBuf>,
}

/// Load `.tgv.toml` from `dir`, if present.
///
/// # Errors
/// [`Error::Config`] when the file exists but is not valid TOML.
pub fn load_settings(dir: &Path) -> Result<Option<Settings>, Error> {
    let path = dir.join(TOML_FILENAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let settings = toml::from_str(&content).map_err(|source| Error::Config { path, source })?;
    Ok(Some(settings))
}

/// Version named by the plain-text files in `dir`, with the file name it
/// came from. `.tgvrc` wins over `.terragrunt-version`.
///
/// # Errors
/// Only I/O failures; missing files simply yield `None`.
pub fn version_from_files(dir: &Path) -> Result<Option<(String, &'static str)>, Error> {
    for filename in [RC_FILENAME, VERSION_FILENAME] {
        let path = dir.join(filename);
        if !path.exists() {
            continue;
        }
        let version = fs::read_to_string(&path)?.trim().to_string();
        if !version.is_empty() {
            return Ok(Some((version, filename)));
        }
    }
    Ok(None)
}

/// Version named by the `TG_VERSION` environment variable, if set and
/// non-empty.
#[must_use]
pub fn version_from_env() -> Option<String> {
    std::env::var(VERSION_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
