// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Recently-installed version cache
//!
//! A plain-text `RECENT` file in the install directory, one version per
//! line, newest first, capped at three entries. A file containing anything
//! that is not a well-formed version is considered dirty and recreated.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::version::valid_version_format;

/// Cache file name inside the install directory.
pub const RECENT_FILE: &str = "RECENT";

const MAX_RECENT: usize = 3;

/// Versions recorded in the cache, newest first.
///
/// A missing file yields an empty list. A dirty file is removed and also
/// yields an empty list.
///
/// # Errors
/// Only I/O failures; a malformed cache is handled, not reported.
pub fn get_recent_versions(install_dir: &Path) -> Result<Vec<String>, Error> {
    let path = install_dir.join(RECENT_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let lines = read_lines(&path)?;
    if lines.iter().any(|line| !valid_version_format(line)) {
        fs::remove_file(&path)?;
        return Ok(Vec::new());
    }
    Ok(lines)
}

/// Record `version` as the most recently installed one.
///
/// Already-recorded versions are left in place; otherwise the version is
/// prepended and the list trimmed to the newest three.
///
/// # Errors
/// I/O failures reading or rewriting the cache file.
pub fn add_recent(install_dir: &Path, version: &str) -> Result<(), Error> {
    fs::create_dir_all(install_dir)?;

    let mut versions = get_recent_versions(install_dir)?;
    if versions.iter().any(|v| v == version) {
        return Ok(());
    }

    versions.insert(0, version.to_string());
    versions.truncate(MAX_RECENT);

    let path = install_dir.join(RECENT_FILE);
    fs::write(&path, versions.join("\n") + "\n")?;
    Ok(())
}

fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
