// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Binary installation and symlink switching
//!
//! Installed binaries live under `~/.terragrunt.versions/terragrunt_{ver}`;
//! switching repoints a symlink at the configured bin path. Downloads go to
//! a temporary name first and are renamed into place, so an interrupted
//! download never leaves a half-written binary behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache;
use crate::error::Error;
use crate::platform::Platform;
use crate::version::{Version, valid_version_format};

/// Directory under `$HOME` holding the installed binaries and the cache.
pub const INSTALL_SUBDIR: &str = ".terragrunt.versions";

/// File name prefix of installed binaries.
pub const VERSION_PREFIX: &str = "terragrunt_";

/// Default path for the active terragrunt symlink.
pub const DEFAULT_BIN: &str = "/usr/local/bin/terragrunt";

/// Everything the install path needs to know, resolved once in `main`.
#[derive(Debug)]
pub struct Context {
    /// Where the active symlink goes, e.g. `/usr/local/bin/terragrunt`.
    pub bin_path: PathBuf,
    /// Mirror serving release binaries.
    pub mirror_url: String,
    /// Catalog listing published versions.
    pub catalog_url: String,
    /// Where downloaded binaries are kept.
    pub install_dir: PathBuf,
    pub verbose: bool,
}

/// The per-user install directory, `~/.terragrunt.versions`.
///
/// # Errors
/// [`Error::NoHomeDir`] when the home directory cannot be determined.
pub fn default_install_dir() -> Result<PathBuf, Error> {
    Ok(home::home_dir().ok_or(Error::NoHomeDir)?.join(INSTALL_SUBDIR))
}

/// Whether `version` has already been downloaded into `install_dir`.
#[must_use]
pub fn is_installed(version: &str, install_dir: &Path) -> bool {
    install_dir
        .join(format!("{VERSION_PREFIX}{version}"))
        .exists()
}

/// Install `version` and make it the active terragrunt.
///
/// Downloads the binary if it is not already cached, repoints the symlink
/// and records the version in the recent cache.
///
/// # Errors
/// Format, download, and filesystem failures; see [`Error`].
pub fn install(version: &str, ctx: &Context) -> Result<(), Error> {
    if !valid_version_format(version) {
        return Err(Error::InvalidVersion(version.to_string()));
    }
    let parsed: Version = version.parse()?;

    fs::create_dir_all(&ctx.install_dir)?;
    let binary_path = ctx.install_dir.join(format!("{VERSION_PREFIX}{version}"));

    if !binary_path.exists() {
        let url = Platform::current().download_url(&ctx.mirror_url, &parsed);
        if ctx.verbose {
            eprintln!("Downloading from: {url}");
        }
        download_to(&url, &binary_path)?;
    } else if ctx.verbose {
        eprintln!("Using cached binary: {}", binary_path.display());
    }

    let link_path = installable_bin_location(&ctx.bin_path)?;
    swap_symlink(&binary_path, &link_path)?;

    if let Some(other) = shadowing_binary(&link_path) {
        eprintln!(
            "warning: another terragrunt found on PATH at {} which shadows {}",
            other.display(),
            link_path.display()
        );
    }

    println!("Switched terragrunt to version {version:?}");
    cache::add_recent(&ctx.install_dir, version)?;
    Ok(())
}

/// Download `url` into `dest`, atomically.
///
/// The body is streamed to `{dest}.download`, marked executable and renamed
/// into place.
fn download_to(url: &str, dest: &Path) -> Result<(), Error> {
    let response = attohttpc::get(url)
        .header("User-Agent", concat!("tgv/", env!("CARGO_PKG_VERSION")))
        .send()
        .map_err(|source| Error::Network {
            url: url.to_string(),
            source,
        })?;

    if !response.is_success() {
        return Err(Error::Download {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    // with_extension would clobber the version's last dot.
    let mut staging = dest.as_os_str().to_os_string();
    staging.push(".download");
    let staging = PathBuf::from(staging);

    let file = fs::File::create(&staging)?;
    response.write_to(file).map_err(|source| Error::Network {
        url: url.to_string(),
        source,
    })?;

    set_executable(&staging)?;
    fs::rename(&staging, dest)?;
    Ok(())
}

fn set_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Point `link` at `target`, replacing whatever was there before.
///
/// # Errors
/// Filesystem failures removing the old entry or creating the link.
pub fn swap_symlink(target: &Path, link: &Path) -> Result<(), Error> {
    if link.exists() || link.is_symlink() {
        fs::remove_file(link)?;
    }
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

/// Where the symlink can actually be written.
///
/// When the requested bin directory is not writable the user-local `~/bin`
/// is used instead, created if needed, with a note about extending `$PATH`.
///
/// # Errors
/// [`Error::BinPathMissing`] when the requested directory does not exist,
/// [`Error::NoHomeDir`] when the fallback cannot be located.
pub fn installable_bin_location(bin_path: &Path) -> Result<PathBuf, Error> {
    let bin_dir = bin_path.parent().unwrap_or_else(|| Path::new("/"));
    if !bin_dir.exists() {
        return Err(Error::BinPathMissing(bin_path.to_path_buf()));
    }

    if dir_writable(bin_dir) {
        return Ok(bin_path.to_path_buf());
    }

    let home_bin = home::home_dir().ok_or(Error::NoHomeDir)?.join("bin");
    if home_bin.exists() {
        eprintln!("Installing terragrunt at {}", home_bin.display());
    } else {
        eprintln!("Unable to write to: {}", bin_path.display());
        eprintln!("Creating bin directory at: {}", home_bin.display());
        fs::create_dir_all(&home_bin)?;
        eprintln!(
            "RUN `export PATH=$PATH:{}` to append bin to $PATH",
            home_bin.display()
        );
    }
    Ok(home_bin.join("terragrunt"))
}

fn dir_writable(dir: &Path) -> bool {
    let probe = dir.join(".tgv-write-check");
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// The first `terragrunt` on `$PATH`, when it is not the managed symlink.
#[must_use]
pub fn shadowing_binary(link_path: &Path) -> Option<PathBuf> {
    let first = which::which_all("terragrunt").ok()?.next()?;
    if first == link_path {
        None
    } else {
        Some(first)
    }
}
