// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error taxonomy for tgv
//!
//! Every failure in the library surfaces as a typed [`Error`] so that the
//! resolution and install paths stay embeddable and testable. Only `main`
//! decides to terminate the process.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by version resolution, catalog access and installation.
#[derive(Debug, Error)]
pub enum Error {
    /// A version string does not follow the `X.Y.Z[-pre]` form.
    #[error(
        "invalid terragrunt version format: {0:?}\n\
         Format should be #.#.# or #.#.#-@# where # are numbers and @ are word characters.\n\
         For example, 0.11.7 and 0.11.9-beta1 are valid versions"
    )]
    InvalidVersion(String),

    /// A minor version argument does not follow the `X.Y` form.
    #[error(
        "invalid minor terragrunt version format: {0:?}\n\
         Format should be #.# where # are numbers. For example, 0.11 is a valid version"
    )]
    InvalidMinorVersion(String),

    /// The constraint expression cannot be parsed.
    #[error("error parsing constraint {constraint:?}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// A candidate in the catalog list cannot be parsed as a version.
    /// A single malformed candidate invalidates the whole resolution.
    #[error("error parsing candidate version {0:?}")]
    InvalidCandidate(String),

    /// No candidate satisfied the constraint.
    #[error("no version found matching constraint {0:?}. Try `tgv -l` to see all available versions")]
    NotFound(String),

    /// The requested exact version is not published in the catalog.
    #[error("terragrunt version {0} does not exist. Try `tgv -l` to see all available versions")]
    UnknownVersion(String),

    /// Connection, TLS or timeout failure while talking to the catalog or mirror.
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: attohttpc::Error,
    },

    /// The catalog endpoint answered with something other than the expected JSON.
    #[error("malformed version catalog response from {url}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The mirror answered a download request with a non-success status.
    #[error("unable to download {url}: HTTP {status}")]
    Download { url: String, status: u16 },

    /// The catalog returned an empty version list.
    #[error("version catalog at {0} is empty")]
    EmptyCatalog(String),

    /// A configuration file exists but cannot be parsed.
    #[error("unable to read config file {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The bin path does not exist and cannot be used for the symlink.
    #[error(
        "binary path does not exist: {0}\n\
         Manually create the bin directory and try again"
    )]
    BinPathMissing(PathBuf),

    /// The home directory could not be determined.
    #[error("unable to determine the home directory")]
    NoHomeDir,

    /// Nothing on the command line or in any configuration source named a version.
    #[error(
        "tgv: missing version\n\
         Supply a terragrunt version as an argument, or set one in .tgv.toml, .tgvrc or .terragrunt-version\n\
         Try 'tgv --help' for more information."
    )]
    MissingVersion,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
