// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Remote version catalog access
//!
//! The catalog is a JSON document shaped `{"Versions": ["0.38.6", ...]}`.
//! Fetching is a single blocking GET with a 10-second timeout; network and
//! parse failures surface as typed errors so the caller decides what is
//! fatal.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::constraint;
use crate::error::Error;
use crate::version::{Version, valid_minor_format, valid_version_format};

/// Default catalog listing published terragrunt versions.
pub const CATALOG_URL: &str = "https://warrensbox.github.io/terragunt-versions-list/index.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

lazy_static! {
    static ref STABLE_VERSION_RE: Regex = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
}

#[derive(Deserialize)]
struct VersionCatalog {
    #[serde(rename = "Versions")]
    versions: Vec<String>,
}

/// Fetch the raw, unfiltered version list from the catalog endpoint.
///
/// # Errors
/// [`Error::Network`] on connection or timeout failure, [`Error::Download`]
/// on a non-success status, [`Error::MalformedResponse`] on bad JSON.
pub fn fetch_version_list(url: &str) -> Result<Vec<String>, Error> {
    let response = attohttpc::get(url)
        .timeout(FETCH_TIMEOUT)
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

    let body = response.text().map_err(|source| Error::Network {
        url: url.to_string(),
        source,
    })?;

    parse_version_list(url, &body)
}

/// Parse a catalog body. Split out from [`fetch_version_list`] so the JSON
/// handling is testable without a network.
pub fn parse_version_list(url: &str, body: &str) -> Result<Vec<String>, Error> {
    let catalog: VersionCatalog =
        serde_json::from_str(body).map_err(|source| Error::MalformedResponse {
            url: url.to_string(),
            source,
        })?;
    Ok(catalog.versions)
}

/// Keep only well-formed versions and sort them in descending order.
///
/// With `include_prerelease` the full `X.Y.Z[-pre]` form is accepted,
/// otherwise only stable `X.Y.Z` entries pass. Entries the catalog carries
/// in an unsupported form are silently dropped rather than failing the
/// listing.
#[must_use]
pub fn filter_versions(raw: &[String], include_prerelease: bool) -> Vec<String> {
    let mut parsed: Vec<(Version, String)> = raw
        .iter()
        .filter(|v| {
            if include_prerelease {
                valid_version_format(v)
            } else {
                STABLE_VERSION_RE.is_match(v)
            }
        })
        .filter_map(|v| Some((v.parse().ok()?, v.clone())))
        .collect();

    parsed.sort_by(|(a, sa), (b, sb)| b.cmp(a).then_with(|| sa.cmp(sb)));
    parsed.into_iter().map(|(_, s)| s).collect()
}

/// Fetch and filter the catalog in one step.
///
/// # Errors
/// Fetch errors as in [`fetch_version_list`]; [`Error::EmptyCatalog`] when
/// nothing well-formed remains after filtering.
pub fn list_versions(url: &str, include_prerelease: bool) -> Result<Vec<String>, Error> {
    let raw = fetch_version_list(url)?;
    let versions = filter_versions(&raw, include_prerelease);
    if versions.is_empty() {
        return Err(Error::EmptyCatalog(url.to_string()));
    }
    Ok(versions)
}

/// Highest published stable version.
///
/// # Errors
/// Same failure modes as [`list_versions`].
pub fn latest_version(url: &str) -> Result<String, Error> {
    let versions = list_versions(url, false)?;
    versions
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyCatalog(url.to_string()))
}

/// Latest version within a `X.Y` minor series.
///
/// With `include_prerelease` the highest `X.Y.N-pre` entry wins; otherwise
/// the series is resolved through the pessimistic constraint `~> X.Y` over
/// the stable list.
///
/// # Errors
/// [`Error::InvalidMinorVersion`] for a malformed series argument,
/// [`Error::NotFound`] when the series has no matching release, plus the
/// fetch failure modes.
pub fn latest_implicit(url: &str, minor: &str, include_prerelease: bool) -> Result<String, Error> {
    if !valid_minor_format(minor) {
        return Err(Error::InvalidMinorVersion(minor.to_string()));
    }

    if include_prerelease {
        let pattern = format!(r"^{}\.\d+-[a-zA-Z]+\d*$", regex::escape(minor));
        let series_re =
            Regex::new(&pattern).map_err(|_| Error::InvalidMinorVersion(minor.to_string()))?;

        let raw = fetch_version_list(url)?;
        let matching: Vec<String> = raw.into_iter().filter(|v| series_re.is_match(v)).collect();

        filter_versions(&matching, true)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("{minor} (pre-release)")))
    } else {
        let versions = list_versions(url, false)?;
        constraint::resolve(&format!("~> {minor}"), &versions)
    }
}
