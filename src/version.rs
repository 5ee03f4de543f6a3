// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version parsing, ordering and format validation for terragrunt versions
//!
//! This module provides the `Version` value type used throughout tgv plus the
//! strict format predicates that gate what may ever be returned to the user
//! or written to the recent-versions cache.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    // Lenient parse: missing minor/patch default to zero, optional leading 'v'.
    static ref LENIENT_VERSION_RE: Regex =
        Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z][0-9A-Za-z.-]*))?$").unwrap();

    // Strict forms accepted as a final resolution result or user argument.
    static ref FULL_VERSION_RE: Regex =
        Regex::new(r"^\d+\.\d+\.\d+(-[a-zA-Z]+\d*)?$").unwrap();

    static ref MINOR_VERSION_RE: Regex = Regex::new(r"^\d+\.\d+$").unwrap();
}

/// Check a full version string: `0.1.2` and `0.1.2-beta1` are valid,
/// `a.1.2` and `0.1. 2` are not.
#[must_use]
pub fn valid_version_format(version: &str) -> bool {
    FULL_VERSION_RE.is_match(version)
}

/// Check a minor version string: `0.1` is valid, `0.1.2` is not.
#[must_use]
pub fn valid_minor_format(version: &str) -> bool {
    MINOR_VERSION_RE.is_match(version)
}

/// A parsed semantic version.
///
/// Parsing is lenient (`"1.1"` and `"2"` are accepted, missing segments
/// default to zero) while display is always normalized to `X.Y.Z[-pre]`,
/// so `"1.1".parse::<Version>()?.to_string()` yields `"1.1.0"`.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    pre: Option<String>,
}

impl Version {
    /// Build a version from explicit numeric segments, without a pre-release.
    #[must_use]
    pub fn new(segments: &[u64]) -> Self {
        Version {
            segments: segments.to_vec(),
            pre: None,
        }
    }

    /// Number of segments that were spelled out in the source string.
    ///
    /// The pessimistic operator cares about this: `~> 1.1` and `~> 1.1.0`
    /// bound different ranges even though both normalize to `1.1.0`.
    #[must_use]
    pub fn specified_segments(&self) -> usize {
        self.segments.len()
    }

    /// Segment at `index`, zero when the source string omitted it.
    #[must_use]
    pub fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Pre-release identifier, if any (`"beta1"` in `1.4.0-beta1`).
    #[must_use]
    pub fn prerelease(&self) -> Option<&str> {
        self.pre.as_deref()
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// Exclusive upper bound for the pessimistic operator.
    ///
    /// `~> 1.1.0` allows up to (not including) `1.2.0`; `~> 1.1` allows up
    /// to `2.0.0`; a single-segment `~> 2` allows up to `3.0.0`.
    #[must_use]
    pub fn pessimistic_bound(&self) -> Version {
        let bump_index = self.segments.len().saturating_sub(2);
        let mut segments = vec![0u64; 3];
        for (i, seg) in segments.iter_mut().enumerate().take(bump_index) {
            *seg = self.segment(i);
        }
        segments[bump_index] = self.segment(bump_index) + 1;
        Version {
            segments,
            pre: None,
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = LENIENT_VERSION_RE
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidVersion(s.to_string()))?;

        let mut segments = Vec::with_capacity(3);
        for group in 1..=3 {
            if let Some(m) = caps.get(group) {
                let value = m
                    .as_str()
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidVersion(s.to_string()))?;
                segments.push(value);
            }
        }

        Ok(Version {
            segments,
            pre: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.segment(0),
            self.segment(1),
            self.segment(2)
        )?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in 0..3 {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            // A pre-release sorts below its release: 1.4.0-beta < 1.4.0
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => compare_prerelease(a, b),
        }
    }
}

/// Pre-release precedence per semantic-version rules: identifiers compare
/// dot-wise, numeric identifiers compare numerically and rank below
/// alphanumeric ones, and a shorter identifier list ranks lower when all
/// shared identifiers are equal.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut a_parts = a.split('.');
    let mut b_parts = b.split('.');

    loop {
        match (a_parts.next(), b_parts.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(xn), Ok(yn)) => xn.cmp(&yn),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerelease_precedence() {
        assert_eq!(compare_prerelease("1", "beta"), Ordering::Less);
        assert_eq!(compare_prerelease("beta.2", "beta.11"), Ordering::Less);
        assert_eq!(compare_prerelease("alpha", "beta"), Ordering::Less);
        assert_eq!(compare_prerelease("beta", "beta.1"), Ordering::Less);
    }
}
