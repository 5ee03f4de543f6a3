// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version constraint parsing and resolution
//!
//! A constraint expression is a comma-separated conjunction of
//! `[operator] version` tokens, e.g. `1.1`, `~> 1.1.0` or `>= 1.0, < 1.4`.
//! A bare version means exact equality; `~>` is the pessimistic operator
//! that pins everything but the last spelled-out segment.
//!
//! [`resolve`] matches an expression against a candidate list and picks the
//! highest satisfying version.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::version::{Version, valid_version_format};

lazy_static! {
    // Longer operators first so ">=" is not read as ">" followed by "=".
    static ref CONSTRAINT_RE: Regex =
        Regex::new(r"^\s*(>=|<=|~>|!=|>|<|=)?\s*(\S+)\s*$").unwrap();
}

/// Comparison operators accepted in constraint expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// `~>`, allows the last spelled-out segment to float upward.
    Pessimistic,
}

impl Operator {
    fn from_token(token: &str) -> Self {
        match token {
            "!=" => Operator::NotEqual,
            ">" => Operator::GreaterThan,
            ">=" => Operator::GreaterThanOrEqual,
            "<" => Operator::LessThan,
            "<=" => Operator::LessThanOrEqual,
            "~>" => Operator::Pessimistic,
            _ => Operator::Equal,
        }
    }
}

/// A single `operator version` comparator.
#[derive(Debug, Clone)]
pub struct Constraint {
    operator: Operator,
    version: Version,
}

impl Constraint {
    /// Whether `candidate` satisfies this comparator.
    ///
    /// Candidates carrying a pre-release only match comparators whose
    /// version also carries one; `>= 1.0` never selects `1.4.0-beta`.
    #[must_use]
    pub fn matches(&self, candidate: &Version) -> bool {
        if candidate.is_prerelease() && !self.version.is_prerelease() {
            return false;
        }

        match self.operator {
            Operator::Equal => candidate == &self.version,
            Operator::NotEqual => candidate != &self.version,
            Operator::GreaterThan => candidate.cmp(&self.version) == Ordering::Greater,
            Operator::GreaterThanOrEqual => candidate.cmp(&self.version) != Ordering::Less,
            Operator::LessThan => candidate.cmp(&self.version) == Ordering::Less,
            Operator::LessThanOrEqual => candidate.cmp(&self.version) != Ordering::Greater,
            Operator::Pessimistic => {
                candidate.cmp(&self.version) != Ordering::Less
                    && candidate.cmp(&self.version.pessimistic_bound()) == Ordering::Less
            }
        }
    }
}

/// A parsed constraint expression: the conjunction of its comparators.
#[derive(Debug, Clone)]
pub struct Constraints(Vec<Constraint>);

impl Constraints {
    /// Parse a comma-separated constraint expression.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConstraint`] when an operator or version
    /// token is malformed.
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut comparators = Vec::new();

        for token in expression.split(',') {
            let caps = CONSTRAINT_RE.captures(token).ok_or_else(|| {
                Error::InvalidConstraint {
                    constraint: expression.to_string(),
                    reason: format!("malformed constraint token {token:?}"),
                }
            })?;

            let operator = caps
                .get(1)
                .map_or(Operator::Equal, |m| Operator::from_token(m.as_str()));

            let raw_version = caps.get(2).map_or("", |m| m.as_str());
            let version: Version =
                raw_version
                    .parse()
                    .map_err(|_| Error::InvalidConstraint {
                        constraint: expression.to_string(),
                        reason: format!("malformed version {raw_version:?}"),
                    })?;

            comparators.push(Constraint { operator, version });
        }

        Ok(Constraints(comparators))
    }

    /// Whether `candidate` satisfies every comparator in the expression.
    #[must_use]
    pub fn check(&self, candidate: &Version) -> bool {
        self.0.iter().all(|c| c.matches(candidate))
    }
}

/// Resolve a constraint expression against a list of published versions.
///
/// Candidates are sorted in descending semantic-version order and checked
/// highest-first; the first one that satisfies the constraint *and*
/// re-validates against the strict `X.Y.Z[-pre]` format regex wins. A
/// candidate that matches numerically but carries an unsupported textual
/// form is skipped and resolution continues with the next-lower one.
///
/// The result is the normalized form of the winner, so resolving `"1.1"`
/// against a list containing `"1.1"` yields `"1.1.0"`.
///
/// # Errors
/// - [`Error::InvalidConstraint`] when the expression cannot be parsed.
/// - [`Error::InvalidCandidate`] when any candidate fails to parse; a
///   single malformed entry invalidates the whole resolution.
/// - [`Error::NotFound`] when no candidate satisfies both conditions.
pub fn resolve(constraint: &str, candidates: &[String]) -> Result<String, Error> {
    let constraints = Constraints::parse(constraint)?;

    let mut versions = Vec::with_capacity(candidates.len());
    for raw in candidates {
        let version: Version = raw
            .parse()
            .map_err(|_| Error::InvalidCandidate(raw.clone()))?;
        versions.push(version);
    }

    versions.sort_by(|a, b| b.cmp(a));

    for version in &versions {
        if constraints.check(version) {
            let rendered = version.to_string();
            if valid_version_format(&rendered) {
                return Ok(rendered);
            }
        }
    }

    Err(Error::NotFound(constraint.to_string()))
}
