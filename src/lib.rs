// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! tgv - terragrunt version switcher
//!
//! Resolves a version specifier (exact, constraint expression, or "latest")
//! against the published version catalog, downloads the matching binary if
//! it is not already cached, and repoints the terragrunt symlink.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constraint;
pub mod error;
pub mod install;
pub mod platform;
pub mod version;

pub use constraint::{Constraint, Constraints, resolve};
pub use error::Error;
pub use install::Context;
pub use platform::Platform;
pub use version::{Version, valid_minor_format, valid_version_format};
