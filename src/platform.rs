// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Platform detection and download URL construction
//!
//! Release assets are raw binaries named `terragrunt_{os}_{arch}`, published
//! under `{mirror}/v{version}/`.

use lazy_static::lazy_static;

use crate::version::Version;

/// Default mirror serving terragrunt release binaries.
pub const MIRROR_URL: &str = "https://github.com/gruntwork-io/terragrunt/releases/download";

lazy_static! {
    // darwin/arm64 assets only exist from this release onward.
    static ref DARWIN_ARM64_MIN: Version = Version::new(&[1, 0, 2]);
}

/// Operating system and CPU architecture a binary is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// The platform tgv itself is running on, in release-asset spelling.
    #[must_use]
    pub fn current() -> Self {
        let arch = match std::env::consts::ARCH {
            "x86" => "386",
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            other => other,
        };
        Platform {
            os: std::env::consts::OS,
            arch,
        }
    }

    /// Architecture the asset should be downloaded for.
    ///
    /// Apple silicon builds were first published with 1.0.2; older releases
    /// fall back to the amd64 binary, which runs under Rosetta.
    #[must_use]
    pub fn asset_arch(&self, version: &Version) -> &'static str {
        if self.os == "darwin" && self.arch == "arm64" && version < &*DARWIN_ARM64_MIN {
            "amd64"
        } else {
            self.arch
        }
    }

    /// Release-asset file name for `version`, e.g. `terragrunt_linux_amd64`.
    #[must_use]
    pub fn asset_name(&self, version: &Version) -> String {
        format!("terragrunt_{}_{}", self.os, self.asset_arch(version))
    }

    /// Full download URL for `version` on the given mirror.
    #[must_use]
    pub fn download_url(&self, mirror: &str, version: &Version) -> String {
        let mirror = mirror.trim_end_matches('/');
        format!("{mirror}/v{version}/{}", self.asset_name(version))
    }
}
