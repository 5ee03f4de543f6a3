// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// Command-line definition. Kept self-contained (clap and std only) because
// build.rs includes this file to render the man page.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tgv",
    version,
    about = "Terragrunt version switcher",
    long_about = "Terragrunt version switcher. \
                  Installs a requested terragrunt version and points the terragrunt \
                  symlink at it. Without arguments the version is read from .tgv.toml, \
                  .tgvrc, .terragrunt-version or the TG_VERSION environment variable.",
    group(clap::ArgGroup::new("action").args([
        "target_version",
        "constraint",
        "latest",
        "show_latest",
        "latest_stable",
        "show_latest_stable",
        "latest_pre",
        "show_latest_pre",
        "list_all",
    ]))
)]
pub struct Cli {
    /// Exact terragrunt version to install, e.g. 0.38.6
    #[arg(value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Install the highest version matching a constraint, e.g. "~> 0.36.0"
    #[arg(short = 'r', long = "constraint", value_name = "EXPR")]
    pub constraint: Option<String>,

    /// Install the latest stable version
    #[arg(short = 'u', long = "latest")]
    pub latest: bool,

    /// Print the latest stable version without installing it
    #[arg(short = 'U', long = "show-latest")]
    pub show_latest: bool,

    /// Install the latest stable release of a minor series, e.g. 0.13
    #[arg(short = 's', long = "latest-stable", value_name = "MINOR")]
    pub latest_stable: Option<String>,

    /// Print the latest stable release of a minor series without installing it
    #[arg(short = 'S', long = "show-latest-stable", value_name = "MINOR")]
    pub show_latest_stable: Option<String>,

    /// Install the latest pre-release of a minor series, e.g. 0.13
    #[arg(short = 'p', long = "latest-pre", value_name = "MINOR")]
    pub latest_pre: Option<String>,

    /// Print the latest pre-release of a minor series without installing it
    #[arg(short = 'P', long = "show-latest-pre", value_name = "MINOR")]
    pub show_latest_pre: Option<String>,

    /// List all available versions, newest first
    #[arg(short = 'l', long = "list-all")]
    pub list_all: bool,

    /// Path for the active terragrunt symlink
    #[arg(short = 'b', long = "bin", value_name = "PATH")]
    pub bin: Option<std::path::PathBuf>,

    /// Download binaries from this mirror instead of the default
    #[arg(short = 'm', long = "mirror", value_name = "URL")]
    pub mirror: Option<String>,

    /// Read the version list from this catalog instead of the default
    #[arg(short = 'z', long = "catalog", value_name = "URL")]
    pub catalog: Option<String>,

    /// Look for configuration files in DIR instead of the working directory
    #[arg(short = 'c', long = "chdir", value_name = "DIR")]
    pub chdir: Option<std::path::PathBuf>,

    /// Make the operation more talkative
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
