// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use tgv::catalog::{self, CATALOG_URL};
use tgv::error::Error;
use tgv::install::{self, Context, DEFAULT_BIN};
use tgv::platform::MIRROR_URL;
use tgv::{cache, config, constraint, valid_version_format};

mod cli;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("{error}");
        exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let dir = match cli.chdir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let settings = match config::load_settings(&dir)? {
        Some(settings) => {
            if cli.verbose {
                eprintln!(
                    "Reading configuration from {}",
                    dir.join(config::TOML_FILENAME).display()
                );
            }
            settings
        }
        None => {
            let home = home::home_dir().ok_or(Error::NoHomeDir)?;
            match config::load_settings(&home)? {
                Some(settings) => {
                    if cli.verbose {
                        eprintln!(
                            "Reading configuration from {}",
                            home.join(config::TOML_FILENAME).display()
                        );
                    }
                    settings
                }
                None => config::Settings::default(),
            }
        }
    };

    let ctx = Context {
        bin_path: cli
            .bin
            .or(settings.bin)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BIN)),
        mirror_url: cli.mirror.unwrap_or_else(|| MIRROR_URL.to_string()),
        catalog_url: cli.catalog.unwrap_or_else(|| CATALOG_URL.to_string()),
        install_dir: install::default_install_dir()?,
        verbose: cli.verbose,
    };

    if cli.list_all {
        return list_all(&ctx);
    }
    if cli.latest {
        let version = catalog::latest_version(&ctx.catalog_url)?;
        return install::install(&version, &ctx);
    }
    if cli.show_latest {
        println!("{}", catalog::latest_version(&ctx.catalog_url)?);
        return Ok(());
    }
    if let Some(minor) = cli.latest_stable {
        let version = catalog::latest_implicit(&ctx.catalog_url, &minor, false)?;
        return install::install(&version, &ctx);
    }
    if let Some(minor) = cli.show_latest_stable {
        println!("{}", catalog::latest_implicit(&ctx.catalog_url, &minor, false)?);
        return Ok(());
    }
    if let Some(minor) = cli.latest_pre {
        let version = catalog::latest_implicit(&ctx.catalog_url, &minor, true)?;
        return install::install(&version, &ctx);
    }
    if let Some(minor) = cli.show_latest_pre {
        println!("{}", catalog::latest_implicit(&ctx.catalog_url, &minor, true)?);
        return Ok(());
    }
    if let Some(expression) = cli.constraint {
        return install_constraint(&expression, &ctx);
    }
    if let Some(version) = cli.target_version {
        return install_version(&version, &ctx);
    }

    // No action on the command line: fall back to the configuration sources.
    if let Some(version) = settings.version {
        return install_version(&version, &ctx);
    }
    if let Some((version, source)) = config::version_from_files(&dir)? {
        if ctx.verbose {
            eprintln!("Reading version from {source}");
        }
        return install_version(&version, &ctx);
    }
    if let Some(version) = config::version_from_env() {
        if ctx.verbose {
            eprintln!("Reading version from {}", config::VERSION_ENV);
        }
        return install_version(&version, &ctx);
    }

    Err(Error::MissingVersion)
}

/// Print every published version, with recently installed ones on top.
fn list_all(ctx: &Context) -> Result<(), Error> {
    let versions = catalog::list_versions(&ctx.catalog_url, true)?;
    let recent = cache::get_recent_versions(&ctx.install_dir)?;

    for version in &recent {
        println!("{version} *recent");
    }
    for version in versions {
        if !recent.contains(&version) {
            println!("{version}");
        }
    }
    Ok(())
}

fn install_constraint(expression: &str, ctx: &Context) -> Result<(), Error> {
    if ctx.verbose {
        eprintln!("Resolving constraint: {expression}");
    }
    let versions = catalog::list_versions(&ctx.catalog_url, true)?;
    let version = constraint::resolve(expression, &versions)?;
    if ctx.verbose {
        eprintln!("Matched version: {version}");
    }
    install::install(&version, ctx)
}

fn install_version(version: &str, ctx: &Context) -> Result<(), Error> {
    if !valid_version_format(version) {
        return Err(Error::InvalidVersion(version.to_string()));
    }

    // A cached binary can be switched to without consulting the catalog.
    if install::is_installed(version, &ctx.install_dir) {
        return install::install(version, ctx);
    }

    let available = catalog::list_versions(&ctx.catalog_url, true)?;
    if !available.iter().any(|v| v == version) {
        return Err(Error::UnknownVersion(version.to_string()));
    }
    install::install(version, ctx)
}
