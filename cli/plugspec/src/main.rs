//! plugspec CLI: resolve and publish host-IDE plugin build targets.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::resolve::TargetArgs;
use manifest::PluginManifest;

#[derive(Parser)]
#[command(
    name = "plugspec",
    version,
    about = "Resolve plugin build targets against host platforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new plugin project
    Init {
        /// Plugin name
        name: String,
    },
    /// Resolve the build target into toolchain, test frameworks, and since/until range
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
        /// Output format (human, json, toml, descriptor)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check whether a host build falls inside the resolved range
    Check {
        /// Host build as BRANCH.BUILD (e.g., 242.20224)
        host: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Inspect the platform catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Bind the publish credential and stage the plugin for publishing
    Publish {
        /// Validate without staging
        #[arg(long)]
        dry_run: bool,
        /// Release channel (overrides plugin.toml)
        #[arg(long)]
        channel: Option<String>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List available platform types
    List,
    /// Show details of a platform type
    Describe {
        /// Platform type code
        code: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate a catalog file
    Validate {
        /// Path to a *.platforms.toml file
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Resolve { target, format } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::resolve::run(&project_dir, manifest.as_ref(), &target, format.as_deref())
        }

        Commands::Check { host, target } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::check::run(&project_dir, manifest.as_ref(), &target, &host)
        }

        Commands::Catalog { action } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            match action {
                CatalogAction::List => {
                    let catalog = manifest::load_catalog(manifest.as_ref(), &project_dir)?;
                    commands::catalog::list(&catalog)
                }
                CatalogAction::Describe { code, format } => {
                    let catalog = manifest::load_catalog(manifest.as_ref(), &project_dir)?;
                    commands::catalog::describe(&catalog, &code, format.as_deref())
                }
                CatalogAction::Validate { path } => commands::catalog::validate(&path),
            }
        }

        Commands::Publish { dry_run, channel } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::publish::run(&project_dir, &manifest, dry_run, channel.as_deref())
        }
    }
}

/// Load `plugin.toml` if present, returning it and the project root.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<PluginManifest>, Option<PathBuf>)> {
    match PluginManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

/// Load `plugin.toml`, failing if it cannot be found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(PluginManifest, PathBuf)> {
    match PluginManifest::find_and_load(cwd)? {
        Some(found) => Ok(found),
        None => anyhow::bail!(
            "no {} found in {} or any parent directory",
            manifest::MANIFEST_FILE,
            cwd.display()
        ),
    }
}
