//! `plugspec init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{PluginManifest, MANIFEST_FILE};

/// Create a new plugin project at the given path.
///
/// `name` is the plugin name. The directory `name` is created relative to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("platforms"))
        .context("creating platforms/ directory")?;

    let manifest_content = PluginManifest::template(name);
    fs::write(project_dir.join(MANIFEST_FILE), &manifest_content)
        .context("writing plugin.toml")?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created plugin project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/platforms/");
    println!("  {name}/.gitignore");

    Ok(())
}
