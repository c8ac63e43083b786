//! `plugspec check`: test a host build against the resolved range.

use std::path::Path;

use anyhow::{bail, Context, Result};

use plugspec_catalog::BuildVersion;
use plugspec_resolve::ResolvedBuildSpec;

use crate::commands::resolve::{build_target, resolve_target, TargetArgs};
use crate::manifest::{load_catalog, PluginManifest};

/// Whether `host` is admitted by the resolved compatibility range.
pub fn admits(spec: &ResolvedBuildSpec, host: &str) -> Result<bool> {
    let host: BuildVersion = host
        .parse()
        .with_context(|| format!("invalid host build '{host}'"))?;
    Ok(spec.range().admits(&host))
}

/// Run `plugspec check`. Fails when the host build is outside the range.
pub fn run(
    project_dir: &Path,
    manifest: Option<&PluginManifest>,
    args: &TargetArgs,
    host: &str,
) -> Result<()> {
    let catalog = load_catalog(manifest, project_dir)?;
    let (declaration, overrides) = build_target(manifest, args)?;
    let spec = resolve_target(&catalog, &declaration, &overrides)?;

    if !admits(&spec, host)? {
        bail!("host build {host} is outside {}", spec.range());
    }
    println!("host build {host} is within {}", spec.range());
    Ok(())
}
