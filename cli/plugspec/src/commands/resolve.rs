//! `plugspec resolve`: resolve the project's build target.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use plugspec_catalog::PlatformCatalog;
use plugspec_resolve::{
    render_idea_version, CompatibilityResolver, Overrides, PlatformDeclaration,
    ResolvedBuildSpec, UntilBuild,
};

use crate::manifest::{load_catalog, PluginManifest};

/// Build-target flags shared by commands that resolve.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Platform type code (e.g., IU, IC); overrides plugin.toml
    #[arg(long)]
    pub platform_type: Option<String>,
    /// Host version as BRANCH.BUILD (e.g., 241.15989); overrides plugin.toml
    #[arg(long)]
    pub platform_version: Option<String>,
    /// Explicit until-build bound (e.g., 242.*)
    #[arg(long, conflicts_with = "open_until")]
    pub until: Option<String>,
    /// Leave until-build open even if plugin.toml sets one
    #[arg(long)]
    pub open_until: bool,
}

/// Combine manifest values and command-line flags. Flags win.
pub fn build_target(
    manifest: Option<&PluginManifest>,
    args: &TargetArgs,
) -> Result<(PlatformDeclaration, Overrides)> {
    let from_manifest = manifest.map(|m| &m.platform);

    let platform_type = match (&args.platform_type, from_manifest) {
        (Some(t), _) => t.clone(),
        (None, Some(decl)) => decl.platform_type.to_string(),
        (None, None) => bail!("no platform type: pass --platform-type or run inside a project with plugin.toml"),
    };
    let version = match (&args.platform_version, from_manifest) {
        (Some(v), _) => v.clone(),
        (None, Some(decl)) => decl.version.clone(),
        (None, None) => bail!("no platform version: pass --platform-version or run inside a project with plugin.toml"),
    };

    let mut overrides = manifest.map(|m| m.overrides.clone()).unwrap_or_default();
    if args.open_until {
        overrides.until = Some(UntilBuild::Open);
    }
    if let Some(until) = &args.until {
        overrides.until = Some(UntilBuild::bound(until.clone()));
    }

    Ok((PlatformDeclaration::new(platform_type, version), overrides))
}

/// Resolve, attaching the declaration and overrides to any failure.
pub fn resolve_target(
    catalog: &PlatformCatalog,
    declaration: &PlatformDeclaration,
    overrides: &Overrides,
) -> Result<ResolvedBuildSpec> {
    CompatibilityResolver::new(catalog)
        .resolve(declaration, overrides)
        .with_context(|| {
            format!(
                "cannot resolve '{declaration}' with overrides {}",
                describe_overrides(overrides)
            )
        })
}

fn describe_overrides(overrides: &Overrides) -> String {
    serde_json::to_string(overrides).unwrap_or_else(|_| format!("{overrides:?}"))
}

/// Render a resolved spec in the requested format.
pub fn render(spec: &ResolvedBuildSpec, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("human") {
        "human" => Ok(render_human(spec)),
        "json" => serde_json::to_string_pretty(spec).context("serializing spec as JSON"),
        "toml" => toml::to_string_pretty(spec).context("serializing spec as TOML"),
        "descriptor" => Ok(render_idea_version(spec.range())),
        other => bail!("unknown format '{other}' (expected human, json, toml, or descriptor)"),
    }
}

fn render_human(spec: &ResolvedBuildSpec) -> String {
    let range = spec.range();
    let mut out = String::new();
    out.push_str(&format!(
        "=== Build target: {} {} ===\n",
        spec.platform_type(),
        spec.platform_version()
    ));
    out.push_str(&format!("  Toolchain:   {}\n", spec.toolchain()));
    out.push_str(&format!("  Frameworks:  {}\n", spec.frameworks()));
    out.push_str(&format!("  Since-build: {}\n", range.since));
    out.push_str(&format!("  Until-build: {}", range.until));
    out
}

/// Run `plugspec resolve`.
pub fn run(
    project_dir: &Path,
    manifest: Option<&PluginManifest>,
    args: &TargetArgs,
    format: Option<&str>,
) -> Result<()> {
    let catalog = load_catalog(manifest, project_dir)?;
    let (declaration, overrides) = build_target(manifest, args)?;
    let spec = resolve_target(&catalog, &declaration, &overrides)?;
    println!("{}", render(&spec, format)?);
    Ok(())
}
