//! `plugspec publish`: bind the credential and stage the publish request.

use std::path::Path;

use anyhow::{bail, Context, Result};

use plugspec_publish::{
    bind, publish, validate_for_publish, EnvCredential, PublishOptions, StagingPublisher,
};

use crate::commands::resolve::{build_target, resolve_target, TargetArgs};
use crate::manifest::{load_catalog, PluginManifest};

/// Run `plugspec publish`.
pub fn run(
    project_dir: &Path,
    manifest: &PluginManifest,
    dry_run: bool,
    channel: Option<&str>,
) -> Result<()> {
    let catalog = load_catalog(Some(manifest), project_dir)?;
    let (declaration, overrides) = build_target(Some(manifest), &TargetArgs::default())?;
    let spec = resolve_target(&catalog, &declaration, &overrides)?;

    // The credential is looked up only now, after resolution succeeded.
    let lookup = EnvCredential::new(manifest.token_env());
    let publishable = bind(spec, &lookup).context("binding publish credential")?;

    let coordinates = manifest.coordinates();
    let options = PublishOptions {
        dry_run,
        channel: channel.or(manifest.channel()).map(str::to_string),
    };

    let validation = validate_for_publish(&coordinates, &publishable, &options);
    for warning in &validation.warnings {
        eprintln!("warning: {warning}");
    }
    if !validation.ready {
        bail!("{} is not ready to publish", coordinates.name);
    }

    let publisher = StagingPublisher::new(manifest.staging_dir(project_dir));
    let request = publish(&coordinates, &publishable, &publisher, &options)
        .with_context(|| format!("publishing {}@{}", coordinates.name, coordinates.version))?;

    if dry_run {
        println!(
            "Dry run: {}@{} is ready to publish",
            coordinates.name, coordinates.version
        );
    } else {
        println!(
            "Staged {}@{} in {}",
            coordinates.name,
            coordinates.version,
            publisher.root().display()
        );
    }
    println!("  Target:     {} {}", request.spec.platform_type(), request.spec.platform_version());
    println!("  Descriptor: {}", request.descriptor);
    println!("  Credential: {}", request.credential);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(token_env: &str) -> PluginManifest {
        toml::from_str(&format!(
            r#"
[plugin]
group = "org.example"
name = "fragments"
version = "0.1"

[platform]
type = "IU"
version = "241.15989"

[publish]
token-env = "{token_env}"
"#
        ))
        .unwrap()
    }

    #[test]
    fn publish_stages_under_project() {
        let var = "PLUGSPEC_TEST_CLI_PUBLISH_TOKEN";
        std::env::set_var(var, "token");
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), &manifest(var), false, None).unwrap();

        assert!(dir
            .path()
            .join("out/publish/fragments/0.1/publish.json")
            .is_file());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let var = "PLUGSPEC_TEST_CLI_DRY_RUN_TOKEN";
        std::env::set_var(var, "token");
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), &manifest(var), true, Some("eap")).unwrap();

        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn missing_token_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            dir.path(),
            &manifest("PLUGSPEC_TEST_CLI_NEVER_SET"),
            false,
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("missing credential"));
    }
}
