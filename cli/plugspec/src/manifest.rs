//! `plugin.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use plugspec_catalog::parse::load_catalog_dir;
use plugspec_catalog::PlatformCatalog;
use plugspec_publish::{PluginCoordinates, DEFAULT_TOKEN_ENV};
use plugspec_resolve::{Overrides, PlatformDeclaration};

/// Manifest file name searched for by [`PluginManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "plugin.toml";

const DEFAULT_CATALOG_DIR: &str = "platforms";
const DEFAULT_STAGING_DIR: &str = "out/publish";

/// The top-level manifest structure for a plugin project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin metadata (required).
    pub plugin: PluginConfig,
    /// The build target (required).
    pub platform: PlatformDeclaration,
    /// Overrides applied on top of the catalog defaults.
    #[serde(default, skip_serializing_if = "Overrides::is_empty")]
    pub overrides: Overrides,
    /// Extra catalog entries.
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    /// Publishing configuration.
    #[serde(default)]
    pub publish: Option<PublishConfig>,
}

/// Plugin metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Artifact group (e.g. "org.example").
    #[serde(default)]
    pub group: String,
    /// Plugin name (required).
    pub name: String,
    /// Plugin version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1".to_string()
}

/// Catalog configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Directory holding `*.platforms.toml` files, relative to the project.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Publishing configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishConfig {
    /// Environment variable holding the publish token.
    #[serde(default)]
    pub token_env: Option<String>,
    /// Release channel.
    #[serde(default)]
    pub channel: Option<String>,
    /// Where staged publish requests are written, relative to the project.
    #[serde(default)]
    pub staging_dir: Option<String>,
}

impl PluginManifest {
    /// Search upward from `start_dir` for a `plugin.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: PluginManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing plugin.toml")
    }

    pub fn coordinates(&self) -> PluginCoordinates {
        PluginCoordinates {
            group: self.plugin.group.clone(),
            name: self.plugin.name.clone(),
            version: self.plugin.version.clone(),
        }
    }

    /// Environment variable the publish token is read from.
    pub fn token_env(&self) -> &str {
        self.publish
            .as_ref()
            .and_then(|p| p.token_env.as_deref())
            .unwrap_or(DEFAULT_TOKEN_ENV)
    }

    pub fn channel(&self) -> Option<&str> {
        self.publish.as_ref().and_then(|p| p.channel.as_deref())
    }

    pub fn staging_dir(&self, project_dir: &Path) -> PathBuf {
        let rel = self
            .publish
            .as_ref()
            .and_then(|p| p.staging_dir.as_deref())
            .unwrap_or(DEFAULT_STAGING_DIR);
        project_dir.join(rel)
    }

    pub fn catalog_dir(&self, project_dir: &Path) -> PathBuf {
        let rel = self
            .catalog
            .as_ref()
            .and_then(|c| c.dir.as_deref())
            .unwrap_or(DEFAULT_CATALOG_DIR);
        project_dir.join(rel)
    }

    /// Generate the default template for `plugspec init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[plugin]
group = "org.example"
name = "{name}"
version = "0.1"

[platform]
type = "IU"
version = "241.15989"

[publish]
token-env = "{DEFAULT_TOKEN_ENV}"
"#
        )
    }
}

/// Build the catalog for a run: built-ins plus any project-local entries.
///
/// Constructed once per process and passed by reference from here on.
pub fn load_catalog(manifest: Option<&PluginManifest>, project_dir: &Path) -> Result<PlatformCatalog> {
    let catalog = PlatformCatalog::builtin();
    let dir = match manifest {
        Some(m) => m.catalog_dir(project_dir),
        None => project_dir.join(DEFAULT_CATALOG_DIR),
    };
    let local = load_catalog_dir(&dir)
        .with_context(|| format!("loading catalog files from {}", dir.display()))?;
    if local.is_empty() {
        return Ok(catalog);
    }
    catalog
        .extended(local)
        .with_context(|| format!("merging catalog files from {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugspec_catalog::{TestFramework, Vendor};
    use plugspec_resolve::UntilBuild;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[plugin]
group = "org.getrafty"
name = "fragments"
version = "0.1"

[platform]
type = "IU"
version = "241.15989"

[overrides]
until = ""

[overrides.toolchain]
language-version = 21
vendor = "jetbrains"

[overrides.frameworks]
include = ["platform", "junit5"]

[catalog]
dir = "extra-platforms"

[publish]
token-env = "MARKETPLACE_TOKEN"
channel = "eap"
staging-dir = "build/staged"
"#;
        let manifest = PluginManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.plugin.name, "fragments");
        assert_eq!(manifest.platform, PlatformDeclaration::new("IU", "241.15989"));
        assert_eq!(manifest.overrides.until, Some(UntilBuild::Open));
        let tc = manifest.overrides.toolchain.as_ref().unwrap();
        assert_eq!(tc.vendor, Some(Vendor::JetBrains));
        let fw = manifest.overrides.frameworks.as_ref().unwrap();
        assert!(fw.include.as_ref().unwrap().contains(&TestFramework::JUnit5));
        assert_eq!(manifest.token_env(), "MARKETPLACE_TOKEN");
        assert_eq!(manifest.channel(), Some("eap"));
        assert_eq!(
            manifest.staging_dir(Path::new("/p")),
            Path::new("/p/build/staged")
        );
        assert_eq!(
            manifest.catalog_dir(Path::new("/p")),
            Path::new("/p/extra-platforms")
        );
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml_str = r#"
[plugin]
name = "minimal"

[platform]
type = "IC"
version = "233.11799"
"#;
        let manifest = PluginManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.plugin.version, "0.1");
        assert!(manifest.plugin.group.is_empty());
        assert!(manifest.overrides.is_empty());
        assert_eq!(manifest.token_env(), DEFAULT_TOKEN_ENV);
        assert!(manifest.channel().is_none());
        assert_eq!(
            manifest.staging_dir(Path::new("/p")),
            Path::new("/p/out/publish")
        );
    }

    #[test]
    fn reject_missing_platform() {
        assert!(PluginManifest::from_str("[plugin]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(PluginManifest::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn template_is_valid_toml() {
        let manifest = PluginManifest::from_str(&PluginManifest::template("demo")).unwrap();
        assert_eq!(manifest.plugin.name, "demo");
        assert_eq!(manifest.platform.platform_type.as_str(), "IU");
        assert_eq!(manifest.token_env(), DEFAULT_TOKEN_ENV);
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            PluginManifest::template("parent"),
        )
        .unwrap();
        let nested = dir.path().join("src").join("main");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = PluginManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.plugin.name, "parent");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn load_catalog_merges_project_entries() {
        let dir = tempfile::tempdir().unwrap();
        let platforms = dir.path().join("platforms");
        std::fs::create_dir_all(&platforms).unwrap();
        std::fs::write(
            platforms.join("rr.platforms.toml"),
            r#"
[[platform]]
type = "RR"
name = "RustRover"
min-branch = 233
default-frameworks = ["platform"]

[platform.toolchain]
language-version = 17
vendor = "jetbrains"
"#,
        )
        .unwrap();

        let catalog = load_catalog(None, dir.path()).unwrap();
        assert!(catalog.contains(&"RR".into()));
        assert!(catalog.contains(&"IU".into()));
    }

    #[test]
    fn load_catalog_without_dir_is_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(None, dir.path()).unwrap();
        assert_eq!(catalog, PlatformCatalog::builtin());
    }
}
