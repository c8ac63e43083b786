//! `plugspec catalog`: list, describe and validate platforms.

use std::path::Path;

use anyhow::{bail, Context, Result};

use plugspec_catalog::parse::{catalog_to_toml, load_catalog_toml, validate_platform_info};
use plugspec_catalog::{PlatformCatalog, PlatformType};

/// List every platform in the catalog.
pub fn list(catalog: &PlatformCatalog) -> Result<()> {
    if catalog.is_empty() {
        println!("No platforms in catalog.");
        return Ok(());
    }

    println!("Platforms ({}):", catalog.len());
    println!();
    for info in catalog.iter() {
        println!(
            "  {:<4} {:<28} since {:<5} {}",
            info.platform_type, info.name, info.min_branch, info.toolchain
        );
    }
    println!();
    println!("Use 'plugspec catalog describe <type>' for details.");
    Ok(())
}

/// Describe a specific platform in detail.
pub fn describe(catalog: &PlatformCatalog, code: &str, format: Option<&str>) -> Result<()> {
    let Some(info) = catalog.lookup(&PlatformType::new(code)) else {
        bail!("unknown platform type: '{code}'. Use 'plugspec catalog list' to see available types.");
    };

    if format == Some("toml") {
        print!("{}", catalog_to_toml(std::slice::from_ref(info))?);
        return Ok(());
    }

    println!("=== Platform: {} ({}) ===", info.name, info.platform_type);
    println!("  Oldest branch:      {}", info.min_branch);
    println!("  Toolchain:          {}", info.toolchain);
    println!("  Min language:       {}", info.minimum_language_version());
    println!("  Default frameworks: {}", info.default_frameworks);
    if info.mandatory_frameworks.is_empty() {
        println!("  Mandatory:          (none)");
    } else {
        println!("  Mandatory:          {}", info.mandatory_frameworks);
    }
    Ok(())
}

/// Validate a catalog file. Fails if any entry has an error-severity issue
/// or if type codes repeat.
pub fn validate(path: &Path) -> Result<()> {
    let entries = load_catalog_toml(path)
        .with_context(|| format!("loading {}", path.display()))?;

    let mut errors = 0;
    for info in &entries {
        match validate_platform_info(info) {
            Ok(()) => println!("  {}: ok", info.platform_type),
            Err(issues) => {
                for issue in issues {
                    if issue.is_error() {
                        errors += 1;
                    }
                    println!("  {}: {}: {}", info.platform_type, issue.severity, issue.message);
                }
            }
        }
    }

    PlatformCatalog::with_entries(entries)
        .with_context(|| format!("checking {}", path.display()))?;

    if errors > 0 {
        bail!("{} has {errors} error(s)", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_known_platform() {
        let catalog = PlatformCatalog::builtin();
        assert!(describe(&catalog, "IU", None).is_ok());
        assert!(describe(&catalog, "IC", Some("toml")).is_ok());
    }

    #[test]
    fn describe_unknown_platform() {
        assert!(describe(&PlatformCatalog::builtin(), "nonexistent", None).is_err());
    }

    #[test]
    fn list_builtin() {
        assert!(list(&PlatformCatalog::builtin()).is_ok());
    }

    #[test]
    fn list_empty_catalog() {
        let catalog = PlatformCatalog::with_entries(Vec::new()).unwrap();
        assert!(list(&catalog).is_ok());
    }

    #[test]
    fn validate_good_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.platforms.toml");
        let content = catalog_to_toml(&plugspec_catalog::PlatformInfo::builtin_entries()).unwrap();
        std::fs::write(&path, content).unwrap();
        assert!(validate(&path).is_ok());
    }

    #[test]
    fn validate_duplicate_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.platforms.toml");
        let goland = plugspec_catalog::PlatformInfo::goland();
        let content = catalog_to_toml(&[goland.clone(), goland]).unwrap();
        std::fs::write(&path, content).unwrap();
        assert!(validate(&path).is_err());
    }

    #[test]
    fn validate_missing_file() {
        assert!(validate(Path::new("/nonexistent/x.platforms.toml")).is_err());
    }
}
