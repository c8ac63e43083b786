//! The compatibility resolver.
//!
//! Steps, in order; the first failure ends resolution:
//! 1. look up the platform type in the catalog
//! 2. parse and check the declared version
//! 3. pick the toolchain (override is all-or-nothing)
//! 4. bind test frameworks (mandatory ones always stay)
//! 5. derive `since` from the version's branch
//! 6. take `until` from the override, or leave it open

use tracing::debug;

use plugspec_catalog::{
    BuildVersion, PlatformCatalog, PlatformInfo, TestFrameworkBinding, ToolchainRequirement,
};

use crate::declaration::PlatformDeclaration;
use crate::error::{InvalidVersion, OverrideConflict, ResolutionError, Result};
use crate::overrides::{FrameworkOverride, Overrides, ToolchainOverride};
use crate::range::{CompatibilityRange, UntilBuild};
use crate::spec::ResolvedBuildSpec;

/// Resolves declarations against a catalog it borrows.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityResolver<'a> {
    catalog: &'a PlatformCatalog,
}

impl<'a> CompatibilityResolver<'a> {
    pub fn new(catalog: &'a PlatformCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve one declaration with its overrides.
    pub fn resolve(
        &self,
        declaration: &PlatformDeclaration,
        overrides: &Overrides,
    ) -> Result<ResolvedBuildSpec> {
        let result = self.resolve_inner(declaration, overrides);
        match &result {
            Ok(spec) => debug!(
                platform = %declaration.platform_type,
                version = %declaration.version,
                toolchain = %spec.toolchain(),
                since = spec.range().since,
                until = %spec.range().until,
                "resolved build target"
            ),
            Err(err) => debug!(
                platform = %declaration.platform_type,
                version = %declaration.version,
                error = %err,
                "resolution failed"
            ),
        }
        result
    }

    fn resolve_inner(
        &self,
        declaration: &PlatformDeclaration,
        overrides: &Overrides,
    ) -> Result<ResolvedBuildSpec> {
        let info = self
            .catalog
            .lookup(&declaration.platform_type)
            .ok_or_else(|| ResolutionError::UnknownPlatform {
                platform_type: declaration.platform_type.clone(),
            })?;

        let version = check_version(info, declaration)?;
        let toolchain = resolve_toolchain(info, overrides.toolchain.as_ref())?;
        let frameworks = resolve_frameworks(info, overrides.frameworks.as_ref())?;

        // An omitted `until` stays open; it is never widened to `{branch}.*`.
        let until = overrides.until.clone().unwrap_or(UntilBuild::Open);
        let range = CompatibilityRange {
            since: version.branch,
            until,
        };

        Ok(ResolvedBuildSpec::new(
            declaration.platform_type.clone(),
            version,
            toolchain,
            frameworks,
            range,
        ))
    }
}

/// Resolve a declaration against `catalog`.
pub fn resolve(
    catalog: &PlatformCatalog,
    declaration: &PlatformDeclaration,
    overrides: &Overrides,
) -> Result<ResolvedBuildSpec> {
    CompatibilityResolver::new(catalog).resolve(declaration, overrides)
}

fn check_version(info: &PlatformInfo, declaration: &PlatformDeclaration) -> Result<BuildVersion> {
    let invalid = |reason: InvalidVersion| ResolutionError::InvalidVersion {
        platform_type: declaration.platform_type.clone(),
        version: declaration.version.clone(),
        reason,
    };

    let version = BuildVersion::parse(&declaration.version)
        .map_err(|e| invalid(InvalidVersion::Malformed(e)))?;
    if !info.accepts(&version) {
        return Err(invalid(InvalidVersion::UnsupportedBranch {
            branch: version.branch,
            min_branch: info.min_branch,
        }));
    }
    Ok(version)
}

fn resolve_toolchain(
    info: &PlatformInfo,
    toolchain: Option<&ToolchainOverride>,
) -> std::result::Result<ToolchainRequirement, OverrideConflict> {
    let requested = match toolchain {
        Some(over) => over.requirement()?,
        None => None,
    };
    let Some(requested) = requested else {
        return Ok(info.toolchain);
    };

    let minimum = info.minimum_language_version();
    if requested.language_version < minimum {
        return Err(OverrideConflict::ToolchainBelowMinimum {
            requested: requested.language_version,
            minimum,
        });
    }
    Ok(requested)
}

fn resolve_frameworks(
    info: &PlatformInfo,
    frameworks: Option<&FrameworkOverride>,
) -> std::result::Result<TestFrameworkBinding, OverrideConflict> {
    let Some(over) = frameworks else {
        let mut binding = info.default_frameworks.clone();
        binding.union_with(&info.mandatory_frameworks);
        return Ok(binding);
    };

    for framework in over.exclude.iter() {
        if info.mandatory_frameworks.contains(framework) {
            return Err(OverrideConflict::MandatoryFrameworkRemoved {
                framework: *framework,
            });
        }
        if over
            .include
            .as_ref()
            .is_some_and(|include| include.contains(framework))
        {
            return Err(OverrideConflict::FrameworkIncludedAndExcluded {
                framework: *framework,
            });
        }
    }

    let mut binding = over
        .include
        .clone()
        .unwrap_or_else(|| info.default_frameworks.clone());
    binding.union_with(&info.mandatory_frameworks);
    for framework in over.exclude.iter() {
        binding.remove(framework);
    }
    Ok(binding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugspec_catalog::{TestFramework, VersionError, Vendor};

    fn iu(version: &str) -> PlatformDeclaration {
        PlatformDeclaration::new("IU", version)
    }

    fn resolve_builtin(decl: &PlatformDeclaration, overrides: &Overrides) -> Result<ResolvedBuildSpec> {
        resolve(&PlatformCatalog::builtin(), decl, overrides)
    }

    #[test]
    fn defaults_for_ultimate() {
        let spec = resolve_builtin(&iu("241.15989"), &Overrides::default()).unwrap();
        assert_eq!(spec.platform_type().as_str(), "IU");
        assert_eq!(spec.platform_version(), BuildVersion::new(241, 15989));
        assert_eq!(spec.toolchain(), ToolchainRequirement::new(17, Vendor::JetBrains));
        assert_eq!(
            spec.frameworks(),
            &TestFrameworkBinding::from([TestFramework::Platform, TestFramework::JUnit5])
        );
        assert_eq!(spec.range().since, 241);
        assert_eq!(spec.range().until, UntilBuild::Open);
    }

    #[test]
    fn community_uses_its_own_variant() {
        let decl = PlatformDeclaration::new("IC", "233.11799");
        let spec = resolve_builtin(&decl, &Overrides::default()).unwrap();
        assert_eq!(spec.toolchain().vendor, Vendor::Adoptium);
        assert!(spec.frameworks().contains(&TestFramework::JUnit4));
        assert!(!spec.frameworks().contains(&TestFramework::JUnit5));
    }

    #[test]
    fn omitted_until_is_open_not_wildcard() {
        let spec = resolve_builtin(&iu("241.15989"), &Overrides::default()).unwrap();
        assert!(spec.range().until.is_open());
        assert_ne!(spec.range().until, UntilBuild::bound("241.*"));
    }

    #[test]
    fn explicit_until_used_verbatim() {
        let overrides = Overrides::default().with_until(UntilBuild::bound("243.*"));
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(spec.range().until.as_bound(), Some("243.*"));
    }

    #[test]
    fn explicit_open_until() {
        let overrides = Overrides::default().with_until(UntilBuild::bound(""));
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert!(spec.range().until.is_open());
    }

    #[test]
    fn unknown_platform() {
        let decl = PlatformDeclaration::new("not-a-real-platform", "1.1");
        let err = resolve_builtin(&decl, &Overrides::default()).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::UnknownPlatform { ref platform_type } if platform_type.as_str() == "not-a-real-platform"
        ));
    }

    #[test]
    fn malformed_version() {
        let err = resolve_builtin(&iu("abc"), &Overrides::default()).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::InvalidVersion {
                reason: InvalidVersion::Malformed(VersionError::WrongComponentCount { found: 1 }),
                ..
            }
        ));
    }

    #[test]
    fn three_component_version_rejected() {
        let err = resolve_builtin(&iu("2024.1.1"), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidVersion { .. }));
    }

    #[test]
    fn branch_before_minimum_rejected() {
        let err = resolve_builtin(&iu("222.4345"), &Overrides::default()).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::InvalidVersion {
                reason: InvalidVersion::UnsupportedBranch {
                    branch: 222,
                    min_branch: 223
                },
                ..
            }
        ));
    }

    #[test]
    fn unknown_platform_checked_before_version() {
        let decl = PlatformDeclaration::new("XX", "abc");
        let err = resolve_builtin(&decl, &Overrides::default()).unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownPlatform { .. }));
    }

    #[test]
    fn full_toolchain_override_replaces_default() {
        let overrides = Overrides::default().with_toolchain(21, Vendor::Azul);
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(spec.toolchain(), ToolchainRequirement::new(21, Vendor::Azul));
    }

    #[test]
    fn vendor_only_toolchain_is_conflict() {
        let overrides = Overrides {
            toolchain: Some(ToolchainOverride {
                language_version: None,
                vendor: Some(Vendor::JetBrains),
            }),
            ..Default::default()
        };
        let err = resolve_builtin(&iu("241.15989"), &overrides).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ConflictingOverride(OverrideConflict::PartialToolchain {
                missing: "language-version"
            })
        );
    }

    #[test]
    fn empty_toolchain_override_keeps_default() {
        let overrides = Overrides {
            toolchain: Some(ToolchainOverride::default()),
            ..Default::default()
        };
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(spec.toolchain(), ToolchainRequirement::new(17, Vendor::JetBrains));
    }

    #[test]
    fn toolchain_below_minimum_is_conflict() {
        let overrides = Overrides::default().with_toolchain(11, Vendor::JetBrains);
        let err = resolve_builtin(&iu("241.15989"), &overrides).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ConflictingOverride(OverrideConflict::ToolchainBelowMinimum {
                requested: 11,
                minimum: 17
            })
        );
    }

    #[test]
    fn include_replaces_defaults_but_keeps_mandatory() {
        let overrides = Overrides::default().including([TestFramework::JUnit4]);
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(
            spec.frameworks(),
            &TestFrameworkBinding::from([TestFramework::Platform, TestFramework::JUnit4])
        );
    }

    #[test]
    fn exclude_drops_optional_default() {
        let overrides = Overrides::default().excluding([TestFramework::JUnit5]);
        let spec = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(
            spec.frameworks(),
            &TestFrameworkBinding::from([TestFramework::Platform])
        );
    }

    #[test]
    fn excluding_mandatory_is_conflict() {
        let overrides = Overrides::default().excluding([TestFramework::Platform]);
        let err = resolve_builtin(&iu("241.15989"), &overrides).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ConflictingOverride(OverrideConflict::MandatoryFrameworkRemoved {
                framework: TestFramework::Platform
            })
        );
    }

    #[test]
    fn include_and_exclude_same_is_conflict() {
        let overrides = Overrides::default()
            .including([TestFramework::JUnit5])
            .excluding([TestFramework::JUnit5]);
        let err = resolve_builtin(&iu("241.15989"), &overrides).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::ConflictingOverride(OverrideConflict::FrameworkIncludedAndExcluded { .. })
        ));
    }

    #[test]
    fn platform_without_mandatory_can_drop_everything() {
        let decl = PlatformDeclaration::new("GO", "241.14494");
        let overrides = Overrides::default().excluding([TestFramework::Platform]);
        let spec = resolve_builtin(&decl, &overrides).unwrap();
        assert!(spec.frameworks().is_empty());
    }

    #[test]
    fn resolver_uses_injected_catalog() {
        let mut custom = PlatformInfo::clion();
        custom.platform_type = "RR".into();
        let catalog = PlatformCatalog::with_entries(vec![custom]).unwrap();
        let resolver = CompatibilityResolver::new(&catalog);

        assert!(resolver
            .resolve(&PlatformDeclaration::new("RR", "241.1"), &Overrides::default())
            .is_ok());
        assert!(matches!(
            resolver.resolve(&iu("241.1"), &Overrides::default()),
            Err(ResolutionError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn same_inputs_same_output() {
        let overrides = Overrides::default()
            .with_toolchain(21, Vendor::JetBrains)
            .including([TestFramework::JUnit5, TestFramework::Plugin]);
        let a = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        let b = resolve_builtin(&iu("241.15989"), &overrides).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
