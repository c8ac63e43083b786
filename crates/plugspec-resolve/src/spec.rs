//! The resolved build specification.

use serde::Serialize;

use plugspec_catalog::{BuildVersion, PlatformType, TestFrameworkBinding, ToolchainRequirement};

use crate::range::CompatibilityRange;

/// Everything the packaging step needs to know about one build target.
///
/// Produced only by the resolver, read-only afterwards. It carries no
/// credential data, so the same value can be published from any
/// environment. Serialize-only: a value read back from disk has not been
/// checked against a catalog.
///
/// ```compile_fail
/// let spec: plugspec_resolve::ResolvedBuildSpec =
///     serde_json::from_str(r#"{"platform-type":"NOPE"}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedBuildSpec {
    platform_type: PlatformType,
    platform_version: BuildVersion,
    toolchain: ToolchainRequirement,
    frameworks: TestFrameworkBinding,
    range: CompatibilityRange,
}

impl ResolvedBuildSpec {
    pub(crate) fn new(
        platform_type: PlatformType,
        platform_version: BuildVersion,
        toolchain: ToolchainRequirement,
        frameworks: TestFrameworkBinding,
        range: CompatibilityRange,
    ) -> Self {
        Self {
            platform_type,
            platform_version,
            toolchain,
            frameworks,
            range,
        }
    }

    pub fn platform_type(&self) -> &PlatformType {
        &self.platform_type
    }

    /// The host version the plugin compiles against.
    pub fn platform_version(&self) -> BuildVersion {
        self.platform_version
    }

    pub fn toolchain(&self) -> ToolchainRequirement {
        self.toolchain
    }

    pub fn frameworks(&self) -> &TestFrameworkBinding {
        &self.frameworks
    }

    pub fn range(&self) -> &CompatibilityRange {
        &self.range
    }
}
