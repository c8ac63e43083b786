//! Platform entries.
//!
//! A `PlatformInfo` describes one host platform type: which versions it
//! accepts, which toolchain builds against it by default, and which test
//! frameworks every build target must carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::framework::{TestFramework, TestFrameworkBinding};
use crate::toolchain::{ToolchainRequirement, Vendor};
use crate::version::BuildVersion;

/// A platform type code such as `IU` or `IC`.
///
/// Kept as a free-form code rather than a closed enum: the set of valid
/// codes is whatever the catalog in use contains.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformType(String);

impl PlatformType {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlatformType {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for PlatformType {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog entry for one platform type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformInfo {
    /// Type code (e.g. "IU").
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    /// Product name.
    pub name: String,
    /// Oldest release branch still accepted for this platform.
    pub min_branch: u32,
    /// Toolchain used when a build target does not override it.
    pub toolchain: ToolchainRequirement,
    /// Lowest language version an override may select. Defaults to the
    /// default toolchain's language version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_language_version: Option<u32>,
    /// Frameworks bound when a build target does not choose its own.
    #[serde(default)]
    pub default_frameworks: TestFrameworkBinding,
    /// Frameworks that every build target must carry.
    #[serde(default)]
    pub mandatory_frameworks: TestFrameworkBinding,
}

impl PlatformInfo {
    /// Whether a well-formed version is recognized for this platform.
    pub fn accepts(&self, version: &BuildVersion) -> bool {
        version.branch >= self.min_branch
    }

    pub fn minimum_language_version(&self) -> u32 {
        self.min_language_version
            .unwrap_or(self.toolchain.language_version)
    }

    /// IntelliJ IDEA Ultimate: JetBrains Runtime, platform + modern unit tests.
    pub fn intellij_ultimate() -> Self {
        Self {
            platform_type: "IU".into(),
            name: "IntelliJ IDEA Ultimate".into(),
            min_branch: 223,
            toolchain: ToolchainRequirement::new(17, Vendor::JetBrains),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform, TestFramework::JUnit5].into(),
            mandatory_frameworks: [TestFramework::Platform].into(),
        }
    }

    /// IntelliJ IDEA Community: Temurin, platform + legacy unit tests.
    pub fn intellij_community() -> Self {
        Self {
            platform_type: "IC".into(),
            name: "IntelliJ IDEA Community".into(),
            min_branch: 223,
            toolchain: ToolchainRequirement::new(17, Vendor::Adoptium),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform, TestFramework::JUnit4].into(),
            mandatory_frameworks: [TestFramework::Platform].into(),
        }
    }

    pub fn pycharm_professional() -> Self {
        Self {
            platform_type: "PY".into(),
            name: "PyCharm Professional".into(),
            min_branch: 223,
            toolchain: ToolchainRequirement::new(17, Vendor::JetBrains),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform].into(),
            mandatory_frameworks: [TestFramework::Platform].into(),
        }
    }

    pub fn pycharm_community() -> Self {
        Self {
            platform_type: "PC".into(),
            name: "PyCharm Community".into(),
            min_branch: 223,
            toolchain: ToolchainRequirement::new(17, Vendor::Adoptium),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform].into(),
            mandatory_frameworks: [TestFramework::Platform].into(),
        }
    }

    pub fn goland() -> Self {
        Self {
            platform_type: "GO".into(),
            name: "GoLand".into(),
            min_branch: 231,
            toolchain: ToolchainRequirement::new(17, Vendor::JetBrains),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform].into(),
            mandatory_frameworks: TestFrameworkBinding::new(),
        }
    }

    pub fn clion() -> Self {
        Self {
            platform_type: "CL".into(),
            name: "CLion".into(),
            min_branch: 231,
            toolchain: ToolchainRequirement::new(17, Vendor::JetBrains),
            min_language_version: Some(17),
            default_frameworks: [TestFramework::Platform].into(),
            mandatory_frameworks: TestFrameworkBinding::new(),
        }
    }

    /// Every built-in entry, in table order.
    pub fn builtin_entries() -> Vec<Self> {
        vec![
            Self::intellij_ultimate(),
            Self::intellij_community(),
            Self::pycharm_professional(),
            Self::pycharm_community(),
            Self::goland(),
            Self::clion(),
        ]
    }
}
