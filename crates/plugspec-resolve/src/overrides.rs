//! Caller-supplied overrides.
//!
//! Every field is optional. An absent field means "use the catalog's rule",
//! which for `until` is the open sentinel.

use serde::{Deserialize, Serialize};

use plugspec_catalog::{TestFramework, TestFrameworkBinding, ToolchainRequirement, Vendor};

use crate::error::OverrideConflict;
use crate::range::UntilBuild;

/// Partial overrides applied on top of the catalog defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Overrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<ToolchainOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<FrameworkOverride>,
    /// Upper compatibility bound. `None` means "not specified".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<UntilBuild>,
}

impl Overrides {
    pub fn with_toolchain(mut self, language_version: u32, vendor: Vendor) -> Self {
        self.toolchain = Some(ToolchainOverride::complete(language_version, vendor));
        self
    }

    pub fn with_until(mut self, until: UntilBuild) -> Self {
        self.until = Some(until);
        self
    }

    pub fn including(mut self, frameworks: impl IntoIterator<Item = TestFramework>) -> Self {
        let fw = self.frameworks.get_or_insert_with(FrameworkOverride::default);
        let include = fw.include.get_or_insert_with(TestFrameworkBinding::new);
        for framework in frameworks {
            include.insert(framework);
        }
        self
    }

    pub fn excluding(mut self, frameworks: impl IntoIterator<Item = TestFramework>) -> Self {
        let fw = self.frameworks.get_or_insert_with(FrameworkOverride::default);
        for framework in frameworks {
            fw.exclude.insert(framework);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A toolchain override as written by the caller.
///
/// Both fields are optional on the wire so that an incomplete override can
/// be reported instead of silently merged with the catalog default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolchainOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

impl ToolchainOverride {
    pub fn complete(language_version: u32, vendor: Vendor) -> Self {
        Self {
            language_version: Some(language_version),
            vendor: Some(vendor),
        }
    }

    /// The full requirement this override selects.
    ///
    /// `Ok(None)` when neither field is set; a conflict when only one is.
    pub fn requirement(&self) -> Result<Option<ToolchainRequirement>, OverrideConflict> {
        match (self.language_version, self.vendor) {
            (Some(language_version), Some(vendor)) => {
                Ok(Some(ToolchainRequirement::new(language_version, vendor)))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(OverrideConflict::PartialToolchain { missing: "vendor" }),
            (None, Some(_)) => Err(OverrideConflict::PartialToolchain {
                missing: "language-version",
            }),
        }
    }
}

/// Test framework additions and removals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FrameworkOverride {
    /// Replaces the catalog's default selection when present. Mandatory
    /// frameworks are added back regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<TestFrameworkBinding>,
    /// Frameworks to drop. Must not name a mandatory framework.
    #[serde(default, skip_serializing_if = "TestFrameworkBinding::is_empty")]
    pub exclude: TestFrameworkBinding,
}
