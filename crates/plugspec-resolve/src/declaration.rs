//! Build-target declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

use plugspec_catalog::PlatformType;

/// One build target: a platform type and the host version to build against.
///
/// The version is kept as the caller wrote it; it is only parsed during
/// resolution so that malformed input surfaces as a resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformDeclaration {
    /// Platform type code (e.g. "IU").
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    /// Host version in `{branch}.{build}` form (e.g. "241.15989").
    pub version: String,
}

impl PlatformDeclaration {
    pub fn new(platform_type: impl Into<PlatformType>, version: impl Into<String>) -> Self {
        Self {
            platform_type: platform_type.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PlatformDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform_type, self.version)
    }
}
