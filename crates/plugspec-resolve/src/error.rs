//! Resolution error types.

use plugspec_catalog::{PlatformType, TestFramework, VersionError};

/// Terminal failures of a resolution.
///
/// None of these are retried: resolution is deterministic, so a retry would
/// reproduce the same failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The platform type is not in the catalog.
    #[error("unknown platform type '{platform_type}'")]
    UnknownPlatform { platform_type: PlatformType },

    /// The declared version is malformed or not accepted by the platform.
    #[error("invalid version '{version}' for platform '{platform_type}': {reason}")]
    InvalidVersion {
        platform_type: PlatformType,
        version: String,
        reason: InvalidVersion,
    },

    /// An override cannot be applied without breaking an invariant.
    #[error("conflicting override: {0}")]
    ConflictingOverride(OverrideConflict),
}

/// Why a declared version was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidVersion {
    #[error(transparent)]
    Malformed(#[from] VersionError),

    /// Well-formed, but older than the oldest branch the platform accepts.
    #[error("branch {branch} predates the oldest supported branch {min_branch}")]
    UnsupportedBranch { branch: u32, min_branch: u32 },
}

/// The specific override rule that was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideConflict {
    /// A toolchain override names only one of its two fields.
    #[error("toolchain override is missing '{missing}'; language version and vendor must be given together")]
    PartialToolchain { missing: &'static str },

    #[error("toolchain language version {requested} is below the platform minimum {minimum}")]
    ToolchainBelowMinimum { requested: u32, minimum: u32 },

    #[error("test framework '{framework}' is mandatory for this platform and cannot be excluded")]
    MandatoryFrameworkRemoved { framework: TestFramework },

    #[error("test framework '{framework}' is both included and excluded")]
    FrameworkIncludedAndExcluded { framework: TestFramework },
}

impl From<OverrideConflict> for ResolutionError {
    fn from(conflict: OverrideConflict) -> Self {
        ResolutionError::ConflictingOverride(conflict)
    }
}

/// Result type alias for resolution.
pub type Result<T> = std::result::Result<T, ResolutionError>;
