//! Two-component host build numbers.
//!
//! A host release is identified as `{branch}.{build}` (e.g. `241.15989`).
//! There is never a third component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A parsed `{branch}.{build}` host version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildVersion {
    /// Release branch (e.g. 241 for the 2024.1 line).
    pub branch: u32,
    /// Build number within the branch.
    pub build: u32,
}

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version is empty")]
    Empty,

    /// Anything other than exactly two dot-separated components.
    #[error("expected two dot-separated components, found {found}")]
    WrongComponentCount { found: usize },

    #[error("component '{component}' is not a non-negative integer")]
    NonNumeric { component: String },
}

impl BuildVersion {
    pub fn new(branch: u32, build: u32) -> Self {
        Self { branch, build }
    }

    /// Parse a `{branch}.{build}` string.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(VersionError::WrongComponentCount { found: parts.len() });
        }
        let branch = parse_component(parts[0])?;
        let build = parse_component(parts[1])?;
        Ok(Self { branch, build })
    }
}

/// Parse one component, accepting ASCII digits only (no sign, no whitespace).
pub fn parse_component(part: &str) -> Result<u32, VersionError> {
    let non_numeric = || VersionError::NonNumeric {
        component: part.to_string(),
    };
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    part.parse().map_err(|_| non_numeric())
}

impl FromStr for BuildVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BuildVersion {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<BuildVersion> for String {
    fn from(v: BuildVersion) -> Self {
        v.to_string()
    }
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.branch, self.build)
    }
}
