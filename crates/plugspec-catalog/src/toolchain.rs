//! Toolchain requirement model.
//!
//! A toolchain is always a complete pairing of a language major version and
//! a vendor distribution. There is no partially specified toolchain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A toolchain distribution vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// JetBrains Runtime.
    JetBrains,
    /// Eclipse Temurin.
    Adoptium,
    /// Azul Zulu.
    Azul,
    /// Amazon Corretto.
    Amazon,
    Oracle,
    Microsoft,
}

impl Vendor {
    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::JetBrains => "jetbrains",
            Vendor::Adoptium => "adoptium",
            Vendor::Azul => "azul",
            Vendor::Amazon => "amazon",
            Vendor::Oracle => "oracle",
            Vendor::Microsoft => "microsoft",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The toolchain a build target compiles and tests with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainRequirement {
    /// Language major version (e.g. 17).
    pub language_version: u32,
    /// Required distribution.
    pub vendor: Vendor,
}

impl ToolchainRequirement {
    pub fn new(language_version: u32, vendor: Vendor) -> Self {
        Self {
            language_version,
            vendor,
        }
    }
}

impl fmt::Display for ToolchainRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.language_version, self.vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_serialized_form_matches_as_str() {
        for vendor in [
            Vendor::JetBrains,
            Vendor::Adoptium,
            Vendor::Azul,
            Vendor::Amazon,
            Vendor::Oracle,
            Vendor::Microsoft,
        ] {
            let json = serde_json::to_string(&vendor).unwrap();
            assert_eq!(json, format!("\"{}\"", vendor.as_str()));
        }
    }

    #[test]
    fn toolchain_display() {
        let tc = ToolchainRequirement::new(17, Vendor::JetBrains);
        assert_eq!(tc.to_string(), "17 (jetbrains)");
    }

    #[test]
    fn toolchain_kebab_case_fields() {
        let tc: ToolchainRequirement =
            toml::from_str("language-version = 21\nvendor = \"azul\"\n").unwrap();
        assert_eq!(tc, ToolchainRequirement::new(21, Vendor::Azul));
    }
}
