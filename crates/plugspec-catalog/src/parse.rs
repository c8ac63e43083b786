//! TOML parsing, serialization, validation, and discovery for catalog files.
//!
//! Projects can add or replace platform entries with `*.platforms.toml`
//! files holding a `[[platform]]` array. These are read once at start-up
//! and layered over the built-in table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::platform::PlatformInfo;

/// File suffix recognized by [`discover_catalog_files`].
pub const CATALOG_FILE_SUFFIX: &str = ".platforms.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "platform")]
    platforms: Vec<PlatformInfo>,
}

/// A validation issue found in a platform entry.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Load platform entries from a catalog file.
pub fn load_catalog_toml(path: &Path) -> Result<Vec<PlatformInfo>> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let entries = parse_catalog_toml(&content)?;
    debug!(path = %path.display(), entries = entries.len(), "loaded catalog file");
    Ok(entries)
}

/// Parse platform entries from a TOML string.
pub fn parse_catalog_toml(toml_str: &str) -> Result<Vec<PlatformInfo>> {
    let file: CatalogFile = toml::from_str(toml_str)?;
    Ok(file.platforms)
}

/// Serialize platform entries to pretty TOML.
pub fn catalog_to_toml(entries: &[PlatformInfo]) -> Result<String> {
    let file = CatalogFile {
        platforms: entries.to_vec(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Validate a platform entry for internal consistency.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
/// Warnings alone still produce `Err`; callers decide whether they block.
pub fn validate_platform_info(info: &PlatformInfo) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let code = info.platform_type.as_str();

    // 1. Type code is a non-empty token
    if code.is_empty() || code.chars().any(char::is_whitespace) {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("platform type '{code}' must be non-empty and contain no whitespace"),
        });
    }

    // 2. Product name present
    if info.name.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!("platform '{code}' has no product name"),
        });
    }

    // 3. Default toolchain has a real language version
    if info.toolchain.language_version == 0 {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("platform '{code}' default toolchain language version is 0"),
        });
    }

    // 4. Minimum language version does not exceed the default
    if let Some(min) = info.min_language_version {
        if min == 0 {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("platform '{code}' min-language-version is 0"),
            });
        } else if min > info.toolchain.language_version {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "platform '{code}' min-language-version ({min}) exceeds default toolchain language version ({})",
                    info.toolchain.language_version
                ),
            });
        }
    }

    // 5. Mandatory frameworks are part of the defaults
    if !info.default_frameworks.covers(&info.mandatory_frameworks) {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!(
                "platform '{code}' mandatory frameworks [{}] are not all in default frameworks [{}]",
                info.mandatory_frameworks, info.default_frameworks
            ),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Discover all catalog files in a directory.
///
/// Returns paths sorted by file name. A missing directory yields no files.
pub fn discover_catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(CATALOG_FILE_SUFFIX));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load and validate every catalog file in a directory.
///
/// Any error-severity issue aborts loading; warnings are logged.
pub fn load_catalog_dir(dir: &Path) -> Result<Vec<PlatformInfo>> {
    let mut entries = Vec::new();
    for path in discover_catalog_files(dir)? {
        for info in load_catalog_toml(&path)? {
            if let Err(issues) = validate_platform_info(&info) {
                if let Some(first) = issues.iter().find(|i| i.is_error()) {
                    return Err(CatalogError::Validation {
                        detail: format!("{}: {}", path.display(), first.message),
                    });
                }
                for issue in &issues {
                    debug!(path = %path.display(), "{}", issue.message);
                }
            }
            entries.push(info);
        }
    }
    Ok(entries)
}
