//! Credential references.
//!
//! A [`CredentialRef`] names where a publishing credential lives; it never
//! holds the value. The value is read through [`CredentialRef::reveal`] only
//! when a publisher is about to use it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when none is configured.
pub const DEFAULT_TOKEN_ENV: &str = "PUBLISH_TOKEN";

/// Where a credential is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum CredentialSource {
    /// A process environment variable.
    Env { var: String },
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Env { var } => write!(f, "environment variable {var}"),
        }
    }
}

/// An opaque reference to a publishing credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialRef {
    source: CredentialSource,
}

impl CredentialRef {
    pub fn env(var: impl Into<String>) -> Self {
        Self {
            source: CredentialSource::Env { var: var.into() },
        }
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// Read the credential value now. `None` if it is missing or empty.
    pub fn reveal(&self) -> Option<Secret> {
        match &self.source {
            CredentialSource::Env { var } => std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .map(Secret),
        }
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

/// A revealed credential value. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Finds a credential reference at publish time.
pub trait CredentialLookup {
    /// Return a reference if a credential is currently available.
    fn lookup(&self) -> Option<CredentialRef>;

    /// Human-readable description of where the lookup searches.
    fn describe(&self) -> String {
        "credential lookup".to_string()
    }
}

impl<F> CredentialLookup for F
where
    F: Fn() -> Option<CredentialRef>,
{
    fn lookup(&self) -> Option<CredentialRef> {
        self()
    }
}

/// Looks a credential up in a process environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

impl CredentialLookup for EnvCredential {
    fn lookup(&self) -> Option<CredentialRef> {
        // Same check the publisher makes later, so a bound credential can
        // always be revealed.
        let credential = CredentialRef::env(&self.var);
        credential.reveal().map(|_| credential)
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}
