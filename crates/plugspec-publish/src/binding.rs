//! Attaching a credential to a resolved spec.

use tracing::debug;

use plugspec_resolve::ResolvedBuildSpec;

use crate::credential::{CredentialLookup, CredentialRef};
use crate::error::{PublishError, Result};

/// A resolved spec with the credential reference it will be published with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishableSpec {
    spec: ResolvedBuildSpec,
    credential: CredentialRef,
}

impl PublishableSpec {
    pub fn spec(&self) -> &ResolvedBuildSpec {
        &self.spec
    }

    pub fn credential(&self) -> &CredentialRef {
        &self.credential
    }

    /// Detach the credential, returning the resolved build spec for reuse elsewhere.
    pub fn into_spec(self) -> ResolvedBuildSpec {
        self.spec
    }
}

/// Bind a credential reference to `spec`.
///
/// The lookup runs now, not during resolution. If it finds nothing the
/// publishing step cannot proceed.
pub fn bind(spec: ResolvedBuildSpec, lookup: &dyn CredentialLookup) -> Result<PublishableSpec> {
    let Some(credential) = lookup.lookup() else {
        return Err(PublishError::MissingCredential {
            source_desc: lookup.describe(),
        });
    };
    debug!(platform = %spec.platform_type(), credential = %credential, "bound publish credential");
    Ok(PublishableSpec { spec, credential })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::EnvCredential;
    use plugspec_catalog::PlatformCatalog;
    use plugspec_resolve::{resolve, Overrides, PlatformDeclaration};

    fn spec() -> ResolvedBuildSpec {
        resolve(
            &PlatformCatalog::builtin(),
            &PlatformDeclaration::new("IU", "241.15989"),
            &Overrides::default(),
        )
        .unwrap()
    }

    #[test]
    fn bind_with_credential() {
        let lookup = || Some(CredentialRef::env("TOKEN"));
        let publishable = bind(spec(), &lookup).unwrap();
        assert_eq!(publishable.credential(), &CredentialRef::env("TOKEN"));
        assert_eq!(publishable.spec(), &spec());
    }

    #[test]
    fn bind_without_credential_fails() {
        let lookup = EnvCredential::new("PLUGSPEC_TEST_BIND_NEVER_SET");
        let err = bind(spec(), &lookup).unwrap_err();
        match err {
            PublishError::MissingCredential { source_desc } => {
                assert!(source_desc.contains("PLUGSPEC_TEST_BIND_NEVER_SET"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn spec_resolved_without_credential_is_reusable() {
        let resolved = spec();
        let missing = || -> Option<CredentialRef> { None };
        assert!(bind(resolved.clone(), &missing).is_err());

        // Same spec binds fine once a credential is available elsewhere.
        let present = || Some(CredentialRef::env("CI_TOKEN"));
        let publishable = bind(resolved.clone(), &present).unwrap();
        assert_eq!(publishable.into_spec(), resolved);
    }
}
