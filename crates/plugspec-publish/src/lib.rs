//! Publishing support for resolved build targets.
//!
//! A [`ResolvedBuildSpec`](plugspec_resolve::ResolvedBuildSpec) never holds
//! credentials. Publishing attaches a [`CredentialRef`] at invocation time
//! through [`bind`], validates the result, and hands it to a [`Publisher`]
//! backend.
//!
//! # Backends
//!
//! - [`StagingPublisher`]: writes publish requests to a local directory
//!   for a downstream upload step to pick up

pub mod binding;
pub mod client;
pub mod credential;
pub mod error;
pub mod publish;

pub use binding::{bind, PublishableSpec};
pub use client::{Publisher, StagingPublisher};
pub use credential::{
    CredentialLookup, CredentialRef, CredentialSource, EnvCredential, Secret,
    DEFAULT_TOKEN_ENV,
};
pub use error::{PublishError, Result};
pub use publish::{
    publish, validate_for_publish, PluginCoordinates, PublishOptions, PublishRequest,
    PublishValidation,
};
