//! Publishing workflow.
//!
//! Validates a publishable spec against the plugin's coordinates, builds
//! the request handed to the publishing backend, and honours dry runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use plugspec_resolve::{render_idea_version, ResolvedBuildSpec};

use crate::binding::PublishableSpec;
use crate::client::Publisher;
use crate::error::{PublishError, Result};

/// Identity of the plugin artifact being published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginCoordinates {
    pub group: String,
    pub name: String,
    pub version: String,
}

/// Options for the publish operation.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Perform all validation but don't hand off to the backend.
    pub dry_run: bool,
    /// Release channel. `None` is the default channel.
    pub channel: Option<String>,
}

/// Validation result from pre-publish checks.
#[derive(Debug, Clone)]
pub struct PublishValidation {
    /// Warnings (non-fatal unless `ready` is false).
    pub warnings: Vec<String>,
    /// Whether the plugin is ready to publish.
    pub ready: bool,
}

/// What the publishing backend receives. Holds no secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishRequest {
    pub coordinates: PluginCoordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub spec: ResolvedBuildSpec,
    /// `<idea-version>` element for the plugin descriptor.
    pub descriptor: String,
    /// Where the credential will be read from.
    pub credential: String,
}

/// Validate a plugin for publishing.
pub fn validate_for_publish(
    coordinates: &PluginCoordinates,
    publishable: &PublishableSpec,
    options: &PublishOptions,
) -> PublishValidation {
    let mut warnings = Vec::new();
    let mut ready = true;

    if coordinates.name.trim().is_empty() {
        warnings.push("plugin.name is required".to_string());
        ready = false;
    }

    if coordinates.version.trim().is_empty() {
        warnings.push("plugin.version is required".to_string());
        ready = false;
    }

    if coordinates.group.trim().is_empty() {
        warnings.push("plugin.group is recommended".to_string());
    }

    if options
        .channel
        .as_deref()
        .is_some_and(|channel| channel.trim().is_empty())
    {
        warnings.push("publish channel must not be blank".to_string());
        ready = false;
    }

    let range = publishable.spec().range();
    if let Some(until) = range.until.as_bound() {
        if !range.until_is_well_formed() {
            warnings.push(format!(
                "until-build '{until}' is not of the form BRANCH, BRANCH.* or BRANCH.BUILD"
            ));
            ready = false;
        } else if !range.admits_any() {
            warnings.push(format!(
                "until-build '{until}' precedes since-build {}; no host build is admitted",
                range.since
            ));
            ready = false;
        } else {
            warnings.push(format!(
                "until-build '{until}' is fixed; newer host branches will reject the plugin"
            ));
        }
    }

    PublishValidation { warnings, ready }
}

/// Validate and publish through `publisher`.
///
/// Returns the request that was (or, on a dry run, would have been) handed
/// to the backend.
pub fn publish(
    coordinates: &PluginCoordinates,
    publishable: &PublishableSpec,
    publisher: &dyn Publisher,
    options: &PublishOptions,
) -> Result<PublishRequest> {
    let validation = validate_for_publish(coordinates, publishable, options);
    if !validation.ready {
        return Err(PublishError::NotReady {
            detail: validation.warnings.join("; "),
        });
    }
    for warning in &validation.warnings {
        debug!(plugin = %coordinates.name, "{warning}");
    }

    let request = PublishRequest {
        coordinates: coordinates.clone(),
        channel: options.channel.clone(),
        spec: publishable.spec().clone(),
        descriptor: render_idea_version(publishable.spec().range()),
        credential: publishable.credential().to_string(),
    };

    if publisher.is_published(coordinates)? {
        return Err(PublishError::AlreadyStaged {
            name: coordinates.name.clone(),
            version: coordinates.version.clone(),
        });
    }

    if options.dry_run {
        debug!(plugin = %coordinates.name, "dry run; not publishing");
        return Ok(request);
    }

    publisher.publish(&request, publishable.credential())?;
    Ok(request)
}
