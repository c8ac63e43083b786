//! Publisher backend trait and local staging implementation.
//!
//! The `Publisher` trait is the seam to the external upload step. The
//! `StagingPublisher` writes requests to the filesystem, where a separate
//! upload job (or a test) can pick them up.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::credential::CredentialRef;
use crate::error::{PublishError, Result};
use crate::publish::{PluginCoordinates, PublishRequest};

/// Abstract publishing backend.
pub trait Publisher {
    /// Hand a validated request to the backend. The credential is revealed
    /// here and nowhere earlier.
    fn publish(&self, request: &PublishRequest, credential: &CredentialRef) -> Result<()>;

    /// Whether this plugin version has already been published.
    fn is_published(&self, coordinates: &PluginCoordinates) -> Result<bool>;
}

/// A local staging directory.
///
/// Layout:
/// ```text
/// <root>/
///   <plugin-name>/
///     <plugin-version>/
///       publish.json
/// ```
pub struct StagingPublisher {
    root: PathBuf,
}

impl StagingPublisher {
    /// File written for each staged request.
    pub const REQUEST_FILE: &'static str = "publish.json";

    /// Create a staging publisher rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        StagingPublisher { root }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn request_dir(&self, coordinates: &PluginCoordinates) -> Result<PathBuf> {
        for part in [&coordinates.name, &coordinates.version] {
            let unusable = part.is_empty()
                || part == "."
                || part == ".."
                || part.contains(|c: char| c == '/' || c == '\\');
            if unusable {
                return Err(PublishError::Staging {
                    path: self.root.clone(),
                    detail: format!("'{part}' is not usable as a directory name"),
                });
            }
        }
        Ok(self.root.join(&coordinates.name).join(&coordinates.version))
    }
}

impl Publisher for StagingPublisher {
    fn publish(&self, request: &PublishRequest, credential: &CredentialRef) -> Result<()> {
        if credential.reveal().is_none() {
            return Err(PublishError::MissingCredential {
                source_desc: credential.to_string(),
            });
        }

        let json = serde_json::to_string_pretty(request)?;
        let dir = self.request_dir(&request.coordinates)?;
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(Self::REQUEST_FILE);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(PublishError::AlreadyStaged {
                    name: request.coordinates.name.clone(),
                    version: request.coordinates.version.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        // A partial file would read as "already staged" from then on.
        let written = file.write_all(json.as_bytes()).and_then(|()| file.sync_all());
        drop(file);
        if let Err(e) = written {
            let _ = std::fs::remove_file(&path);
            return Err(e.into());
        }
        debug!(path = %path.display(), "staged publish request");
        Ok(())
    }

    fn is_published(&self, coordinates: &PluginCoordinates) -> Result<bool> {
        Ok(self.request_dir(coordinates)?.join(Self::REQUEST_FILE).is_file())
    }
}
