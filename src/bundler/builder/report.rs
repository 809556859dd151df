//! Outcome of one preparation run.

use crate::bundler::error::{ManifestError, ResourceIssue};
use crate::bundler::platform::ManifestFormat;
use crate::bundler::resources::ResourceKind;
use std::path::PathBuf;

/// What happened to one resource kind.
#[derive(Debug)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,
    /// The candidate that was used, if any existed.
    pub source: Option<PathBuf>,
    /// Files copied across all destinations.
    pub files_copied: usize,
    pub issues: Vec<ResourceIssue>,
}

impl ResourceOutcome {
    /// Whether no source directory was found for this kind.
    pub fn is_missing(&self) -> bool {
        self.source.is_none()
    }
}

/// What happened to one manifest.
#[derive(Debug)]
pub struct ManifestOutcome {
    pub format: ManifestFormat,
    /// Path of the written manifest, or why it could not be written.
    pub result: Result<PathBuf, ManifestError>,
}

/// Outcome of a whole run, one entry per resource kind and manifest format.
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub resources: Vec<ResourceOutcome>,
    pub manifests: Vec<ManifestOutcome>,
    /// Whether a missing web bundle counts as a failure.
    pub require_web_assets: bool,
}

impl PrepareReport {
    /// Manifests that failed, with their errors.
    pub fn failed_manifests(&self) -> impl Iterator<Item = (ManifestFormat, &ManifestError)> {
        self.manifests
            .iter()
            .filter_map(|m| m.result.as_ref().err().map(|e| (m.format, e)))
    }

    /// Paths of the manifests that were written.
    pub fn written_manifests(&self) -> impl Iterator<Item = &PathBuf> {
        self.manifests.iter().filter_map(|m| m.result.as_ref().ok())
    }

    /// Resource outcome for `kind`, if it was staged this run.
    pub fn resource(&self, kind: ResourceKind) -> Option<&ResourceOutcome> {
        self.resources.iter().find(|r| r.kind == kind)
    }

    /// Whether the run succeeded.
    ///
    /// Resource problems never fail a run, except a missing web bundle when
    /// web assets are required. Any manifest failure does.
    pub fn is_success(&self) -> bool {
        let web_missing = self
            .resource(ResourceKind::Web)
            .is_some_and(ResourceOutcome::is_missing);

        self.failed_manifests().next().is_none() && !(self.require_web_assets && web_missing)
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Logs a one-line summary of the run.
    pub fn log_summary(&self) {
        let written = self.written_manifests().count();
        let issues: usize = self.resources.iter().map(|r| r.issues.len()).sum();

        if self.is_success() {
            log::info!(
                "Prepared {}/{} manifest(s) with {} resource issue(s)",
                written,
                self.manifests.len(),
                issues
            );
        } else {
            log::error!(
                "Preparation failed: {}/{} manifest(s) written, {} resource issue(s)",
                written,
                self.manifests.len(),
                issues
            );
        }
    }
}
