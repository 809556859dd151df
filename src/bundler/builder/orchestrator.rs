//! Main preparation orchestration.
//!
//! This module provides the [`Preparer`] that stages auxiliary resources and
//! then writes every requested manifest.

use super::report::{ManifestOutcome, PrepareReport, ResourceOutcome};
use crate::bundler::{
    Settings,
    error::ResourceIssue,
    platform::macos::{generate_manifest, resolve_component_type},
    resources::{self, Resolution, ResourceKind, ResourceSet},
    utils::fs,
};

/// Main preparation orchestrator.
///
/// Configuration has been validated by the time a [`Preparer`] exists, so a
/// run never aborts part way: each resource kind and each manifest format
/// succeeds or fails on its own and the outcome lands in the [`PrepareReport`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_plugin_prepare::bundler::{Preparer, Settings};
///
/// # async fn example(settings: Settings) {
/// let report = Preparer::new(settings).prepare().await;
/// report.log_summary();
/// std::process::exit(report.exit_code());
/// # }
/// ```
#[derive(Debug)]
pub struct Preparer {
    settings: Settings,
}

impl Preparer {
    /// Creates a new preparer with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Stages resources, then writes the manifests.
    pub async fn prepare(&self) -> PrepareReport {
        let mut report = PrepareReport {
            require_web_assets: self.settings.context().require_web_assets,
            ..Default::default()
        };

        let destination = self.settings.destination_root().path();
        log::info!("Staging resources into {}", destination.display());
        if let Err(e) = fs::create_dir_all(destination, false).await {
            // Each kind still gets its own attempt and its own issue.
            log::error!("{}", e);
        }

        for set in resources::plan_resources(&self.settings) {
            report.resources.push(self.stage_set(set).await);
        }

        let plugin = self.settings.plugin();
        let component_type = resolve_component_type(plugin.kind, plugin.does_midi_in);
        log::debug!("Audio Unit component type: {} ({})", component_type, component_type.code());

        for &format in self.settings.formats() {
            let result = generate_manifest(format, &self.settings, component_type).await;
            match &result {
                Ok(path) => log::info!("Wrote {} manifest {}", format, path.display()),
                Err(e) => log::error!("{} manifest failed: {}", format, e),
            }
            report.manifests.push(ManifestOutcome { format, result });
        }

        report
    }

    async fn stage_set(&self, set: ResourceSet) -> ResourceOutcome {
        let ResourceSet {
            kind,
            candidates,
            destinations,
        } = set;

        let (source, rank) = match resources::resolve(&candidates) {
            Resolution::Found { path, rank } => (path, rank),
            Resolution::NotFound => {
                let issue = ResourceIssue::NotFound {
                    kind,
                    searched: candidates.len(),
                };
                if kind == ResourceKind::Web {
                    log::error!("{}", issue);
                    for candidate in &candidates {
                        log::error!("  searched {}", candidate.display());
                    }
                } else {
                    log::warn!("{}, skipping", issue);
                }
                return ResourceOutcome {
                    kind,
                    source: None,
                    files_copied: 0,
                    issues: vec![issue],
                };
            }
        };

        if kind == ResourceKind::Web && rank > 0 {
            if let Some(requested) = &self.settings.context().web_override {
                log::warn!(
                    "Web build directory {} not found, using {}",
                    requested.display(),
                    source.display()
                );
            }
        }

        log::info!("Staging {} from {}", kind, source.display());
        let staged = resources::stage(kind, &source, &destinations).await;

        ResourceOutcome {
            kind,
            source: Some(source),
            files_copied: staged.files_copied,
            issues: staged.issues,
        }
    }
}
