//! Build context supplied by the invoking build system.

use super::PluginConfig;
use crate::bundler::error::ConfigError;
use std::path::{Path, PathBuf};

/// Per-user folder that holds shared plugin resources (`~/Music/<bundle>/Resources`).
pub const SHARED_RESOURCES_ROOT: &str = "Music";

/// Environment-provided context for one run.
///
/// Every field comes from the build system (CLI flags or their environment
/// variables); nothing here has a machine-specific default.
#[derive(Clone, Debug, Default)]
pub struct BuildContext {
    /// Plugin project root (holds `resources/`).
    pub project_dir: PathBuf,

    /// Minimum macOS version for the bundle manifests.
    pub deployment_target: Option<String>,

    /// `TARGET_BUILD_DIR`: build products directory.
    pub target_build_dir: Option<PathBuf>,

    /// `UNLOCALIZED_RESOURCES_FOLDER_PATH`: resources folder inside the built bundle.
    pub resources_folder: Option<String>,

    /// Explicit web UI build directory, searched first.
    pub web_override: Option<PathBuf>,

    /// Further web UI candidates, searched in order after the override.
    pub web_fallbacks: Vec<PathBuf>,

    /// Whether a missing web UI bundle fails the run.
    pub require_web_assets: bool,

    /// Home directory, used in shared-resource mode.
    pub home_dir: Option<PathBuf>,
}

impl BuildContext {
    /// The project's `resources/` directory.
    pub fn project_resources(&self) -> PathBuf {
        self.project_dir.join("resources")
    }

    /// Ordered web UI candidates: override, configured fallbacks, in-project default.
    pub fn web_candidates(&self) -> Vec<PathBuf> {
        self.web_override
            .iter()
            .chain(self.web_fallbacks.iter())
            .cloned()
            .chain(std::iter::once(self.project_resources().join("web")))
            .collect()
    }
}

/// Where resources are staged for this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DestinationRoot {
    /// Per-user shared location, keyed by bundle name.
    Shared(PathBuf),
    /// Resources folder of the bundle being built.
    Staging(PathBuf),
}

impl DestinationRoot {
    /// Picks the destination from the shared-resource flag.
    pub fn resolve(plugin: &PluginConfig, context: &BuildContext) -> Result<Self, ConfigError> {
        if plugin.shared_resources {
            let home = context
                .home_dir
                .as_ref()
                .ok_or(ConfigError::MissingBuildContext {
                    what: "a home directory for shared resources",
                })?;
            return Ok(Self::Shared(
                home.join(SHARED_RESOURCES_ROOT)
                    .join(&plugin.bundle_name)
                    .join("Resources"),
            ));
        }

        let build_dir = context
            .target_build_dir
            .as_ref()
            .ok_or(ConfigError::MissingBuildContext {
                what: "TARGET_BUILD_DIR",
            })?;
        let folder = context
            .resources_folder
            .as_deref()
            .ok_or(ConfigError::MissingBuildContext {
                what: "UNLOCALIZED_RESOURCES_FOLDER_PATH",
            })?;

        Ok(Self::Staging(build_dir.join(folder.trim_start_matches('/'))))
    }

    /// The destination directory.
    pub fn path(&self) -> &Path {
        match self {
            Self::Shared(path) | Self::Staging(path) => path,
        }
    }
}
