//! Command line argument parsing and validation.
//!
//! Every build-context value has an environment fallback so the tool can be
//! invoked from an Xcode build phase with no flags at all.

use crate::bundler::{BuildContext, ConfigError, ManifestFormat};
use crate::metadata::{CONFIG_FILE_NAME, tooling_root_path, xcconfig_deployment_target};
use clap::Parser;
use std::path::PathBuf;

/// Plugin manifest generator and resource stager
#[derive(Parser, Debug)]
#[command(
    name = "prepare_resources",
    version,
    about = "Generates plugin Info.plist manifests and stages plugin resources",
    long_about = "Rewrites the VST3, VST2, AUv2, AUv3, AAX and standalone app Info.plist templates
under <project>/resources from the project's configuration, then stages images, fonts and the
web UI bundle into the bundle's resources folder (or ~/Music/<name>/Resources for plugins with
shared resources).

Usage:
  prepare_resources --project MyPlugin --deployment-target 10.13 \\
      --target-build-dir build/Release --resources-folder MyPlugin.vst3/Contents/Resources
  prepare_resources --format vst3 --format au

Exit code 0 = every requested manifest was written."
)]
pub struct Args {
    /// Plugin project directory (holds `resources/`)
    #[arg(short = 'p', long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Configuration file [default: <project>/config.toml]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shared tooling root containing common-mac.xcconfig
    #[arg(long, value_name = "DIR", env = "IPLUG2_ROOT")]
    pub tooling_root: Option<String>,

    /// Minimum macOS version, overrides common-mac.xcconfig
    #[arg(long, value_name = "VERSION", env = "DEPLOYMENT_TARGET")]
    pub deployment_target: Option<String>,

    /// Build products directory
    #[arg(long, value_name = "DIR", env = "TARGET_BUILD_DIR")]
    pub target_build_dir: Option<String>,

    /// Resources folder inside the built bundle, relative to the build products directory
    #[arg(long, value_name = "PATH", env = "UNLOCALIZED_RESOURCES_FOLDER_PATH")]
    pub resources_folder: Option<String>,

    /// Web UI build directory, searched before any fallback
    #[arg(long, value_name = "DIR", env = "REACT_WEB_BUILD_DIR")]
    pub web_build_dir: Option<String>,

    /// Additional web UI build directory to search, in order (repeatable)
    #[arg(long = "web-fallback", value_name = "DIR")]
    pub web_fallbacks: Vec<String>,

    /// Fail the run when no web UI bundle is found
    #[arg(long)]
    pub require_web_assets: bool,

    /// Manifest format to generate (repeatable) [default: all]
    #[arg(short = 'f', long = "format", value_name = "FORMAT", value_enum)]
    pub formats: Vec<ManifestFormat>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.project.as_os_str().is_empty() {
            return Err("Project directory cannot be empty".to_string());
        }
        if !self.project.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project.display()
            ));
        }
        if let Some(config) = &self.config
            && config.as_os_str().is_empty()
        {
            return Err("Configuration path cannot be empty".to_string());
        }

        Ok(())
    }

    /// Configuration file to load.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.project.join(CONFIG_FILE_NAME))
    }

    /// Build context from flags and environment.
    ///
    /// Empty values, as build systems often export, count as unset.
    pub fn build_context(&self) -> BuildContext {
        BuildContext {
            project_dir: self.project.clone(),
            deployment_target: non_empty(self.deployment_target.as_deref()).map(str::to_string),
            target_build_dir: non_empty(self.target_build_dir.as_deref()).map(PathBuf::from),
            resources_folder: non_empty(self.resources_folder.as_deref()).map(str::to_string),
            web_override: non_empty(self.web_build_dir.as_deref()).map(PathBuf::from),
            web_fallbacks: self
                .web_fallbacks
                .iter()
                .filter_map(|p| non_empty(Some(p.as_str())))
                .map(PathBuf::from)
                .collect(),
            require_web_assets: self.require_web_assets,
            home_dir: dirs::home_dir(),
        }
    }

    /// Shared tooling root, with xcconfig-style escaped spaces resolved.
    pub fn tooling_root(&self) -> Option<PathBuf> {
        non_empty(self.tooling_root.as_deref()).map(tooling_root_path)
    }

    /// Build context with the deployment target filled in from the tooling
    /// root's xcconfig when no flag or environment value provides one.
    pub async fn resolve_context(&self) -> Result<BuildContext, ConfigError> {
        let mut context = self.build_context();
        if context.deployment_target.is_none()
            && let Some(root) = self.tooling_root()
        {
            log::debug!("Reading DEPLOYMENT_TARGET from {}", root.display());
            context.deployment_target = xcconfig_deployment_target(&root).await?;
        }
        Ok(context)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
