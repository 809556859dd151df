//! Core Settings struct and implementations.

use super::{BuildContext, DestinationRoot, PluginConfig};
use crate::bundler::platform::ManifestFormat;
use std::path::PathBuf;

/// Main settings for a preparation run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which validates
/// the configuration model and resolves the destination root, so a `Settings`
/// value is always complete.
///
/// # Examples
///
/// ```no_run
/// use kodegen_plugin_prepare::bundler::{BuildContext, SettingsBuilder};
///
/// # async fn example() -> kodegen_plugin_prepare::bundler::Result<()> {
/// let model = kodegen_plugin_prepare::metadata::load_config_model("MyPlugin/config.toml".as_ref()).await?;
/// let settings = SettingsBuilder::new()
///     .config_model(model)
///     .context(BuildContext {
///         project_dir: "MyPlugin".into(),
///         deployment_target: Some("10.13".into()),
///         home_dir: Some("/Users/me".into()),
///         ..Default::default()
///     })
///     .build()?;
/// println!("staging into {}", settings.destination_root().path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Validated plugin configuration.
    plugin: PluginConfig,

    /// Build system context.
    context: BuildContext,

    /// Where resources are staged.
    destination_root: DestinationRoot,

    /// Minimum system version written to the manifests.
    deployment_target: String,

    /// Manifest formats to generate.
    formats: Vec<ManifestFormat>,
}

impl Settings {
    /// Returns the plugin configuration.
    pub fn plugin(&self) -> &PluginConfig {
        &self.plugin
    }

    /// Returns the build context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Returns the bundle name.
    pub fn bundle_name(&self) -> &str {
        &self.plugin.bundle_name
    }

    /// Returns the resolved destination root.
    pub fn destination_root(&self) -> &DestinationRoot {
        &self.destination_root
    }

    /// Returns the deployment target (`LSMinimumSystemVersion`).
    pub fn deployment_target(&self) -> &str {
        &self.deployment_target
    }

    /// Returns the formats to generate, in generation order.
    pub fn formats(&self) -> &[ManifestFormat] {
        &self.formats
    }

    /// Returns the template path for `format`.
    ///
    /// Templates live at `<project>/resources/<BUNDLE_NAME><suffix>` and are
    /// rewritten in place.
    pub fn template_path(&self, format: ManifestFormat) -> PathBuf {
        self.context.project_resources().join(format!(
            "{}{}",
            self.plugin.bundle_name,
            format.template_suffix()
        ))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        plugin: PluginConfig,
        context: BuildContext,
        destination_root: DestinationRoot,
        deployment_target: String,
        formats: Vec<ManifestFormat>,
    ) -> Self {
        Self {
            plugin,
            context,
            destination_root,
            deployment_target,
            formats,
        }
    }
}
