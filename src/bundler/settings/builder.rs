//! Builder for constructing Settings.

use super::{BuildContext, ConfigModel, DestinationRoot, PluginConfig, Settings};
use crate::bundler::error::{ConfigError, Context};
use crate::bundler::platform::ManifestFormat;

/// Builder for constructing [`Settings`].
///
/// All fatal configuration checks happen in [`SettingsBuilder::build`]:
/// required keys, plugin kind, version consistency, deployment target and
/// destination root. Nothing is staged or written before they pass.
///
/// # Examples
///
/// ```no_run
/// use kodegen_plugin_prepare::bundler::{BuildContext, ManifestFormat, SettingsBuilder};
///
/// # fn example(model: kodegen_plugin_prepare::bundler::ConfigModel) -> kodegen_plugin_prepare::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .config_model(model)
///     .context(BuildContext {
///         project_dir: "MyPlugin".into(),
///         deployment_target: Some("10.13".into()),
///         target_build_dir: Some("build/Release".into()),
///         resources_folder: Some("MyPlugin.vst3/Contents/Resources".into()),
///         ..Default::default()
///     })
///     .formats(vec![ManifestFormat::Vst3, ManifestFormat::AudioUnitV2])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    config_model: Option<ConfigModel>,
    context: BuildContext,
    formats: Option<Vec<ManifestFormat>>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the configuration model.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn config_model(mut self, model: ConfigModel) -> Self {
        self.config_model = Some(model);
        self
    }

    /// Sets the build context.
    ///
    /// The context must carry a deployment target.
    pub fn context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    /// Restricts generation to specific formats.
    ///
    /// Default: all six formats
    pub fn formats(mut self, formats: Vec<ManifestFormat>) -> Self {
        self.formats = Some(formats);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration model is missing or invalid, or
    /// if the build context lacks a deployment target or a destination root.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let Self {
            config_model,
            context,
            formats,
        } = self;

        let model = config_model.context("config_model is required")?;
        let plugin = PluginConfig::from_model(&model)?;

        let deployment_target = context
            .deployment_target
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingBuildContext {
                what: "DEPLOYMENT_TARGET (pass --deployment-target or a tooling root with common-mac.xcconfig)",
            })?;

        let destination_root = DestinationRoot::resolve(&plugin, &context)?;

        let mut formats = match formats {
            Some(formats) if !formats.is_empty() => formats,
            _ => ManifestFormat::ALL.to_vec(),
        };
        let mut seen = Vec::with_capacity(formats.len());
        formats.retain(|f| {
            let first = !seen.contains(f);
            seen.push(*f);
            first
        });

        log::debug!(
            "Settings for {} ({}): deployment target {}, destination {:?}",
            plugin.bundle_name,
            plugin.kind,
            deployment_target,
            destination_root
        );

        Ok(Settings::new(
            plugin,
            context,
            destination_root,
            deployment_target,
            formats,
        ))
    }
}
