//! Per-format Info.plist field rules.
//!
//! [`apply_manifest_fields`] overlays configuration-derived values onto a
//! template's dictionary. Keys are overwritten, never removed, so template
//! keys the rules do not cover survive and existing keys keep their position;
//! running twice with the same configuration yields the same bytes.

use super::component::{ComponentDescriptor, ComponentType};
use super::info_plist::InfoPlist;
use crate::bundler::error::ManifestError;
use crate::bundler::platform::ManifestFormat;
use crate::bundler::settings::{PluginConfig, Settings};
use plist::{Dictionary, Value};
use std::path::PathBuf;

/// Extension point for AUv3 extensions that provide a view controller.
pub const AUV3_UI_EXTENSION_POINT: &str = "com.apple.AudioUnit-UI";

/// Extension point for AUv3 extensions without UI.
pub const AUV3_EXTENSION_POINT: &str = "com.apple.AudioUnit";

/// Principal class of the standalone app.
pub const APP_PRINCIPAL_CLASS: &str = "SWELLApplication";

/// App Store category of the standalone app.
pub const APP_CATEGORY: &str = "public.app-category.music";

/// Microphone usage disclosure of the standalone app.
pub const APP_MICROPHONE_USAGE: &str = "This app needs mic access to process audio.";

/// Loads the format's template, applies its fields, and writes it back in place.
///
/// Returns the manifest path on success.
pub async fn generate_manifest(
    format: ManifestFormat,
    settings: &Settings,
    component_type: ComponentType,
) -> Result<PathBuf, ManifestError> {
    let path = settings.template_path(format);
    log::debug!("Loading {} template {}", format, path.display());

    let mut manifest = InfoPlist::load(&path).await?;
    apply_manifest_fields(
        format,
        manifest.dict_mut(),
        settings.plugin(),
        component_type,
        settings.deployment_target(),
    );
    manifest.save().await?;

    Ok(manifest.path().to_path_buf())
}

/// Overlays all fields for `format` onto `dict`.
pub fn apply_manifest_fields(
    format: ManifestFormat,
    dict: &mut Dictionary,
    plugin: &PluginConfig,
    component_type: ComponentType,
    deployment_target: &str,
) {
    apply_common_fields(format, dict, plugin, deployment_target);

    match format {
        ManifestFormat::AudioUnitV2 => {
            set(dict, "AudioUnit Version", plugin.version_hex.as_str());
            let descriptor = ComponentDescriptor::audio_unit_v2(plugin, component_type);
            set(
                dict,
                "AudioComponents",
                Value::Array(vec![Value::Dictionary(descriptor.to_dictionary())]),
            );
        }
        ManifestFormat::AudioUnitV3 => {
            set(dict, "NSExtension", Value::Dictionary(auv3_extension(plugin, component_type)));
        }
        ManifestFormat::App => {
            let name = &plugin.bundle_name;
            set(dict, "NSPrincipalClass", APP_PRINCIPAL_CLASS);
            set(dict, "NSMainNibFile", format!("{name}-macOS-MainMenu"));
            set(dict, "LSApplicationCategoryType", APP_CATEGORY);
            set(dict, "CFBundleIconFile", format!("{name}.icns"));
            set(dict, "NSMicrophoneUsageDescription", APP_MICROPHONE_USAGE);
        }
        ManifestFormat::Vst3 | ManifestFormat::Vst2 | ManifestFormat::Aax => {}
    }
}

fn apply_common_fields(
    format: ManifestFormat,
    dict: &mut Dictionary,
    plugin: &PluginConfig,
    deployment_target: &str,
) {
    set(dict, "CFBundleExecutable", plugin.bundle_name.as_str());
    set(dict, "CFBundleGetInfoString", plugin.info_string());
    set(dict, "CFBundleIdentifier", format.bundle_identifier(plugin));
    set(dict, "CFBundleName", plugin.bundle_name.as_str());
    set(dict, "CFBundleVersion", plugin.version.as_str());
    set(dict, "CFBundleShortVersionString", plugin.version.as_str());
    set(
        dict,
        "LSMinimumSystemVersion",
        format.minimum_system_version(deployment_target),
    );
    if let Some(package_type) = format.package_type() {
        set(dict, "CFBundlePackageType", package_type);
    }
    if format.sets_signature() {
        set(dict, "CFBundleSignature", plugin.unique_id.as_str());
    }
    if format.maps_resources() {
        set(dict, "CSResourcesFileMapped", true);
    }
}

/// The complete `NSExtension` record for an AUv3 extension.
fn auv3_extension(plugin: &PluginConfig, component_type: ComponentType) -> Dictionary {
    let descriptor = ComponentDescriptor::audio_unit_v3(plugin, component_type);

    let mut attributes = Dictionary::new();
    attributes.insert(
        "AudioComponentBundle".into(),
        Value::from(plugin.auv3_component_bundle.as_str()),
    );
    attributes.insert(
        "AudioComponents".into(),
        Value::Array(vec![Value::Dictionary(descriptor.to_dictionary())]),
    );

    let extension_point = if plugin.has_ui {
        AUV3_UI_EXTENSION_POINT
    } else {
        AUV3_EXTENSION_POINT
    };

    let mut extension = Dictionary::new();
    extension.insert("NSExtensionAttributes".into(), Value::Dictionary(attributes));
    extension.insert(
        "NSExtensionPointIdentifier".into(),
        Value::from(extension_point),
    );
    extension.insert(
        "NSExtensionPrincipalClass".into(),
        Value::from(plugin.auv3_view_controller.as_str()),
    );
    extension
}

fn set(dict: &mut Dictionary, key: &str, value: impl Into<Value>) {
    dict.insert(key.to_string(), value.into());
}
