//! Packaging formats and their manifest conventions.

pub mod macos;

use crate::bundler::settings::PluginConfig;
use std::fmt;

/// Packaging format a bundle manifest is generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ManifestFormat {
    /// VST3 plugin bundle
    Vst3,
    /// Legacy VST2 plugin bundle
    Vst2,
    /// Audio Unit v2 component
    #[value(name = "au")]
    AudioUnitV2,
    /// Audio Unit v3 app extension
    #[value(name = "auv3")]
    AudioUnitV3,
    /// AAX plugin bundle
    Aax,
    /// Standalone application
    App,
}

/// Minimum system version for AUv3 app extensions, regardless of deployment target.
pub const AUV3_MINIMUM_SYSTEM_VERSION: &str = "10.12.0";

impl ManifestFormat {
    /// All formats, in generation order.
    pub const ALL: [ManifestFormat; 6] = [
        Self::Vst3,
        Self::Vst2,
        Self::AudioUnitV2,
        Self::AudioUnitV3,
        Self::Aax,
        Self::App,
    ];

    /// Template file name suffix appended to the bundle name.
    pub fn template_suffix(self) -> &'static str {
        match self {
            Self::Vst3 => "-VST3-Info.plist",
            Self::Vst2 => "-VST2-Info.plist",
            Self::AudioUnitV2 => "-AU-Info.plist",
            Self::AudioUnitV3 => "-macOS-AUv3-Info.plist",
            Self::Aax => "-AAX-Info.plist",
            Self::App => "-macOS-Info.plist",
        }
    }

    /// `CFBundleIdentifier` for this format.
    ///
    /// `<domain>.<manufacturer>.<tag>.<name>`, except AUv3 which is
    /// identified as an extension of the app: `<domain>.<manufacturer>.app.<name>.AUv3`.
    pub fn bundle_identifier(self, plugin: &PluginConfig) -> String {
        let prefix = format!("{}.{}", plugin.bundle_domain, plugin.bundle_manufacturer);
        let name = &plugin.bundle_name;
        match self {
            Self::Vst3 => format!("{prefix}.vst3.{name}"),
            Self::Vst2 => format!("{prefix}.vst.{name}"),
            Self::AudioUnitV2 => format!("{prefix}.audiounit.{name}"),
            Self::AudioUnitV3 => format!("{prefix}.app.{name}.AUv3"),
            Self::Aax => format!("{prefix}.aax.{name}"),
            Self::App => format!("{prefix}.app.{name}"),
        }
    }

    /// `CFBundlePackageType`, if the format sets one.
    pub fn package_type(self) -> Option<&'static str> {
        match self {
            Self::Vst3 | Self::Vst2 | Self::AudioUnitV2 | Self::App => Some("BNDL"),
            Self::AudioUnitV3 => Some("XPC!"),
            Self::Aax => None,
        }
    }

    /// Whether `CFBundleSignature` is set to the plugin's unique id.
    pub fn sets_signature(self) -> bool {
        matches!(
            self,
            Self::Vst3 | Self::Vst2 | Self::AudioUnitV2 | Self::App
        )
    }

    /// Whether `CSResourcesFileMapped` is set.
    pub fn maps_resources(self) -> bool {
        !matches!(self, Self::AudioUnitV3)
    }

    /// `LSMinimumSystemVersion` for this format.
    pub fn minimum_system_version(self, deployment_target: &str) -> &str {
        match self {
            Self::AudioUnitV3 => AUV3_MINIMUM_SYSTEM_VERSION,
            _ => deployment_target,
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vst3 => "VST3",
            Self::Vst2 => "VST2",
            Self::AudioUnitV2 => "AUv2",
            Self::AudioUnitV3 => "AUv3",
            Self::Aax => "AAX",
            Self::App => "APP",
        })
    }
}
