//! Validated plugin configuration.

use super::model::{ConfigModel, ConfigValue};
use crate::bundler::error::ConfigError;
use std::fmt;

/// Packaging-format-agnostic plugin kind (`PLUG_TYPE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Audio effect (`0`)
    Effect,
    /// Instrument / synthesizer (`1`)
    Instrument,
    /// MIDI processor (`2`)
    MidiProcessor,
}

impl PluginKind {
    /// Parses a `PLUG_TYPE` value.
    ///
    /// Accepts the numeric project-header form (`0`, `1`, `2`) and the
    /// spelled-out names. Anything else is a fatal configuration error.
    pub fn from_config(value: &ConfigValue) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Integer(0) => Ok(Self::Effect),
            ConfigValue::Integer(1) => Ok(Self::Instrument),
            ConfigValue::Integer(2) => Ok(Self::MidiProcessor),
            ConfigValue::String(s) => match s.to_ascii_lowercase().as_str() {
                "effect" => Ok(Self::Effect),
                "instrument" => Ok(Self::Instrument),
                "midi-processor" | "midi_processor" | "midiprocessor" => Ok(Self::MidiProcessor),
                _ => Err(ConfigError::UnknownPluginKind {
                    value: format!("{s:?}"),
                }),
            },
            ConfigValue::Integer(i) => Err(ConfigError::UnknownPluginKind {
                value: i.to_string(),
            }),
            ConfigValue::Boolean(b) => Err(ConfigError::UnknownPluginKind {
                value: b.to_string(),
            }),
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Effect => "effect",
            Self::Instrument => "instrument",
            Self::MidiProcessor => "midi-processor",
        })
    }
}

/// Typed, validated view of the configuration model.
///
/// Construction checks every required key, so code holding a `PluginConfig`
/// never deals with missing or mistyped parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginConfig {
    /// `BUNDLE_NAME`: bundle and executable name
    pub bundle_name: String,
    /// `FULL_VER_STR`
    pub version: String,
    /// `PLUG_COPYRIGHT_STR`
    pub copyright: String,
    /// `BUNDLE_DOMAIN`: reverse-domain identifier prefix
    pub bundle_domain: String,
    /// `BUNDLE_MFR`: manufacturer short code used in identifiers
    pub bundle_manufacturer: String,
    /// `PLUG_UNIQUE_ID`: four-character plugin code
    pub unique_id: String,
    /// `PLUG_MFR_ID`: four-character manufacturer code
    pub manufacturer_id: String,
    /// `PLUG_NAME`
    pub plugin_name: String,
    /// `PLUG_MFR`: manufacturer display name
    pub manufacturer_name: String,
    /// `PLUG_TYPE`
    pub kind: PluginKind,
    /// `PLUG_DOES_MIDI_IN`
    pub does_midi_in: bool,
    /// `PLUG_HAS_UI`
    pub has_ui: bool,
    /// `PLUG_SHARED_RESOURCES`
    pub shared_resources: bool,
    /// `AUV2_FACTORY`
    pub auv2_factory: String,
    /// `PLUG_VERSION_HEX`, normalized to `0x%08X`
    pub version_hex: String,
    /// `PLUG_VERSION_INT`
    pub version_int: i64,
    /// `AUV3_VIEW_CONTROLLER`
    pub auv3_view_controller: String,
    /// `AUV3_COMPONENT_BUNDLE`
    pub auv3_component_bundle: String,
}

impl PluginConfig {
    /// Validates the model and builds the typed configuration.
    pub fn from_model(model: &ConfigModel) -> Result<Self, ConfigError> {
        let bundle_name = model.require_str("BUNDLE_NAME")?.to_string();
        let version = model.require_str("FULL_VER_STR")?.to_string();
        let bundle_domain = model.require_str("BUNDLE_DOMAIN")?.to_string();
        let bundle_manufacturer = model.require_str("BUNDLE_MFR")?.to_string();

        let kind = PluginKind::from_config(
            model
                .get("PLUG_TYPE")
                .ok_or(ConfigError::MissingKey { key: "PLUG_TYPE" })?,
        )?;

        let (version_hex, version_int) = numeric_version(model, &version)?;

        let auv3_view_controller = match model.optional_str("AUV3_VIEW_CONTROLLER")? {
            Some(class) => class.to_string(),
            None => format!("IPlugAUViewController_v{bundle_name}"),
        };
        let auv3_component_bundle = match model.optional_str("AUV3_COMPONENT_BUNDLE")? {
            Some(id) => id.to_string(),
            None => format!("{bundle_domain}.{bundle_manufacturer}.app.{bundle_name}.AUv3Framework"),
        };

        Ok(Self {
            copyright: model.require_str("PLUG_COPYRIGHT_STR")?.to_string(),
            unique_id: four_char_code(model, "PLUG_UNIQUE_ID")?,
            manufacturer_id: four_char_code(model, "PLUG_MFR_ID")?,
            plugin_name: model.require_str("PLUG_NAME")?.to_string(),
            manufacturer_name: model.require_str("PLUG_MFR")?.to_string(),
            kind,
            does_midi_in: model.require_bool("PLUG_DOES_MIDI_IN")?,
            has_ui: model.require_bool("PLUG_HAS_UI")?,
            shared_resources: model.require_bool("PLUG_SHARED_RESOURCES")?,
            auv2_factory: model.require_str("AUV2_FACTORY")?.to_string(),
            version_hex,
            version_int,
            auv3_view_controller,
            auv3_component_bundle,
            bundle_name,
            version,
            bundle_domain,
            bundle_manufacturer,
        })
    }

    /// `"<name> v<version> <copyright>"`, the bundle's info string.
    pub fn info_string(&self) -> String {
        format!("{} v{} {}", self.bundle_name, self.version, self.copyright)
    }

    /// `"<manufacturer>: <plugin>"`, the audio component display name.
    pub fn component_name(&self) -> String {
        format!("{}: {}", self.manufacturer_name, self.plugin_name)
    }
}

fn four_char_code(model: &ConfigModel, key: &'static str) -> Result<String, ConfigError> {
    let value = model.require_str(key)?;
    if value.len() == 4 && value.is_ascii() {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidFourCharCode {
            key,
            value: value.to_string(),
        })
    }
}

/// Resolves the hex and integer forms of the numeric version.
///
/// The hex form is required. The integer form may be omitted and is then
/// derived from it.
fn numeric_version(model: &ConfigModel, version: &str) -> Result<(String, i64), ConfigError> {
    let hex = match model.get("PLUG_VERSION_HEX") {
        Some(ConfigValue::String(s)) => parse_hex(s)?,
        Some(ConfigValue::Integer(i)) if *i >= 0 => *i,
        Some(ConfigValue::Integer(i)) => {
            return Err(ConfigError::InvalidVersion {
                key: "PLUG_VERSION_HEX",
                value: i.to_string(),
            });
        }
        Some(other) => {
            return Err(ConfigError::WrongType {
                key: "PLUG_VERSION_HEX",
                expected: "a hex string or an integer",
                found: other.type_name(),
            });
        }
        None => return Err(ConfigError::MissingKey { key: "PLUG_VERSION_HEX" }),
    };

    if let Some(int) = model.optional_int("PLUG_VERSION_INT")?
        && int != hex
    {
        return Err(ConfigError::InconsistentVersion {
            hex: format!("{hex:#010X}"),
            int,
        });
    }

    if let Err(e) = semver::Version::parse(version) {
        log::warn!("FULL_VER_STR {version:?} is not a semantic version: {e}");
    }

    Ok((format!("0x{hex:08X}"), hex))
}

fn parse_hex(s: &str) -> Result<i64, ConfigError> {
    let digits = s
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    i64::from_str_radix(digits, 16)
        .ok()
        .filter(|v| *v >= 0)
        .ok_or_else(|| ConfigError::InvalidVersion {
            key: "PLUG_VERSION_HEX",
            value: s.to_string(),
        })
}
