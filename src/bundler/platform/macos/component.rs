//! Audio component type resolution and `AudioComponents` descriptors.

use crate::bundler::settings::{PluginConfig, PluginKind};
use plist::{Dictionary, Value};
use std::fmt;

/// Audio Unit component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// `aufx`
    Effect,
    /// `aumf`: effect that also receives MIDI
    MusicEffect,
    /// `aumu`: instrument
    MusicDevice,
    /// `aumi`
    MidiProcessor,
}

impl ComponentType {
    /// Four-character type code written to the manifest.
    pub fn code(self) -> &'static str {
        match self {
            Self::Effect => "aufx",
            Self::MusicEffect => "aumf",
            Self::MusicDevice => "aumu",
            Self::MidiProcessor => "aumi",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Effect => "effect",
            Self::MusicEffect => "music-effect",
            Self::MusicDevice => "music-device",
            Self::MidiProcessor => "midi-processor",
        })
    }
}

/// Maps plugin kind and MIDI input support to the component type.
///
/// Only effects depend on MIDI input: with it they become music effects.
pub fn resolve_component_type(kind: PluginKind, does_midi_in: bool) -> ComponentType {
    match (kind, does_midi_in) {
        (PluginKind::Effect, false) => ComponentType::Effect,
        (PluginKind::Effect, true) => ComponentType::MusicEffect,
        (PluginKind::Instrument, _) => ComponentType::MusicDevice,
        (PluginKind::MidiProcessor, _) => ComponentType::MidiProcessor,
    }
}

/// Category tag for AUv3 components.
pub fn component_tag(kind: PluginKind) -> &'static str {
    match kind {
        PluginKind::Instrument => "Synth",
        PluginKind::Effect | PluginKind::MidiProcessor => "Effects",
    }
}

/// One entry of an `AudioComponents` array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub description: String,
    pub factory_function: Option<String>,
    pub manufacturer: String,
    pub name: String,
    pub subtype: String,
    pub component_type: ComponentType,
    pub version: i64,
    pub sandbox_safe: bool,
    pub tags: Vec<String>,
}

impl ComponentDescriptor {
    /// Descriptor for an AUv2 component (with factory function, no tags).
    pub fn audio_unit_v2(plugin: &PluginConfig, component_type: ComponentType) -> Self {
        Self {
            factory_function: Some(plugin.auv2_factory.clone()),
            tags: Vec::new(),
            ..Self::base(plugin, component_type)
        }
    }

    /// Descriptor for an AUv3 extension (no factory function, one category tag).
    pub fn audio_unit_v3(plugin: &PluginConfig, component_type: ComponentType) -> Self {
        Self {
            factory_function: None,
            tags: vec![component_tag(plugin.kind).to_string()],
            ..Self::base(plugin, component_type)
        }
    }

    fn base(plugin: &PluginConfig, component_type: ComponentType) -> Self {
        Self {
            description: plugin.plugin_name.clone(),
            factory_function: None,
            manufacturer: plugin.manufacturer_id.clone(),
            name: plugin.component_name(),
            subtype: plugin.unique_id.clone(),
            component_type,
            version: plugin.version_int,
            sandbox_safe: true,
            tags: Vec::new(),
        }
    }

    /// Property list dictionary for this descriptor.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("description".into(), Value::from(self.description.as_str()));
        if let Some(factory) = &self.factory_function {
            dict.insert("factoryFunction".into(), Value::from(factory.as_str()));
        }
        dict.insert("manufacturer".into(), Value::from(self.manufacturer.as_str()));
        dict.insert("name".into(), Value::from(self.name.as_str()));
        dict.insert("subtype".into(), Value::from(self.subtype.as_str()));
        dict.insert("type".into(), Value::from(self.component_type.code()));
        dict.insert("version".into(), Value::from(self.version));
        dict.insert("sandboxSafe".into(), Value::Boolean(self.sandbox_safe));
        if !self.tags.is_empty() {
            dict.insert(
                "tags".into(),
                Value::Array(self.tags.iter().map(|t| Value::from(t.as_str())).collect()),
            );
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::sample_model;

    #[test]
    fn component_type_table() {
        use PluginKind::*;

        assert_eq!(resolve_component_type(Effect, false), ComponentType::Effect);
        assert_eq!(resolve_component_type(Effect, true), ComponentType::MusicEffect);
        for midi in [false, true] {
            assert_eq!(resolve_component_type(Instrument, midi), ComponentType::MusicDevice);
            assert_eq!(
                resolve_component_type(MidiProcessor, midi),
                ComponentType::MidiProcessor
            );
        }
    }

    #[test]
    fn type_codes() {
        assert_eq!(ComponentType::Effect.code(), "aufx");
        assert_eq!(ComponentType::MusicEffect.code(), "aumf");
        assert_eq!(ComponentType::MusicDevice.code(), "aumu");
        assert_eq!(ComponentType::MidiProcessor.code(), "aumi");
    }

    #[test]
    fn auv2_descriptor_fields() {
        let plugin = PluginConfig::from_model(&sample_model()).unwrap();
        let dict = ComponentDescriptor::audio_unit_v2(&plugin, ComponentType::Effect).to_dictionary();

        assert_eq!(dict.get("description").and_then(Value::as_string), Some("Foo"));
        assert_eq!(
            dict.get("factoryFunction").and_then(Value::as_string),
            Some("FooAUFactory")
        );
        assert_eq!(dict.get("manufacturer").and_then(Value::as_string), Some("Acme"));
        assert_eq!(dict.get("name").and_then(Value::as_string), Some("Acme Audio: Foo"));
        assert_eq!(dict.get("subtype").and_then(Value::as_string), Some("Fooo"));
        assert_eq!(dict.get("type").and_then(Value::as_string), Some("aufx"));
        assert_eq!(
            dict.get("version").and_then(Value::as_signed_integer),
            Some(66051)
        );
        assert_eq!(dict.get("sandboxSafe").and_then(Value::as_boolean), Some(true));
        assert!(dict.get("tags").is_none());
    }

    #[test]
    fn auv3_descriptor_is_tagged_by_kind() {
        let synth = PluginConfig::from_model(&sample_model().with("PLUG_TYPE", 1_i64.into())).unwrap();
        let dict =
            ComponentDescriptor::audio_unit_v3(&synth, ComponentType::MusicDevice).to_dictionary();

        let tags = dict.get("tags").and_then(Value::as_array).unwrap();
        assert_eq!(tags, &vec![Value::from("Synth")]);
        assert!(dict.get("factoryFunction").is_none());
        assert_eq!(component_tag(PluginKind::MidiProcessor), "Effects");
    }
}
