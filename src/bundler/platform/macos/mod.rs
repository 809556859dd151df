//! macOS bundle manifests.
//!
//! - `component` - Audio Unit component types and `AudioComponents` entries
//! - `info_plist` - template loading and in-place writes
//! - `manifest` - per-format field rules

mod component;
mod info_plist;
mod manifest;

pub use component::{ComponentDescriptor, ComponentType, component_tag, resolve_component_type};
pub use info_plist::InfoPlist;
pub use manifest::{
    APP_CATEGORY, APP_MICROPHONE_USAGE, APP_PRINCIPAL_CLASS, AUV3_EXTENSION_POINT,
    AUV3_UI_EXTENSION_POINT, apply_manifest_fields, generate_manifest,
};
