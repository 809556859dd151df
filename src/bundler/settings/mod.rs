//! Configuration structures for preparation runs.
//!
//! This module provides the configuration model, its validated typed view,
//! the build context supplied by the build system, and the builder that
//! turns them into [`Settings`].

mod builder;
mod context;
mod core;
mod model;
mod plugin;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use context::{BuildContext, DestinationRoot, SHARED_RESOURCES_ROOT};
pub use core::Settings;
pub use model::{ConfigModel, ConfigValue};
pub use plugin::{PluginConfig, PluginKind};

#[cfg(test)]
pub(crate) use plugin::tests::sample_model;
