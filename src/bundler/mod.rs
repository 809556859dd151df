//! Plugin manifest generation and resource staging.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_plugin_prepare::bundler::{BuildContext, Preparer, SettingsBuilder};
//! use kodegen_plugin_prepare::metadata::load_config_model;
//!
//! # async fn example() -> kodegen_plugin_prepare::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .config_model(load_config_model("config.toml".as_ref()).await?)
//!     .context(BuildContext {
//!         project_dir: ".".into(),
//!         deployment_target: Some("10.13".into()),
//!         target_build_dir: Some("build/Release".into()),
//!         resources_folder: Some("/Foo.vst3/Contents/Resources".into()),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let report = Preparer::new(settings).prepare().await;
//! report.log_summary();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod resources;
pub mod settings;
pub mod utils;

pub use builder::{ManifestOutcome, PrepareReport, Preparer, ResourceOutcome};
pub use error::{ConfigError, Context, Error, ErrorExt, ManifestError, ResourceIssue, Result};
pub use platform::ManifestFormat;
pub use resources::ResourceKind;
pub use settings::{
    BuildContext, ConfigModel, ConfigValue, DestinationRoot, PluginConfig, PluginKind, Settings,
    SettingsBuilder,
};
