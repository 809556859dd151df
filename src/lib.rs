//! Plugin bundle preparation library.
//!
//! This library provides the pre-build step for audio plugin projects:
//! - Writes the per-format `Info.plist` manifests (VST3, VST2, AUv2, AUv3, AAX, standalone app)
//! - Stages images, fonts and the web UI bundle into the bundle's resource location
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PrepareError, Result};
