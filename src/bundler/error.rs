//! Error types for preparation operations.
//!
//! Failures come in three severities, each with its own type:
//! - [`ConfigError`] is fatal and raised before anything is written.
//! - [`ManifestError`] is fatal for one packaging format only.
//! - [`ResourceIssue`] is recoverable; staging continues and the run can still succeed.
//!
//! [`Error`] is the general error for file system plumbing and settings
//! construction; it wraps [`ConfigError`].

use crate::bundler::resources::ResourceKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for preparation operations
pub type Result<T> = std::result::Result<T, Error>;

/// General error for preparation operations
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form failure
    #[error("{0}")]
    GenericError(String),

    /// IO error with the operation and path that failed
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal errors
    #[error("directory walk failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix errors during recursive copies
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Fatal configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fatal configuration errors.
///
/// Raised while validating the configuration model and build context, before
/// any resource is staged or manifest touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or holds unsupported values
    #[error("failed to parse configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A required key is absent
    #[error("missing required configuration key `{key}`")]
    MissingKey { key: &'static str },

    /// A key holds a value of the wrong type
    #[error("configuration key `{key}` must be {expected}, found {found}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A four-character code has the wrong length or non-ASCII characters
    #[error("configuration key `{key}` must be a four-character ASCII code, found {value:?}")]
    InvalidFourCharCode { key: &'static str, value: String },

    /// `PLUG_TYPE` is not one of the known plugin kinds
    #[error(
        "unrecognized plugin kind {value} in `PLUG_TYPE` (expected 0/effect, 1/instrument or 2/midi-processor)"
    )]
    UnknownPluginKind { value: String },

    /// A numeric version could not be parsed or derived
    #[error("invalid numeric version in `{key}`: {value:?}")]
    InvalidVersion { key: &'static str, value: String },

    /// Hex and integer versions describe different numbers
    #[error("PLUG_VERSION_HEX ({hex}) does not match PLUG_VERSION_INT ({int})")]
    InconsistentVersion { hex: String, int: i64 },

    /// The build system did not provide a required context value
    #[error("build context is missing {what}")]
    MissingBuildContext { what: &'static str },
}

/// Fatal errors for a single packaging format's manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No template at the expected path
    #[error("template not found at {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// The template exists but could not be read
    #[error("failed to read template {}: {source}", path.display())]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is not a property list
    #[error("template {} is not a valid property list: {source}", path.display())]
    TemplateInvalid {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// The template's root value is not a dictionary
    #[error("template {} does not contain a top-level dictionary", path.display())]
    NotADictionary { path: PathBuf },

    /// The updated manifest could not be serialized
    #[error("failed to serialize manifest {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// The updated manifest could not be written back
    #[error("failed to write manifest {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable resource problems.
///
/// These are logged and reported but never abort the run.
#[derive(Error, Debug)]
pub enum ResourceIssue {
    /// None of the candidate source directories exists
    #[error("no {kind} source directory found ({searched} location(s) searched)")]
    NotFound { kind: ResourceKind, searched: usize },

    /// A destination contains the source or lies inside it
    #[error("not staging {kind} into {}: it overlaps the source {}", path.display(), source_dir.display())]
    OverlapsSource {
        kind: ResourceKind,
        path: PathBuf,
        source_dir: PathBuf,
    },

    /// Copying into one destination failed
    #[error("failed to stage {kind} into {}: {source}", path.display())]
    CopyFailed {
        kind: ResourceKind,
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Attaches the failing operation and path to IO errors.
pub trait ErrorExt<T> {
    /// Wraps the error as [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Converts `None` into an error message.
pub trait Context<T> {
    /// Returns [`Error::GenericError`] with `msg` when the value is absent.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)).into())
    };
}
