//! Auxiliary resource resolution and staging.
//!
//! Each [`ResourceKind`] has an ordered list of candidate source directories
//! and one or more destinations. The [`resolver`] picks the first candidate
//! that exists; the [`stager`] copies it into every destination.

pub mod resolver;
pub mod stager;

pub use resolver::{Resolution, resolve};
pub use stager::{StageReport, stage};

use crate::bundler::settings::Settings;
use std::fmt;
use std::path::PathBuf;

/// Category of auxiliary resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `resources/img`
    Images,
    /// `resources/fonts`
    Fonts,
    /// Web UI bundle
    Web,
}

/// How a resource kind is copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Files directly inside the source are copied one by one into the destination.
    Flat,
    /// The destination directory is replaced by a recursive copy of the source.
    Tree,
}

impl ResourceKind {
    /// Copy layout for this kind.
    pub fn layout(self) -> Layout {
        match self {
            Self::Images | Self::Fonts => Layout::Flat,
            Self::Web => Layout::Tree,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Images => "images",
            Self::Fonts => "fonts",
            Self::Web => "web bundle",
        })
    }
}

/// A resource kind with its candidate sources and destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSet {
    pub kind: ResourceKind,
    /// Candidate source directories, highest priority first.
    pub candidates: Vec<PathBuf>,
    pub destinations: Vec<PathBuf>,
}

/// Builds the resource sets for a run, in staging order.
///
/// Images and fonts come from the project's `resources/` and land flat in the
/// destination root. The web bundle is mirrored both into the project's
/// `resources/web` (so later packaging steps pick it up) and into the
/// destination root's `web` folder.
pub fn plan_resources(settings: &Settings) -> Vec<ResourceSet> {
    let project_resources = settings.context().project_resources();
    let destination = settings.destination_root().path().to_path_buf();

    vec![
        ResourceSet {
            kind: ResourceKind::Images,
            candidates: vec![project_resources.join("img")],
            destinations: vec![destination.clone()],
        },
        ResourceSet {
            kind: ResourceKind::Fonts,
            candidates: vec![project_resources.join("fonts")],
            destinations: vec![destination.clone()],
        },
        ResourceSet {
            kind: ResourceKind::Web,
            candidates: settings.context().web_candidates(),
            destinations: vec![project_resources.join("web"), destination.join("web")],
        },
    ]
}
