//! Preparation orchestration.
//!
//! This module provides the main [`Preparer`] that runs one preparation pass.
//!
//! # Overview
//!
//! A pass:
//! 1. Creates the destination root from [`Settings`](crate::bundler::Settings)
//! 2. Resolves and stages images, fonts and the web bundle
//! 3. Resolves the Audio Unit component type
//! 4. Writes each requested manifest in place
//! 5. Returns a [`PrepareReport`] with per-kind and per-format outcomes
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Preparer`] struct
//! - [`report`] - Run outcome and exit status

mod orchestrator;
mod report;

pub use orchestrator::Preparer;
pub use report::{ManifestOutcome, PrepareReport, ResourceOutcome};
