//! Command line interface for plugin preparation.
//!
//! Parses arguments, validates the configuration up front, and runs one
//! preparation pass.

mod args;

pub use args::Args;

use crate::bundler::{Preparer, SettingsBuilder};
use crate::error::{CliError, Result};
use crate::metadata::load_config_model;

/// Main CLI entry point
///
/// Configuration and build-context problems are returned as errors before
/// anything is written. Otherwise the exit code reflects the run's report.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(&args).await
}

/// Runs one preparation pass for already-parsed arguments.
pub async fn run_with(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config_path = args.config_path();
    log::debug!("Loading configuration from {}", config_path.display());
    let model = load_config_model(&config_path).await?;
    let context = args.resolve_context().await?;

    let settings = SettingsBuilder::new()
        .config_model(model)
        .context(context)
        .formats(args.formats.clone())
        .build()?;
    log::info!(
        "Preparing {} {} ({})",
        settings.bundle_name(),
        settings.plugin().version,
        settings.plugin().kind
    );

    let report = Preparer::new(settings).prepare().await;
    report.log_summary();

    Ok(report.exit_code())
}
