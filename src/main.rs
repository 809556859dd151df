//! Prepare Resources - plugin manifest generation and resource staging.
//!
//! This binary runs once per build, invoked by the project's build system, and
//! rewrites the plugin's Info.plist templates and stages its auxiliary resources.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // Run CLI and get exit code
    let exit_code = match kodegen_plugin_prepare::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
