//! Loading of externally produced build inputs.
//!
//! The configuration model is read from a flat TOML file of `KEY = value`
//! pairs; the deployment target comes from the shared tooling's xcconfig.

use crate::bundler::{ConfigError, ConfigModel};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the xcconfig inside the tooling root that defines `DEPLOYMENT_TARGET`.
pub const XCCONFIG_NAME: &str = "common-mac.xcconfig";

/// Default configuration file name inside the project directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load the configuration model from a TOML file.
///
/// Values must be strings, integers or booleans; any other TOML type is a
/// parse error. Key validation happens later in
/// [`PluginConfig::from_model`](crate::bundler::PluginConfig::from_model).
pub async fn load_config_model(path: &Path) -> Result<ConfigModel, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let model: ConfigModel = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Loaded {} configuration parameters from {}",
        model.len(),
        path.display()
    );

    Ok(model)
}

/// Parse `KEY = VALUE` assignments from an xcconfig file.
///
/// Comments (`//`) and `#include` lines are skipped; values are kept verbatim
/// (no `$(VAR)` expansion). Later assignments override earlier ones.
pub async fn parse_xcconfig(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_xcconfig_str(&contents))
}

/// `DEPLOYMENT_TARGET` from the tooling root's `common-mac.xcconfig`.
///
/// Returns `None` when the file does not assign a non-empty value.
pub async fn xcconfig_deployment_target(tooling_root: &Path) -> Result<Option<String>, ConfigError> {
    let values = parse_xcconfig(&tooling_root.join(XCCONFIG_NAME)).await?;
    Ok(values
        .get("DEPLOYMENT_TARGET")
        .filter(|t| !t.is_empty())
        .cloned())
}

fn parse_xcconfig_str(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in contents.lines() {
        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        }
        .trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                values.insert(key.to_string(), value.trim().trim_end_matches(';').trim().to_string());
            }
        }
    }

    values
}

/// Turn a tooling root as written in xcconfig files into a path.
///
/// xcconfig values escape spaces as `\ `; both forms are accepted.
pub fn tooling_root_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace("\\ ", " "))
}
