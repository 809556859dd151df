//! Configuration model: the raw key/value build parameters.

use crate::bundler::error::ConfigError;
use std::collections::BTreeMap;

/// A single configuration value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// `true` / `false`
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Text
    String(String),
}

impl ConfigValue {
    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "a boolean",
            Self::Integer(_) => "an integer",
            Self::String(_) => "a string",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Immutable mapping from parameter name to value.
///
/// Produced by an external loader from a flat `KEY = value` file;
/// typed access goes through [`PluginConfig`](super::PluginConfig), which
/// validates every required key up front.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct ConfigModel {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigModel {
    /// Returns the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Number of parameters in the model.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the model has no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Required string value.
    pub fn require_str(&self, key: &'static str) -> Result<&str, ConfigError> {
        match self.get(key) {
            Some(ConfigValue::String(s)) => Ok(s),
            Some(other) => Err(ConfigError::WrongType {
                key,
                expected: "a string",
                found: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey { key }),
        }
    }

    /// Optional string value; present-but-mistyped is still an error.
    pub fn optional_str(&self, key: &'static str) -> Result<Option<&str>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.require_str(key).map(Some),
        }
    }

    /// Required boolean value.
    ///
    /// `0` and `1` are accepted as well, since project headers spell flags that way.
    pub fn require_bool(&self, key: &'static str) -> Result<bool, ConfigError> {
        match self.get(key) {
            Some(ConfigValue::Boolean(b)) => Ok(*b),
            Some(ConfigValue::Integer(0)) => Ok(false),
            Some(ConfigValue::Integer(1)) => Ok(true),
            Some(other) => Err(ConfigError::WrongType {
                key,
                expected: "a boolean",
                found: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey { key }),
        }
    }

    /// Optional integer value.
    pub fn optional_int(&self, key: &'static str) -> Result<Option<i64>, ConfigError> {
        match self.get(key) {
            Some(ConfigValue::Integer(i)) => Ok(Some(*i)),
            Some(other) => Err(ConfigError::WrongType {
                key,
                expected: "an integer",
                found: other.type_name(),
            }),
            None => Ok(None),
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigModel {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
impl ConfigModel {
    pub(crate) fn with(mut self, key: &str, value: ConfigValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub(crate) fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_zero_and_one() {
        let model: ConfigModel = [("A", ConfigValue::Integer(1)), ("B", ConfigValue::Integer(0))]
            .into_iter()
            .collect();

        assert!(model.require_bool("A").unwrap());
        assert!(!model.require_bool("B").unwrap());
    }

    #[test]
    fn mistyped_string_reports_found_type() {
        let model: ConfigModel = [("BUNDLE_NAME", 3_i64)].into_iter().collect();

        let err = model.require_str("BUNDLE_NAME").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongType {
                key: "BUNDLE_NAME",
                found: "an integer",
                ..
            }
        ));
    }

    #[test]
    fn flag_rejects_other_integers() {
        let model: ConfigModel = [("PLUG_HAS_UI", 2_i64)].into_iter().collect();
        assert!(model.require_bool("PLUG_HAS_UI").is_err());
    }

    #[test]
    fn parses_from_toml() {
        let model: ConfigModel = toml::from_str(
            r#"
            BUNDLE_NAME = "Foo"
            PLUG_TYPE = 1
            PLUG_HAS_UI = true
            "#,
        )
        .unwrap();

        assert_eq!(model.len(), 3);
        assert_eq!(model.get("PLUG_TYPE"), Some(&ConfigValue::Integer(1)));
        assert_eq!(model.get("PLUG_HAS_UI"), Some(&ConfigValue::Boolean(true)));
    }
}
