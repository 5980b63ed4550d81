//! Render configuration loaded from a file and environment overrides.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable enabling strict argument resolution (`1` or `true`).
pub const STRICT_ARGUMENTS_ENV: &str = "CALLTAG_STRICT_ARGUMENTS";
/// Environment variable overriding the child tag read as call arguments.
pub const ARGUMENT_TAG_ENV: &str = "CALLTAG_ARGUMENT_TAG";

/// Default tag of the child elements that carry call arguments.
pub const DEFAULT_ARGUMENT_TAG: &str = "argument";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Format {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// How argument data paths that fail to resolve are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentPolicy {
    /// Substitute null for the argument.
    #[default]
    Lenient,
    /// Fail the render with `RenderError::ArgumentResolution`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raise instead of substituting null for unresolved argument paths.
    pub strict_arguments: bool,
    /// Child tag read as call arguments.
    pub argument_tag: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strict_arguments: false,
            argument_tag: DEFAULT_ARGUMENT_TAG.to_string(),
        }
    }
}

impl RenderConfig {
    /// Loads a YAML or JSON config file. Missing fields keep their defaults,
    /// and a blank `argument_tag` falls back to [`DEFAULT_ARGUMENT_TAG`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Format {
            path: path.display().to_string(),
            source,
        })?;
        let tag = config.argument_tag.trim().to_string();
        if tag.is_empty() {
            debug!(path = %path.display(), "blank argument tag in config, using default");
            config.argument_tag = DEFAULT_ARGUMENT_TAG.to_string();
        } else {
            config.argument_tag = tag;
        }
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(STRICT_ARGUMENTS_ENV) {
            let normalized = raw.trim().to_ascii_lowercase();
            self.strict_arguments = normalized == "1" || normalized == "true";
            debug!(strict_arguments = self.strict_arguments, "strict argument override applied");
        }
        if let Some(tag) = lookup(ARGUMENT_TAG_ENV).filter(|tag| !tag.trim().is_empty()) {
            debug!(argument_tag = %tag.trim(), "argument tag override applied");
            self.argument_tag = tag.trim().to_string();
        }
        self
    }

    pub fn argument_policy(&self) -> ArgumentPolicy {
        if self.strict_arguments {
            ArgumentPolicy::Strict
        } else {
            ArgumentPolicy::Lenient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_lenient() {
        let config = RenderConfig::default();
        assert_eq!(config.argument_policy(), ArgumentPolicy::Lenient);
        assert_eq!(config.argument_tag, "argument");
    }

    #[test]
    fn loads_partial_yaml_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("calltag.yaml");
        fs::write(&config_path, "strict_arguments: true\n").unwrap();

        let config = RenderConfig::from_file(&config_path).expect("config");
        assert!(config.strict_arguments);
        assert_eq!(config.argument_tag, DEFAULT_ARGUMENT_TAG);
    }

    #[test]
    fn loads_json_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("calltag.json");
        fs::write(&config_path, r#"{"argument_tag": "arg"}"#).unwrap();

        let config = RenderConfig::from_file(&config_path).expect("config");
        assert_eq!(config.argument_tag, "arg");
        assert!(!config.strict_arguments);
    }

    #[test]
    fn blank_argument_tag_falls_back_to_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("calltag.yaml");
        for content in ["argument_tag: \"\"\n", "argument_tag: \"   \"\n"] {
            fs::write(&config_path, content).unwrap();
            let config = RenderConfig::from_file(&config_path).expect("config");
            assert_eq!(config.argument_tag, DEFAULT_ARGUMENT_TAG, "{content:?}");
        }

        fs::write(&config_path, "argument_tag: \" param \"\n").unwrap();
        assert_eq!(RenderConfig::from_file(&config_path).expect("config").argument_tag, "param");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = RenderConfig::from_file("/nonexistent/calltag.yaml").unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
        assert!(error.to_string().contains("/nonexistent/calltag.yaml"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let variables: HashMap<&str, &str> = HashMap::from([(STRICT_ARGUMENTS_ENV, "TRUE"), (ARGUMENT_TAG_ENV, " param ")]);
        let config = RenderConfig::default().with_overrides_from(|key| variables.get(key).map(|value| value.to_string()));
        assert_eq!(config.argument_policy(), ArgumentPolicy::Strict);
        assert_eq!(config.argument_tag, "param");

        let strict = RenderConfig {
            strict_arguments: true,
            ..RenderConfig::default()
        };
        let relaxed = strict.with_overrides_from(|key| (key == STRICT_ARGUMENTS_ENV).then(|| "0".to_string()));
        assert!(!relaxed.strict_arguments);
    }

    #[test]
    fn process_environment_is_read() {
        temp_env::with_var(STRICT_ARGUMENTS_ENV, Some("1"), || {
            assert!(RenderConfig::default().with_env_overrides().strict_arguments);
        });
    }
}
