//! Configuration for the workbench.
//!
//! A small YAML file configures the remote execution service and the
//! embedded interpreter. Credentials can be supplied through the
//! environment so they never have to live in the file:
//! `POLYPAD_ENDPOINT`, `POLYPAD_API_KEY` and `POLYPAD_API_HOST` override
//! their file counterparts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RunnerError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolypadConfig {
    pub remote: RemoteConfig,
    pub interpreter: InterpreterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the hosted execution service.
    pub endpoint: String,
    pub api_key: String,
    pub api_host: String,
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> RemoteConfig {
        RemoteConfig {
            endpoint: "https://judge0-ce.p.rapidapi.com".to_string(),
            api_key: "".to_string(),
            api_host: "judge0-ce.p.rapidapi.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Set to false to run remote-only, without the embedded Python
    /// runtime.
    pub enabled: bool,
}

impl Default for InterpreterConfig {
    fn default() -> InterpreterConfig {
        InterpreterConfig { enabled: true }
    }
}

impl PolypadConfig {
    /// Loads the configuration file, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is an error.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<PolypadConfig, RunnerError> {
        let mut config = if path.as_ref().exists() {
            let raw = tokio::fs::read_to_string(path).await?;
            serde_yaml::from_str::<PolypadConfig>(&raw)?
        } else {
            PolypadConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("POLYPAD_ENDPOINT") {
            if !endpoint.is_empty() {
                self.remote.endpoint = endpoint;
            }
        }
        if let Ok(api_key) = std::env::var("POLYPAD_API_KEY") {
            if !api_key.is_empty() {
                self.remote.api_key = api_key;
            }
        }
        if let Ok(api_host) = std::env::var("POLYPAD_API_HOST") {
            if !api_host.is_empty() {
                self.remote.api_host = api_host;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_ce_endpoint() {
        let config = PolypadConfig::default();
        assert_eq!(config.remote.endpoint, "https://judge0-ce.p.rapidapi.com");
        assert!(config.remote.api_key.is_empty());
        assert_eq!(config.remote.timeout_seconds, 30);
        assert!(config.interpreter.enabled);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_fields() {
        let config: PolypadConfig = serde_yaml::from_str(
            r#"
remote:
  api_key: secret
"#,
        )
        .unwrap();
        assert_eq!(config.remote.api_key, "secret");
        assert_eq!(config.remote.endpoint, "https://judge0-ce.p.rapidapi.com");
        assert!(config.interpreter.enabled);
    }

    #[test]
    fn interpreter_can_be_disabled_from_the_file() {
        let config: PolypadConfig = serde_yaml::from_str(
            r#"
interpreter:
  enabled: false
"#,
        )
        .unwrap();
        assert!(!config.interpreter.enabled);
    }
}
