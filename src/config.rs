//! Run settings resolved from the command line and the environment.
//!
//! Library code never reads the process environment directly; everything it
//! needs is collected here once and passed down explicitly.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::openai::ClientConfig;

/// Environment variable holding the API credential.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Environment variable to override the default model.
pub const MODEL_ENV_VAR: &str = "STAGEWISE_MODEL";

/// Instruction prompt location, relative to the current directory.
pub const DEFAULT_PROMPT_PATH: &str = "./scripts/prompt.txt";

/// Model used when neither the CLI nor the environment picks one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini-2025-04-14";

/// Responses API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/responses";

/// Values given explicitly on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prompt_path: Option<PathBuf>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

/// Everything a run needs from its surroundings.
#[derive(Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub prompt_path: PathBuf,
    pub model: String,
    pub endpoint: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("prompt_path", &self.prompt_path)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env(overrides: Overrides) -> Self {
        Self::from_lookup(overrides, |key| env::var(key).ok())
    }

    /// Resolve settings using `lookup` in place of the process environment.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model = overrides
            .model
            .or_else(|| non_empty(MODEL_ENV_VAR))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let settings = Self {
            api_key: non_empty(API_KEY_ENV_VAR),
            prompt_path: overrides
                .prompt_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPT_PATH)),
            model,
            endpoint: overrides
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        };

        debug!(?settings, "Resolved settings");
        settings
    }

    /// Build the HTTP client configuration. Fails when no credential is set.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingCredential)?;

        Ok(ClientConfig {
            api_key,
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(Overrides::default(), |_| None);

        assert!(settings.api_key.is_none());
        assert_eq!(settings.prompt_path, PathBuf::from(DEFAULT_PROMPT_PATH));
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_credential_fails_client_config() {
        let settings = Settings::from_lookup(Overrides::default(), |_| None);
        assert!(matches!(
            settings.client_config(),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let settings =
            Settings::from_lookup(Overrides::default(), lookup_from(&[(API_KEY_ENV_VAR, "  ")]));
        assert!(settings.api_key.is_none());
        assert!(settings.client_config().is_err());
    }

    #[test]
    fn test_credential_flows_into_client_config() {
        let settings =
            Settings::from_lookup(Overrides::default(), lookup_from(&[(API_KEY_ENV_VAR, "sk-test")]));
        let config = settings.client_config().unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_model_env_var_overrides_default() {
        let settings =
            Settings::from_lookup(Overrides::default(), lookup_from(&[(MODEL_ENV_VAR, "gpt-4o")]));
        assert_eq!(settings.model, "gpt-4o");
    }

    #[test]
    fn test_cli_overrides_win_over_environment() {
        let overrides = Overrides {
            prompt_path: Some(PathBuf::from("custom/prompt.txt")),
            model: Some("cli-model".to_string()),
            endpoint: Some("http://localhost:9999/v1/responses".to_string()),
        };
        let settings = Settings::from_lookup(overrides, lookup_from(&[(MODEL_ENV_VAR, "env-model")]));

        assert_eq!(settings.model, "cli-model");
        assert_eq!(settings.prompt_path, PathBuf::from("custom/prompt.txt"));
        assert_eq!(settings.endpoint, "http://localhost:9999/v1/responses");
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        temp_env::with_vars(
            [(API_KEY_ENV_VAR, Some("sk-env")), (MODEL_ENV_VAR, None::<&str>)],
            || {
                let settings = Settings::from_env(Overrides::default());
                assert_eq!(settings.api_key.as_deref(), Some("sk-env"));
                assert_eq!(settings.model, DEFAULT_MODEL);
            },
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let settings =
            Settings::from_lookup(Overrides::default(), lookup_from(&[(API_KEY_ENV_VAR, "sk-secret")]));
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
