use std::env;
use std::time::Duration;

use tutor_core::model::LanguageProfile;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_QUIZ_SIZE: usize = 3;

const API_KEY_VARS: [&str; 3] = ["TUTOR_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub quiz_size: usize,
    pub language: LanguageProfile,
}

impl GatewayConfig {
    /// Defaults for everything but the credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key,
            model: DEFAULT_MODEL.into(),
            timeout: DEFAULT_TIMEOUT,
            quiz_size: DEFAULT_QUIZ_SIZE,
            language: LanguageProfile::default(),
        })
    }

    /// Read configuration from the process environment.
    ///
    /// `TUTOR_API_KEY` (or `GEMINI_API_KEY` / `API_KEY`) is required. Optional:
    /// `TUTOR_AI_BASE_URL`, `TUTOR_AI_MODEL`, `TUTOR_AI_TIMEOUT_SECS`, `TUTOR_QUIZ_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the key is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the key is missing or a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key.trim())?;

        if let Some(raw) = lookup("TUTOR_AI_BASE_URL") {
            config.base_url = Url::parse(raw.trim())?;
        }
        if let Some(raw) = lookup("TUTOR_AI_MODEL").filter(|raw| !raw.trim().is_empty()) {
            config.model = raw.trim().to_string();
        }
        if let Some(raw) = lookup("TUTOR_AI_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "TUTOR_AI_TIMEOUT_SECS",
                    raw: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("TUTOR_QUIZ_SIZE") {
            config.quiz_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "TUTOR_QUIZ_SIZE",
                    raw: raw.clone(),
                })?;
        }

        Ok(config)
    }

    /// `{base_url}/models/{model}:generateContent`
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = GatewayConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = GatewayConfig::from_lookup(lookup(&[("TUTOR_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn falls_back_to_legacy_key_names() {
        let config = GatewayConfig::from_lookup(lookup(&[("API_KEY", "k-legacy")])).unwrap();
        assert_eq!(config.api_key, "k-legacy");

        let config = GatewayConfig::from_lookup(lookup(&[
            ("TUTOR_API_KEY", "k-main"),
            ("API_KEY", "k-legacy"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "k-main");
    }

    #[test]
    fn defaults_apply() {
        let config = GatewayConfig::from_lookup(lookup(&[("TUTOR_API_KEY", "k")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.quiz_size, 3);
        assert_eq!(
            config.generate_content_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("TUTOR_API_KEY", "k"),
            ("TUTOR_AI_BASE_URL", "http://localhost:8080/v1/"),
            ("TUTOR_AI_MODEL", "gemini-test"),
            ("TUTOR_AI_TIMEOUT_SECS", "5"),
            ("TUTOR_QUIZ_SIZE", "5"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.quiz_size, 5);
        assert_eq!(
            config.generate_content_url(),
            "http://localhost:8080/v1/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = GatewayConfig::from_lookup(lookup(&[
            ("TUTOR_API_KEY", "k"),
            ("TUTOR_QUIZ_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "TUTOR_QUIZ_SIZE",
                ..
            }
        ));

        let err = GatewayConfig::from_lookup(lookup(&[
            ("TUTOR_API_KEY", "k"),
            ("TUTOR_AI_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = GatewayConfig::from_lookup(lookup(&[
            ("TUTOR_API_KEY", "k"),
            ("TUTOR_AI_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
