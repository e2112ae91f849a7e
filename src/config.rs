use std::fmt;
use std::time::Duration;

use crate::constants;

/// Immutable settings for the answer requester.
///
/// Built once at startup; the system instruction is combined with each
/// question at call time and never mutated.
#[derive(Clone)]
pub struct RequesterConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub system_instruction: String,
    pub timeout: Duration,
}

impl RequesterConfig {
    /// Reads defaults from the environment (see `constants`). A missing API
    /// key is kept as `None` so the failure shows up on the first request.
    pub fn from_env() -> Self {
        Self {
            base_url: constants::GEMINI_BASE_URL.clone(),
            api_key: constants::GEMINI_API_KEY.clone(),
            model: constants::GEMINI_MODEL.clone(),
            system_instruction: constants::SYSTEM_INSTRUCTION.to_string(),
            timeout: Duration::from_secs(*constants::REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            model: constants::DEFAULT_MODEL.to_string(),
            system_instruction: constants::SYSTEM_INSTRUCTION.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Full URL of the chat-completion endpoint under `base_url`.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for RequesterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequesterConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_handles_trailing_slash() {
        let with_slash = RequesterConfig::new(constants::DEFAULT_BASE_URL, None);
        assert_eq!(
            with_slash.completions_url(),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );

        let without_slash = RequesterConfig::new("http://127.0.0.1:9000", None);
        assert_eq!(without_slash.completions_url(), "http://127.0.0.1:9000/chat/completions");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = RequesterConfig::new("http://localhost", Some("secret-key".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_builders() {
        let config = RequesterConfig::new("http://localhost", None)
            .with_base_url("http://127.0.0.1:9000/v1/")
            .with_model("gemini-1.5-pro")
            .with_timeout(Duration::from_secs(5))
            .with_system_instruction("Be brief.");
        assert_eq!(config.completions_url(), "http://127.0.0.1:9000/v1/chat/completions");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.system_instruction, "Be brief.");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_defaults_use_fixed_instruction() {
        let config = RequesterConfig::new("http://localhost", None);
        assert_eq!(config.model, constants::DEFAULT_MODEL);
        assert!(config.system_instruction.contains("Roman Urdu"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }
}
