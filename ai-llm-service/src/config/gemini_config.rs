//! Gemini client configuration.
//!
//! The credential is captured once, when the config is built, and handed to
//! [`GeminiService`](crate::services::gemini_service::GeminiService) at
//! construction. Nothing else in the crate reads the process environment.
//!
//! # Environment variables
//! - `GEMINI_API_KEY`      = API key (optional; absent means local-fallback mode)
//! - `GEMINI_ENDPOINT`     = generateContent URL override (optional)
//! - `GEMINI_TIMEOUT_SECS` = request timeout in seconds (optional, default 30)

use crate::error_handler::{Result, non_blank, parse_opt_u64, validate_http_endpoint};

/// Default upstream endpoint (`gemini-2.0-flash:generateContent`).
pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`GeminiService`](crate::services::gemini_service::GeminiService).
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API key sent as `X-goog-api-key`. `None` disables upstream calls.
    pub api_key: Option<String>,

    /// Full generateContent URL.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: non_blank(api_key),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Reads the config from the process environment.
    ///
    /// # Errors
    /// See [`GeminiConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
    ///   if `GEMINI_ENDPOINT` is not an http(s) URL
    /// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber)
    ///   if `GEMINI_TIMEOUT_SECS` is not a `u64`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_blank(lookup("GEMINI_API_KEY"));

        let endpoint = non_blank(lookup("GEMINI_ENDPOINT"))
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
        validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

        let timeout_secs = parse_opt_u64("GEMINI_TIMEOUT_SECS", lookup("GEMINI_TIMEOUT_SECS"))?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            endpoint,
            timeout_secs,
        })
    }

    /// Whether upstream calls can be attempted at all.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_any_variable() {
        let cfg = GeminiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert_eq!(cfg.timeout_secs, 30);
        assert!(!cfg.has_credential());
    }

    #[test]
    fn blank_key_counts_as_absent() {
        let cfg = GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(!cfg.has_credential());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k-123"),
            ("GEMINI_ENDPOINT", "http://127.0.0.1:8089/generate"),
            ("GEMINI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.endpoint, "http://127.0.0.1:8089/generate");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(GeminiConfig::from_lookup(lookup(&[("GEMINI_ENDPOINT", "localhost")])).is_err());
        assert!(GeminiConfig::from_lookup(lookup(&[("GEMINI_TIMEOUT_SECS", "-1")])).is_err());
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = GeminiConfig::new(Some("super-secret".into()));
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
