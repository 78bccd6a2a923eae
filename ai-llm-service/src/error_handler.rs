//! Unified error handling for `ai-llm-service`.
//!
//! Two families live here:
//! - [`AiLlmError`] / [`ConfigError`]: construction-time failures (bad env,
//!   HTTP client that cannot be built). These are surfaced to the binary at
//!   startup.
//! - [`GenerationError`]: per-call outcomes of a generation request. Callers
//!   are expected to *absorb* them (log and fall back), never to show them to
//!   end users.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use std::time::Duration;

pub use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for construction/config paths of the crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP client could not be built.
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `GEMINI_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Generation errors                                                         */
/* ------------------------------------------------------------------------- */

/// Coarse classification of a failed generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No credential configured; the call was never sent.
    ConfigAbsent,
    /// Network error, timeout or non-success HTTP status.
    Transport,
    /// Upstream answered but the envelope is unusable.
    Malformed,
}

/// Outcome of a single failed call to the generative endpoint.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured. Not an error condition in itself: the
    /// service runs in local-fallback mode.
    #[error("[AI LLM Service] no API key configured; upstream call skipped")]
    ConfigAbsent,

    /// The request did not complete within the configured timeout.
    #[error("[AI LLM Service] request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection/DNS/TLS/body-read failures.
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] HTTP {status} from upstream: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Body was not valid JSON of the expected top-level shape, or held no
    /// usable text.
    #[error("[AI LLM Service] malformed envelope: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// Maps the error onto the coarse [`FailureKind`] taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::ConfigAbsent => FailureKind::ConfigAbsent,
            GenerationError::Timeout(_)
            | GenerationError::Transport(_)
            | GenerationError::HttpStatus { .. } => FailureKind::Transport,
            GenerationError::Malformed(_) => FailureKind::Malformed,
        }
    }

    /// Converts a `reqwest` error, distinguishing timeouts.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout(timeout)
        } else if err.is_decode() {
            GenerationError::Malformed(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

/// Truncates an upstream body to a log-friendly snippet.
pub fn make_snippet(body: &str) -> String {
    body.trim().chars().take(240).collect()
}

/* ------------------------------------------------------------------------- */
/* Env/validation helpers (return unified `Result<T>`)                       */
/* ------------------------------------------------------------------------- */

/// Returns `Some(value)` for a present, non-blank raw value.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses an optional `u64` (`Ok(None)` if unset/blank).
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// value is set but not a valid `u64`.
pub fn parse_opt_u64(var: &'static str, raw: Option<String>) -> Result<Option<u64>> {
    match non_blank(raw) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(GenerationError::ConfigAbsent.kind(), FailureKind::ConfigAbsent);
        assert_eq!(
            GenerationError::Timeout(Duration::from_secs(30)).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            GenerationError::HttpStatus {
                status: StatusCode::SERVICE_UNAVAILABLE,
                snippet: String::new(),
            }
            .kind(),
            FailureKind::Transport
        );
        assert_eq!(
            GenerationError::Malformed("eof".into()).kind(),
            FailureKind::Malformed
        );
    }

    #[test]
    fn parse_opt_u64_handles_blank_and_garbage() {
        assert_eq!(parse_opt_u64("X", None).unwrap(), None);
        assert_eq!(parse_opt_u64("X", Some("  ".into())).unwrap(), None);
        assert_eq!(parse_opt_u64("X", Some(" 12 ".into())).unwrap(), Some(12));
        assert!(parse_opt_u64("X", Some("soon".into())).is_err());
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("E", "https://example.com").is_ok());
        assert!(validate_http_endpoint("E", "ftp://example.com").is_err());
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).len(), 240);
        assert_eq!(make_snippet("  short \n"), "short");
    }
}
