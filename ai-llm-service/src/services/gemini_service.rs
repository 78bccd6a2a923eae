//! Thin client for Google Gemini `generateContent`.
//!
//! One call = one POST with a single text part. The API key travels in the
//! `X-goog-api-key` header. No retries, no streaming.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::config::gemini_config::GeminiConfig;
//! use ai_llm_service::config::generation_options::GenerationOptions;
//! use ai_llm_service::envelope::extract_text;
//! use ai_llm_service::generative_client::GenerativeClient;
//! use ai_llm_service::services::gemini_service::GeminiService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = GeminiService::new(GeminiConfig::from_env()?)?;
//! let env = svc
//!     .generate("Why is the sky blue?", GenerationOptions::bounded(180))
//!     .await?;
//! println!("{:?}", extract_text(&env));
//! # Ok(()) }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::gemini_config::GeminiConfig;
use crate::config::generation_options::GenerationOptions;
use crate::envelope::{GenerateContentRequest, UpstreamEnvelope};
use crate::error_handler::{GenerationError, Result, make_snippet, validate_http_endpoint};
use crate::generative_client::GenerativeClient;

/// Header carrying the credential.
pub const API_KEY_HEADER: &str = "X-goog-api-key";

/// Gemini client holding a reusable HTTP connection pool.
pub struct GeminiService {
    client: reqwest::Client,
    cfg: GeminiConfig,
    timeout: Duration,
}

impl GeminiService {
    /// Creates a new [`GeminiService`].
    ///
    /// A missing API key is accepted: every call then resolves to
    /// [`GenerationError::ConfigAbsent`] without touching the network.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
    ///   if the endpoint is not an http(s) URL
    /// - [`AiLlmError::HttpTransport`](crate::error_handler::AiLlmError::HttpTransport)
    ///   if the HTTP client cannot be built
    pub fn new(cfg: GeminiConfig) -> Result<Self> {
        validate_http_endpoint("GEMINI_ENDPOINT", cfg.endpoint.trim())?;

        let timeout = Duration::from_secs(cfg.timeout_secs);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            cfg,
            timeout,
        })
    }

    /// Whether calls will actually be sent upstream.
    pub fn is_configured(&self) -> bool {
        self.cfg.has_credential()
    }
}

#[async_trait]
impl GenerativeClient for GeminiService {
    /// # Errors
    /// - [`GenerationError::ConfigAbsent`] if no key is configured
    /// - [`GenerationError::Timeout`] / [`GenerationError::Transport`] for
    ///   client failures
    /// - [`GenerationError::HttpStatus`] for non-2xx responses
    /// - [`GenerationError::Malformed`] if the body is not a JSON envelope
    #[instrument(skip_all, fields(prompt_len = prompt.len(), max_tokens = options.max_output_tokens))]
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> std::result::Result<UpstreamEnvelope, GenerationError> {
        let Some(api_key) = self.cfg.api_key.as_deref() else {
            debug!("no API key; skipping upstream call");
            return Err(GenerationError::ConfigAbsent);
        };

        let body = GenerateContentRequest::new(prompt, options);

        debug!("POST {}", self.cfg.endpoint);
        let resp = self
            .client
            .post(&self.cfg.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(%status, "upstream returned non-success status");
            return Err(GenerationError::HttpStatus {
                status,
                snippet: make_snippet(&text),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, self.timeout))?;

        serde_json::from_slice::<UpstreamEnvelope>(&bytes)
            .map_err(|e| GenerationError::Malformed(format!("serde error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::envelope::extract_text;
    use crate::error_handler::FailureKind;

    /// Whether `buf` holds the full head plus `content-length` bytes of body.
    fn request_complete(buf: &[u8]) -> bool {
        let raw = String::from_utf8_lossy(buf);
        let Some((head, body)) = raw.split_once("\r\n\r\n") else {
            return false;
        };
        let len = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= len
    }

    /// Serves exactly one canned response on a random local port. The handle
    /// yields the raw request as received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/v1/generate", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 2048];
            while !request_complete(&buf) {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let reply = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(reply.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
            String::from_utf8_lossy(&buf).into_owned()
        });

        (endpoint, handle)
    }

    fn keyed(endpoint: String) -> GeminiService {
        GeminiService::new(GeminiConfig {
            api_key: Some("k-1".into()),
            endpoint,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn success_decodes_envelope_and_sends_key_and_config() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":" hi "}]}}]}"#,
        )
        .await;

        let env = keyed(endpoint)
            .generate("P", GenerationOptions::bounded(200))
            .await
            .unwrap();
        assert_eq!(extract_text(&env).as_deref(), Some("hi"));

        let raw = server.await.unwrap();
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        assert!(head.starts_with("POST /v1/generate "), "head: {head}");
        assert!(
            head.lines().any(|l| l.eq_ignore_ascii_case("x-goog-api-key: k-1")),
            "head: {head}"
        );

        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            sent,
            json!({
                "contents": [ { "parts": [ { "text": "P" } ] } ],
                "generationConfig": { "temperature": 0.7, "topP": 0.95, "maxOutputTokens": 200 }
            })
        );
    }

    #[tokio::test]
    async fn non_success_status_keeps_code_and_snippet() {
        let (endpoint, server) = serve_once("503 Service Unavailable", r#"{"error":"overloaded"}"#).await;

        let err = keyed(endpoint)
            .generate("P", GenerationOptions::bounded(180))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err.kind(), FailureKind::Transport);
        match err {
            GenerationError::HttpStatus { status, snippet } => {
                assert_eq!(status.as_u16(), 503);
                assert!(snippet.contains("overloaded"), "snippet: {snippet}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let (endpoint, server) = serve_once("200 OK", "not json").await;

        let err = keyed(endpoint)
            .generate("P", GenerationOptions::bounded(180))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err.kind(), FailureKind::Malformed);
    }

    #[tokio::test]
    async fn without_key_no_request_is_sent() {
        // Unroutable endpoint: would fail with Transport if anything were sent.
        let cfg = GeminiConfig {
            api_key: None,
            endpoint: "http://127.0.0.1:9/never".into(),
            timeout_secs: 1,
        };
        let svc = GeminiService::new(cfg).unwrap();
        assert!(!svc.is_configured());

        let err = svc.generate("hi", GenerationOptions::bounded(180)).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ConfigAbsent);
    }

    #[tokio::test]
    async fn refused_connection_is_transport() {
        let cfg = GeminiConfig {
            api_key: Some("k".into()),
            endpoint: "http://127.0.0.1:9/generate".into(),
            timeout_secs: 2,
        };
        let svc = GeminiService::new(cfg).unwrap();

        let err = svc
            .generate("hi", GenerationOptions::bounded(180))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let cfg = GeminiConfig {
            api_key: None,
            endpoint: "generativelanguage.googleapis.com".into(),
            timeout_secs: 30,
        };
        assert!(GeminiService::new(cfg).is_err());
    }
}
