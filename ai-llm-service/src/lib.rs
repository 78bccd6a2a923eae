//! Gemini text-generation client.
//!
//! - [`config`]: credential, endpoint and per-call generation options
//! - [`envelope`]: request/response wire types and [`envelope::extract_text`]
//! - [`generative_client::GenerativeClient`]: the seam callers depend on
//! - [`services::gemini_service::GeminiService`]: the reqwest implementation
//! - [`telemetry`]: log layer used by the binary

pub mod config;
pub mod envelope;
pub mod error_handler;
pub mod generative_client;
pub mod services;
pub mod telemetry;

pub use config::gemini_config::GeminiConfig;
pub use config::generation_options::GenerationOptions;
pub use envelope::{UpstreamEnvelope, extract_text};
pub use error_handler::{AiLlmError, FailureKind, GenerationError};
pub use generative_client::GenerativeClient;
pub use services::gemini_service::GeminiService;
