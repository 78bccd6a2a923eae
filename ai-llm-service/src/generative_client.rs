use async_trait::async_trait;

use crate::config::generation_options::GenerationOptions;
use crate::envelope::UpstreamEnvelope;
use crate::error_handler::GenerationError;

/// One-shot access to a generative text model.
///
/// Implementations return the raw envelope on success. Text extraction and
/// fallback policy belong to the caller.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Sends a single prompt with its per-call generation options.
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<UpstreamEnvelope, GenerationError>;
}
