use serde::Serialize;

/// Sampling temperature used for every call of this service.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Nucleus sampling cutoff used for every call of this service.
pub const DEFAULT_TOP_P: f32 = 0.95;

/// Per-call generation knobs, serialized as Gemini's `generationConfig`.
///
/// # Fields
///
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `max_output_tokens`: Output-size bound for this call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationOptions {
    /// Default sampling with the given output bound.
    pub fn bounded(max_output_tokens: u32) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_output_tokens,
        }
    }
}
