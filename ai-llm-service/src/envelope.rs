//! Wire types for Gemini `generateContent` and the first-hit text extractor.
//!
//! Every nested response field is optional: upstream may omit `candidates`,
//! return a candidate without `content` (e.g. safety-blocked), or a part
//! without `text`. None of that is an error at this layer.

use serde::{Deserialize, Serialize};

use crate::config::generation_options::GenerationOptions;

/* ===========================================================================
Request
======================================================================== */

/// Request body: `{ contents: [{ parts: [{ text }] }], generationConfig }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn request with one text part.
    pub(crate) fn new(prompt: &'a str, options: GenerationOptions) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: options,
        }
    }
}

/* ===========================================================================
Response
======================================================================== */

/// Raw response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEnvelope {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

/// One proposed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content of a candidate: ordered parts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

/// A fragment of candidate content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl UpstreamEnvelope {
    /// Envelope with exactly one candidate holding one text part.
    pub fn single_text(text: impl Into<String>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![Part {
                        text: Some(text.into()),
                    }]),
                }),
            }]),
        }
    }
}

/// Returns the trimmed text of the first part of the first candidate.
///
/// Only that single slot is consulted. Missing, empty or whitespace-only text
/// yields `None`.
pub fn extract_text(envelope: &UpstreamEnvelope) -> Option<String> {
    let text = envelope
        .candidates
        .as_deref()?
        .first()?
        .content
        .as_ref()?
        .parts
        .as_deref()?
        .first()?
        .text
        .as_deref()?
        .trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(v: serde_json::Value) -> UpstreamEnvelope {
        serde_json::from_value(v).expect("envelope decodes")
    }

    #[test]
    fn takes_first_part_of_first_candidate() {
        let env = parse(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  Stars are hot balls of gas.\n" }, { "text": "ignored" } ] } },
                { "content": { "parts": [ { "text": "second candidate" } ] } }
            ],
            "usageMetadata": { "totalTokenCount": 42 }
        }));
        assert_eq!(
            extract_text(&env).as_deref(),
            Some("Stars are hot balls of gas.")
        );
    }

    #[test]
    fn absent_at_every_level() {
        for v in [
            json!({}),
            json!({ "candidates": null }),
            json!({ "candidates": [] }),
            json!({ "candidates": [ {} ] }),
            json!({ "candidates": [ { "content": {} } ] }),
            json!({ "candidates": [ { "content": { "parts": [] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": "" } ] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": " \n\t" } ] } } ] }),
        ] {
            assert_eq!(extract_text(&parse(v.clone())), None, "input: {v}");
        }
    }

    #[test]
    fn later_parts_are_not_consulted() {
        let env = parse(json!({
            "candidates": [ { "content": { "parts": [ { "text": "" }, { "text": "fallback?" } ] } } ]
        }));
        assert_eq!(extract_text(&env), None);
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest::new("hello", GenerationOptions::bounded(180));
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 180);
        assert_eq!(v["generationConfig"]["topP"].as_f64().map(|p| (p * 100.0).round()), Some(95.0));
        assert_eq!(v["generationConfig"]["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
    }

    #[test]
    fn single_text_round_trips_through_extractor() {
        assert_eq!(
            extract_text(&UpstreamEnvelope::single_text(" hi ")).as_deref(),
            Some("hi")
        );
    }
}
