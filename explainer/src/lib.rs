//! Child-friendly explanation pipeline.
//!
//! [`Explainer::explain`] always returns a result: the answer degrades to a
//! local template when the model yields nothing, and follow-up questions
//! degrade to an empty list. Upstream calls are issued one after another:
//! answer, optional translation, related questions.

pub mod api_types;
pub mod fallback;
pub mod observer;
pub mod prompt;
pub mod related;

use std::sync::Arc;

use ai_llm_service::config::generation_options::GenerationOptions;
use ai_llm_service::envelope::extract_text;
use ai_llm_service::error_handler::GenerationError;
use ai_llm_service::generative_client::GenerativeClient;
use tracing::{debug, instrument};

use crate::api_types::{ExplainRequest, ExplainResult};
use crate::fallback::template_answer;
use crate::observer::{GenerationObserver, GenerationTask, TracingObserver};
use crate::prompt::{build_explain_prompt, build_related_prompt, build_translate_prompt};
use crate::related::extract_related;

/// Output bound for the follow-up questions call.
pub const RELATED_MAX_OUTPUT_TOKENS: u32 = 200;

/// Orchestrates the upstream calls and the fallbacks for one request.
#[derive(Clone)]
pub struct Explainer {
    client: Arc<dyn GenerativeClient>,
    observer: Arc<dyn GenerationObserver>,
}

impl Explainer {
    /// Explainer reporting through [`TracingObserver`].
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self::with_observer(client, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        client: Arc<dyn GenerativeClient>,
        observer: Arc<dyn GenerationObserver>,
    ) -> Self {
        Self { client, observer }
    }

    #[instrument(skip_all, fields(age = req.age(), length = %req.length(), lang = %req.language()))]
    pub async fn explain(&self, req: &ExplainRequest) -> ExplainResult {
        let bound = GenerationOptions::bounded(req.length().profile().max_output_tokens);

        let prompt = build_explain_prompt(req.question(), req.age(), req.length());
        let answer = match self
            .generate_text(GenerationTask::Explain, &prompt, bound)
            .await
        {
            Some(text) => text,
            None => {
                debug!("using template answer");
                template_answer(req.question(), req.age(), req.length())
            }
        };

        let answer = if req.language().is_english() {
            answer
        } else {
            let prompt = build_translate_prompt(&answer, req.language());
            self.generate_text(GenerationTask::Translate, &prompt, bound)
                .await
                .unwrap_or(answer)
        };

        let related = self.related_questions(req).await;
        debug!(related = related.len(), "explain finished");

        ExplainResult { answer, related }
    }

    async fn related_questions(&self, req: &ExplainRequest) -> Vec<String> {
        let prompt = build_related_prompt(req.question(), req.age(), req.length(), req.language());
        let options = GenerationOptions::bounded(RELATED_MAX_OUTPUT_TOKENS);

        let Some(text) = self
            .generate_text(GenerationTask::Related, &prompt, options)
            .await
        else {
            return Vec::new();
        };

        extract_related(&text).unwrap_or_else(|| {
            self.observer.on_extraction_failed();
            Vec::new()
        })
    }

    /// One upstream call reduced to its first text part. Every failure is
    /// reported to the observer and collapsed to `None`.
    async fn generate_text(
        &self,
        task: GenerationTask,
        prompt: &str,
        options: GenerationOptions,
    ) -> Option<String> {
        let outcome = self
            .client
            .generate(prompt, options)
            .await
            .and_then(|envelope| {
                extract_text(&envelope).ok_or_else(|| {
                    GenerationError::Malformed("no text in first candidate part".to_string())
                })
            });

        match outcome {
            Ok(text) => {
                self.observer.on_success(task);
                Some(text)
            }
            Err(err) => {
                self.observer.on_failure(task, &err);
                None
            }
        }
    }
}
