//! Hooks for reporting what happened to each upstream call.
//!
//! The pipeline never lets a generation failure escape; it reports it here and
//! degrades. Implementations must be cheap and must not block.

use ai_llm_service::error_handler::GenerationError;
use tracing::{debug, warn};

/// Which upstream call an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTask {
    Explain,
    Translate,
    Related,
}

impl GenerationTask {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationTask::Explain => "explain",
            GenerationTask::Translate => "translate",
            GenerationTask::Related => "related",
        }
    }
}

/// Observer of generation outcomes. All methods default to no-ops.
pub trait GenerationObserver: Send + Sync {
    fn on_success(&self, _task: GenerationTask) {}

    fn on_failure(&self, _task: GenerationTask, _err: &GenerationError) {}

    /// Related-question text came back but no question could be recovered.
    fn on_extraction_failed(&self) {}
}

/// Discards every event.
#[derive(Default, Clone, Copy)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Logs through `tracing`. Missing credentials are expected in local mode
/// and only logged at debug.
#[derive(Default, Clone, Copy)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn on_success(&self, task: GenerationTask) {
        debug!(task = task.as_str(), "generation succeeded");
    }

    fn on_failure(&self, task: GenerationTask, err: &GenerationError) {
        match err {
            GenerationError::ConfigAbsent => {
                debug!(task = task.as_str(), "no credential; using local fallback")
            }
            other => warn!(
                task = task.as_str(),
                kind = ?other.kind(),
                error = %other,
                "generation failed; degrading"
            ),
        }
    }

    fn on_extraction_failed(&self) {
        warn!("related questions could not be extracted");
    }
}
