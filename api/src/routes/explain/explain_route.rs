//! POST /explain: child-friendly explanation plus follow-up questions.

use std::sync::Arc;

use axum::{Json, extract::State};
use explainer::api_types::ExplainResult;
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::explain::explain_request::ExplainBody,
};

/// Handler: POST /explain
///
/// Never fails once the body validates: upstream problems degrade to the
/// template answer and an empty `related` list.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/explain \
///   -H 'content-type: application/json' \
///   -d '{"question":"Why is the sky blue?","age":8,"length":"Short","language":"en"}'
/// ```
#[instrument(name = "explain_route", skip_all)]
pub async fn explain(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExplainBody>,
) -> AppResult<Json<ExplainResult>> {
    let req = body.validate()?;
    let result = state.explainer.explain(&req).await;
    info!(related = result.related.len(), "explanation served");
    Ok(Json(result))
}
