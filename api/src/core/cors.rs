use axum::http::{HeaderValue, request::Parts};
use regex::Regex;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

/// Preview deployments of the web client.
pub const PREVIEW_ORIGIN_PATTERN: &str = r"^https://curio-mind-ai-.*\.vercel\.app$";

/// CORS for the web client: an explicit origin list plus preview deployments,
/// with credentials. Methods and headers are mirrored from the preflight
/// since wildcards are not allowed together with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<String> = allowed_origins.to_vec();
    let preview = match Regex::new(PREVIEW_ORIGIN_PATTERN) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, "preview origin pattern rejected");
            None
        }
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                is_allowed(origin, &origins, preview.as_ref())
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn is_allowed(origin: &HeaderValue, origins: &[String], preview: Option<&Regex>) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    origins.iter().any(|o| o == origin) || preview.is_some_and(|re| re.is_match(origin))
}
