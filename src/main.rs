use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine: variables may come from the real environment.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level(telemetry::DEFAULT_DIRECTIVES, Level::INFO))
        .with(telemetry::layer())
        .try_init()?;

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, ".env could not be loaded");
        }
    }

    api::start().await?;

    Ok(())
}
